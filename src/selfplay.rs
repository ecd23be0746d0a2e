//! Computer-vs-computer games, used for tuning levels and as fixture data.

use crate::board::{Color, Score};
use crate::config::EngineConfig;
use crate::game::MatchState;
use crate::search::level::Difficulty;
use crate::search::player::ComputerPlayer;
use anyhow::Context;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct SelfPlayParams {
    pub games: usize,
    pub dark_level: Difficulty,
    pub light_level: Difficulty,
    pub seed: u64,
    pub engine: EngineConfig,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self { games: 10, dark_level: Difficulty::from_level(2), light_level: Difficulty::from_level(2), seed: 42, engine: EngineConfig::default() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub index: usize,
    pub dark_level: Difficulty,
    pub light_level: Difficulty,
    /// Placements in play order, algebraic notation. Passes are implicit.
    pub moves: Vec<String>,
    pub score: Score,
    pub winner: Option<Color>,
}

/// Play one game to the end. Deterministic in `(params.seed, index)`.
pub fn play_game(params: &SelfPlayParams, index: usize) -> anyhow::Result<GameRecord> {
    let base = params.seed ^ (index as u64).wrapping_mul(0x2545_F491_4F6C_DD1D);
    let mut dark = ComputerPlayer::new(params.dark_level, &params.engine, Some(base));
    let mut light = ComputerPlayer::new(params.light_level, &params.engine, Some(base.rotate_left(17)));
    let mut state = MatchState::new();
    let mut moves = Vec::new();
    while !state.is_over() {
        let to_move = state.to_move();
        let player = if to_move == Color::Dark { &mut dark } else { &mut light };
        let at = player.choose_move(state.board(), to_move).with_context(|| format!("game {} ply {}", index, moves.len()))?;
        state.play(at).with_context(|| format!("game {} playing {}", index, at))?;
        moves.push(at.to_string());
    }
    let score = state.result().unwrap_or_else(|| state.board().score());
    Ok(GameRecord { index, dark_level: params.dark_level, light_level: params.light_level, moves, score, winner: score.leader() })
}

/// Play `params.games` games in parallel; `on_done` runs once per finished game.
pub fn generate_games_with<F>(params: &SelfPlayParams, on_done: F) -> anyhow::Result<Vec<GameRecord>>
where
    F: Fn() + Sync,
{
    (0..params.games)
        .into_par_iter()
        .map(|i| {
            let r = play_game(params, i);
            on_done();
            r
        })
        .collect()
}

pub fn generate_games(params: &SelfPlayParams) -> anyhow::Result<Vec<GameRecord>> {
    generate_games_with(params, || {})
}

/// One JSON object per line.
pub fn write_records<P: AsRef<Path>>(games: &[GameRecord], path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
    }
    let mut w = BufWriter::new(File::create(path).with_context(|| format!("creating {}", path.display()))?);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_records<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<GameRecord>> {
    let path = path.as_ref();
    let f = BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    let mut out = Vec::new();
    for (n, line) in f.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec = serde_json::from_str(&line).with_context(|| format!("{} line {}", path.display(), n + 1))?;
        out.push(rec);
    }
    Ok(out)
}
