//! Arena of live matches. Callers hold only a [`MatchId`]; each match sits behind its own lock,
//! which is held for one whole submission including the computer's chained replies.

use crate::board::{Board, Color, Coord, Score};
use crate::config::EngineConfig;
use crate::error::GameError;
use crate::game::{MatchState, MoveOutcome, Status};
use crate::search::level::Difficulty;
use crate::search::player::ComputerPlayer;
use log::{debug, info, warn};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

pub type MatchId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Occupant {
    Human { identity: String, name: String },
    Computer { level: Difficulty },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub color: Color,
    pub occupant: Occupant,
}

impl Seat {
    fn is_identity(&self, identity: &str) -> bool {
        matches!(&self.occupant, Occupant::Human { identity: i, .. } if i == identity)
    }

    fn is_computer(&self) -> bool { matches!(self.occupant, Occupant::Computer { .. }) }
}

/// Everything that changed during one submission, ready to broadcast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub board: Board,
    pub to_move: Color,
    /// Every ply applied, the submitted one first, then any computer replies.
    pub plies: Vec<MoveOutcome>,
    pub status: Status,
    /// Final counts once the match is over.
    pub score: Option<Score>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub id: MatchId,
    pub board: Board,
    pub to_move: Color,
    pub seats: Vec<Seat>,
    pub status: Status,
    pub score: Score,
}

/// Result of seating a computer: its color and any moves it made straight away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attached {
    pub color: Color,
    pub report: MoveReport,
}

struct Match {
    state: MatchState,
    seats: Vec<Seat>,
    computer: Option<(Color, ComputerPlayer)>,
    /// How the most recent ply resolved, so a resync can still show a pass.
    last_status: Status,
}

impl Match {
    fn new(state: MatchState) -> Self {
        let last_status = state.status();
        Self { state, seats: Vec::with_capacity(2), computer: None, last_status }
    }

    fn free_color(&self, preference: [Color; 2]) -> Option<Color> {
        preference.into_iter().find(|c| self.seats.iter().all(|s| s.color != *c))
    }

    fn status(&self) -> Status {
        if self.state.is_over() { Status::GameOver } else { self.last_status }
    }

    /// Let the computer move for as long as it holds the turn. Plies already applied are kept
    /// even if a later one fails.
    fn run_computer(&mut self, id: MatchId, plies: &mut Vec<MoveOutcome>) {
        while !self.state.is_over() {
            let to_move = self.state.to_move();
            let player = match &mut self.computer {
                Some((color, player)) if *color == to_move => player,
                _ => break,
            };
            let played = player.choose_move(self.state.board(), to_move).and_then(|at| self.state.play(at));
            match played {
                Ok(outcome) => {
                    debug!("match {}: computer {} played {}", id, to_move, outcome.at);
                    plies.push(outcome);
                }
                Err(e) => {
                    warn!("match {}: computer {} could not move: {}", id, to_move, e);
                    break;
                }
            }
        }
    }

    /// Close out a submission: record the last status and build the report.
    fn finish(&mut self, id: MatchId, plies: Vec<MoveOutcome>) -> MoveReport {
        if let Some(last) = plies.last() { self.last_status = last.status; }
        if let Some(score) = self.state.result() {
            if !plies.is_empty() { info!("match {} over: light {} dark {}", id, score.light, score.dark); }
        }
        MoveReport { board: *self.state.board(), to_move: self.state.to_move(), plies, status: self.status(), score: self.state.result() }
    }
}

/// Registry of concurrent matches. `Send + Sync`; different matches never contend on the same lock.
pub struct Registry {
    matches: RwLock<HashMap<MatchId, Arc<Mutex<Match>>>>,
    config: EngineConfig,
    players_created: AtomicU64,
}

impl Default for Registry {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Registry {
    pub fn new(config: EngineConfig) -> Self {
        Self { matches: RwLock::new(HashMap::new()), config, players_created: AtomicU64::new(0) }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    fn handle(&self, id: MatchId) -> Result<Arc<Mutex<Match>>, GameError> {
        self.matches.read().get(&id).cloned().ok_or(GameError::UnknownMatch)
    }

    pub fn create_match(&self) -> MatchId { self.create_match_from(MatchState::new()) }

    /// Register a match starting from an existing state.
    pub fn create_match_from(&self, state: MatchState) -> MatchId {
        let id = Uuid::new_v4();
        self.matches.write().insert(id, Arc::new(Mutex::new(Match::new(state))));
        info!("match {} created", id);
        id
    }

    pub fn remove_match(&self, id: MatchId) -> Result<(), GameError> {
        self.matches.write().remove(&id).map(|_| ()).ok_or(GameError::UnknownMatch)
    }

    pub fn len(&self) -> usize { self.matches.read().len() }
    pub fn is_empty(&self) -> bool { self.matches.read().is_empty() }
    pub fn match_ids(&self) -> Vec<MatchId> { self.matches.read().keys().copied().collect() }

    /// Seat a human. Seating an identity twice returns its existing color.
    pub fn seat(&self, id: MatchId, identity: &str, name: &str) -> Result<Color, GameError> {
        let handle = self.handle(id)?;
        let mut m = handle.lock();
        if let Some(s) = m.seats.iter().find(|s| s.is_identity(identity)) { return Ok(s.color); }
        let color = m.free_color([Color::Dark, Color::Light]).ok_or(GameError::Full)?;
        m.seats.push(Seat { color, occupant: Occupant::Human { identity: identity.to_string(), name: name.to_string() } });
        info!("match {}: {} ({}) seated as {}", id, name, identity, color);
        Ok(color)
    }

    /// Clear a human seat. The game state is left untouched.
    pub fn remove_seat(&self, id: MatchId, identity: &str) -> Result<Color, GameError> {
        let handle = self.handle(id)?;
        let mut m = handle.lock();
        let pos = m.seats.iter().position(|s| s.is_identity(identity)).ok_or(GameError::NotSeated)?;
        let seat = m.seats.remove(pos);
        info!("match {}: {} left the {} seat", id, identity, seat.color);
        Ok(seat.color)
    }

    /// Seat a computer, preferring Light. Replaces any computer already seated.
    pub fn attach_computer_opponent(&self, id: MatchId, level: Difficulty) -> Result<Attached, GameError> {
        self.attach(id, level, [Color::Light, Color::Dark])
    }

    /// Seat a computer on a specific color.
    pub fn attach_computer_opponent_as(&self, id: MatchId, level: Difficulty, color: Color) -> Result<Attached, GameError> {
        self.attach(id, level, [color, color])
    }

    fn attach(&self, id: MatchId, level: Difficulty, preference: [Color; 2]) -> Result<Attached, GameError> {
        let handle = self.handle(id)?;
        let mut m = handle.lock();

        // Drop the previous computer, restoring it if no seat is free for the new one
        let previous = m.seats.iter().position(Seat::is_computer).map(|pos| m.seats.remove(pos));
        let color = match m.free_color(preference) {
            Some(c) => c,
            None => {
                if let Some(seat) = previous { m.seats.push(seat); }
                return Err(GameError::Full);
            }
        };

        let n = self.players_created.fetch_add(1, Ordering::Relaxed);
        let player = ComputerPlayer::new(level, &self.config, self.config.derived_seed(n));
        m.seats.push(Seat { color, occupant: Occupant::Computer { level } });
        m.computer = Some((color, player));
        info!("match {}: computer level {} seated as {}", id, level.level(), color);

        let mut plies = Vec::new();
        m.run_computer(id, &mut plies);
        let report = m.finish(id, plies);
        Ok(Attached { color, report })
    }

    /// Play `at` for the seat held by `identity`, then any computer replies.
    pub fn submit_move(&self, id: MatchId, identity: &str, at: Coord) -> Result<MoveReport, GameError> {
        let handle = self.handle(id)?;
        let mut m = handle.lock();
        let color = m.seats.iter().find(|s| s.is_identity(identity)).map(|s| s.color).ok_or(GameError::NotSeated)?;
        if m.state.is_over() { return Err(GameError::MatchOver); }
        if color != m.state.to_move() { return Err(GameError::OutOfTurn); }

        let outcome = m.state.play(at)?;
        let mut plies = vec![outcome];
        m.run_computer(id, &mut plies);
        Ok(m.finish(id, plies))
    }

    /// Same as [`submit_move`](Self::submit_move) for raw indices from the wire.
    pub fn submit_move_at(&self, id: MatchId, identity: &str, row: usize, col: usize) -> Result<MoveReport, GameError> {
        let at = Coord::new(row, col)?;
        self.submit_move(id, identity, at)
    }

    pub fn snapshot(&self, id: MatchId) -> Result<Snapshot, GameError> {
        let handle = self.handle(id)?;
        let m = handle.lock();
        let mut seats = m.seats.clone();
        seats.sort_by_key(|s| s.color == Color::Light);
        Ok(Snapshot {
            id,
            board: *m.state.board(),
            to_move: m.state.to_move(),
            seats,
            status: m.status(),
            score: m.state.board().score(),
        })
    }
}
