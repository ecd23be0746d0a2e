use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use othellobot::selfplay::{generate_games_with, write_records, SelfPlayParams};
use othellobot::{Difficulty, EngineConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "othellobot-selfplay", about = "Play computer-vs-computer games and write JSON lines")]
struct Args {
    #[arg(long, default_value_t = 100)]
    games: usize,
    #[arg(long, default_value_t = 2)]
    dark_level: u8,
    #[arg(long, default_value_t = 2)]
    light_level: u8,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Worker threads for running games in parallel
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let engine = match &a.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    let params = SelfPlayParams {
        games: a.games,
        dark_level: Difficulty::from_level(a.dark_level),
        light_level: Difficulty::from_level(a.light_level),
        seed: a.seed,
        engine,
    };

    eprintln!("Generating {} games (dark level={}, light level={}, threads={})", a.games, a.dark_level, a.light_level, a.threads);
    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(ProgressStyle::with_template("{bar:40} {pos}/{len} games [{elapsed_precise}]")?);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(a.threads.max(1)).build()?;
    let games = pool.install(|| generate_games_with(&params, || pb.inc(1)))?;
    pb.finish();

    let dark_wins = games.iter().filter(|g| g.winner == Some(othellobot::Color::Dark)).count();
    let light_wins = games.iter().filter(|g| g.winner == Some(othellobot::Color::Light)).count();
    eprintln!("Dark {} Light {} Draw {}", dark_wins, light_wins, games.len() - dark_wins - light_wins);
    eprintln!("Writing records to {}", a.out.display());
    write_records(&games, &a.out)?;
    Ok(())
}
