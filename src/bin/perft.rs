use anyhow::Context;
use clap::Parser;
use othellobot::perft::{divide, perft};
use othellobot::{Board, Color};
use rayon::prelude::*;
use std::str::FromStr;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Perft driver for OthelloBot")]
struct Args {
    /// Search depth
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// 64-character board (X dark, O light, - empty) or "startpos"
    #[arg(value_name = "BOARD", default_value = "startpos")]
    board: String,
    /// Side to move: 'd' or 'l'
    #[arg(long, default_value = "d")]
    to_move: String,
    /// Number of threads for root-split
    #[arg(long, default_value_t = 1)]
    threads: usize,
    /// Print per-move counts
    #[arg(long, default_value_t = false)]
    divide: bool,
    /// Report elapsed time and NPS
    #[arg(long, default_value_t = false)]
    nps: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = if args.board == "startpos" {
        Board::new()
    } else {
        Board::from_str(&args.board).context("invalid board string")?
    };
    let to_move = match args.to_move.as_str() {
        "d" | "dark" => Color::Dark,
        "l" | "light" => Color::Light,
        other => anyhow::bail!("invalid side to move: {}", other),
    };

    if args.divide {
        for (at, n) in divide(&board, to_move, args.depth) { println!("{}: {}", at, n); }
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(args.threads.max(1)).build()?;
    let t0 = Instant::now();
    let nodes = pool.install(|| {
        if args.threads <= 1 || args.depth < 2 || !board.has_legal_move(to_move) {
            return perft(&board, to_move, args.depth);
        }
        // Root split; per-move counts are independent
        board
            .legal_moves(to_move)
            .par_iter()
            .map(|&at| {
                let mut child = board;
                match child.apply_move(at, to_move) {
                    Ok(_) => perft(&child, to_move.opponent(), args.depth - 1),
                    Err(_) => 0,
                }
            })
            .sum::<u64>()
    });
    let dt = t0.elapsed().as_secs_f64();
    if args.nps {
        let nps = if dt > 0.0 { nodes as f64 / dt } else { f64::INFINITY };
        println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);
    } else {
        println!("nodes: {}", nodes);
    }
    Ok(())
}
