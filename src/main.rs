use anyhow::Result;
use clap::Parser;
use othellobot::board::Coord;
use othellobot::{Color, Difficulty, EngineConfig, MoveReport, Registry, Status};
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

const IDENTITY: &str = "console";

#[derive(Parser, Debug)]
#[command(author, version, about = "Play Othello against the computer", long_about = None)]
struct Args {
    /// Computer level: 1 is the fast level, 2-5 search 1, 3, 5, 7 plies
    #[arg(long, default_value_t = 3)]
    level: u8,

    /// Your color: 'd' for dark (moves first), 'l' for light
    #[arg(long, default_value = "d")]
    color: String,

    /// Engine configuration (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base seed for the computer's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Print each move report as JSON
    #[arg(long)]
    json: bool,
}

fn parse_color(s: &str) -> Result<Color> {
    match s.to_lowercase().as_str() {
        "d" | "dark" | "x" | "black" => Ok(Color::Dark),
        "l" | "light" | "o" | "white" => Ok(Color::Light),
        _ => anyhow::bail!("Invalid color: use 'd' or 'l'"),
    }
}

fn print_report(report: &MoveReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }
    for p in &report.plies {
        println!("{} plays {} ({} flipped)", p.color, p.at, p.flipped.len());
        if p.status == Status::Pass { println!("{} has no move and passes", p.color.opponent()); }
    }
    Ok(())
}

fn read_move() -> Result<Option<String>> {
    print!("Enter your move (e.g., D3), or 'quit': ");
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 { return Ok(None); }
    Ok(Some(input.trim().to_string()))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let human = parse_color(&args.color)?;

    let mut config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() { config.seed = args.seed; }

    let registry = Registry::new(config);
    let id = registry.create_match();
    let level = Difficulty::from_level(args.level);
    if human == Color::Dark {
        registry.seat(id, IDENTITY, "You")?;
        registry.attach_computer_opponent(id, level)?;
    } else {
        // Computer opens as Dark, then the human takes the remaining seat
        let attached = registry.attach_computer_opponent_as(id, level, Color::Dark)?;
        registry.seat(id, IDENTITY, "You")?;
        print_report(&attached.report, args.json)?;
    }

    loop {
        let snap = registry.snapshot(id)?;
        println!("\n{}", snap.board);
        println!("Light {}  Dark {}", snap.score.light, snap.score.dark);
        if snap.status == Status::GameOver {
            match snap.score.leader() {
                Some(c) if c == human => println!("\nYou win!"),
                Some(_) => println!("\nThe computer wins."),
                None => println!("\nThe game is a draw."),
            }
            break;
        }

        let Some(input) = read_move()? else { break };
        if input.eq_ignore_ascii_case("quit") { break; }
        let at = match Coord::from_str(&input) {
            Ok(at) => at,
            Err(_) => {
                println!("Invalid move format! Use a column letter and row number like 'D3'");
                continue;
            }
        };
        match registry.submit_move(id, IDENTITY, at) {
            Ok(report) => print_report(&report, args.json)?,
            Err(e) => println!("Illegal move: {}", e),
        }
    }
    Ok(())
}
