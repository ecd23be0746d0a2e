//! Othello rules, a match registry, and an alpha-beta computer opponent.

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod perft;
pub mod registry;
pub mod search;
pub mod selfplay;

pub use board::{Board, Cell, Color, Coord, Score};
pub use config::EngineConfig;
pub use error::GameError;
pub use game::{MatchState, MoveOutcome, Status};
pub use registry::{MatchId, MoveReport, Registry, Snapshot};
pub use search::level::Difficulty;
