//! Turn-level game logic on top of [`Board`]: whose move it is, passes, and the end of the game.

use crate::board::{Board, Color, Coord, Score};
use crate::error::GameError;
use log::debug;
use serde::{Deserialize, Serialize};

/// How the turn resolved after a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// The opponent is to move.
    Ongoing,
    /// The opponent had no legal move; the mover goes again.
    Pass,
    /// Neither side can move.
    GameOver,
}

/// One applied placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub color: Color,
    pub at: Coord,
    pub flipped: Vec<Coord>,
    pub status: Status,
}

/// Authoritative state of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchState {
    board: Board,
    to_move: Color,
    result: Option<Score>,
}

impl Default for MatchState {
    fn default() -> Self {
        Self { board: Board::new(), to_move: Color::Dark, result: None }
    }
}

impl MatchState {
    pub fn new() -> Self { Self::default() }

    /// Start from an arbitrary position. If `to_move` cannot move but the opponent can, the
    /// opponent is to move; if neither can, the state is already over.
    pub fn from_position(board: Board, to_move: Color) -> Self {
        let mut state = Self { board, to_move, result: None };
        if !board.has_legal_move(to_move) {
            if board.has_legal_move(to_move.opponent()) {
                debug!("{} cannot move in the given position, {} moves first", to_move, to_move.opponent());
                state.to_move = to_move.opponent();
            } else {
                state.result = Some(board.score());
            }
        }
        state
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn to_move(&self) -> Color { self.to_move }
    pub fn is_over(&self) -> bool { self.result.is_some() }
    /// Final counts, once the match is over.
    pub fn result(&self) -> Option<Score> { self.result }

    pub fn status(&self) -> Status {
        if self.is_over() { Status::GameOver } else { Status::Ongoing }
    }

    /// Place a stone for the side to move, then resolve the turn:
    /// normal turnover, forced pass, or game over, checked in that order.
    pub fn play(&mut self, at: Coord) -> Result<MoveOutcome, GameError> {
        if self.is_over() { return Err(GameError::MatchOver); }
        let mover = self.to_move;
        let flipped = self.board.apply_move(at, mover)?;

        let status = if self.board.has_legal_move(mover.opponent()) {
            self.to_move = mover.opponent();
            Status::Ongoing
        } else if self.board.has_legal_move(mover) {
            Status::Pass
        } else {
            self.result = Some(self.board.score());
            Status::GameOver
        };
        debug!("{} plays {} flipping {} ({:?})", mover, at, flipped.len(), status);

        Ok(MoveOutcome { color: mover, at, flipped, status })
    }
}
