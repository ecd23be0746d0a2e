use crate::board::{Board, Color, Coord};

// Scores are from Light's point of view: positive means Light is better.
#[rustfmt::skip]
const POSITION_WEIGHTS: [[i32; 8]; 8] = [
    [100, -20,  10,   5,   5,  10, -20, 100],
    [-20, -50,  -2,  -2,  -2,  -2, -50, -20],
    [ 10,  -2,   1,   1,   1,   1,  -2,  10],
    [  5,  -2,   1,   0,   0,   1,  -2,   5],
    [  5,  -2,   1,   0,   0,   1,  -2,   5],
    [ 10,  -2,   1,   1,   1,   1,  -2,  10],
    [-20, -50,  -2,  -2,  -2,  -2, -50, -20],
    [100, -20,  10,   5,   5,  10, -20, 100],
];

/// Bonus per corner held.
pub const CORNER_BONUS: i32 = 25;

/// Game phase, bucketed by stones on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Early,
    Mid,
    Late,
}

impl Phase {
    pub fn of(board: &Board) -> Phase {
        match board.stone_count() {
            0..=19 => Phase::Early,
            20..=49 => Phase::Mid,
            _ => Phase::Late,
        }
    }

    pub fn weights(self) -> Weights {
        match self {
            Phase::Early => Weights { position: 3, stones: 1, mobility: 8, corners: 2, frontier: 4 },
            Phase::Mid => Weights { position: 2, stones: 2, mobility: 5, corners: 3, frontier: 3 },
            Phase::Late => Weights { position: 1, stones: 8, mobility: 2, corners: 6, frontier: 1 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Weights {
    pub position: i32,
    pub stones: i32,
    pub mobility: i32,
    pub corners: i32,
    pub frontier: i32,
}

/// The five raw terms, each Light minus Dark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Terms {
    pub position: i32,
    pub stones: i32,
    pub mobility: i32,
    pub corners: i32,
    pub frontier: i32,
}

pub fn terms(board: &Board) -> Terms {
    let mut position = 0;
    for c in Coord::all() {
        if let Some(color) = board.get(c).color() {
            position += color.sign() * POSITION_WEIGHTS[c.row()][c.col()];
        }
    }
    Terms {
        position,
        stones: diff(|c| board.count(c) as i32),
        mobility: diff(|c| board.mobility(c) as i32),
        corners: diff(|c| board.corner_count(c) as i32) * CORNER_BONUS,
        // Frontier stones are a liability
        frontier: -diff(|c| board.frontier_count(c) as i32),
    }
}

#[inline]
fn diff(f: impl Fn(Color) -> i32) -> i32 { f(Color::Light) - f(Color::Dark) }

/// Static evaluation from Light's perspective, weighted by game phase.
/// Recoloring the board negates the result exactly.
pub fn evaluate(board: &Board) -> i32 {
    let t = terms(board);
    let w = Phase::of(board).weights();
    w.position * t.position
        + w.stones * t.stones
        + w.mobility * t.mobility
        + w.corners * t.corners
        + w.frontier * t.frontier
}

/// Evaluation from the point of view of `color`.
#[inline]
pub fn evaluate_for(board: &Board, color: Color) -> i32 {
    color.sign() * evaluate(board)
}
