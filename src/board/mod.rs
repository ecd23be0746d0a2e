//! Board representation and move rules.

mod grid;

pub use grid::{Board, ParseBoardError, Score};

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

/// Cells per board edge.
pub const SIZE: usize = 8;
/// Cells on the board.
pub const NUM_CELLS: usize = SIZE * SIZE;

/// Side to move. Dark always opens the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    #[inline]
    pub fn opponent(self) -> Color {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }

    /// +1 for Light (the maximizing side of the search), -1 for Dark.
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Dark => f.write_str("Dark"),
            Color::Light => f.write_str("Light"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    #[default]
    Empty,
    Dark,
    Light,
}

impl Cell {
    #[inline]
    pub fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::Dark => Some(Color::Dark),
            Cell::Light => Some(Color::Light),
        }
    }
}

impl From<Color> for Cell {
    fn from(color: Color) -> Self {
        match color {
            Color::Dark => Cell::Dark,
            Color::Light => Cell::Light,
        }
    }
}

/// A cell position, 0-indexed from the upper-left corner. Always on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawCoord")]
pub struct Coord {
    row: u8,
    col: u8,
}

/// Unchecked wire form of a [`Coord`].
#[derive(Deserialize)]
struct RawCoord {
    row: usize,
    col: usize,
}

impl TryFrom<RawCoord> for Coord {
    type Error = GameError;

    fn try_from(raw: RawCoord) -> Result<Self, Self::Error> { Coord::new(raw.row, raw.col) }
}

impl Coord {
    pub const CORNERS: [Coord; 4] = [
        Coord { row: 0, col: 0 },
        Coord { row: 0, col: 7 },
        Coord { row: 7, col: 0 },
        Coord { row: 7, col: 7 },
    ];

    /// Bounds-checked constructor for coordinates coming from outside the core.
    pub fn new(row: usize, col: usize) -> Result<Self, GameError> {
        if row >= SIZE || col >= SIZE { return Err(GameError::OutOfBounds { row, col }); }
        Ok(Self { row: row as u8, col: col as u8 })
    }

    #[inline]
    pub fn row(self) -> usize { self.row as usize }
    #[inline]
    pub fn col(self) -> usize { self.col as usize }

    /// Row-major index: 0 for the upper-left, 63 for the lower-right.
    #[inline]
    pub fn index(self) -> usize {
        self.row as usize * SIZE + self.col as usize
    }

    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < NUM_CELLS);
        Self { row: (index / SIZE) as u8, col: (index % SIZE) as u8 }
    }

    /// All cells in row-major scan order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..NUM_CELLS).map(Coord::from_index)
    }

    #[inline]
    pub fn is_corner(self) -> bool {
        (self.row == 0 || self.row == 7) && (self.col == 0 || self.col == 7)
    }

    /// Step one cell in direction `(dr, dc)`, or None off the edge.
    #[inline]
    pub(crate) fn step(self, dr: i8, dc: i8) -> Option<Coord> {
        let r = self.row as i8 + dr;
        let c = self.col as i8 + dc;
        if (0..SIZE as i8).contains(&r) && (0..SIZE as i8).contains(&c) {
            Some(Coord { row: r as u8, col: c as u8 })
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate string")]
pub struct ParseCoordError;

/// Parse algebraic notation: column letter then 1-based row ("D3").
impl std::str::FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let col_ch = chars.next().ok_or(ParseCoordError)?.to_ascii_uppercase();
        let col = "ABCDEFGH".find(col_ch).ok_or(ParseCoordError)?;
        let row = chars.next().and_then(|c| c.to_digit(10)).ok_or(ParseCoordError)? as usize;
        if chars.next().is_some() || row == 0 { return Err(ParseCoordError); }
        Coord::new(row - 1, col).map_err(|_| ParseCoordError)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = "ABCDEFGH".chars().nth(self.col as usize).ok_or(fmt::Error)?;
        f.write_char(col)?;
        write!(f, "{}", self.row + 1)
    }
}
