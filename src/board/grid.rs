use super::{Cell, Color, Coord, NUM_CELLS, SIZE};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[rustfmt::skip]
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Final or running stone counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub light: u32,
    pub dark: u32,
}

impl Score {
    /// Color with more stones, or None on a draw.
    pub fn leader(&self) -> Option<Color> {
        match self.dark.cmp(&self.light) {
            std::cmp::Ordering::Greater => Some(Color::Dark),
            std::cmp::Ordering::Less => Some(Color::Light),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// An 8x8 Othello grid. Copied by value; search clones it freely.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; SIZE]; SIZE],
}

impl Default for Board {
    /// The standard starting position.
    fn default() -> Self {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        cells[3][3] = Cell::Light;
        cells[4][4] = Cell::Light;
        cells[3][4] = Cell::Dark;
        cells[4][3] = Cell::Dark;
        Self { cells }
    }
}

impl Board {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn get(&self, at: Coord) -> Cell {
        self.cells[at.row as usize][at.col as usize]
    }

    #[inline]
    fn set(&mut self, at: Coord, cell: Cell) {
        self.cells[at.row as usize][at.col as usize] = cell;
    }

    /// Cells captured in a single direction: contiguous opposing stones closed by our own.
    fn run_length(&self, at: Coord, color: Color, (dr, dc): (i8, i8)) -> usize {
        let own = Cell::from(color);
        let theirs = Cell::from(color.opponent());
        let mut len = 0;
        let mut cur = at.step(dr, dc);
        while let Some(c) = cur {
            let cell = self.get(c);
            if cell == theirs {
                len += 1;
                cur = c.step(dr, dc);
            } else if cell == own {
                return len;
            } else {
                return 0;
            }
        }
        // Ran off the edge
        0
    }

    /// Every cell a placement of `color` at `at` would flip. Empty when the move is illegal.
    pub fn flips(&self, at: Coord, color: Color) -> Vec<Coord> {
        let mut out = Vec::new();
        if self.get(at) != Cell::Empty { return out; }
        for &dir in &DIRECTIONS {
            let len = self.run_length(at, color, dir);
            let mut cur = at;
            for _ in 0..len {
                match cur.step(dir.0, dir.1) {
                    Some(next) => { out.push(next); cur = next; }
                    None => break,
                }
            }
        }
        out
    }

    /// Number of stones a placement would flip, without materializing them.
    pub fn flip_count(&self, at: Coord, color: Color) -> usize {
        if self.get(at) != Cell::Empty { return 0; }
        DIRECTIONS.iter().map(|&dir| self.run_length(at, color, dir)).sum()
    }

    #[inline]
    pub fn is_legal(&self, at: Coord, color: Color) -> bool {
        self.get(at) == Cell::Empty && DIRECTIONS.iter().any(|&dir| self.run_length(at, color, dir) > 0)
    }

    /// Legal placements for `color` in row-major scan order.
    pub fn legal_moves(&self, color: Color) -> Vec<Coord> {
        Coord::all().filter(|&c| self.is_legal(c, color)).collect()
    }

    pub fn has_legal_move(&self, color: Color) -> bool {
        Coord::all().any(|c| self.is_legal(c, color))
    }

    pub fn mobility(&self, color: Color) -> usize {
        Coord::all().filter(|&c| self.is_legal(c, color)).count()
    }

    /// Place `color` at `at` and flip every captured run. Returns the flipped cells.
    pub fn apply_move(&mut self, at: Coord, color: Color) -> Result<Vec<Coord>, GameError> {
        if self.get(at) != Cell::Empty { return Err(GameError::CellOccupied); }
        let flipped = self.flips(at, color);
        if flipped.is_empty() { return Err(GameError::NoCapture); }
        self.place(at, color, &flipped);
        Ok(flipped)
    }

    /// Unchecked placement with precomputed flips.
    #[inline]
    pub(crate) fn place(&mut self, at: Coord, color: Color, flipped: &[Coord]) {
        let cell = Cell::from(color);
        self.set(at, cell);
        for &c in flipped { self.set(c, cell); }
    }

    pub fn count(&self, color: Color) -> u32 {
        let cell = Cell::from(color);
        self.cells.iter().flatten().filter(|&&c| c == cell).count() as u32
    }

    pub fn stone_count(&self) -> u32 {
        self.cells.iter().flatten().filter(|&&c| c != Cell::Empty).count() as u32
    }

    pub fn empty_count(&self) -> u32 { NUM_CELLS as u32 - self.stone_count() }

    pub fn score(&self) -> Score {
        Score { light: self.count(Color::Light), dark: self.count(Color::Dark) }
    }

    pub fn corner_count(&self, color: Color) -> u32 {
        let cell = Cell::from(color);
        Coord::CORNERS.iter().filter(|&&c| self.get(c) == cell).count() as u32
    }

    /// Stones of `color` touching at least one empty cell.
    pub fn frontier_count(&self, color: Color) -> u32 {
        let cell = Cell::from(color);
        Coord::all()
            .filter(|&c| self.get(c) == cell)
            .filter(|&c| DIRECTIONS.iter().any(|&(dr, dc)| c.step(dr, dc).map_or(false, |n| self.get(n) == Cell::Empty)))
            .count() as u32
    }

    /// Neither side can place a stone.
    pub fn is_terminal(&self) -> bool {
        !self.has_legal_move(Color::Dark) && !self.has_legal_move(Color::Light)
    }

    /// Canonical encoding as (dark, light) occupancy masks, bit `index` per cell.
    pub fn masks(&self) -> (u64, u64) {
        let mut dark = 0u64;
        let mut light = 0u64;
        for c in Coord::all() {
            match self.get(c) {
                Cell::Dark => dark |= 1 << c.index(),
                Cell::Light => light |= 1 << c.index(),
                Cell::Empty => {}
            }
        }
        (dark, light)
    }

    /// The same position with every stone recolored.
    pub fn swapped(&self) -> Board {
        let mut out = *self;
        for cell in out.cells.iter_mut().flatten() {
            *cell = match *cell {
                Cell::Dark => Cell::Light,
                Cell::Light => Cell::Dark,
                Cell::Empty => Cell::Empty,
            };
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("unexpected character {0:?} in board string")]
    BadCharacter(char),
    #[error("board string has {0} cells, expected 64")]
    WrongLength(usize),
}

/// Parse 64 cells in scan order: `X` Dark, `O` Light, `-` or `.` empty. Whitespace is ignored.
impl std::str::FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        let mut n = 0usize;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                'X' | 'x' => Cell::Dark,
                'O' | 'o' => Cell::Light,
                '-' | '.' => Cell::Empty,
                other => return Err(ParseBoardError::BadCharacter(other)),
            };
            if n < NUM_CELLS { cells[n / SIZE][n % SIZE] = cell; }
            n += 1;
        }
        if n != NUM_CELLS { return Err(ParseBoardError::WrongLength(n)); }
        Ok(Self { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   A B C D E F G H")?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "\n {} ", r + 1)?;
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '.',
                    Cell::Dark => 'X',
                    Cell::Light => 'O',
                };
                write!(f, "{} ", ch)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_start_position() {
        let s = "
            --------
            --------
            --------
            ---OX---
            ---XO---
            --------
            --------
            --------";
        let b: Board = s.parse().unwrap();
        assert_eq!(b, Board::new());
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("X".parse::<Board>(), Err(ParseBoardError::WrongLength(1)));
        let bad = format!("{}z", "-".repeat(63));
        assert_eq!(bad.parse::<Board>(), Err(ParseBoardError::BadCharacter('z')));
    }

    #[test]
    fn display_labels_rows_and_columns() {
        let text = Board::new().to_string();
        assert!(text.starts_with("   A B C D E F G H"));
        assert!(text.contains(" 4 . . . O X . . . "));
    }

    #[test]
    fn masks_are_disjoint() {
        let (dark, light) = Board::new().masks();
        assert_eq!(dark & light, 0);
        assert_eq!(dark.count_ones(), 2);
        assert_eq!(light.count_ones(), 2);
    }
}
