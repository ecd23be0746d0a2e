use serde::{Deserialize, Serialize};

/// Level served by the one-ply noisy player instead of a full search.
pub const FAST_LEVEL: u8 = 1;

/// Search depth for levels played with alpha-beta. Unlisted levels use DEFAULT_DEPTH.
const DEPTH_TABLE: [(u8, u32); 4] = [(2, 1), (3, 3), (4, 5), (5, 7)];

pub const DEFAULT_DEPTH: u32 = 4;

/// Computer strength. Any level is accepted; levels without a table entry play at DEFAULT_DEPTH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Difficulty(u8);

impl Difficulty {
    pub fn from_level(level: u8) -> Self { Self(level) }
    pub fn level(self) -> u8 { self.0 }
    pub fn is_fast(self) -> bool { self.0 == FAST_LEVEL }

    /// Alpha-beta depth, or None for the fast level.
    pub fn search_depth(self) -> Option<u32> {
        if self.is_fast() { return None; }
        let depth = DEPTH_TABLE.iter().find(|(l, _)| *l == self.0).map(|(_, d)| *d);
        Some(depth.unwrap_or(DEFAULT_DEPTH))
    }
}

impl Default for Difficulty {
    fn default() -> Self { Self(3) }
}

impl From<u8> for Difficulty {
    fn from(level: u8) -> Self { Self(level) }
}
