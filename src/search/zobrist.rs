use crate::board::{Board, Color, NUM_CELLS};
use std::sync::OnceLock;

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

static TABLE: OnceLock<[u64; 2 * NUM_CELLS]> = OnceLock::new();
static SIDE_KEY: OnceLock<u64> = OnceLock::new();

fn init_table() -> &'static [u64; 2 * NUM_CELLS] {
    TABLE.get_or_init(|| {
        let mut t = [0u64; 2 * NUM_CELLS];
        let mut seed = 0xF00D_F00D_DEAD_BEEF;
        for v in &mut t {
            seed = splitmix64(seed);
            *v = seed;
        }
        t
    })
}

fn init_side() -> u64 {
    *SIDE_KEY.get_or_init(|| splitmix64(0xABCDEF1234567890))
}

/// Position hash: one key per (color, cell), xored with a side key when Light is to move.
pub fn compute(board: &Board, to_move: Color) -> u64 {
    from_masks(board.masks(), to_move)
}

/// Same hash, computed from the (dark, light) occupancy masks.
pub fn from_masks((dark, light): (u64, u64), to_move: Color) -> u64 {
    let table = init_table();
    let mut key = 0u64;
    for (offset, mut bits) in [(0, dark), (NUM_CELLS, light)] {
        while bits != 0 {
            let idx = bits.trailing_zeros() as usize;
            key ^= table[offset + idx];
            bits &= bits - 1;
        }
    }
    if to_move == Color::Light { key ^= init_side(); }
    key
}

/// Fold search depth and perspective into a position hash.
pub fn with_search_context(position: u64, depth: u32, maximizing: bool) -> u64 {
    let ctx = splitmix64(((depth as u64) << 1) | maximizing as u64);
    position ^ ctx
}
