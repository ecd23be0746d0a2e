//! Engine configuration shared by every computer player a registry creates.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Transposition cache entries per computer player.
    pub tt_capacity: usize,
    /// Root-split worker threads; 1 searches serially.
    pub threads: usize,
    pub order_moves: bool,
    pub use_tt: bool,
    /// Chance that the fast level plays a uniformly random legal move.
    pub random_move_probability: f64,
    /// Base seed. Each match derives its own seed from it; None draws from entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { tt_capacity: 65_536, threads: 1, order_moves: true, use_tt: true, random_move_probability: 0.1, seed: None }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("parsing engine config")
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }

    /// Seed for the `n`th computer player, if a base seed is set.
    pub fn derived_seed(&self, n: u64) -> Option<u64> {
        self.seed.map(|s| s ^ n.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}
