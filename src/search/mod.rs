pub mod alphabeta;
pub mod eval;
pub mod level;
pub mod noise;
pub mod player;
pub mod tt;
pub mod zobrist;
