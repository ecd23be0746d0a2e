use crate::board::{Board, Color, Coord};
use crate::search::eval::evaluate_for;
use rand::rngs::SmallRng;
use rand::Rng;

/// One-ply noisy choice for the fast level.
/// With probability `random_move_probability` any legal move is taken; otherwise the move
/// whose resulting board evaluates best for the mover, ties broken uniformly.
pub fn choose_fast(board: &Board, to_move: Color, legal: &[Coord], rng: &mut SmallRng, random_move_probability: f64) -> Option<Coord> {
    if legal.is_empty() { return None; }
    let p = random_move_probability.clamp(0.0, 1.0);
    if p > 0.0 && rng.gen_bool(p) {
        return Some(legal[rng.gen_range(0..legal.len())]);
    }

    let mut best_score = i32::MIN;
    let mut pool: Vec<Coord> = Vec::new();
    for &at in legal {
        let mut child = *board;
        if child.apply_move(at, to_move).is_err() { continue; }
        let s = evaluate_for(&child, to_move);
        if s > best_score {
            best_score = s;
            pool.clear();
            pool.push(at);
        } else if s == best_score {
            pool.push(at);
        }
    }
    // Nothing applied: the caller passed stale moves
    if pool.is_empty() { return Some(legal[0]); }
    Some(pool[rng.gen_range(0..pool.len())])
}
