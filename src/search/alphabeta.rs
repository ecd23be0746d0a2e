use crate::board::{Board, Color, Coord};
use crate::search::eval::evaluate;
use crate::search::tt::{Bound, Entry, Key, Tt};
use log::debug;
use rayon::prelude::*;
use std::sync::Arc;

/// Larger than any reachable evaluation.
pub const INF: i32 = 1_000_000;

/// Move-ordering bonus for a corner placement.
const CORNER_ORDER_BONUS: i32 = 1_000;

#[derive(Debug, Clone, Copy)]
pub struct SearchParams {
    pub depth: u32,
    pub use_tt: bool,
    pub order_moves: bool,
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { depth: 4, use_tt: true, order_moves: true, threads: 1 }
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best: Option<Coord>,
    /// Minimax value from Light's perspective.
    pub score: i32,
    pub nodes: u64,
}

/// A legal placement with its captures, computed once per node.
#[derive(Debug, Clone)]
struct Candidate {
    at: Coord,
    flipped: Vec<Coord>,
}

fn candidates(board: &Board, color: Color) -> Vec<Candidate> {
    Coord::all()
        .filter_map(|at| {
            let flipped = board.flips(at, color);
            if flipped.is_empty() { None } else { Some(Candidate { at, flipped }) }
        })
        .collect()
}

/// Cheap ordering proxy, signed toward the maximizing side (Light).
fn order_score(c: &Candidate, mover: Color) -> i32 {
    let bonus = if c.at.is_corner() { CORNER_ORDER_BONUS } else { 0 };
    mover.sign() * (bonus + c.flipped.len() as i32)
}

/// Depth-bounded minimax with alpha-beta pruning. Light maximizes, Dark minimizes.
pub struct Searcher {
    tt: Arc<Tt>,
    pub(crate) nodes: u64,
    use_tt: bool,
    order_moves: bool,
    threads: usize,
}

impl Default for Searcher {
    fn default() -> Self { Self::with_tt_capacity(65_536) }
}

impl Searcher {
    pub fn with_tt_capacity(entries: usize) -> Self {
        Self { tt: Arc::new(Tt::with_capacity(entries)), nodes: 0, use_tt: true, order_moves: true, threads: 1 }
    }

    pub fn set_threads(&mut self, n: usize) { self.threads = n.max(1); }
    pub fn get_threads(&self) -> usize { self.threads }
    pub fn tt(&self) -> &Tt { &self.tt }

    /// Search with the current settings.
    pub fn search(&mut self, board: &Board, to_move: Color, depth: u32) -> SearchResult {
        self.nodes = 0;
        self.tt.bump_generation();
        let maximizing = to_move == Color::Light;
        let (score, best) = if self.threads > 1 && depth > 1 {
            self.search_root_parallel(board, to_move, depth, maximizing)
        } else {
            self.minimax(board, to_move, depth, -INF, INF, maximizing)
        };
        debug!("search {} depth {}: best {:?} score {} nodes {}", to_move, depth, best, score, self.nodes);
        SearchResult { best, score, nodes: self.nodes }
    }

    pub fn search_with_params(&mut self, board: &Board, to_move: Color, params: SearchParams) -> SearchResult {
        self.use_tt = params.use_tt;
        self.order_moves = params.order_moves;
        self.threads = params.threads.max(1);
        self.search(board, to_move, params.depth)
    }

    /// Cached entry for the root node at `depth`, if any.
    pub fn tt_probe(&self, board: &Board, to_move: Color, depth: u32) -> Option<(i32, Option<Coord>, Bound)> {
        let key = Key::new(board, to_move, depth, to_move == Color::Light);
        self.tt.get(&key).map(|e| (e.score, e.best, e.bound))
    }

    /// Root moves in the order the search would visit them.
    pub fn debug_order(&self, board: &Board, to_move: Color, depth: u32) -> Vec<Coord> {
        let maximizing = to_move == Color::Light;
        let key = Key::new(board, to_move, depth, maximizing);
        self.ordered(board, to_move, maximizing, &key).into_iter().map(|c| c.at).collect()
    }

    fn ordered(&self, board: &Board, to_move: Color, maximizing: bool, key: &Key) -> Vec<Candidate> {
        let mut moves = candidates(board, to_move);
        if self.order_moves {
            // Stable sort: ties keep scan order
            if maximizing {
                moves.sort_by_key(|c| -order_score(c, to_move));
            } else {
                moves.sort_by_key(|c| order_score(c, to_move));
            }
        }
        // Cached best move first
        if self.use_tt {
            if let Some(best) = self.tt.get(key).and_then(|e| e.best) {
                if let Some(pos) = moves.iter().position(|c| c.at == best) {
                    let c = moves.remove(pos);
                    moves.insert(0, c);
                }
            }
        }
        moves
    }

    fn minimax(&mut self, board: &Board, to_move: Color, depth: u32, mut alpha: i32, mut beta: i32, maximizing: bool) -> (i32, Option<Coord>) {
        self.nodes += 1;
        if depth == 0 { return (evaluate(board), None); }

        let key = Key::new(board, to_move, depth, maximizing);
        if self.use_tt {
            if let Some(en) = self.tt.get(&key) {
                match en.bound {
                    Bound::Exact => return (en.score, en.best),
                    Bound::Lower => if en.score >= beta { return (en.score, en.best); },
                    Bound::Upper => if en.score <= alpha { return (en.score, en.best); },
                }
            }
        }

        let moves = self.ordered(board, to_move, maximizing, &key);
        if moves.is_empty() {
            // True game end: evaluate regardless of remaining depth
            if !board.has_legal_move(to_move.opponent()) { return (evaluate(board), None); }
            // Pass: same board, other side, one ply consumed
            let (score, _) = self.minimax(board, to_move.opponent(), depth - 1, alpha, beta, !maximizing);
            return (score, None);
        }

        let (orig_alpha, orig_beta) = (alpha, beta);
        let mut best = if maximizing { -INF } else { INF };
        let mut best_move: Option<Coord> = None;
        for c in moves {
            let mut child = *board;
            child.place(c.at, to_move, &c.flipped);
            let (score, _) = self.minimax(&child, to_move.opponent(), depth - 1, alpha, beta, !maximizing);
            if maximizing {
                if score > best || best_move.is_none() { best = score; best_move = Some(c.at); }
                alpha = alpha.max(best);
            } else {
                if score < best || best_move.is_none() { best = score; best_move = Some(c.at); }
                beta = beta.min(best);
            }
            if alpha >= beta { break; }
        }

        if self.use_tt {
            let bound = if best <= orig_alpha { Bound::Upper } else if best >= orig_beta { Bound::Lower } else { Bound::Exact };
            self.tt.put(Entry { key, score: best, best: best_move, bound, gen: 0 });
        }
        (best, best_move)
    }

    /// Root split: every root move gets a full-window search on its own worker.
    /// Reduction keeps candidate order so ties resolve as in the serial search.
    fn search_root_parallel(&mut self, board: &Board, to_move: Color, depth: u32, maximizing: bool) -> (i32, Option<Coord>) {
        let key = Key::new(board, to_move, depth, maximizing);
        let moves = self.ordered(board, to_move, maximizing, &key);
        if moves.is_empty() {
            // Nothing to split at a pass or terminal root
            return self.minimax(board, to_move, depth, -INF, INF, maximizing);
        }

        let shared_tt = self.tt.clone();
        let (use_tt, order_moves) = (self.use_tt, self.order_moves);
        let results: Vec<(Coord, i32, u64)> = moves
            .par_iter()
            .map(|c| {
                let mut child = *board;
                child.place(c.at, to_move, &c.flipped);
                let mut w = Searcher { tt: shared_tt.clone(), nodes: 0, use_tt, order_moves, threads: 1 };
                let (score, _) = w.minimax(&child, to_move.opponent(), depth - 1, -INF, INF, !maximizing);
                (c.at, score, w.nodes)
            })
            .collect();

        let mut best: Option<(Coord, i32)> = None;
        self.nodes += 1;
        for (at, score, nodes) in results {
            self.nodes += nodes;
            let better = match best {
                None => true,
                Some((_, b)) => if maximizing { score > b } else { score < b },
            };
            if better { best = Some((at, score)); }
        }
        match best {
            Some((at, score)) => {
                if use_tt { self.tt.put(Entry { key, score, best: Some(at), bound: Bound::Exact, gen: 0 }); }
                (score, Some(at))
            }
            None => (evaluate(board), None),
        }
    }
}
