use crate::board::{Board, Color, Coord};

/// Count leaf nodes `depth` plies below the position. A forced pass is a ply of its own;
/// a finished game is a leaf regardless of remaining depth.
pub fn perft(board: &Board, to_move: Color, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = board.legal_moves(to_move);
    if moves.is_empty() {
        if !board.has_legal_move(to_move.opponent()) { return 1; }
        return perft(board, to_move.opponent(), depth - 1);
    }
    if depth == 1 { return moves.len() as u64; }
    let mut nodes = 0u64;
    for at in moves {
        let mut child = *board;
        if child.apply_move(at, to_move).is_ok() {
            nodes += perft(&child, to_move.opponent(), depth - 1);
        }
    }
    nodes
}

/// Per-root-move breakdown, in scan order.
pub fn divide(board: &Board, to_move: Color, depth: u32) -> Vec<(Coord, u64)> {
    if depth == 0 { return Vec::new(); }
    board
        .legal_moves(to_move)
        .into_iter()
        .filter_map(|at| {
            let mut child = *board;
            child.apply_move(at, to_move).ok()?;
            Some((at, perft(&child, to_move.opponent(), depth - 1)))
        })
        .collect()
}
