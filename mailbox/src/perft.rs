use super::{generate_moves, Board, Move};

/// Counts the positions reachable from `board` in exactly `depth` plies, depth-first.
///
/// Every ply is played with [`Board::successor`], so this walks the same tree a
/// frontier expansion does, one branch at a time. No positions are merged, so
/// the count at each depth equals the frontier size at that depth.
///
/// # Example
/// ```
/// # use mailbox::{perft, Board};
/// let board = Board::default();
/// assert_eq!(perft(&board, 0), 1);
/// assert_eq!(perft(&board, 2), 400);
/// ```
pub fn perft(board: &Board, depth: usize) -> u64 {
    // Recursion limit; return 1, since we're fathoming this node.
    if depth == 0 {
        return 1;
    }

    let moves = generate_moves(board, board.turn());

    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .iter()
        .map(|&mv| perft(&board.successor(mv), depth - 1))
        .sum()
}

/// Like [`perft`], but reports the node count below each first move separately.
///
/// `depth` must be at least `1`; at depth `0` there are no first moves to split on.
pub fn split_perft(board: &Board, depth: usize) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }

    generate_moves(board, board.turn())
        .iter()
        .map(|&mv| (mv, perft(&board.successor(mv), depth - 1)))
        .collect()
}
