use super::{
    Board, Color, Move, Offset, PieceKind, Rank, Square, BISHOP_OFFSETS, KING_OFFSETS,
    KNIGHT_OFFSETS, MAX_NUM_MOVES, QUEEN_OFFSETS, ROOK_OFFSETS,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// Appends every pseudo-legal move of the `color` piece standing on the given square.
type PieceMoveGen = fn(&Board, Square, Color, &mut MoveList);

/// Move generators, indexed by [`PieceKind`].
///
/// Supporting a new rule for a piece means swapping its entry here.
const GENERATORS: [PieceMoveGen; PieceKind::COUNT] = [
    pawn_moves,
    knight_moves,
    bishop_moves,
    rook_moves,
    queen_moves,
    king_moves,
];

/// Generates every pseudo-legal move available to `side` on `board`.
///
/// Pieces are visited in square order; each piece's moves are listed in the
/// order of its offset table, nearest square first along each ray. Nothing is
/// checked against leaving one's own King in check, and castling, en passant
/// and promotion do not exist.
///
/// # Example
/// ```
/// # use mailbox::{generate_moves, Board, Color};
/// let board = Board::default();
/// assert_eq!(generate_moves(&board, Color::White).len(), 20);
/// assert_eq!(generate_moves(&board, Color::Black).len(), 20);
/// ```
pub fn generate_moves(board: &Board, side: Color) -> MoveList {
    let mut moves = MoveList::new();

    for (square, piece) in board.all_for(side) {
        GENERATORS[piece.kind()](board, square, side, &mut moves);
    }

    moves
}

/// Generates the pseudo-legal moves of whichever piece stands on `square`, regardless of whose turn it is.
///
/// Returns an empty list if the square is empty.
pub fn generate_moves_for(board: &Board, square: Square) -> MoveList {
    let mut moves = MoveList::new();

    if let Some(piece) = board.piece_at(square) {
        GENERATORS[piece.kind()](board, square, piece.color(), &mut moves);
    }

    moves
}

/// Returns `true` if `mv` lands on a piece of the opposite color to the one moving.
pub fn is_capture(board: &Board, mv: Move) -> bool {
    match (board.piece_at(mv.from()), board.piece_at(mv.to())) {
        (Some(mover), Some(target)) => mover.color() != target.color(),
        _ => false,
    }
}

/// Returns `true` if `color` may finish a move on `to`: it is empty or held by the enemy.
fn is_enemy_or_empty(board: &Board, to: Square, color: Color) -> bool {
    board.color_at(to) != Some(color)
}

/// Single steps along each offset, as for the King and Knight.
fn jumper_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[Offset],
    moves: &mut MoveList,
) {
    for &offset in offsets {
        let Some(to) = from.offset(offset) else {
            continue;
        };

        if is_enemy_or_empty(board, to, color) {
            moves.push(Move::new(from, to));
        }
    }
}

/// Walks a ray along each offset until it is blocked, as for the Bishop, Rook and Queen.
///
/// An empty square is added and the walk continues. An enemy piece is added and
/// ends the ray. A friendly piece, the board edge, or a wraparound ends the ray
/// without adding anything.
fn slider_moves(
    board: &Board,
    from: Square,
    color: Color,
    offsets: &[Offset],
    moves: &mut MoveList,
) {
    for &offset in offsets {
        let mut square = from;

        while let Some(to) = square.offset(offset) {
            match board.color_at(to) {
                None => moves.push(Move::new(from, to)),
                Some(occupant) => {
                    if occupant != color {
                        moves.push(Move::new(from, to));
                    }
                    break;
                }
            }
            square = to;
        }
    }
}

fn king_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    jumper_moves(board, from, color, &KING_OFFSETS, moves)
}

fn knight_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    jumper_moves(board, from, color, &KNIGHT_OFFSETS, moves)
}

fn bishop_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    slider_moves(board, from, color, &BISHOP_OFFSETS, moves)
}

fn rook_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    slider_moves(board, from, color, &ROOK_OFFSETS, moves)
}

fn queen_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    slider_moves(board, from, color, &QUEEN_OFFSETS, moves)
}

/// Pushes onto empty squares, double pushes from the starting rank, and diagonal captures.
///
/// White pawns head for the top of the board (decreasing index), Black pawns
/// for the bottom. A pawn on its last rank has nowhere left to go.
fn pawn_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
    let (forward, captures) = match color {
        Color::White => (Offset::UP, [Offset::UP_LEFT, Offset::UP_RIGHT]),
        Color::Black => (Offset::DOWN, [Offset::DOWN_LEFT, Offset::DOWN_RIGHT]),
    };

    // The double push needs the single push to have gone through, so a blocked pawn can't jump
    if let Some(single) = from.offset(forward).filter(|&to| !board.has(to)) {
        moves.push(Move::new(from, single));

        if from.rank() == Rank::pawn_start(color) {
            if let Some(double) = single.offset(forward).filter(|&to| !board.has(to)) {
                moves.push(Move::new(from, double));
            }
        }
    }

    for offset in captures {
        let Some(to) = from.offset(offset) else {
            continue;
        };

        if board.color_at(to) == Some(color.opponent()) {
            moves.push(Move::new(from, to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{apply_move, Piece, FEN_KIWIPETE};

    /// Positions with pieces pressed against every edge, for the sweeping tests below.
    const SWEEP_FENS: [&str; 8] = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b",
        FEN_KIWIPETE,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b",
        "Q6q/1n4N1/8/R6r/r6R/8/1N4n1/q6Q w",
        "Q6q/1n4N1/8/R6r/r6R/8/1N4n1/q6Q b",
        "B6b/8/8/P6p/p6P/8/8/b6B w",
        "K6k/8/8/8/8/8/8/k6K b",
    ];

    fn sweep() -> impl Iterator<Item = Board> {
        SWEEP_FENS
            .into_iter()
            .map(|fen| Board::from_fen(fen).unwrap())
    }

    fn deltas(mv: Move) -> (i8, i8) {
        let (from, to) = mv.parts();
        let ranks = to.rank().index() as i8 - from.rank().index() as i8;
        let files = to.file().index() as i8 - from.file().index() as i8;
        (ranks, files)
    }

    fn moves_from(board: &Board, square: Square) -> Vec<String> {
        let mut moves = generate_moves_for(board, square)
            .iter()
            .map(|mv| mv.to_string())
            .collect::<Vec<_>>();
        moves.sort();
        moves
    }

    #[test]
    fn startpos_has_twenty_quiet_moves() {
        let board = Board::default();
        let moves = generate_moves(&board, Color::White);
        assert_eq!(moves.len(), 20);

        let pawn_moves = moves
            .iter()
            .filter(|mv| board.piece_at(mv.from()) == Some(Piece::WHITE_PAWN))
            .collect::<Vec<_>>();
        assert_eq!(pawn_moves.len(), 16);
        assert_eq!(
            pawn_moves.iter().filter(|mv| deltas(***mv) == (-2, 0)).count(),
            8
        );

        let knight_moves = moves
            .iter()
            .filter(|mv| board.piece_at(mv.from()) == Some(Piece::WHITE_KNIGHT))
            .count();
        assert_eq!(knight_moves, 4);

        assert!(moves.iter().all(|&mv| !is_capture(&board, mv)));
    }

    #[test]
    fn generation_only_moves_the_requested_side() {
        for board in sweep() {
            for side in Color::all() {
                for mv in generate_moves(&board, side) {
                    assert!(board.piece_at(mv.from()).unwrap().is(side));
                    assert_ne!(board.color_at(mv.to()), Some(side), "{mv} on {board:?}");
                }
            }
        }
    }

    #[test]
    fn sliders_never_wrap_around() {
        for board in sweep() {
            for side in Color::all() {
                for mv in generate_moves(&board, side) {
                    let piece = board.piece_at(mv.from()).unwrap();
                    if !piece.is_slider() {
                        continue;
                    }

                    let (ranks, files) = deltas(mv);
                    let orthogonal = ranks == 0 || files == 0;
                    let diagonal = ranks.abs() == files.abs();
                    match piece.kind() {
                        PieceKind::Rook => assert!(orthogonal, "{mv:?} on {board:?}"),
                        PieceKind::Bishop => assert!(diagonal, "{mv:?} on {board:?}"),
                        _ => assert!(orthogonal || diagonal, "{mv:?} on {board:?}"),
                    }

                    // Re-walk the ray: each step shifts file by at most one, and every square before `to` is empty
                    let steps = ranks.abs().max(files.abs());
                    let step = Offset::new(
                        ranks.signum() * 8 + files.signum(),
                        files.signum(),
                    );
                    let mut square = mv.from();
                    for i in 1..=steps {
                        let next = square.offset(step).unwrap();
                        assert!(next.file().index().abs_diff(square.file().index()) <= 1);
                        if i < steps {
                            assert!(!board.has(next), "{mv:?} jumps over {next}");
                        }
                        square = next;
                    }
                    assert_eq!(square, mv.to());
                }
            }
        }
    }

    #[test]
    fn knights_only_move_in_an_l() {
        for board in sweep() {
            for side in Color::all() {
                for mv in generate_moves(&board, side) {
                    if board.piece_at(mv.from()).unwrap().kind() != PieceKind::Knight {
                        continue;
                    }
                    let (ranks, files) = deltas(mv);
                    let shape = (ranks.abs(), files.abs());
                    assert!(shape == (1, 2) || shape == (2, 1), "{mv:?} on {board:?}");
                }
            }
        }
    }

    #[test]
    fn kings_step_one_square_without_wrapping() {
        for board in sweep() {
            for side in Color::all() {
                for mv in generate_moves(&board, side) {
                    if board.piece_at(mv.from()).unwrap().kind() != PieceKind::King {
                        continue;
                    }
                    let (ranks, files) = deltas(mv);
                    assert!(ranks.abs() <= 1 && files.abs() <= 1, "{mv:?} on {board:?}");
                }
            }
        }
    }

    #[test]
    fn pieces_on_an_empty_board_reach_the_expected_number_of_squares() {
        let cases = [
            ("8/8/8/8/8/8/8/R7 w", Square::A1, 14),
            ("8/8/8/8/7R/8/8/8 w", Square::H4, 14),
            ("8/8/8/8/8/8/8/B7 w", Square::A1, 7),
            ("8/8/8/8/3B4/8/8/8 w", Square::D4, 13),
            ("8/8/8/8/3Q4/8/8/8 w", Square::D4, 27),
            ("7Q/8/8/8/8/8/8/8 w", Square::H8, 21),
            ("8/8/8/8/K7/8/8/8 w", Square::A4, 5),
            ("8/8/8/8/8/8/8/7K w", Square::H1, 3),
            ("N7/8/8/8/8/8/8/8 w", Square::A8, 2),
            ("8/8/8/8/8/8/8/7N w", Square::H1, 2),
            ("8/8/8/8/N7/8/8/8 w", Square::A4, 4),
            ("8/8/8/7N/8/8/8/8 w", Square::H5, 4),
            ("8/8/8/8/3N4/8/8/8 w", Square::D4, 8),
        ];

        for (fen, square, expected) in cases {
            let board = Board::from_fen(fen).unwrap();
            let moves = generate_moves_for(&board, square);
            assert_eq!(moves.len(), expected, "{fen}: {moves:?}");
        }
    }

    #[test]
    fn corner_knight_destinations() {
        let board = Board::from_fen("N7/8/8/8/8/8/8/7n w").unwrap();
        assert_eq!(moves_from(&board, Square::A8), ["a8b6", "a8c7"]);
        assert_eq!(moves_from(&board, Square::H1), ["h1f2", "h1g3"]);
    }

    #[test]
    fn sliders_stop_at_blockers() {
        // Friendly pawn on c1 blocks the rook, the enemy rook on a3 is captured
        let board = Board::from_fen("8/8/8/8/8/r7/8/R1P5 w").unwrap();
        assert_eq!(moves_from(&board, Square::A1), ["a1a2", "a1a3", "a1b1"]);
    }

    #[test]
    fn edge_rook_does_not_wrap_to_the_next_rank() {
        // a4 - 1 is h5 by raw index, and h4 + 1 is a3
        let board = Board::from_fen("8/8/8/7p/R6R/p7/8/8 w").unwrap();
        let a4 = moves_from(&board, Square::A4);
        assert!(!a4.contains(&"a4h5".to_string()));
        assert!(!a4.contains(&"a4h4".to_string()));
        let h4 = moves_from(&board, Square::H4);
        assert!(!h4.contains(&"h4a3".to_string()));
        assert!(h4.contains(&"h4h5".to_string()));
    }

    #[test]
    fn blocked_pawn_cannot_double_push() {
        // Black knight on the intermediate square, e4 is empty
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w").unwrap();
        assert!(moves_from(&board, Square::E2).is_empty());

        // Destination occupied: only the single push remains
        let board = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w").unwrap();
        assert_eq!(moves_from(&board, Square::E2), ["e2e3"]);

        let board = Board::from_fen("4k3/4p3/4N3/8/8/8/8/4K3 b").unwrap();
        assert!(moves_from(&board, Square::E7).is_empty());
    }

    #[test]
    fn pawns_only_double_push_from_their_starting_rank() {
        let board = Board::from_fen("4k3/8/8/8/8/4P3/8/4K3 w").unwrap();
        assert_eq!(moves_from(&board, Square::E3), ["e3e4"]);

        let board = Board::from_fen("4k3/p7/8/8/8/8/8/4K3 b").unwrap();
        assert_eq!(moves_from(&board, Square::A7), ["a7a5", "a7a6"]);
    }

    #[test]
    fn pawn_captures_do_not_wrap_across_files() {
        // a5 - 9 would land on h7, h4 + 9 would land on a2
        let board = Board::from_fen("4k3/7p/8/P7/7p/8/P7/4K3 w").unwrap();
        assert_eq!(moves_from(&board, Square::A5), ["a5a6"]);
        assert_eq!(moves_from(&board, Square::H4), ["h4h3"]);
    }

    #[test]
    fn pawns_capture_diagonally_forward_only() {
        let board = Board::from_fen("4k3/8/8/2p1p3/3P4/2p1p3/8/4K3 w").unwrap();
        assert_eq!(moves_from(&board, Square::D4), ["d4c5", "d4d5", "d4e5"]);

        // Friendly pieces are not captured
        let board = Board::from_fen("4k3/8/8/2P1P3/3P4/8/8/4K3 w").unwrap();
        assert_eq!(moves_from(&board, Square::D4), ["d4d5"]);
    }

    #[test]
    fn pawns_on_the_last_rank_are_stuck() {
        let board = Board::from_fen("P3k3/8/8/8/8/8/8/4K2p w").unwrap();
        assert!(moves_from(&board, Square::A8).is_empty());
        assert!(moves_from(&board, Square::H1).is_empty());
    }

    #[test]
    fn generation_is_idempotent() {
        for board in sweep() {
            let first = generate_moves(&board, board.turn());
            let second = generate_moves(&board, board.turn());
            assert_eq!(first, second);
        }
    }

    #[test]
    fn applying_a_move_touches_exactly_two_squares() {
        for board in sweep() {
            for mv in generate_moves(&board, board.turn()) {
                let after = apply_move(&board, mv);
                assert_eq!(after.piece_at(mv.to()), board.piece_at(mv.from()));
                assert_eq!(after.piece_at(mv.from()), None);
                assert_eq!(after.turn(), board.turn());

                for square in Square::iter() {
                    if square != mv.from() && square != mv.to() {
                        assert_eq!(after.piece_at(square), board.piece_at(square));
                    }
                }
            }
        }
    }

    #[test]
    fn every_generated_square_is_on_the_board() {
        for board in sweep() {
            for mv in generate_moves(&board, board.turn()) {
                assert!(Square::from_index(mv.from().index()).is_ok());
                assert!(Square::from_index(mv.to().index()).is_ok());
            }
        }
    }

    #[test]
    fn crowded_board_fits_in_a_move_list() {
        // 32 queens against 32 empty squares is the densest case the list must hold
        let board = Board::from_fen("QQQQQQQQ/8/QQQQQQQQ/8/QQQQQQQQ/8/QQQQQQQQ/8 w").unwrap();
        let moves = generate_moves(&board, Color::White);
        assert!(moves.len() <= MAX_NUM_MOVES);
        assert!(!moves.is_empty());
    }
}
