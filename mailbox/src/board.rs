use std::{
    fmt::{self, Write},
    ops::Index,
    str::FromStr,
};

use super::{ChessError, Color, File, Move, Piece, Rank, Square, FEN_STARTPOS};

/// Represents all pieces and their locations on a chess board, along with whose turn it is.
///
/// Internally a flat array of 64 cells, indexed the same way as [`Square`]. An
/// empty cell is `None`.
///
/// A [`Board`] is a plain value: it is `Copy`, and every way of deriving a new
/// position ([`apply_move`], [`Board::with_move_applied`], [`Board::successor`])
/// produces a fresh [`Board`] rather than touching one that somebody else can see.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// Piece placements, indexed by [`Square::index`].
    squares: [Option<Piece>; Square::COUNT],

    /// The [`Color`] of the side to move.
    turn: Color,
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces, with White to move.
    ///
    /// # Example
    /// ```
    /// # use mailbox::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8 w");
    /// ```
    pub const fn new() -> Self {
        Self {
            squares: [None; Square::COUNT],
            turn: Color::White,
        }
    }

    /// Constructs a [`Board`] from the provided FEN string.
    ///
    /// Only the placement field and the optional side-to-move field are read;
    /// castling rights, en passant and the move counters are accepted and ignored.
    /// Without a side-to-move field, or with one that is not `w` or `b`, White is to move.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Board, Color, Piece, Square};
    /// let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b").unwrap();
    /// assert_eq!(board.piece_at(Square::E8), Some(Piece::BLACK_KING));
    /// assert_eq!(board.turn(), Color::Black);
    ///
    /// assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K2").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let mut board = Self::new();
        let mut fields = fen.split_ascii_whitespace();
        let placements = fields.next().unwrap_or_default();

        let found = placements.split('/').count();
        if found != Rank::COUNT {
            return Err(ChessError::InvalidRankCount { found });
        }

        for (rank, placements) in placements.split('/').enumerate() {
            let mut file = 0;

            for piece_char in placements.chars() {
                if let Some(empty) = piece_char.to_digit(10).filter(|n| (1..=8).contains(n)) {
                    file += empty as usize;
                } else {
                    let piece = Piece::from_uci(piece_char)?;

                    // Anything past the 8th file is reported once the rank is fully counted
                    if file < File::COUNT {
                        board.squares[rank * File::COUNT + file] = Some(piece);
                    }
                    file += 1;
                }
            }

            if file != File::COUNT {
                return Err(ChessError::InvalidRankLength { rank, found: file });
            }
        }

        // A side-to-move field that isn't understood leaves White to move
        if let Some(turn) = fields.next() {
            board.turn = turn.parse().unwrap_or_default();
        }

        Ok(board)
    }

    /// Generates a FEN string of this [`Board`]: the placements followed by the side to move.
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(72);

        for rank in Rank::iter() {
            let mut empty_spaces = 0;
            for file in File::iter() {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        _ = write!(fen, "{empty_spaces}");
                        empty_spaces = 0;
                    }
                    fen.push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                _ = write!(fen, "{empty_spaces}");
            }
            if rank != Rank::ONE {
                fen.push('/');
            }
        }

        _ = write!(fen, " {}", self.turn);
        fen
    }

    /// Returns the side to move.
    pub const fn turn(&self) -> Color {
        self.turn
    }

    /// Toggles the side to move from White to Black (or vice versa).
    pub fn toggle_turn(&mut self) {
        self.turn = self.turn.opponent();
    }

    /// Fetches the [`Piece`] at the provided [`Square`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Board, Piece, Square};
    /// let board = Board::default();
    /// assert_eq!(board.piece_at(Square::A2), Some(Piece::WHITE_PAWN));
    /// assert!(board.piece_at(Square::E4).is_none());
    /// ```
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Returns `true` if there is a piece at the given [`Square`].
    pub const fn has(&self, square: Square) -> bool {
        self.squares[square.index()].is_some()
    }

    /// Fetches the [`Color`] of the piece at the provided [`Square`], if there is one.
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|piece| piece.color())
    }

    /// Places `piece` at `square`, replacing whatever was there.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Board, Piece, Square};
    /// let mut board = Board::new();
    /// board.place(Piece::WHITE_KNIGHT, Square::C4);
    /// assert_eq!(board.to_fen(), "8/8/8/8/2N5/8/8/8 w");
    /// ```
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.squares[square.index()] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Square`], if there is one present.
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index()].take()
    }

    /// Returns an iterator over every occupied square and the piece on it, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| Some((square, self.piece_at(square)?)))
    }

    /// Returns an iterator over all of the pieces of `color` along with their locations.
    pub fn all_for(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, piece)| piece.is(color))
    }

    /// Moves whatever stands on `mv.from()` to `mv.to()`. No enforcement of legality.
    ///
    /// If there is no piece at `mv.from()`, nothing happens.
    pub fn make_move(&mut self, mv: Move) {
        let Some(piece) = self.take(mv.from()) else {
            return;
        };
        self.place(piece, mv.to());
    }

    /// Consumes `self` and returns a [`Board`] after having applied the provided [`Move`].
    ///
    /// The side to move is left untouched.
    pub fn with_move_applied(mut self, mv: Move) -> Self {
        self.make_move(mv);
        self
    }

    /// Returns the position one ply after playing `mv`.
    ///
    /// This is [`apply_move`] plus the bookkeeping of a real game line: the moved
    /// piece is flagged as having moved, and the turn passes to the opponent.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Board, Color, Move, Square};
    /// let board = Board::default();
    /// let next = board.successor(Move::new(Square::G1, Square::F3));
    /// assert_eq!(next.turn(), Color::Black);
    /// assert!(next.piece_at(Square::F3).unwrap().has_moved());
    /// assert!(next.piece_at(Square::G1).is_none());
    /// ```
    pub fn successor(&self, mv: Move) -> Self {
        let mut next = apply_move(self, mv);
        if let Some(piece) = next.piece_at(mv.to()) {
            next.place(piece.moved(), mv.to());
        }
        next.toggle_turn();
        next
    }
}

/// Returns a copy of `board` with `mv` applied.
///
/// The destination square receives the piece from the origin square, exactly as
/// it was. The origin square becomes empty. Every other square, and the side to
/// move, are unchanged. No legality check is done: `mv` is expected to come from
/// the move generator.
///
/// # Example
/// ```
/// # use mailbox::{apply_move, Board, Move, Piece, Square};
/// let board = Board::default();
/// let after = apply_move(&board, Move::new(Square::E2, Square::E4));
/// assert_eq!(after.piece_at(Square::E4), Some(Piece::WHITE_PAWN));
/// assert_eq!(after.piece_at(Square::E2), None);
/// assert_eq!(after.turn(), board.turn());
/// ```
pub fn apply_move(board: &Board, mv: Move) -> Board {
    board.with_move_applied(mv)
}

impl FromStr for Board {
    type Err = ChessError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Default for Board {
    fn default() -> Self {
        match Self::from_fen(FEN_STARTPOS) {
            Ok(board) => board,
            // FEN_STARTPOS is a constant, and covered by tests
            Err(err) => unreachable!("{err}"),
        }
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    fn index(&self, index: Square) -> &Self::Output {
        &self.squares[index.index()]
    }
}

impl fmt::Display for Board {
    /// One line per rank from the top of the board, with `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter() {
            let row = File::iter()
                .map(|file| {
                    self.piece_at(Square::new(file, rank))
                        .map(|piece| piece.char())
                        .unwrap_or('.')
                })
                .fold(String::with_capacity(16), |mut row, c| {
                    if !row.is_empty() {
                        row.push(' ');
                    }
                    row.push(c);
                    row
                });

            if rank == Rank::ONE {
                write!(f, "{row}")?;
            } else {
                writeln!(f, "{row}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut board_str = String::with_capacity(256);
        for rank in Rank::iter() {
            _ = write!(board_str, "{rank}|");
            for file in File::iter() {
                let piece_char = self
                    .piece_at(Square::new(file, rank))
                    .map(|p| p.char())
                    .unwrap_or('.');
                _ = write!(board_str, " {piece_char}");
            }

            if rank == Rank::EIGHT {
                _ = write!(board_str, "           FEN: {}", self.to_fen());
            } else if rank == Rank::SEVEN {
                _ = write!(board_str, "          Side: {}", self.turn().name());
            }
            board_str += "\n";
        }
        board_str += " +";
        for _ in File::iter() {
            board_str += "--";
        }
        board_str += "\n   ";
        for file in File::iter() {
            _ = write!(board_str, "{file} ");
        }

        write!(f, "{board_str}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, FEN_KIWIPETE};

    #[test]
    fn startpos_layout() {
        let board = Board::default();
        assert_eq!(board.turn(), Color::White);
        assert_eq!(board.iter().count(), 32);
        assert_eq!(board.all_for(Color::White).count(), 16);
        assert_eq!(board.all_for(Color::Black).count(), 16);

        // Black is at the top of the board, which is the low end of the index range
        for i in 8..16 {
            let square = Square::from_index(i).unwrap();
            assert_eq!(board.piece_at(square), Some(Piece::BLACK_PAWN));
        }
        for i in 48..56 {
            let square = Square::from_index(i).unwrap();
            assert_eq!(board.piece_at(square), Some(Piece::WHITE_PAWN));
        }
        assert_eq!(board[Square::E1], Some(Piece::WHITE_KING));
        assert_eq!(board[Square::D8], Some(Piece::BLACK_QUEEN));
    }

    #[test]
    fn fen_round_trips() {
        for fen in [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w",
            "8/8/8/8/8/8/8/8 b",
            "7k/8/8/3Q4/8/8/8/K7 b",
        ] {
            assert_eq!(Board::from_fen(fen).unwrap().to_fen(), fen);
        }

        let kiwipete = Board::from_fen(FEN_KIWIPETE).unwrap();
        assert_eq!(
            kiwipete.to_fen(),
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w"
        );
    }

    #[test]
    fn malformed_placements_are_rejected() {
        let cases = [
            ("", ChessError::InvalidRankCount { found: 1 }),
            ("8/8/8/8/8/8/8", ChessError::InvalidRankCount { found: 7 }),
            ("8/8/8/8/8/8/8/8/8", ChessError::InvalidRankCount { found: 9 }),
            ("8/8/8/8/8/8/8/7x", ChessError::InvalidPieceChar { val: 'x' }),
            ("8/8/8/8/0/8/8/8", ChessError::InvalidPieceChar { val: '0' }),
            ("8/8/8/8/9/8/8/8", ChessError::InvalidPieceChar { val: '9' }),
            ("8/8/8/8/7/8/8/8", ChessError::InvalidRankLength { rank: 4, found: 7 }),
            ("8/8/8/8/8/8/8/pppppppp1", ChessError::InvalidRankLength { rank: 7, found: 9 }),
            ("44k/8/8/8/8/8/8/8", ChessError::InvalidRankLength { rank: 0, found: 9 }),
        ];

        for (fen, expected) in cases {
            let err = Board::from_fen(fen).unwrap_err();
            assert_eq!(err, expected, "{fen:?}");
            assert!(err.is_invalid_position_format());
        }
    }

    #[test]
    fn unknown_side_to_move_defaults_to_white() {
        for fen in [
            "8/8/8/8/8/8/8/8 x",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR -",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR black",
        ] {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.turn(), Color::White, "{fen:?}");
        }

        let board = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR -").unwrap();
        assert_eq!(board, Board::default());
        assert_eq!(Board::from_fen("8/8/8/8/8/8/8/8 B").unwrap().turn(), Color::Black);
    }

    #[test]
    fn trailing_fields_are_ignored() {
        let full = Board::from_fen(FEN_STARTPOS).unwrap();
        let bare = Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").unwrap();
        assert_eq!(full, bare);
        assert_eq!(full, Board::default());
    }

    #[test]
    fn display_matches_printed_board() {
        let board = Board::default();
        let expected = "\
r n b q k b n r
p p p p p p p p
. . . . . . . .
. . . . . . . .
. . . . . . . .
. . . . . . . .
P P P P P P P P
R N B Q K B N R";
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn make_move_on_empty_square_does_nothing() {
        let board = Board::default();
        let after = board.with_move_applied(Move::new(Square::E4, Square::E5));
        assert_eq!(board, after);
    }

    #[test]
    fn apply_move_captures_by_replacement() {
        let board = Board::from_fen("4k3/8/8/3p4/4N3/8/8/4K3 w").unwrap();
        let after = apply_move(&board, Move::new(Square::E4, Square::D5));
        assert_eq!(after.piece_at(Square::D5), Some(Piece::WHITE_KNIGHT));
        assert_eq!(after.iter().count(), 3);
        assert!(after
            .iter()
            .all(|(_, piece)| piece.kind() != PieceKind::Pawn));
    }
}
