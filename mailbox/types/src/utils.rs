use super::Offset;

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A popular FEN string for debugging move generation.
pub const FEN_KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

/// Upper bound on the pseudo-legal moves of any arrangement.
///
/// A move pairs a friendly square with a non-friendly one, so `n * (64 - n)`
/// caps the count, and that peaks at `n = 32`. The usual figure of 218 only
/// holds for legal moves in reachable positions.
pub const MAX_NUM_MOVES: usize = 32 * 32;

/// Offsets for the movement of the Rook.
pub const ROOK_OFFSETS: [Offset; 4] = [Offset::UP, Offset::DOWN, Offset::LEFT, Offset::RIGHT];

/// Offsets for the movement of the Bishop.
pub const BISHOP_OFFSETS: [Offset; 4] = [
    Offset::UP_LEFT,
    Offset::DOWN_RIGHT,
    Offset::UP_RIGHT,
    Offset::DOWN_LEFT,
];

/// Offsets for the movement of the Queen: the Rook's, then the Bishop's.
pub const QUEEN_OFFSETS: [Offset; 8] = [
    ROOK_OFFSETS[0],
    ROOK_OFFSETS[1],
    ROOK_OFFSETS[2],
    ROOK_OFFSETS[3],
    BISHOP_OFFSETS[0],
    BISHOP_OFFSETS[1],
    BISHOP_OFFSETS[2],
    BISHOP_OFFSETS[3],
];

/// Offsets for the movement of the King. Same directions as the Queen, one step each.
pub const KING_OFFSETS: [Offset; 8] = QUEEN_OFFSETS;

/// Offsets for the movement of the Knight.
pub const KNIGHT_OFFSETS: [Offset; 8] = [
    Offset::new(-17, -1),
    Offset::new(-10, -2),
    Offset::new(-15, 1),
    Offset::new(-6, 2),
    Offset::new(17, 1),
    Offset::new(10, 2),
    Offset::new(15, -1),
    Offset::new(6, -2),
];
