pub use types::*;

/// The 64-cell board: piece placement, side to move, and the loader that builds it from a position string.
pub mod board;
/// Pseudo-legal move generation for every piece on a board.
pub mod movegen;
/// A move as a pair of squares.
pub mod moves;
/// Depth-first node counting, for checking generation against known totals.
pub mod perft;

pub use board::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
