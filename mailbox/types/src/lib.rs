/// The error type shared by every crate in the workspace.
pub mod error;
/// Enums for colors and piece kinds, and a struct for a chess piece.
pub mod piece;
/// Squares on a chessboard (including files, ranks, and offsets between squares).
pub mod square;
/// Misc constants: well-known FENs and the movement offsets of each piece.
pub mod utils;

pub use error::*;
pub use piece::*;
pub use square::*;
pub use utils::*;
