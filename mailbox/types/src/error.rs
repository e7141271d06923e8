use std::{error::Error, fmt};

/// Everything that can go wrong while building a board or one of its parts.
///
/// The first three variants are all flavours of a malformed position string; see
/// [`ChessError::is_invalid_position_format`].
#[derive(Clone, PartialEq, Eq, Debug, Hash)]
pub enum ChessError {
    /// A character in the placement field was not a piece, a digit `1`-`8`, or `/`.
    InvalidPieceChar { val: char },

    /// The placement field did not contain exactly 8 ranks.
    InvalidRankCount { found: usize },

    /// A rank did not resolve to exactly 8 files.
    ///
    /// `rank` is counted from the top of the board, starting at `0`.
    InvalidRankLength { rank: usize, found: usize },

    /// The side-to-move field was not `w` or `b`.
    InvalidColorStr { val: String },

    /// A square was not written as a file letter followed by a rank digit.
    InvalidSquareNotation { val: String },

    /// A square index fell outside of `[0, 64)`.
    IndexOutOfRange { val: usize },
}

impl ChessError {
    /// Returns `true` if this error was caused by a malformed position string.
    ///
    /// # Example
    /// ```
    /// # use types::ChessError;
    /// assert!(ChessError::InvalidPieceChar { val: 'x' }.is_invalid_position_format());
    /// assert!(!ChessError::IndexOutOfRange { val: 64 }.is_invalid_position_format());
    /// assert!(!ChessError::InvalidColorStr { val: "x".into() }.is_invalid_position_format());
    /// ```
    pub const fn is_invalid_position_format(&self) -> bool {
        matches!(
            self,
            Self::InvalidPieceChar { .. }
                | Self::InvalidRankCount { .. }
                | Self::InvalidRankLength { .. }
        )
    }
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPieceChar { val } => write!(
                f,
                "invalid position format: placements must be [pnbrqkPNBRQK], [1-8], or '/'. found {val:?}"
            ),
            Self::InvalidRankCount { found } => write!(
                f,
                "invalid position format: placements must contain 8 ranks. found {found}"
            ),
            Self::InvalidRankLength { rank, found } => write!(
                f,
                "invalid position format: rank {rank} must span 8 files. found {found}"
            ),
            Self::InvalidColorStr { val } => {
                write!(f, "side to move must be `w` or `b`. found {val:?}")
            }
            Self::InvalidSquareNotation { val } => write!(
                f,
                "squares must be written as <file><rank>, such as `e4`. found {val:?}"
            ),
            Self::IndexOutOfRange { val } => {
                write!(f, "square index {val} must be within [0, 64)")
            }
        }
    }
}

impl Error for ChessError {}
