use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use super::Square;

/// Represents a move on a chess board: nothing more than where a piece starts and where it ends up.
///
/// Captures, promotions and other special cases are not encoded. Whether a move
/// captures is a property of the board it is applied to.
///
/// Internally encoded using the following bit pattern:
/// ```text
///     0000 000000 000000
///      |     |      |
///      |     |      +- Source square of the move.
///      |     +- Target square of the move.
///      +- Unused.
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Move(u16);

impl Move {
    /// Mask for the source ("from") bits.
    const SRC_MASK: u16 = 0b0000_0000_0011_1111;
    /// Mask for the destination ("to") bits.
    const DST_MASK: u16 = 0b0000_1111_1100_0000;
    /// Start index of destination bits.
    const DST_BITS: u16 = 6;

    /// Creates a new [`Move`] from `from` to `to`.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Move, Square};
    /// let mv = Move::new(Square::E2, Square::E4);
    /// assert_eq!(mv.from(), Square::E2);
    /// assert_eq!(mv.to(), Square::E4);
    /// assert_eq!(mv.to_string(), "e2e4");
    /// ```
    pub const fn new(from: Square, to: Square) -> Self {
        Self((to.index() as u16) << Self::DST_BITS | from.index() as u16)
    }

    /// Fetches the source square of this [`Move`].
    pub const fn from(&self) -> Square {
        Square::from_index_unchecked((self.0 & Self::SRC_MASK) as usize)
    }

    /// Fetches the destination square of this [`Move`].
    pub const fn to(&self) -> Square {
        Square::from_index_unchecked(((self.0 & Self::DST_MASK) >> Self::DST_BITS) as usize)
    }

    /// Fetches both squares of this [`Move`].
    pub const fn parts(&self) -> (Square, Square) {
        (self.from(), self.to())
    }

    /// Parses a move from long algebraic notation, such as `e2e4`.
    ///
    /// # Example
    /// ```
    /// # use mailbox::{Move, Square};
    /// let mv = Move::from_uci("g8f6").unwrap();
    /// assert_eq!(mv, Move::new(Square::G8, Square::F6));
    /// assert!(Move::from_uci("e2").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        if uci.len() != 4 || !uci.is_ascii() {
            bail!("Move strings must be 4 chars of <from><to>, such as e2e4. Got {uci:?}");
        }

        let from = Square::from_uci(&uci[0..2]).context(format!("Invalid move {uci:?}"))?;
        let to = Square::from_uci(&uci[2..4]).context(format!("Invalid move {uci:?}"))?;

        Ok(Self::new(from, to))
    }

    /// Converts this [`Move`] to long algebraic notation.
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.from(), self.to())
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({} -> {})", self.from().index(), self.to().index())
    }
}
