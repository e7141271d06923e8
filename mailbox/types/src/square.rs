use std::{fmt, str::FromStr};

use super::{ChessError, Color};

/// A column of the board, `a` through `h`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug)]
#[repr(transparent)]
pub struct File(u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const COUNT: usize = 8;

    /// An iterator over all files, `a` first.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Returns this [`File`] as a `usize` in `[0,7]`.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Converts this [`File`] to its lowercase letter.
    pub const fn char(&self) -> char {
        (b'a' + self.0) as char
    }

    /// Parses a file letter of either case.
    pub fn from_char(file: char) -> Option<Self> {
        let file = file.to_ascii_lowercase();
        ('a'..='h').contains(&file).then(|| Self(file as u8 - b'a'))
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A row of the board.
///
/// Rows are indexed from the top of the printed board, so index `0` is
/// [`Rank::EIGHT`] (Black's back rank) and index `7` is [`Rank::ONE`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Debug)]
#[repr(transparent)]
pub struct Rank(u8);

impl Rank {
    pub const EIGHT: Self = Self(0);
    pub const SEVEN: Self = Self(1);
    pub const SIX: Self = Self(2);
    pub const FIVE: Self = Self(3);
    pub const FOUR: Self = Self(4);
    pub const THREE: Self = Self(5);
    pub const TWO: Self = Self(6);
    pub const ONE: Self = Self(7);

    pub const COUNT: usize = 8;

    /// An iterator over all ranks, top of the board first.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Returns this [`Rank`]'s row index in `[0,7]`, counted from the top.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// The rank a `color`'s pawns start on.
    ///
    /// # Example
    /// ```
    /// # use types::{Color, Rank};
    /// assert_eq!(Rank::pawn_start(Color::White), Rank::TWO);
    /// assert_eq!(Rank::pawn_start(Color::Black), Rank::SEVEN);
    /// ```
    pub const fn pawn_start(color: Color) -> Self {
        match color {
            Color::White => Self::TWO,
            Color::Black => Self::SEVEN,
        }
    }

    /// Converts this [`Rank`] to its digit as written in algebraic notation.
    pub const fn char(&self) -> char {
        (b'8' - self.0) as char
    }

    /// Parses a rank digit `1`-`8`.
    pub fn from_char(rank: char) -> Option<Self> {
        ('1'..='8').contains(&rank).then(|| Self(b'8' - rank as u8))
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// A flat-index step across the board, paired with the file shift it must produce.
///
/// On a flat `[0, 64)` board, adding `-1` to a square on the `a` file lands on
/// the `h` file one row up: the index is valid, the geometry is not. Storing the
/// expected file shift next to the delta lets [`Square::offset`] reject those
/// wraparounds. Since the raw index is exact, a matching file shift also pins
/// the rank shift to `(delta - file_shift) / 8`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Offset {
    delta: i8,
    file_shift: i8,
}

impl Offset {
    /// One row up the printed board (towards [`Rank::EIGHT`]).
    pub const UP: Self = Self::new(-8, 0);
    pub const DOWN: Self = Self::new(8, 0);
    pub const LEFT: Self = Self::new(-1, -1);
    pub const RIGHT: Self = Self::new(1, 1);
    pub const UP_LEFT: Self = Self::new(-9, -1);
    pub const UP_RIGHT: Self = Self::new(-7, 1);
    pub const DOWN_LEFT: Self = Self::new(7, -1);
    pub const DOWN_RIGHT: Self = Self::new(9, 1);

    /// Creates a new [`Offset`].
    ///
    /// `delta - file_shift` must be a multiple of `8`.
    pub const fn new(delta: i8, file_shift: i8) -> Self {
        debug_assert!(
            (delta - file_shift) % 8 == 0,
            "Offset delta and file shift disagree on the rank shift"
        );
        Self { delta, file_shift }
    }

    /// The raw amount added to a square index.
    pub const fn delta(&self) -> i8 {
        self.delta
    }

    /// How many files the step moves, negative being towards the `a` file.
    pub const fn file_shift(&self) -> i8 {
        self.file_shift
    }

    /// How many rows the step moves, negative being towards the top of the board.
    ///
    /// # Example
    /// ```
    /// # use types::Offset;
    /// assert_eq!(Offset::new(-17, -1).rank_shift(), -2);
    /// assert_eq!(Offset::new(6, -2).rank_shift(), 1);
    /// ```
    pub const fn rank_shift(&self) -> i8 {
        (self.delta - self.file_shift) / 8
    }
}

/// A single square on the `8x8` board.
///
/// The index is row-major from the top-left of the printed board:
/// `index = rank * 8 + file`, so `a8` is `0` and `h1` is `63`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    pub const A8: Self = Self::new(File::A, Rank::EIGHT);
    pub const A7: Self = Self::new(File::A, Rank::SEVEN);
    pub const A6: Self = Self::new(File::A, Rank::SIX);
    pub const A5: Self = Self::new(File::A, Rank::FIVE);
    pub const A4: Self = Self::new(File::A, Rank::FOUR);
    pub const A3: Self = Self::new(File::A, Rank::THREE);
    pub const A2: Self = Self::new(File::A, Rank::TWO);
    pub const A1: Self = Self::new(File::A, Rank::ONE);

    pub const B8: Self = Self::new(File::B, Rank::EIGHT);
    pub const B7: Self = Self::new(File::B, Rank::SEVEN);
    pub const B6: Self = Self::new(File::B, Rank::SIX);
    pub const B5: Self = Self::new(File::B, Rank::FIVE);
    pub const B4: Self = Self::new(File::B, Rank::FOUR);
    pub const B3: Self = Self::new(File::B, Rank::THREE);
    pub const B2: Self = Self::new(File::B, Rank::TWO);
    pub const B1: Self = Self::new(File::B, Rank::ONE);

    pub const C8: Self = Self::new(File::C, Rank::EIGHT);
    pub const C7: Self = Self::new(File::C, Rank::SEVEN);
    pub const C6: Self = Self::new(File::C, Rank::SIX);
    pub const C5: Self = Self::new(File::C, Rank::FIVE);
    pub const C4: Self = Self::new(File::C, Rank::FOUR);
    pub const C3: Self = Self::new(File::C, Rank::THREE);
    pub const C2: Self = Self::new(File::C, Rank::TWO);
    pub const C1: Self = Self::new(File::C, Rank::ONE);

    pub const D8: Self = Self::new(File::D, Rank::EIGHT);
    pub const D7: Self = Self::new(File::D, Rank::SEVEN);
    pub const D6: Self = Self::new(File::D, Rank::SIX);
    pub const D5: Self = Self::new(File::D, Rank::FIVE);
    pub const D4: Self = Self::new(File::D, Rank::FOUR);
    pub const D3: Self = Self::new(File::D, Rank::THREE);
    pub const D2: Self = Self::new(File::D, Rank::TWO);
    pub const D1: Self = Self::new(File::D, Rank::ONE);

    pub const E8: Self = Self::new(File::E, Rank::EIGHT);
    pub const E7: Self = Self::new(File::E, Rank::SEVEN);
    pub const E6: Self = Self::new(File::E, Rank::SIX);
    pub const E5: Self = Self::new(File::E, Rank::FIVE);
    pub const E4: Self = Self::new(File::E, Rank::FOUR);
    pub const E3: Self = Self::new(File::E, Rank::THREE);
    pub const E2: Self = Self::new(File::E, Rank::TWO);
    pub const E1: Self = Self::new(File::E, Rank::ONE);

    pub const F8: Self = Self::new(File::F, Rank::EIGHT);
    pub const F7: Self = Self::new(File::F, Rank::SEVEN);
    pub const F6: Self = Self::new(File::F, Rank::SIX);
    pub const F5: Self = Self::new(File::F, Rank::FIVE);
    pub const F4: Self = Self::new(File::F, Rank::FOUR);
    pub const F3: Self = Self::new(File::F, Rank::THREE);
    pub const F2: Self = Self::new(File::F, Rank::TWO);
    pub const F1: Self = Self::new(File::F, Rank::ONE);

    pub const G8: Self = Self::new(File::G, Rank::EIGHT);
    pub const G7: Self = Self::new(File::G, Rank::SEVEN);
    pub const G6: Self = Self::new(File::G, Rank::SIX);
    pub const G5: Self = Self::new(File::G, Rank::FIVE);
    pub const G4: Self = Self::new(File::G, Rank::FOUR);
    pub const G3: Self = Self::new(File::G, Rank::THREE);
    pub const G2: Self = Self::new(File::G, Rank::TWO);
    pub const G1: Self = Self::new(File::G, Rank::ONE);

    pub const H8: Self = Self::new(File::H, Rank::EIGHT);
    pub const H7: Self = Self::new(File::H, Rank::SEVEN);
    pub const H6: Self = Self::new(File::H, Rank::SIX);
    pub const H5: Self = Self::new(File::H, Rank::FIVE);
    pub const H4: Self = Self::new(File::H, Rank::FOUR);
    pub const H3: Self = Self::new(File::H, Rank::THREE);
    pub const H2: Self = Self::new(File::H, Rank::TWO);
    pub const H1: Self = Self::new(File::H, Rank::ONE);
    pub const COUNT: usize = 64;

    /// Returns an iterator over all squares in index order.
    ///
    /// # Example
    /// ```
    /// # use types::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next(), Some(Square::A8));
    /// assert_eq!(iter.last(), Some(Square::H1));
    /// ```
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> + ExactSizeIterator {
        (0..Self::COUNT as u8).map(Self)
    }

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(rank.0 << 3 | file.0)
    }

    /// Creates a new [`Square`] from the provided index value.
    ///
    /// # Example
    /// ```
    /// # use types::{ChessError, Square};
    /// assert_eq!(Square::from_index(52), Ok(Square::E2));
    /// assert_eq!(Square::from_index(64), Err(ChessError::IndexOutOfRange { val: 64 }));
    /// ```
    pub const fn from_index(index: usize) -> Result<Self, ChessError> {
        if index < Self::COUNT {
            Ok(Self(index as u8))
        } else {
            Err(ChessError::IndexOutOfRange { val: index })
        }
    }

    /// Creates a new [`Square`] from the provided index value, without error checking.
    ///
    /// # Panics
    /// If `index` is not below `64` and debug assertions are enabled.
    pub const fn from_index_unchecked(index: usize) -> Self {
        debug_assert!(index < Self::COUNT, "Index must be between [0,64)");
        Self(index as u8)
    }

    /// Returns this [`Square`] as a `usize` in `[0,63]`.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    pub const fn file(&self) -> File {
        File(self.0 & 0b111)
    }

    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Steps this [`Square`] by `offset`, returning `None` if the step leaves the board or wraps around an edge.
    ///
    /// This is the single guard every piece rule goes through.
    ///
    /// # Example
    /// ```
    /// # use types::{Offset, Square};
    /// assert_eq!(Square::E4.offset(Offset::UP_LEFT), Some(Square::D5));
    /// // a4 - 1 is h5 by raw index, which is not to the left of a4
    /// assert_eq!(Square::A4.offset(Offset::LEFT), None);
    /// // e8 - 8 is off the board entirely
    /// assert_eq!(Square::E8.offset(Offset::UP), None);
    /// ```
    pub const fn offset(self, offset: Offset) -> Option<Self> {
        let raw = self.0 as i16 + offset.delta() as i16;
        if raw < 0 || raw >= Self::COUNT as i16 {
            return None;
        }

        let to = Self(raw as u8);
        if to.file().0 as i8 - self.file().0 as i8 != offset.file_shift() {
            return None;
        }

        Some(to)
    }

    /// Parses a square in algebraic notation, such as `e4`.
    ///
    /// # Example
    /// ```
    /// # use types::Square;
    /// assert_eq!(Square::from_uci("g7"), Ok(Square::G7));
    /// assert!(Square::from_uci("i9").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self, ChessError> {
        let invalid = || ChessError::InvalidSquareNotation {
            val: square.to_string(),
        };

        let mut chars = square.chars();
        let file = chars.next().and_then(File::from_char).ok_or_else(invalid)?;
        let rank = chars.next().and_then(Rank::from_char).ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }

        Ok(Self::new(file, rank))
    }

    /// Converts this [`Square`] to algebraic notation.
    pub fn to_uci(&self) -> String {
        format!("{}{}", self.file(), self.rank())
    }
}

impl FromStr for Square {
    type Err = ChessError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}
