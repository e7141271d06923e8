use std::{
    fmt,
    num::NonZeroU8,
    ops::Index,
    str::FromStr,
};

use super::ChessError;

/// Represents the color of a player or a piece.
///
/// White moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Creates a new [`Color`] from a `bool`, where `false = White`.
    ///
    /// # Example
    /// ```
    /// # use types::Color;
    /// assert_eq!(Color::from_bool(false), Color::White);
    /// assert_eq!(Color::from_bool(true), Color::Black);
    /// ```
    pub const fn from_bool(color: bool) -> Self {
        if color {
            Self::Black
        } else {
            Self::White
        }
    }

    /// Returns `true` if this [`Color`] is White.
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns `true` if this [`Color`] is Black.
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns this [`Color`] as a `u8`: `0` for White, `1` for Black.
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    /// Creates a [`Color`] from the side-to-move field of a FEN string.
    ///
    /// # Example
    /// ```
    /// # use types::Color;
    /// assert_eq!(Color::from_uci('b'), Ok(Color::Black));
    /// assert!(Color::from_uci('x').is_err());
    /// ```
    pub fn from_uci(color: char) -> Result<Self, ChessError> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => Err(ChessError::InvalidColorStr {
                val: color.to_string(),
            }),
        }
    }

    /// Creates a [`Color`] based on the ASCII case of a piece character: uppercase is White.
    ///
    /// # Example
    /// ```
    /// # use types::Color;
    /// assert_eq!(Color::from_case('k'), Color::Black);
    /// assert_eq!(Color::from_case('Q'), Color::White);
    /// ```
    pub const fn from_case(c: char) -> Self {
        Self::from_bool(c.is_ascii_lowercase())
    }

    /// Converts this [`Color`] to its FEN char.
    pub const fn to_uci(&self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl FromStr for Color {
    type Err = ChessError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_uci(c),
            _ => Err(ChessError::InvalidColorStr { val: s.to_string() }),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "class") that a chess piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Creates a [`PieceKind`] from its bit value, if `bits` is `[0,5]`.
    const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Self::Pawn),
            1 => Some(Self::Knight),
            2 => Some(Self::Bishop),
            3 => Some(Self::Rook),
            4 => Some(Self::Queen),
            5 => Some(Self::King),
            _ => None,
        }
    }

    /// Fetches the internal bit value of this [`PieceKind`]. Always `[0,5]`.
    pub const fn bits(&self) -> u8 {
        *self as u8
    }

    /// Returns this [`PieceKind`] as a `usize`, for indexing into lists of six elements.
    ///
    /// # Example
    /// ```
    /// # use types::PieceKind;
    /// assert_eq!(PieceKind::Queen.index(), 4);
    /// ```
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Creates a new [`PieceKind`] from a FEN piece character of either case.
    ///
    /// # Example
    /// ```
    /// # use types::PieceKind;
    /// assert_eq!(PieceKind::from_uci('Q'), Ok(PieceKind::Queen));
    /// assert_eq!(PieceKind::from_uci('n'), Ok(PieceKind::Knight));
    /// assert!(PieceKind::from_uci('x').is_err());
    /// ```
    pub fn from_uci(kind: char) -> Result<Self, ChessError> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => Err(ChessError::InvalidPieceChar { val: kind }),
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// Converts this [`PieceKind`] to a lowercase FEN character.
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl<T> Index<PieceKind> for [T; PieceKind::COUNT] {
    type Output = T;
    fn index(&self, index: PieceKind) -> &Self::Output {
        &self[index.index()]
    }
}

/// Represents a chess piece standing on a square.
///
/// Internally, this is represented as a `u8` with the following bit pattern:
///
/// ```text
///     0 00 0 0 000
///     | |  | |  |
///     | |  | |  +- Represents the PieceKind.
///     | |  | +- Represents the Color. `0` for White, `1` for Black.
///     | |  +- Set once the piece has moved.
///     | +- Unused.
///     +- Always set, so that `Option<Piece>` is a single byte.
/// ```
///
/// The moved flag is bookkeeping only; no move rule reads it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Piece(NonZeroU8);

impl Piece {
    pub const WHITE_PAWN: Self = Self::new(Color::White, PieceKind::Pawn);
    pub const WHITE_KNIGHT: Self = Self::new(Color::White, PieceKind::Knight);
    pub const WHITE_BISHOP: Self = Self::new(Color::White, PieceKind::Bishop);
    pub const WHITE_ROOK: Self = Self::new(Color::White, PieceKind::Rook);
    pub const WHITE_QUEEN: Self = Self::new(Color::White, PieceKind::Queen);
    pub const WHITE_KING: Self = Self::new(Color::White, PieceKind::King);

    pub const BLACK_PAWN: Self = Self::new(Color::Black, PieceKind::Pawn);
    pub const BLACK_KNIGHT: Self = Self::new(Color::Black, PieceKind::Knight);
    pub const BLACK_BISHOP: Self = Self::new(Color::Black, PieceKind::Bishop);
    pub const BLACK_ROOK: Self = Self::new(Color::Black, PieceKind::Rook);
    pub const BLACK_QUEEN: Self = Self::new(Color::Black, PieceKind::Queen);
    pub const BLACK_KING: Self = Self::new(Color::Black, PieceKind::King);

    const KIND_MASK: u8 = 0b0000_0111;
    const COLOR_BITS: u8 = 3;
    const MOVED_MASK: u8 = 0b0001_0000;
    const PRESENT_MASK: u8 = 0b1000_0000;

    /// Wraps raw bits, which always carry the present bit.
    const fn from_bits(bits: u8) -> Self {
        match NonZeroU8::new(bits | Self::PRESENT_MASK) {
            Some(bits) => Self(bits),
            None => unreachable!(),
        }
    }

    const fn bits(&self) -> u8 {
        self.0.get()
    }

    /// Creates a new, unmoved [`Piece`] from the given [`Color`] and [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use types::{Piece, Color, PieceKind};
    /// let white_knight = Piece::new(Color::White, PieceKind::Knight);
    /// assert_eq!(white_knight.to_string(), "N");
    /// assert!(!white_knight.has_moved());
    /// ```
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self::from_bits(color.bits() << Self::COLOR_BITS | kind.bits())
    }

    /// Fetches the [`Color`] of this [`Piece`].
    pub const fn color(&self) -> Color {
        Color::from_bool((self.bits() >> Self::COLOR_BITS) & 1 != 0)
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    pub const fn kind(&self) -> PieceKind {
        match PieceKind::from_bits(self.bits() & Self::KIND_MASK) {
            Some(kind) => kind,
            // Only `Piece::new` can set the kind bits, and it only writes `[0,5]`
            None => unreachable!(),
        }
    }

    /// Fetches the [`Color`] and [`PieceKind`] of this [`Piece`].
    pub const fn parts(&self) -> (Color, PieceKind) {
        (self.color(), self.kind())
    }

    /// Returns `true` if this [`Piece`] belongs to `color`.
    pub const fn is(&self, color: Color) -> bool {
        self.color().bits() == color.bits()
    }

    /// Returns `true` if this [`Piece`] is a slider (Rook, Bishop, Queen).
    pub const fn is_slider(&self) -> bool {
        matches!(
            self.kind(),
            PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop
        )
    }

    /// Returns `true` once this [`Piece`] has been moved.
    pub const fn has_moved(&self) -> bool {
        self.bits() & Self::MOVED_MASK != 0
    }

    /// Consumes `self` and returns the same piece with its moved flag set.
    ///
    /// # Example
    /// ```
    /// # use types::Piece;
    /// let rook = Piece::WHITE_ROOK.moved();
    /// assert!(rook.has_moved());
    /// assert_ne!(rook, Piece::WHITE_ROOK);
    /// assert_eq!(rook.parts(), Piece::WHITE_ROOK.parts());
    /// ```
    pub const fn moved(self) -> Self {
        Self::from_bits(self.bits() | Self::MOVED_MASK)
    }

    /// Creates a new [`Piece`] from a FEN character: uppercase is White, lowercase is Black.
    ///
    /// # Example
    /// ```
    /// # use types::{Piece, Color, PieceKind};
    /// let black_queen = Piece::from_uci('q').unwrap();
    /// assert_eq!(black_queen.parts(), (Color::Black, PieceKind::Queen));
    /// ```
    pub fn from_uci(piece: char) -> Result<Self, ChessError> {
        let kind = PieceKind::from_uci(piece)?;
        let color = Color::from_case(piece);
        Ok(Self::new(color, kind))
    }

    /// Converts this [`Piece`] into its FEN character.
    ///
    /// # Example
    /// ```
    /// # use types::Piece;
    /// assert_eq!(Piece::WHITE_QUEEN.char(), 'Q');
    /// assert_eq!(Piece::BLACK_PAWN.char(), 'p');
    /// ```
    pub const fn char(&self) -> char {
        let c = self.kind().char();
        if self.color().is_white() {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }
}

impl FromStr for Piece {
    type Err = ChessError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_uci(c),
            (Some(c), _) => Err(ChessError::InvalidPieceChar { val: c }),
            (None, _) => Err(ChessError::InvalidPieceChar { val: ' ' }),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, kind) = self.parts();
        write!(f, "\"{self}\" ({} {}", color.name(), kind.name())?;
        if self.has_moved() {
            write!(f, ", moved")?;
        }
        write!(f, ")")
    }
}
