/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, num::NonZeroU8, str::FromStr};

use anyhow::{bail, Result};

/// Represents the color of a player, piece, square, etc. within a chess board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[repr(u8)]
pub enum Color {
    #[default]
    White = 0,
    Black = 1,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this color's index, for indexing into lists of two elements.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the opposite color.
    ///
    /// # Example
    /// ```
    /// # use chess88_types::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns `true` if this color is White.
    #[inline(always)]
    pub const fn is_white(self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns `true` if this color is Black.
    #[inline(always)]
    pub const fn is_black(self) -> bool {
        matches!(self, Self::Black)
    }

    /// The 0x88 offset of a single forward step for a pawn of this color.
    #[inline(always)]
    pub const fn forward(self) -> i8 {
        match self {
            Self::White => 16,
            Self::Black => -16,
        }
    }

    /// `+1` for White and `-1` for Black.
    ///
    /// Useful for folding per-color contributions into a White-relative total.
    #[inline(always)]
    pub const fn sign(self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Parses a color from the side-to-move field of a FEN string.
    pub fn from_uci(color: &str) -> Result<Self> {
        match color {
            "w" | "W" => Ok(Self::White),
            "b" | "B" => Ok(Self::Black),
            _ => bail!("Invalid color string: expected `w` or `b`, got {color:?}"),
        }
    }

    /// The single character used for this color in FEN strings.
    #[inline(always)]
    pub const fn char(self) -> char {
        match self {
            Self::White => 'w',
            Self::Black => 'b',
        }
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

/// The identity of a chess piece, without any color attached.
///
/// The discriminants are the 3-bit identity codes stored in a [`Piece`].
/// Bit 2 is set exactly for the sliding pieces (Bishop, Rook, Queen).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0b001,
    Knight = 0b010,
    King = 0b011,
    Bishop = 0b100,
    Rook = 0b101,
    Queen = 0b111,
}

impl PieceKind {
    /// Number of piece kinds.
    pub const COUNT: usize = 6;

    /// An array of all piece kinds, in ascending order of their identity code.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Pawn,
            Self::Knight,
            Self::King,
            Self::Bishop,
            Self::Rook,
            Self::Queen,
        ]
    }

    /// The identity bits of this kind.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decodes a 3-bit identity code, returning `None` for the empty code and the unused `110` code.
    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0b001 => Some(Self::Pawn),
            0b010 => Some(Self::Knight),
            0b011 => Some(Self::King),
            0b100 => Some(Self::Bishop),
            0b101 => Some(Self::Rook),
            0b111 => Some(Self::Queen),
            _ => None,
        }
    }

    /// Returns `true` if this kind moves along rays (Bishop, Rook, Queen).
    ///
    /// # Example
    /// ```
    /// # use chess88_types::PieceKind;
    /// assert!(PieceKind::Queen.is_sliding());
    /// assert!(!PieceKind::King.is_sliding());
    /// ```
    #[inline(always)]
    pub const fn is_sliding(self) -> bool {
        self.bits() & Piece::SLIDING_FLAG != 0
    }

    /// Parses a piece kind from its (case-insensitive) letter.
    pub fn from_char(c: char) -> Result<Self> {
        match c.to_ascii_lowercase() {
            'p' => Ok(Self::Pawn),
            'n' => Ok(Self::Knight),
            'b' => Ok(Self::Bishop),
            'r' => Ok(Self::Rook),
            'q' => Ok(Self::Queen),
            'k' => Ok(Self::King),
            _ => bail!("Invalid char for piece kind: {c:?}"),
        }
    }

    /// The lowercase letter for this piece kind.
    #[inline(always)]
    pub const fn char(self) -> char {
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

/// A chess piece packed into a single byte.
///
/// ```text
///   _ _ _ _  _ _ _ _
///            ^ ^ ^ ^
///            | | | |
///    color --+ | | |
///    sliding --+ | |    (bit 2 of the identity)
///    identity ---+-+
/// ```
///
/// An identity of `000` means "no piece". That state is never stored in a [`Piece`];
/// an empty square is `None` in an `Option<Piece>`, which keeps the same single-byte size.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Piece(NonZeroU8);

impl Piece {
    /// Mask of the 3-bit identity code.
    pub const IDENTITY_MASK: u8 = 0b0111;
    /// Bit set for Bishops, Rooks and Queens.
    pub const SLIDING_FLAG: u8 = 0b0100;
    /// Bit set for Black pieces.
    pub const COLOR_FLAG: u8 = 0b1000;

    /// Creates a new [`Piece`] from a [`Color`] and a [`PieceKind`].
    ///
    /// # Example
    /// ```
    /// # use chess88_types::{Color, Piece, PieceKind};
    /// let piece = Piece::new(Color::Black, PieceKind::Rook);
    /// assert_eq!(piece.bits(), 0b1101);
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        let bits = kind.bits() | if color.is_black() { Self::COLOR_FLAG } else { 0 };
        match NonZeroU8::new(bits) {
            Some(bits) => Self(bits),
            // Every `PieceKind` has a non-zero identity code.
            None => unreachable!(),
        }
    }

    /// Decodes a raw byte, returning `None` if it does not describe a piece.
    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !(Self::IDENTITY_MASK | Self::COLOR_FLAG) != 0 {
            return None;
        }

        let Some(kind) = PieceKind::from_bits(bits & Self::IDENTITY_MASK) else {
            return None;
        };

        let color = if bits & Self::COLOR_FLAG != 0 {
            Color::Black
        } else {
            Color::White
        };

        Some(Self::new(color, kind))
    }

    /// The raw byte of this piece.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self.0.get()
    }

    /// The [`Color`] of this piece.
    #[inline(always)]
    pub const fn color(self) -> Color {
        if self.bits() & Self::COLOR_FLAG != 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// The [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(self) -> PieceKind {
        match PieceKind::from_bits(self.bits() & Self::IDENTITY_MASK) {
            Some(kind) => kind,
            // Constructors only ever store valid identity codes.
            None => unreachable!(),
        }
    }

    /// Returns `true` if this piece is a Bishop, Rook, or Queen.
    #[inline(always)]
    pub const fn is_sliding(self) -> bool {
        self.bits() & Self::SLIDING_FLAG != 0
    }

    /// Returns `true` if this piece is of the provided kind, regardless of color.
    #[inline(always)]
    pub const fn is(self, kind: PieceKind) -> bool {
        self.bits() & Self::IDENTITY_MASK == kind.bits()
    }

    /// Returns `true` if this piece is a Pawn.
    #[inline(always)]
    pub const fn is_pawn(self) -> bool {
        self.is(PieceKind::Pawn)
    }

    /// Returns `true` if this piece is a Rook.
    #[inline(always)]
    pub const fn is_rook(self) -> bool {
        self.is(PieceKind::Rook)
    }

    /// Returns `true` if this piece is a King.
    #[inline(always)]
    pub const fn is_king(self) -> bool {
        self.is(PieceKind::King)
    }

    /// Returns a piece of the same color, but of the provided kind.
    #[inline(always)]
    pub const fn promoted(self, kind: PieceKind) -> Self {
        Self::new(self.color(), kind)
    }

    /// Returns a piece of the same kind, but of the opposite color.
    #[inline(always)]
    pub const fn opponent(self) -> Self {
        Self::new(self.color().opponent(), self.kind())
    }

    /// Parses a piece from its FEN letter. Uppercase is White, lowercase is Black.
    ///
    /// # Example
    /// ```
    /// # use chess88_types::{Color, Piece, PieceKind};
    /// let piece = Piece::from_uci('Q').unwrap();
    /// assert_eq!(piece, Piece::new(Color::White, PieceKind::Queen));
    /// assert!(Piece::from_uci('x').is_err());
    /// ```
    pub fn from_uci(c: char) -> Result<Self> {
        let kind = PieceKind::from_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Ok(Self::new(color, kind))
    }

    /// The FEN letter of this piece.
    #[inline(always)]
    pub const fn char(self) -> char {
        let c = self.kind().char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
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
        write!(f, "{} ({:#06b})", self.char(), self.bits())
    }
}
