/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, bail, Result};

use super::{generate_legal_moves, CastleSide, PieceKind, Position, Square};

/// Represents the different kinds of moves that can be made during a chess game.
///
/// The discriminant is the 4-bit special code stored in a [`Move`]:
///
/// ```text
///   promotion  capture  special 1  special 0
/// ```
///
/// For promotions, the two special bits select the promoted piece (knight, bishop, rook, queen).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug)]
#[repr(u8)]
pub enum MoveKind {
    /// Involves only a single piece moving from one location to another, and does not change the quantity or kind of any pieces on the board.
    #[default]
    Quiet = 0b0000,

    /// A special case on a Pawn's first move, wherein it can advance two squares forward.
    PawnDoublePush = 0b0001,

    /// Involves the King and a Rook sliding past each other on the King's side of the board.
    ShortCastle = 0b0010,

    /// Involves the King and a Rook sliding past each other on the Queen's side of the board.
    LongCastle = 0b0011,

    /// Involves a piece moving onto a square occupied by an opponent's piece, removing it from the board.
    Capture = 0b0100,

    /// A special variant of capturing that occurs when a Pawn executes a double push, and an enemy Pawn is next to it.
    EnPassantCapture = 0b0101,

    /// Involves a Pawn reaching the opponent's side of the board (rank 8 for White, rank 1 for Black) and becoming a Knight.
    PromoteKnight = 0b1000,

    /// Involves a Pawn reaching the opponent's side of the board (rank 8 for White, rank 1 for Black) and becoming a Bishop.
    PromoteBishop = 0b1001,

    /// Involves a Pawn reaching the opponent's side of the board (rank 8 for White, rank 1 for Black) and becoming a Rook.
    PromoteRook = 0b1010,

    /// Involves a Pawn reaching the opponent's side of the board (rank 8 for White, rank 1 for Black) and becoming a Queen.
    PromoteQueen = 0b1011,

    /// Involves a Pawn moving onto a square on the opponent's side of the board that is occupied by an opponent's piece, removing it from the board, and promoting this Pawn to a Knight.
    CaptureAndPromoteKnight = 0b1100,

    /// Involves a Pawn moving onto a square on the opponent's side of the board that is occupied by an opponent's piece, removing it from the board, and promoting this Pawn to a Bishop.
    CaptureAndPromoteBishop = 0b1101,

    /// Involves a Pawn moving onto a square on the opponent's side of the board that is occupied by an opponent's piece, removing it from the board, and promoting this Pawn to a Rook.
    CaptureAndPromoteRook = 0b1110,

    /// Involves a Pawn moving onto a square on the opponent's side of the board that is occupied by an opponent's piece, removing it from the board, and promoting this Pawn to a Queen.
    CaptureAndPromoteQueen = 0b1111,
}

impl MoveKind {
    /// Set on every promotion.
    pub const FLAG_PROMOTION: u8 = 0b1000;
    /// Set on every capture, including en passant and capturing promotions.
    pub const FLAG_CAPTURE: u8 = 0b0100;
    /// The two low "special" bits.
    pub const SPECIAL_MASK: u8 = 0b0011;

    /// The pieces a Pawn may promote to, in the order of their special bits.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    /// Decodes a 4-bit special code. Codes `0b0110` and `0b0111` are unused and yield `None`.
    #[inline(always)]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        Some(match bits {
            0b0000 => Self::Quiet,
            0b0001 => Self::PawnDoublePush,
            0b0010 => Self::ShortCastle,
            0b0011 => Self::LongCastle,
            0b0100 => Self::Capture,
            0b0101 => Self::EnPassantCapture,
            0b1000 => Self::PromoteKnight,
            0b1001 => Self::PromoteBishop,
            0b1010 => Self::PromoteRook,
            0b1011 => Self::PromoteQueen,
            0b1100 => Self::CaptureAndPromoteKnight,
            0b1101 => Self::CaptureAndPromoteBishop,
            0b1110 => Self::CaptureAndPromoteRook,
            0b1111 => Self::CaptureAndPromoteQueen,
            _ => return None,
        })
    }

    /// The 4-bit special code of this kind.
    #[inline(always)]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Creates a promotion kind that promotes to `promotion`, capturing if `capture` is set.
    ///
    /// Returns `None` if `promotion` is not a piece a Pawn may promote to.
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// assert_eq!(MoveKind::promotion(PieceKind::Rook, false), Some(MoveKind::PromoteRook));
    /// assert_eq!(MoveKind::promotion(PieceKind::Queen, true), Some(MoveKind::CaptureAndPromoteQueen));
    /// assert_eq!(MoveKind::promotion(PieceKind::King, false), None);
    /// ```
    #[inline(always)]
    pub const fn promotion(promotion: PieceKind, capture: bool) -> Option<Self> {
        let special = match promotion {
            PieceKind::Knight => 0b00,
            PieceKind::Bishop => 0b01,
            PieceKind::Rook => 0b10,
            PieceKind::Queen => 0b11,
            _ => return None,
        };
        let capture = if capture { Self::FLAG_CAPTURE } else { 0 };
        Self::from_bits(Self::FLAG_PROMOTION | capture | special)
    }

    /// If this kind is a promotion, returns the piece being promoted to.
    #[inline(always)]
    pub const fn promotion_kind(self) -> Option<PieceKind> {
        if self.is_promotion() {
            Some(Self::PROMOTIONS[(self.bits() & Self::SPECIAL_MASK) as usize])
        } else {
            None
        }
    }

    /// Returns `true` if this kind promotes a Pawn.
    #[inline(always)]
    pub const fn is_promotion(self) -> bool {
        self.bits() & Self::FLAG_PROMOTION != 0
    }

    /// Returns `true` if this kind removes an enemy piece.
    #[inline(always)]
    pub const fn is_capture(self) -> bool {
        self.bits() & Self::FLAG_CAPTURE != 0
    }

    /// If this kind is a castle, returns the side being castled toward.
    #[inline(always)]
    pub const fn castle_side(self) -> Option<CastleSide> {
        match self {
            Self::ShortCastle => Some(CastleSide::Short),
            Self::LongCastle => Some(CastleSide::Long),
            _ => None,
        }
    }
}

/// Represents a move made on a chess board, packed into 20 bits of a `u32`.
///
/// ```text
///   19..=16     15..=8      7..=0
///   special     origin      destination
/// ```
///
/// Squares are stored as their 0x88 indices. Castling moves carry the King's origin and destination.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Move(u32);

impl Move {
    /// Mask for the destination square.
    const DST_MASK: u32 = 0x0000_00FF;
    /// Start index of the origin square.
    const SRC_BITS: u32 = 8;
    /// Mask for the origin square.
    const SRC_MASK: u32 = 0x0000_FF00;
    /// Start index of the special code.
    const FLG_BITS: u32 = 16;
    /// Mask for the special code.
    const FLG_MASK: u32 = 0x000F_0000;

    /// Creates a new [`Move`] from the given [`Square`]s and a [`MoveKind`].
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let e2e4 = Move::new(Square::E2, Square::E4, MoveKind::PawnDoublePush);
    /// assert_eq!(e2e4.to_string(), "e2e4");
    /// assert_eq!(e2e4.bits(), 0x1_14_34);
    /// ```
    #[inline(always)]
    pub const fn new(from: Square, to: Square, kind: MoveKind) -> Self {
        Self(
            (kind.bits() as u32) << Self::FLG_BITS
                | (from.index() as u32) << Self::SRC_BITS
                | to.index() as u32,
        )
    }

    /// Returns the raw bits of this move.
    #[inline(always)]
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// Fetches the source (or "from") part of this [`Move`], as a [`Square`].
    #[inline(always)]
    pub const fn from(&self) -> Square {
        let index = ((self.0 & Self::SRC_MASK) >> Self::SRC_BITS) as usize;
        match Square::from_index(index) {
            Some(square) => square,
            // Only ever constructed from on-board squares
            None => unreachable!(),
        }
    }

    /// Fetches the destination (or "to") part of this [`Move`], as a [`Square`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        let index = (self.0 & Self::DST_MASK) as usize;
        match Square::from_index(index) {
            Some(square) => square,
            None => unreachable!(),
        }
    }

    /// Fetches the [`MoveKind`] part of this [`Move`].
    #[inline(always)]
    pub const fn kind(&self) -> MoveKind {
        let bits = ((self.0 & Self::FLG_MASK) >> Self::FLG_BITS) as u8;
        match MoveKind::from_bits(bits) {
            Some(kind) => kind,
            None => unreachable!(),
        }
    }

    /// Fetches the parts of this [`Move`] in a tuple of `(from, to, kind)`.
    #[inline(always)]
    pub const fn parts(&self) -> (Square, Square, MoveKind) {
        (self.from(), self.to(), self.kind())
    }

    /// Returns `true` if this [`Move`] is a capture of any kind (capture, promotion-capture, en passant capture).
    #[inline(always)]
    pub const fn is_capture(&self) -> bool {
        self.kind().is_capture()
    }

    /// Returns `true` if this [`Move`] is en passant.
    #[inline(always)]
    pub const fn is_en_passant(&self) -> bool {
        matches!(self.kind(), MoveKind::EnPassantCapture)
    }

    /// Returns `true` if this [`Move`] is a double pawn push.
    #[inline(always)]
    pub const fn is_pawn_double_push(&self) -> bool {
        matches!(self.kind(), MoveKind::PawnDoublePush)
    }

    /// Returns `true` if this [`Move`] is a short (kingside) castle.
    #[inline(always)]
    pub const fn is_short_castle(&self) -> bool {
        matches!(self.kind(), MoveKind::ShortCastle)
    }

    /// Returns `true` if this [`Move`] is a long (queenside) castle.
    #[inline(always)]
    pub const fn is_long_castle(&self) -> bool {
        matches!(self.kind(), MoveKind::LongCastle)
    }

    /// Returns `true` if this [`Move`] is a castle of either side.
    #[inline(always)]
    pub const fn is_castle(&self) -> bool {
        self.kind().castle_side().is_some()
    }

    /// Returns `true` if this [`Move`] is a promotion, capturing or not.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        self.kind().is_promotion()
    }

    /// Returns `true` if this [`Move`] moves a piece without capturing and without any special effect.
    #[inline(always)]
    pub const fn is_quiet(&self) -> bool {
        matches!(self.kind(), MoveKind::Quiet)
    }

    /// If this [`Move`] is a promotion, returns the piece being promoted to.
    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.kind().promotion_kind()
    }

    /// Resolves a move in coordinate notation (`e2e4`, `e7e8q`, `e1g1`) against the legal moves of `position`.
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let pos = Position::default();
    /// let mv = Move::from_uci(&pos, "e2e4").unwrap();
    /// assert_eq!(mv.kind(), MoveKind::PawnDoublePush);
    ///
    /// assert!(Move::from_uci(&pos, "e2e5").is_err());
    /// assert!(Move::from_uci(&pos, "e2").is_err());
    /// ```
    pub fn from_uci(position: &Position, uci: &str) -> Result<Self> {
        let (Some(from), Some(to)) = (uci.get(0..2), uci.get(2..4)) else {
            bail!("Invalid move {uci:?}: expected at least an origin and a destination");
        };
        let from = Square::from_uci(from)?;
        let to = Square::from_uci(to)?;

        let promotion = match uci.get(4..) {
            None | Some("") => None,
            Some(p) => {
                let mut chars = p.chars();
                let (Some(c), None) = (chars.next(), chars.next()) else {
                    bail!("Invalid move {uci:?}: trailing characters {p:?}");
                };
                Some(PieceKind::from_char(c)?)
            }
        };

        let mut position = *position;
        generate_legal_moves(&mut position)
            .into_iter()
            .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion)
            .ok_or(anyhow!(
                "Illegal move {uci:?} in position {}",
                position.to_fen()
            ))
    }

    /// Formats this move in coordinate notation, as used by the UCI protocol.
    ///
    /// Unlike [`fmt::Display`], castling is written as the King's move (`e1g1`).
    pub fn to_uci(&self) -> String {
        match self.promotion() {
            Some(promotion) => format!("{}{}{}", self.from(), self.to(), promotion.char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }
}

impl fmt::Display for Move {
    /// Displays this move in coordinate notation, except for castling (`0-0` and `0-0-0`).
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let castle = Move::new(Square::E8, Square::C8, MoveKind::LongCastle);
    /// assert_eq!(castle.to_string(), "0-0-0");
    /// assert_eq!(castle.to_uci(), "e8c8");
    ///
    /// let promote = Move::new(Square::B7, Square::C8, MoveKind::CaptureAndPromoteKnight);
    /// assert_eq!(promote.to_string(), "b7c8n");
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind().castle_side() {
            Some(CastleSide::Short) => write!(f, "0-0"),
            Some(CastleSide::Long) => write!(f, "0-0-0"),
            None => write!(f, "{}", self.to_uci()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.to_uci(), self.kind())
    }
}
