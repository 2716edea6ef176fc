/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::{Bitboard, Color};

/// A square on a 0x88 board.
///
/// The index is `rank * 16 + file`, so every rank is followed by eight off-board slots:
///
/// ```text
/// 0 0 0 0 0 0 0 0 x x x x x x x x   <- rank 8 (112..=119)
/// ...
/// 0 0 0 0 0 0 0 0 x x x x x x x x   <- rank 1 (0..=7)
/// ```
///
/// Any index with a bit of `0x88` set lies off the board, which lets move generation validate
/// an offset step with a single mask instead of separate file and rank bounds checks.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Square(u8);

macro_rules! squares {
    ($($name:ident = $index:literal),* $(,)?) => {
        $(
            #[doc = concat!("The ", stringify!($name), " square.")]
            pub const $name: Self = Self($index);
        )*
    };
}

impl Square {
    /// Number of on-board squares.
    pub const COUNT: usize = 64;

    /// Number of slots in a 0x88 board array, including the off-board half.
    pub const BOARD_SIZE: usize = 128;

    /// Mask that is non-zero for every off-board index.
    pub const OFF_BOARD_MASK: i16 = 0x88;

    squares!(
        A1 = 0x00, B1 = 0x01, C1 = 0x02, D1 = 0x03, E1 = 0x04, F1 = 0x05, G1 = 0x06, H1 = 0x07,
        A2 = 0x10, B2 = 0x11, C2 = 0x12, D2 = 0x13, E2 = 0x14, F2 = 0x15, G2 = 0x16, H2 = 0x17,
        A3 = 0x20, B3 = 0x21, C3 = 0x22, D3 = 0x23, E3 = 0x24, F3 = 0x25, G3 = 0x26, H3 = 0x27,
        A4 = 0x30, B4 = 0x31, C4 = 0x32, D4 = 0x33, E4 = 0x34, F4 = 0x35, G4 = 0x36, H4 = 0x37,
        A5 = 0x40, B5 = 0x41, C5 = 0x42, D5 = 0x43, E5 = 0x44, F5 = 0x45, G5 = 0x46, H5 = 0x47,
        A6 = 0x50, B6 = 0x51, C6 = 0x52, D6 = 0x53, E6 = 0x54, F6 = 0x55, G6 = 0x56, H6 = 0x57,
        A7 = 0x60, B7 = 0x61, C7 = 0x62, D7 = 0x63, E7 = 0x64, F7 = 0x65, G7 = 0x66, H7 = 0x67,
        A8 = 0x70, B8 = 0x71, C8 = 0x72, D8 = 0x73, E8 = 0x74, F8 = 0x75, G8 = 0x76, H8 = 0x77,
    );

    /// Creates a new [`Square`] from a file and rank, both in `0..8`.
    ///
    /// # Example
    /// ```
    /// # use chess88_types::Square;
    /// assert_eq!(Square::new(4, 3), Square::E4);
    /// ```
    #[inline(always)]
    pub const fn new(file: u8, rank: u8) -> Self {
        debug_assert!(file < 8 && rank < 8);
        Self(rank * 16 + file)
    }

    /// Returns `true` if `index` lies on the board in 0x88 form.
    #[inline(always)]
    pub const fn is_on_board(index: i16) -> bool {
        index >= 0 && index & Self::OFF_BOARD_MASK == 0
    }

    /// Creates a [`Square`] from a 0x88 index, if that index is on the board.
    #[inline(always)]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::BOARD_SIZE && Self::is_on_board(index as i16) {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// The 0x88 index of this square.
    #[inline(always)]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The file of this square, `0` being the A file.
    #[inline(always)]
    pub const fn file(self) -> u8 {
        self.0 & 0x07
    }

    /// The rank of this square, `0` being the first rank.
    #[inline(always)]
    pub const fn rank(self) -> u8 {
        self.0 >> 4
    }

    /// The rank of this square as seen by `color`, so that each side's back rank is `0`.
    #[inline(always)]
    pub const fn relative_rank(self, color: Color) -> u8 {
        match color {
            Color::White => self.rank(),
            Color::Black => 7 - self.rank(),
        }
    }

    /// Steps `delta` 0x88 slots away from this square.
    ///
    /// Returns `None` if the destination is off the board.
    ///
    /// # Example
    /// ```
    /// # use chess88_types::Square;
    /// assert_eq!(Square::B1.offset(31), Some(Square::A3));
    /// assert_eq!(Square::A1.offset(-1), None);
    /// assert_eq!(Square::H8.offset(17), None);
    /// ```
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        let index = self.0 as i16 + delta as i16;
        if Self::is_on_board(index) {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// The difference `self - origin`, shifted into `0..256` for table lookups.
    #[inline(always)]
    pub const fn delta_index(self, origin: Self) -> usize {
        (self.0 as i16 - origin.0 as i16 + 128) as usize
    }

    /// The bit index of this square on a 64-square [`Bitboard`]: `rank * 8 + file`.
    #[inline(always)]
    pub const fn bit_index(self) -> u32 {
        (self.rank() * 8 + self.file()) as u32
    }

    /// A [`Bitboard`] with only this square set.
    #[inline(always)]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard::from_square(self)
    }

    /// The square on the same file with the rank mirrored (A1 <-> A8).
    #[inline(always)]
    pub const fn flipped(self) -> Self {
        Self::new(self.file(), 7 - self.rank())
    }

    /// Mirrors this square's rank for Black, so that White's squares can be used as templates.
    ///
    /// # Example
    /// ```
    /// # use chess88_types::{Color, Square};
    /// assert_eq!(Square::G1.rank_relative_to(Color::White), Square::G1);
    /// assert_eq!(Square::G1.rank_relative_to(Color::Black), Square::G8);
    /// ```
    #[inline(always)]
    pub const fn rank_relative_to(self, color: Color) -> Self {
        match color {
            Color::White => self,
            Color::Black => self.flipped(),
        }
    }

    /// An iterator over all 64 on-board squares, from A1 to H8 rank by rank.
    #[inline(always)]
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        (0..Self::BOARD_SIZE).filter_map(Self::from_index)
    }

    /// Parses a square in coordinate form (`e4`).
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid square {square:?}: expected a file and a rank, like `e4`");
        };

        if !('a'..='h').contains(&file) {
            bail!("Invalid file {file:?} in square {square:?}");
        }
        let rank = rank
            .to_digit(10)
            .filter(|rank| (1..=8).contains(rank))
            .ok_or(anyhow!("Invalid rank {rank:?} in square {square:?}"))?;

        Ok(Self::new(file as u8 - b'a', rank as u8 - 1))
    }

    /// Formats this square in coordinate form (`e4`).
    pub fn to_uci(self) -> String {
        format!("{}{}", (b'a' + self.file()) as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.to_uci(), self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_only_on_board_squares() {
        let squares: Vec<_> = Square::iter().collect();
        assert_eq!(squares.len(), Square::COUNT);
        assert_eq!(squares.first(), Some(&Square::A1));
        assert_eq!(squares.last(), Some(&Square::H8));
        assert!(squares.iter().all(|sq| sq.index() & 0x88 == 0));
    }

    #[test]
    fn offsets_do_not_wrap_between_ranks() {
        assert_eq!(Square::H1.offset(1), None);
        assert_eq!(Square::A2.offset(-1), None);
        assert_eq!(Square::G1.offset(18), None);
        assert_eq!(Square::E1.offset(-16), None);
        assert_eq!(Square::D4.offset(17), Some(Square::E5));
        assert_eq!(Square::D4.offset(-33), Some(Square::C2));
    }

    #[test]
    fn bit_index_maps_to_64_squares() {
        assert_eq!(Square::A1.bit_index(), 0);
        assert_eq!(Square::H1.bit_index(), 7);
        assert_eq!(Square::A2.bit_index(), 8);
        assert_eq!(Square::H8.bit_index(), 63);
    }

    #[test]
    fn uci_round_trip() {
        for square in Square::iter() {
            assert_eq!(Square::from_uci(&square.to_uci()).unwrap(), square);
        }
        assert!(Square::from_uci("i1").is_err());
        assert!(Square::from_uci("a9").is_err());
        assert!(Square::from_uci("a").is_err());
        assert!(Square::from_uci("a10").is_err());
    }
}
