/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, Not},
};

use super::Square;

/// A 64-bit set of squares, bit `rank * 8 + file` standing for each on-board square.
///
/// The board itself is stored in 0x88 form; bitboards are only built when a whole-board
/// set operation is cheaper than walking squares, such as computing sliding attacks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Bitboard(u64);

impl Bitboard {
    /// A bitboard with no squares set.
    pub const EMPTY_BOARD: Self = Self(0);

    /// A bitboard with every square set.
    pub const FULL_BOARD: Self = Self(u64::MAX);

    /// Every square except those on the A file.
    pub const NOT_A_FILE: Self = Self(0xfefefefefefefefe);

    /// Every square except those on the H file.
    pub const NOT_H_FILE: Self = Self(0x7f7f7f7f7f7f7f7f);

    /// Constructs a new [`Bitboard`] from the provided bits.
    #[inline(always)]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    /// Returns the inner `u64` of this [`Bitboard`].
    #[inline(always)]
    pub const fn inner(&self) -> u64 {
        self.0
    }

    /// Constructs a [`Bitboard`] with only the provided square set.
    ///
    /// # Example
    /// ```
    /// # use chess88_types::{Bitboard, Square};
    /// assert_eq!(Bitboard::from_square(Square::C1).inner(), 0b100);
    /// assert_eq!(Bitboard::from_square(Square::A2).inner(), 1 << 8);
    /// ```
    #[inline(always)]
    pub const fn from_square(square: Square) -> Self {
        Self(1 << square.bit_index())
    }

    /// Returns `true` if no squares are set.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if at least one square is set.
    #[inline(always)]
    pub const fn is_nonempty(&self) -> bool {
        self.0 != 0
    }

    /// Returns `true` if `square` is set.
    #[inline(always)]
    pub const fn contains(&self, square: Square) -> bool {
        self.0 & Self::from_square(square).0 != 0
    }

    /// Sets `square`.
    #[inline(always)]
    pub fn set(&mut self, square: Square) {
        self.0 |= Self::from_square(square).0;
    }

    /// Number of squares set.
    #[inline(always)]
    pub const fn population(&self) -> u32 {
        self.0.count_ones()
    }

    /// Bitwise OR, usable in `const` contexts.
    #[inline(always)]
    pub const fn or(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Bitwise AND, usable in `const` contexts.
    #[inline(always)]
    pub const fn and(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Shifts every square one step in `direction`, dropping squares that would wrap around a file edge.
    #[inline(always)]
    pub const fn shifted(self, direction: Direction) -> Self {
        let shift = direction.shift();
        let bits = if shift > 0 {
            self.0 << shift
        } else {
            self.0 >> -shift
        };
        Self(bits & direction.wrap_mask().0)
    }

    /// Computes every square attacked in `direction` by sliders standing on the squares of `self`.
    ///
    /// This is a "Dumb7Fill": the sliders are repeatedly shifted one step, continuing only through `empty`
    /// squares, so each ray stops on (and includes) the first occupied square it meets.
    ///
    /// # Example
    /// ```
    /// # use chess88_types::{Bitboard, Direction, Square};
    /// let rook = Square::A1.bitboard();
    /// let empty = !(Square::A1.bitboard() | Square::A4.bitboard());
    /// let attacks = rook.sliding_attacks(empty, Direction::North);
    /// assert_eq!(attacks, Square::A2.bitboard() | Square::A3.bitboard() | Square::A4.bitboard());
    /// ```
    #[inline(always)]
    pub const fn sliding_attacks(self, empty: Self, direction: Direction) -> Self {
        // Squares on the wrapped edge can never be stepped into, so they must not carry the flood either.
        let empty = empty.and(direction.wrap_mask());

        let mut flood = Self::EMPTY_BOARD;
        let mut sliders = self;
        while sliders.is_nonempty() {
            flood = flood.or(sliders);
            sliders = sliders.shifted(direction).and(empty);
        }

        flood.shifted(direction)
    }
}

/// One of the eight ray directions on a 64-square [`Bitboard`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// The four directions a Rook moves in.
    pub const ORTHOGONAL: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];

    /// The four directions a Bishop moves in.
    pub const DIAGONAL: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// Bit shift of a single step; positive shifts left.
    #[inline(always)]
    pub const fn shift(self) -> i32 {
        match self {
            Self::North => 8,
            Self::South => -8,
            Self::East => 1,
            Self::West => -1,
            Self::NorthEast => 9,
            Self::NorthWest => 7,
            Self::SouthEast => -7,
            Self::SouthWest => -9,
        }
    }

    /// Squares that a single step in this direction may legally land on.
    ///
    /// Eastward steps can never land on the A file and westward steps can never land on the H file;
    /// anything landing there has wrapped around from the other side of the board.
    #[inline(always)]
    pub const fn wrap_mask(self) -> Bitboard {
        match self {
            Self::North | Self::South => Bitboard::FULL_BOARD,
            Self::East | Self::NorthEast | Self::SouthEast => Bitboard::NOT_A_FILE,
            Self::West | Self::NorthWest | Self::SouthWest => Bitboard::NOT_H_FILE,
        }
    }
}

impl BitOr for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

impl BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl BitXor for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn bitxor(self, rhs: Self) -> Self::Output {
        Self(self.0 ^ rhs.0)
    }
}

impl Not for Bitboard {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}

impl fmt::Display for Bitboard {
    /// Prints the bitboard as an 8x8 grid, rank 8 at the top.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let square = Square::new(file, rank);
                let c = if self.contains(square) { 'X' } else { '.' };
                write!(f, "{c}")?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            if rank > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018X})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn squares(list: &[Square]) -> Bitboard {
        list.iter()
            .fold(Bitboard::EMPTY_BOARD, |bb, sq| bb | sq.bitboard())
    }

    #[test]
    fn east_fill_does_not_wrap() {
        let rook = Square::G1.bitboard();
        let attacks = rook.sliding_attacks(Bitboard::FULL_BOARD, Direction::East);
        assert_eq!(attacks, Square::H1.bitboard());
    }

    #[test]
    fn west_fill_does_not_wrap() {
        let rook = Square::B2.bitboard();
        let attacks = rook.sliding_attacks(Bitboard::FULL_BOARD, Direction::West);
        assert_eq!(attacks, Square::A2.bitboard());
    }

    #[test]
    fn diagonal_fill_stops_at_blocker() {
        let bishop = Square::C1.bitboard();
        let empty = !squares(&[Square::C1, Square::F4]);
        let attacks = bishop.sliding_attacks(empty, Direction::NorthEast);
        assert_eq!(attacks, squares(&[Square::D2, Square::E3, Square::F4]));
    }

    #[test]
    fn fills_from_several_sliders_at_once() {
        let rooks = squares(&[Square::A1, Square::H8]);
        let empty = !rooks;
        let south = rooks.sliding_attacks(empty, Direction::South);
        assert_eq!(south.population(), 7);
        assert!(south.contains(Square::H1));
        assert!(!south.contains(Square::A1));
    }

    #[test]
    fn fill_stops_at_edge() {
        let queen = Square::H8.bitboard();
        for direction in [Direction::North, Direction::East, Direction::NorthEast] {
            assert!(queen
                .sliding_attacks(Bitboard::FULL_BOARD, direction)
                .is_empty());
        }
    }
}
