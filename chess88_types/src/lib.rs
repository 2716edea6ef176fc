/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

/// 64-square bitboards and the directional flood fills used for sliding attacks.
mod bitboard;
/// Enums for piece kinds, colors, and the packed single-byte chess piece.
mod piece;
/// Squares on a 0x88 board.
mod square;
/// Misc constants shared across the workspace.
mod utils;

pub use bitboard::*;
pub use piece::*;
pub use square::*;
pub use utils::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::bitboard::*;
    pub use crate::piece::*;
    pub use crate::square::*;
    pub use crate::utils::*;
}
