/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![doc = include_str!("../README.md")]

pub use chess88_types::*;

/// Square attack detection and the piece offsets shared with move generation.
mod attacks;
/// A session context that owns the current position and at most one running search.
mod engine;
/// Static evaluation with material weights and piece-square tables.
mod eval;
/// In-place, reversible application of moves to a position.
mod make;
/// All code related to generating moves (legal and pseudo-legal) for pieces on a board.
mod movegen;
/// Enums and structs for modeling the movement of a piece on a chessboard.
mod moves;
/// Utility functions for performance testing and move generator verification.
mod perft;
/// A chessboard, complete with piece placements, turn counters, and game state information.
mod position;
/// Iterative deepening alpha-beta search, and running it in the background.
mod search;

pub use attacks::*;
pub use engine::*;
pub use eval::*;
pub use make::*;
pub use movegen::*;
pub use moves::*;
pub use perft::*;
pub use position::*;
pub use search::*;

/// Re-exports all the things you'll need.
pub mod prelude {
    pub use crate::attacks::*;
    pub use crate::engine::*;
    pub use crate::eval::*;
    pub use crate::make::*;
    pub use crate::movegen::*;
    pub use crate::moves::*;
    pub use crate::perft::*;
    pub use crate::position::*;
    pub use crate::search::*;
    pub use chess88_types::*;
}
