/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// FEN string for the starting position of chess.
pub const FEN_STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A popular FEN string for debugging move generation.
///
/// <https://www.chessprogramming.org/Perft_Results#Position_2>
pub const FEN_KIWIPETE: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// Upper bound on the number of pseudo-legal moves available in a single position.
///
/// The largest known legal count is 218; pseudo-legal generation can exceed that slightly,
/// so the move lists are sized with some headroom. Positions are only accepted from FEN when
/// each side has no more material than promoting its Pawns could produce, which keeps them
/// within this bound.
pub const MAX_NUM_MOVES: usize = 256;
