/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Bitboard, Board, Color, Direction, Piece, PieceKind, Position, Square};

/// 0x88 offsets of a Knight's jumps.
pub const KNIGHT_OFFSETS: [i8; 8] = [14, 31, 33, 18, -14, -31, -33, -18];

/// 0x88 offsets of a King's steps. Also the Queen's ray directions.
pub const KING_OFFSETS: [i8; 8] = [15, 16, 17, -1, 1, -15, -16, -17];

/// 0x88 offsets of the Rook's ray directions.
pub const ROOK_OFFSETS: [i8; 4] = [16, -16, 1, -1];

/// 0x88 offsets of the Bishop's ray directions.
pub const BISHOP_OFFSETS: [i8; 4] = [15, 17, -15, -17];

/// 0x88 offsets of the squares a Pawn of each color attacks, indexed by [`Color::index`].
pub const PAWN_CAPTURE_OFFSETS: [[i8; 2]; Color::COUNT] = [[15, 17], [-15, -17]];

const REACH_KNIGHT: u8 = 1 << 0;
const REACH_KING: u8 = 1 << 1;
const REACH_ORTHOGONAL: u8 = 1 << 2;
const REACH_DIAGONAL: u8 = 1 << 3;
const REACH_WHITE_PAWN: u8 = 1 << 4;
const REACH_BLACK_PAWN: u8 = 1 << 5;

/// For every displacement `target - origin` (shifted by 128), which kinds of piece could cover it on an empty board.
///
/// On a 0x88 board every displacement between two on-board squares is unique to a single direction and distance,
/// so a single lookup classifies a pair of squares.
const REACH: [u8; 256] = build_reach_table();

const fn build_reach_table() -> [u8; 256] {
    let mut table = [0; 256];

    let mut i = 0;
    while i < 8 {
        table[(KNIGHT_OFFSETS[i] as i16 + 128) as usize] |= REACH_KNIGHT;
        table[(KING_OFFSETS[i] as i16 + 128) as usize] |= REACH_KING;
        i += 1;
    }

    let mut i = 0;
    while i < 4 {
        let mut distance = 1;
        while distance < 8 {
            table[(ROOK_OFFSETS[i] as i16 * distance + 128) as usize] |= REACH_ORTHOGONAL;
            table[(BISHOP_OFFSETS[i] as i16 * distance + 128) as usize] |= REACH_DIAGONAL;
            distance += 1;
        }
        i += 1;
    }

    let mut i = 0;
    while i < 2 {
        table[(PAWN_CAPTURE_OFFSETS[0][i] as i16 + 128) as usize] |= REACH_WHITE_PAWN;
        table[(PAWN_CAPTURE_OFFSETS[1][i] as i16 + 128) as usize] |= REACH_BLACK_PAWN;
        i += 1;
    }

    table
}

/// Returns `true` if any piece of color `by` attacks `target` in `position`.
///
/// Leapers (King, Knight, Pawn) are answered directly from a displacement table. Sliders that could reach `target`
/// on an empty board are collected into bitboards, and their rays are flood-filled through the empty squares.
/// Every other piece, of either color, acts as a blocker.
///
/// # Example
/// ```
/// # use chess88::*;
/// let pos = Position::from_fen("4k3/8/8/8/1b6/8/3P4/4K3 w - - 0 1").unwrap();
/// assert!(is_attacked(&pos, Color::Black, Square::C3));
/// assert!(!is_attacked(&pos, Color::Black, Square::E1)); // The pawn on d2 blocks the bishop
/// assert!(is_attacked(&pos, Color::White, Square::E3));
/// ```
pub fn is_attacked(position: &Position, by: Color, target: Square) -> bool {
    let pawn_flag = match by {
        Color::White => REACH_WHITE_PAWN,
        Color::Black => REACH_BLACK_PAWN,
    };

    let mut empty = Bitboard::EMPTY_BOARD;
    let mut orthogonal = Bitboard::EMPTY_BOARD;
    let mut diagonal = Bitboard::EMPTY_BOARD;

    for square in Square::iter() {
        let Some(piece) = position.piece_at(square) else {
            empty.set(square);
            continue;
        };

        if piece.color() != by {
            continue;
        }

        let reach = REACH[target.delta_index(square)];
        match piece.kind() {
            PieceKind::Pawn if reach & pawn_flag != 0 => return true,
            PieceKind::Knight if reach & REACH_KNIGHT != 0 => return true,
            PieceKind::King if reach & REACH_KING != 0 => return true,
            PieceKind::Rook | PieceKind::Queen if reach & REACH_ORTHOGONAL != 0 => {
                orthogonal.set(square)
            }
            PieceKind::Bishop | PieceKind::Queen if reach & REACH_DIAGONAL != 0 => {
                diagonal.set(square)
            }
            _ => {}
        }
    }

    let mut attacks = Bitboard::EMPTY_BOARD;
    if orthogonal.is_nonempty() {
        for direction in Direction::ORTHOGONAL {
            attacks |= orthogonal.sliding_attacks(empty, direction);
        }
    }
    if diagonal.is_nonempty() {
        for direction in Direction::DIAGONAL {
            attacks |= diagonal.sliding_attacks(empty, direction);
        }
    }

    attacks.contains(target)
}

/// Finds the square of the King of `color`, if it has one.
#[inline(always)]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.find(Piece::new(color, PieceKind::King))
}

/// Returns `true` if the King of `color` is attacked by the opponent.
///
/// A side without a King is never in check.
#[inline(always)]
pub fn is_in_check(position: &Position, color: Color) -> bool {
    king_square(position.board(), color)
        .is_some_and(|king| is_attacked(position, color.opponent(), king))
}
