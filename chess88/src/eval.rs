/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Color, Piece, PieceKind, Position, Square};

/// Base value of each piece kind, in centipawns.
#[inline(always)]
pub const fn piece_weight(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 10_000,
    }
}

// Square tables of Tomasz Michniewski's "Simplified Evaluation Function".
// Written from White's point of view, rank 8 first, so that they read like a diagram.

#[rustfmt::skip]
const PAWN_TABLE: [i32; Square::COUNT] = [
     0,   0,   0,   0,   0,   0,   0,   0,
    50,  50,  50,  50,  50,  50,  50,  50,
    10,  10,  20,  30,  30,  20,  10,  10,
     5,   5,  10,  25,  25,  10,   5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,  -5, -10,   0,   0, -10,  -5,   5,
     5,  10,  10, -20, -20,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; Square::COUNT] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; Square::COUNT] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; Square::COUNT] = [
     0,   0,   0,   0,   0,   0,   0,   0,
     5,  10,  10,  10,  10,  10,  10,   5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     0,   0,   0,   5,   5,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; Square::COUNT] = [
    -20, -10, -10,  -5,  -5, -10, -10, -20,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -10,   0,   5,   5,   5,   5,   0, -10,
     -5,   0,   5,   5,   5,   5,   0,  -5,
      0,   0,   5,   5,   5,   5,   0,  -5,
    -10,   5,   5,   5,   5,   5,   0, -10,
    -10,   0,   5,   0,   0,   0,   0, -10,
    -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_TABLE: [i32; Square::COUNT] = [
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -10, -20, -20, -20, -20, -20, -20, -10,
     20,  20,   0,   0,   0,   0,  20,  20,
     20,  30,  10,   0,   0,  10,  30,  20,
];

#[inline(always)]
const fn square_table(kind: PieceKind) -> &'static [i32; Square::COUNT] {
    match kind {
        PieceKind::Pawn => &PAWN_TABLE,
        PieceKind::Knight => &KNIGHT_TABLE,
        PieceKind::Bishop => &BISHOP_TABLE,
        PieceKind::Rook => &ROOK_TABLE,
        PieceKind::Queen => &QUEEN_TABLE,
        PieceKind::King => &KING_TABLE,
    }
}

/// Value of `piece` standing on `square`, in centipawns, always positive.
///
/// The tables are drawn for White with rank 8 on top, so White reads them upside down and Black reads them as-is.
#[inline(always)]
pub const fn piece_square_value(piece: Piece, square: Square) -> i32 {
    let rank = match piece.color() {
        Color::White => 7 - square.rank(),
        Color::Black => square.rank(),
    };
    let index = rank as usize * 8 + square.file() as usize;

    piece_weight(piece.kind()) + square_table(piece.kind())[index]
}

/// Statically evaluates `position`, in centipawns, from the perspective of the side to move.
///
/// Positive scores favor the side to move. Evaluating the color-mirrored position gives the same score.
///
/// # Example
/// ```
/// # use chess88::*;
/// assert_eq!(evaluate(&Position::default()), 0);
///
/// // White is a queen up, and it is White's move
/// let pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
/// assert_eq!(evaluate(&pos), 895);
/// ```
pub fn evaluate(position: &Position) -> i32 {
    let score: i32 = position
        .iter()
        .map(|(square, piece)| piece.color().sign() * piece_square_value(piece, square))
        .sum();

    score * position.side_to_move().sign()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEN_KIWIPETE;

    #[test]
    fn test_evaluate_from_both_sides() {
        let white = "r1b1k1nr/1p3ppp/pn1b4/8/1p2P3/2PP4/P1P2PPP/2BQK2R w Kkq - 0 11";
        let black = "r1b1k1nr/1p3ppp/pn1b4/8/1p2P3/2PP4/P1P2PPP/2BQK2R b Kkq - 0 11";

        assert_eq!(evaluate(&Position::from_fen(white).unwrap()), -275);
        assert_eq!(evaluate(&Position::from_fen(black).unwrap()), 275);
    }

    #[test]
    fn test_first_move_bonus() {
        // e2 is worth -20 to a pawn and e4 is worth +20
        let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
            .unwrap();
        assert_eq!(evaluate(&pos), -40);
    }

    #[test]
    fn test_tables_are_read_from_each_side() {
        let white_knight = Piece::new(Color::White, PieceKind::Knight);
        let black_knight = Piece::new(Color::Black, PieceKind::Knight);
        assert_eq!(piece_square_value(white_knight, Square::B1), 300 - 40);
        assert_eq!(piece_square_value(black_knight, Square::B8), 300 - 40);
        assert_eq!(piece_square_value(white_knight, Square::E5), 300 + 20);

        let white_king = Piece::new(Color::White, PieceKind::King);
        let black_king = Piece::new(Color::Black, PieceKind::King);
        assert_eq!(piece_square_value(white_king, Square::G1), 10_030);
        assert_eq!(piece_square_value(black_king, Square::G8), 10_030);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let fens = [
            crate::FEN_STARTPOS,
            FEN_KIWIPETE,
            "r1b1k1nr/1p3ppp/pn1b4/8/1p2P3/2PP4/P1P2PPP/2BQK2R w Kkq - 0 11",
            "8/8/1P2K3/8/2n5/1q6/8/5k2 b - - 0 1",
            "rnbqkb1r/ppp1pppp/8/3p2B1/3Pn3/2N5/PPPQPPPP/R3KBNR w KQkq - 2 5",
        ];

        for fen in fens {
            let pos = Position::from_fen(fen).unwrap();
            let mirrored = pos.mirrored();

            assert_eq!(evaluate(&pos), evaluate(&mirrored), "{fen}");

            let mut other_side = pos;
            other_side.toggle_side_to_move();
            assert_eq!(evaluate(&pos), -evaluate(&other_side), "{fen}");
        }
    }
}
