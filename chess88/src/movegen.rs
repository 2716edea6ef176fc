/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{
    is_attacked, is_in_check, CastleSide, Color, Move, MoveKind, Piece, PieceKind, Position,
    Square, BISHOP_OFFSETS, KING_OFFSETS, KNIGHT_OFFSETS, MAX_NUM_MOVES, PAWN_CAPTURE_OFFSETS,
    ROOK_OFFSETS,
};

/// An alias for an [`arrayvec::ArrayVec`] containing at most [`MAX_NUM_MOVES`] moves.
pub type MoveList = arrayvec::ArrayVec<Move, MAX_NUM_MOVES>;

/// Generates every pseudo-legal move for the side to move.
///
/// Moves obey piece movement rules, but may leave the mover's own King in check.
/// Castling is fully checked, since passing through an attacked square is not caught by the legality filter.
///
/// # Example
/// ```
/// # use chess88::*;
/// let pos = Position::default();
/// assert_eq!(generate_moves(&pos).len(), 20);
/// ```
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let color = position.side_to_move();

    for (from, piece) in position.iter() {
        if piece.color() != color {
            continue;
        }

        match piece.kind() {
            PieceKind::Pawn => generate_pawn_moves(position, from, color, &mut moves),
            PieceKind::Knight => {
                generate_leaper_moves(position, from, color, &KNIGHT_OFFSETS, &mut moves)
            }
            PieceKind::King => {
                generate_leaper_moves(position, from, color, &KING_OFFSETS, &mut moves);
                generate_castling_moves(position, from, color, &mut moves);
            }
            PieceKind::Bishop => {
                generate_slider_moves(position, from, color, &BISHOP_OFFSETS, &mut moves)
            }
            PieceKind::Rook => {
                generate_slider_moves(position, from, color, &ROOK_OFFSETS, &mut moves)
            }
            PieceKind::Queen => {
                generate_slider_moves(position, from, color, &KING_OFFSETS, &mut moves)
            }
        }
    }

    moves
}

/// Generates every legal move for the side to move.
///
/// Each pseudo-legal move is played and taken back, keeping only those that leave the mover's King safe.
/// `position` is identical before and after this call.
///
/// An empty list means the side to move is checkmated or stalemated.
///
/// # Example
/// ```
/// # use chess88::*;
/// let mut pos = Position::from_fen("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1").unwrap();
/// let moves = generate_legal_moves(&mut pos);
/// assert_eq!(moves.len(), 3); // Kd1, Kf1, Kxe2
/// ```
pub fn generate_legal_moves(position: &mut Position) -> MoveList {
    let color = position.side_to_move();

    let mut legal = MoveList::new();
    for mv in generate_moves(position) {
        let artifacts = position.make_move(mv);
        if !is_in_check(position, color) {
            legal.push(mv);
        }
        position.unmake_move(mv, artifacts);
    }

    legal
}

impl Position {
    /// Checks whether `mv` is legal in this position.
    pub fn is_legal(&self, mv: Move) -> bool {
        let mut copied = *self;
        generate_legal_moves(&mut copied).contains(&mv)
    }
}

/// Creates and appends a [`Move`] that is either a quiet or capture.
#[inline(always)]
fn serialize_normal_move(position: &Position, from: Square, to: Square, moves: &mut MoveList) {
    let kind = if position.has(to) {
        MoveKind::Capture
    } else {
        MoveKind::Quiet
    };

    moves.push(Move::new(from, to, kind));
}

/// Appends all four promotions of a Pawn moving from `from` to `to`.
#[inline(always)]
fn serialize_promotions(from: Square, to: Square, capture: bool, moves: &mut MoveList) {
    for promotion in MoveKind::PROMOTIONS {
        if let Some(kind) = MoveKind::promotion(promotion, capture) {
            moves.push(Move::new(from, to, kind));
        }
    }
}

/// Returns `true` if `to` holds a piece that `color` may capture.
#[inline(always)]
fn is_enemy(position: &Position, to: Square, color: Color) -> bool {
    position.piece_at(to).is_some_and(|piece| piece.color() != color)
}

fn generate_pawn_moves(position: &Position, from: Square, color: Color, moves: &mut MoveList) {
    let forward = color.forward();
    // A pawn moving onto this rank promotes
    let promotes = |to: Square| to.relative_rank(color) == 7;

    if let Some(to) = from.offset(forward) {
        if !position.has(to) {
            if promotes(to) {
                serialize_promotions(from, to, false, moves);
            } else {
                moves.push(Move::new(from, to, MoveKind::Quiet));

                if from.relative_rank(color) == 1 {
                    if let Some(double) = to.offset(forward).filter(|&sq| !position.has(sq)) {
                        moves.push(Move::new(from, double, MoveKind::PawnDoublePush));
                    }
                }
            }
        }
    }

    for offset in PAWN_CAPTURE_OFFSETS[color.index()] {
        let Some(to) = from.offset(offset) else {
            continue;
        };

        if is_enemy(position, to, color) {
            if promotes(to) {
                serialize_promotions(from, to, true, moves);
            } else {
                moves.push(Move::new(from, to, MoveKind::Capture));
            }
        } else if position.ep_square() == Some(to) {
            moves.push(Move::new(from, to, MoveKind::EnPassantCapture));
        }
    }
}

fn generate_leaper_moves(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[i8],
    moves: &mut MoveList,
) {
    for &offset in offsets {
        let Some(to) = from.offset(offset) else {
            continue;
        };

        match position.piece_at(to) {
            Some(piece) if piece.color() == color => {}
            _ => serialize_normal_move(position, from, to, moves),
        }
    }
}

fn generate_slider_moves(
    position: &Position,
    from: Square,
    color: Color,
    offsets: &[i8],
    moves: &mut MoveList,
) {
    for &offset in offsets {
        let mut ray = from.offset(offset);

        while let Some(to) = ray {
            match position.piece_at(to) {
                None => moves.push(Move::new(from, to, MoveKind::Quiet)),
                Some(piece) => {
                    if piece.color() != color {
                        moves.push(Move::new(from, to, MoveKind::Capture));
                    }
                    break;
                }
            }

            ray = to.offset(offset);
        }
    }
}

/// Castling requires the right to be held, the King and Rook on their home squares, every square between them empty,
/// and none of the squares the King starts on, passes over, or lands on to be attacked.
fn generate_castling_moves(position: &Position, from: Square, color: Color, moves: &mut MoveList) {
    if from != CastleSide::king_home(color) {
        return;
    }

    let rook = Piece::new(color, PieceKind::Rook);
    let enemy = color.opponent();

    for side in CastleSide::ALL {
        if !position.castling_rights().has(color, side) {
            continue;
        }

        let rook_home = side.rook_home(color);
        if position.piece_at(rook_home) != Some(rook) {
            continue;
        }

        let step: i8 = match side {
            CastleSide::Short => 1,
            CastleSide::Long => -1,
        };

        // Every square strictly between the King and the Rook must be empty
        let mut path_is_clear = true;
        let mut between = from.offset(step);
        while let Some(square) = between.filter(|&sq| sq != rook_home) {
            if position.has(square) {
                path_is_clear = false;
                break;
            }
            between = square.offset(step);
        }
        if !path_is_clear {
            continue;
        }

        // The King's start, transit and landing squares must be safe
        let to = side.king_destination(color);
        let transit = side.rook_destination(color);
        if [from, transit, to]
            .into_iter()
            .any(|square| is_attacked(position, enemy, square))
        {
            continue;
        }

        let kind = match side {
            CastleSide::Short => MoveKind::ShortCastle,
            CastleSide::Long => MoveKind::LongCastle,
        };
        moves.push(Move::new(from, to, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_moves(fen: &str) -> usize {
        generate_moves(&Position::from_fen(fen).unwrap()).len()
    }

    fn uci_moves(moves: &MoveList) -> Vec<String> {
        let mut moves: Vec<_> = moves.iter().map(Move::to_uci).collect();
        moves.sort();
        moves
    }

    #[test]
    fn test_pseudo_legal_move_counts() {
        let cases = [
            ("Starting position", crate::FEN_STARTPOS, 20),
            ("King", "8/5k2/8/8/3K4/8/8/8 w - - 0 1", 8),
            ("Rook", "8/5k2/8/8/3R4/8/8/8 w KQkq - 0 1", 14),
            ("Rook with blockers", "3p4/5k2/8/8/1p1R2p1/8/8/8 w - - 0 1", 12),
            ("Bishop", "8/7k/8/8/3B4/8/8/8 w - - 0 1", 13),
            ("Queen", "8/7k/8/8/3Q4/8/8/8 w - - 0 1", 27),
            ("Knight in centre", "8/7k/8/8/3N4/8/8/8 w - - 0 1", 8),
            ("Knight on edge", "8/7k/8/8/8/8/8/N7 w - - 0 1", 2),
            ("Knight on side", "8/7k/8/8/N7/8/8/8 w - - 0 1", 4),
            ("Pawn at start", "8/7k/8/8/8/8/3P4/8 w - - 0 1", 2),
            ("Pawn after moving", "8/7k/8/8/8/3P4/8/8 w - - 0 1", 1),
            ("Blocked pawn", "8/7k/8/8/8/3p4/3P4/8 w - - 0 1", 0),
            ("Pawn captures", "7k/8/8/8/8/2p1p3/3P4/8 w - - 0 1", 4),
            ("En passant", "8/7k/8/3Pp3/8/8/8/8 w KQkq e6 0 1", 2),
            ("Two en passant options", "8/7k/8/3PpP2/8/8/8/8 w - e6 0 1", 4),
            ("Black pawn at start", "8/4p3/8/8/8/8/8/4K3 b - - 0 1", 2),
            ("Black pawn captures", "8/4p3/3P1P2/8/8/8/8/8 b - - 0 1", 4),
            ("Black two en passant options", "8/8/8/8/4pPp1/8/8/8 b - f3 0 1", 4),
            ("Promotion", "8/2P4k/8/8/8/8/8/8 w - - 0 1", 4),
            ("Capture promotion", "2q4k/3P4/8/8/8/8/8/8 w - - 0 1", 8),
            ("Black promotion", "8/8/8/8/8/8/2p5/8 b - - 0 1", 4),
            ("Short castle", "8/5k2/8/8/8/8/8/4K2R w K - 0 1", 15),
            ("Both castles", "8/5k2/8/8/8/8/8/R3K2R w KQ - 0 1", 26),
            ("No castling rights", "8/5k2/8/8/8/8/8/1R2K1R1 w - - 0 1", 24),
            ("Black short castle", "4k2r/8/8/8/8/8/8/4K3 b k - 0 1", 15),
            ("Black king", "8/5k2/8/8/8/8/8/1R2K1R1 b - - 0 1", 8),
        ];

        for (name, fen, expected) in cases {
            assert_eq!(count_moves(fen), expected, "{name}: {fen}");
        }
    }

    #[test]
    fn test_castling_requires_rook_on_corner() {
        // Rights say KQ, but the rooks are gone
        assert_eq!(count_moves("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1"), 5);
    }

    #[test]
    fn test_castling_blocked_by_pieces() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/RN2K1nR w KQ - 0 1").unwrap();
        let moves = generate_moves(&pos);
        assert!(!moves.iter().any(|mv| mv.is_castle()));
    }

    #[test]
    fn test_castling_through_attacks() {
        // Bishop on a6 covers f1, so White may only castle long
        let pos = Position::from_fen("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = generate_moves(&pos);
        assert!(moves.iter().any(|mv| mv.is_long_castle()));
        assert!(!moves.iter().any(|mv| mv.is_short_castle()));

        // The knight on d2 covers b1 and f1, but the King never crosses b1
        let pos = Position::from_fen("4k3/8/8/8/8/8/3n4/R3K2R w KQ - 0 1").unwrap();
        let moves = generate_moves(&pos);
        assert!(moves.iter().any(|mv| mv.is_long_castle()));
        assert!(!moves.iter().any(|mv| mv.is_short_castle()));

        // No castling out of check
        let pos = Position::from_fen("4k3/4r3/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = generate_moves(&pos);
        assert!(!moves.iter().any(|mv| mv.is_castle()));
    }

    #[test]
    fn test_castling_onto_attacked_square() {
        // The rook on g8 covers g1, where the King would land castling short
        let pos = Position::from_fen("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = generate_moves(&pos);
        assert!(moves.iter().any(|mv| mv.is_long_castle()));
        assert!(!moves.iter().any(|mv| mv.is_short_castle()));

        // The rook on c8 covers c1, where the King would land castling long
        let pos = Position::from_fen("2r1k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let moves = generate_moves(&pos);
        assert!(moves.iter().any(|mv| mv.is_short_castle()));
        assert!(!moves.iter().any(|mv| mv.is_long_castle()));
    }

    #[test]
    fn test_legal_moves_respect_pins() {
        // The knight on e2 is pinned to its King
        let mut pos = Position::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let legal = generate_legal_moves(&mut pos);
        assert!(legal.iter().all(|mv| mv.from() == Square::E1));
        assert_eq!(uci_moves(&legal), ["d1", "d2", "f1", "f2"].map(|to| format!("e1{to}")));
    }

    #[test]
    fn test_legal_moves_leave_position_untouched() {
        let mut pos = Position::from_fen(crate::FEN_KIWIPETE).unwrap();
        let before = pos;
        let legal = generate_legal_moves(&mut pos);
        assert_eq!(legal.len(), 48);
        assert_eq!(pos, before);
    }

    #[test]
    fn test_no_legal_moves_when_mated() {
        let mut pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(generate_legal_moves(&mut pos).is_empty());
        assert!(is_in_check(&pos, Color::Black));

        let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(generate_legal_moves(&mut pos).is_empty());
        assert!(!is_in_check(&pos, Color::Black));
    }

    #[test]
    fn test_is_legal() {
        let pos = Position::default();
        assert!(pos.is_legal(Move::new(Square::G1, Square::F3, MoveKind::Quiet)));
        assert!(!pos.is_legal(Move::new(Square::G1, Square::E2, MoveKind::Quiet)));
        assert!(!pos.is_legal(Move::new(Square::E2, Square::E4, MoveKind::Quiet)));
    }
}
