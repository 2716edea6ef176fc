/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{CastleSide, CastlingRights, Move, Piece, PieceKind, Position, Square};

/// State that a [`Move`] destroys and that cannot be recomputed from the move itself.
///
/// Returned by [`Position::make_move`] and handed back, by value, to [`Position::unmake_move`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveArtifacts {
    /// Half-move counter before the move.
    pub halfmove: usize,
    /// Castling rights before the move.
    pub castling: CastlingRights,
    /// En passant square before the move.
    pub ep_square: Option<Square>,
    /// The piece removed by the move, if it was a capture.
    pub captured: Option<Piece>,
}

impl Position {
    /// Applies `mv` in place, returning everything needed to take it back with [`Position::unmake_move`].
    ///
    /// `mv` must be pseudo-legal in this position. No legality checks are performed; if there is no piece on the
    /// origin square, the position is left untouched.
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let mut pos = Position::default();
    /// let original = pos;
    ///
    /// let mv = Move::new(Square::E2, Square::E4, MoveKind::PawnDoublePush);
    /// let artifacts = pos.make_move(mv);
    /// assert_eq!(pos.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    ///
    /// pos.unmake_move(mv, artifacts);
    /// assert_eq!(pos, original);
    /// ```
    pub fn make_move(&mut self, mv: Move) -> MoveArtifacts {
        let mut artifacts = MoveArtifacts {
            halfmove: self.halfmove,
            castling: self.castling,
            ep_square: self.ep_square,
            captured: None,
        };

        let (from, to, kind) = mv.parts();

        // Remove the piece from its previous location, exiting early if there is no piece there
        let Some(mut piece) = self.board.take(from) else {
            return artifacts;
        };
        let color = piece.color();

        self.ep_square = None;

        // First, deal with special cases like captures and castling
        if mv.is_en_passant() {
            // The captured pawn isn't at `to`, it's one square behind
            if let Some(captured_square) = to.offset(-color.forward()) {
                artifacts.captured = self.board.take(captured_square);
            }
        } else if mv.is_capture() {
            artifacts.captured = self.board.take(to);

            // Capturing a rook on its corner removes that side's castling right
            if let Some(captured) = artifacts.captured.filter(|p| p.is_rook()) {
                let captured_color = captured.color();
                for side in CastleSide::ALL {
                    if to == side.rook_home(captured_color) {
                        self.castling.clear(captured_color, side);
                    }
                }
            }
        } else if mv.is_pawn_double_push() {
            self.ep_square = from.offset(color.forward());
        } else if let Some(side) = kind.castle_side() {
            if let Some(rook) = self.board.take(side.rook_home(color)) {
                self.board.place(rook, side.rook_destination(color));
            }
        }

        // Next, handle castling rights lost by moving the King or a Rook
        match piece.kind() {
            PieceKind::King => self.castling.clear_color(color),
            PieceKind::Rook => {
                for side in CastleSide::ALL {
                    if from == side.rook_home(color) {
                        self.castling.clear(color, side);
                    }
                }
            }
            _ => {}
        }

        // Reset on any pawn move (promotions included) or capture
        if piece.is_pawn() || artifacts.captured.is_some() {
            self.halfmove = 0;
        } else {
            self.halfmove += 1;
        }

        if let Some(promotion) = mv.promotion() {
            piece = piece.promoted(promotion);
        }

        self.board.place(piece, to);

        if color.is_black() {
            self.fullmove += 1;
        }
        self.toggle_side_to_move();

        artifacts
    }

    /// Takes back `mv`, which must be the last move made on this position, restoring it exactly.
    pub fn unmake_move(&mut self, mv: Move, artifacts: MoveArtifacts) {
        let (from, to, kind) = mv.parts();

        let Some(mut piece) = self.board.take(to) else {
            return;
        };
        let color = piece.color();

        if mv.is_promotion() {
            piece = Piece::new(color, PieceKind::Pawn);
        }
        self.board.place(piece, from);

        if let Some(captured) = artifacts.captured {
            let captured_square = if mv.is_en_passant() {
                to.offset(-color.forward())
            } else {
                Some(to)
            };

            if let Some(square) = captured_square {
                self.board.place(captured, square);
            }
        } else if let Some(side) = kind.castle_side() {
            if let Some(rook) = self.board.take(side.rook_destination(color)) {
                self.board.place(rook, side.rook_home(color));
            }
        }

        self.halfmove = artifacts.halfmove;
        self.castling = artifacts.castling;
        self.ep_square = artifacts.ep_square;

        if color.is_black() {
            self.fullmove -= 1;
        }
        self.side_to_move = color;
    }
}
