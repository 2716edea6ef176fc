/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Add, AddAssign},
};

use super::{generate_legal_moves, is_in_check, Move, Position};

/// Counts gathered by [`perft`], broken down by the kind of move that led to each leaf node.
///
/// The categories overlap the way published perft tables do: an en passant capture is also a capture, and a
/// promotion that captures is counted under `captures`, `promotions`, and `promotion_captures`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct PerftResults {
    pub nodes: u64,
    pub quiet: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub promotions: u64,
    pub promotion_captures: u64,
    pub short_castles: u64,
    pub long_castles: u64,
    pub double_pushes: u64,
    pub checks: u64,
}

impl PerftResults {
    /// Total number of castling moves.
    #[inline(always)]
    pub const fn castles(&self) -> u64 {
        self.short_castles + self.long_castles
    }

    /// Counts a single leaf reached by playing `mv`, where `gives_check` says whether it left the opponent in check.
    fn leaf(mv: Move, gives_check: bool) -> Self {
        let count = |condition: bool| condition as u64;

        Self {
            nodes: 1,
            quiet: count(mv.is_quiet()),
            captures: count(mv.is_capture()),
            en_passant: count(mv.is_en_passant()),
            promotions: count(mv.is_promotion()),
            promotion_captures: count(mv.is_promotion() && mv.is_capture()),
            short_castles: count(mv.is_short_castle()),
            long_castles: count(mv.is_long_castle()),
            double_pushes: count(mv.is_pawn_double_push()),
            checks: count(gives_check),
        }
    }
}

impl Add for PerftResults {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

impl AddAssign for PerftResults {
    fn add_assign(&mut self, rhs: Self) {
        self.nodes += rhs.nodes;
        self.quiet += rhs.quiet;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.promotions += rhs.promotions;
        self.promotion_captures += rhs.promotion_captures;
        self.short_castles += rhs.short_castles;
        self.long_castles += rhs.long_castles;
        self.double_pushes += rhs.double_pushes;
        self.checks += rhs.checks;
    }
}

impl fmt::Display for PerftResults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "          Nodes:\t{}", self.nodes)?;
        writeln!(f, "          Quiet:\t{}", self.quiet)?;
        writeln!(f, "       Captures:\t{}", self.captures)?;
        writeln!(f, "     En Passant:\t{}", self.en_passant)?;
        writeln!(f, "     Promotions:\t{}", self.promotions)?;
        writeln!(f, "Promo. Captures:\t{}", self.promotion_captures)?;
        writeln!(f, "  Short Castles:\t{}", self.short_castles)?;
        writeln!(f, "   Long Castles:\t{}", self.long_castles)?;
        writeln!(f, "  Double Pushes:\t{}", self.double_pushes)?;
        write!(f, "         Checks:\t{}", self.checks)
    }
}

/// Walks every line of legal play from `position` to `depth`, counting the leaf nodes.
///
/// The breakdown in the returned [`PerftResults`] describes only the moves made at the final ply.
/// `position` is identical to how it was passed in once this returns.
///
/// # Example
/// ```
/// # use chess88::*;
/// let mut pos = Position::from_fen(FEN_KIWIPETE).unwrap();
/// let results = perft(&mut pos, 1);
/// assert_eq!(results.nodes, 48);
/// assert_eq!(results.captures, 8);
/// assert_eq!(results.castles(), 2);
/// ```
pub fn perft(position: &mut Position, depth: usize) -> PerftResults {
    if depth == 0 {
        return PerftResults {
            nodes: 1,
            ..Default::default()
        };
    }

    let mut results = PerftResults::default();

    for mv in generate_legal_moves(position) {
        let artifacts = position.make_move(mv);

        if depth == 1 {
            let gives_check = is_in_check(position, position.side_to_move());
            results += PerftResults::leaf(mv, gives_check);
        } else {
            results += perft(position, depth - 1);
        }

        position.unmake_move(mv, artifacts);
    }

    results
}

/// Counts the leaf nodes reachable through each legal move available from `position`.
///
/// The counts are in the order the moves were generated, and sum to `perft(position, depth).nodes`.
pub fn splitperft(position: &mut Position, depth: usize) -> Vec<(Move, u64)> {
    generate_legal_moves(position)
        .into_iter()
        .map(|mv| {
            let artifacts = position.make_move(mv);
            let nodes = perft_nodes(position, depth.saturating_sub(1));
            position.unmake_move(mv, artifacts);
            (mv, nodes)
        })
        .collect()
}

/// Faster variant of [`perft`] that counts only nodes.
pub fn perft_nodes(position: &mut Position, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position);
    if depth == 1 {
        return moves.len() as u64;
    }

    moves.into_iter().fold(0, |nodes, mv| {
        let artifacts = position.make_move(mv);
        let nodes = nodes + perft_nodes(position, depth - 1);
        position.unmake_move(mv, artifacts);
        nodes
    })
}
