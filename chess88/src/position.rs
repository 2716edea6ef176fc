/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Deref, Index},
    str::FromStr,
};

use anyhow::{anyhow, bail, Result};

use super::{Color, Piece, PieceKind, Square, FEN_STARTPOS};

/// The two directions a King can castle in.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum CastleSide {
    /// Castling toward the H file (`O-O`).
    Short,
    /// Castling toward the A file (`O-O-O`).
    Long,
}

impl CastleSide {
    /// Both sides, short first.
    pub const ALL: [Self; 2] = [Self::Short, Self::Long];

    /// The square a King of `color` must start on to castle.
    #[inline(always)]
    pub const fn king_home(color: Color) -> Square {
        Square::E1.rank_relative_to(color)
    }

    /// The square the King lands on after castling to this side.
    #[inline(always)]
    pub const fn king_destination(self, color: Color) -> Square {
        match self {
            Self::Short => Square::G1.rank_relative_to(color),
            Self::Long => Square::C1.rank_relative_to(color),
        }
    }

    /// The corner the castling Rook starts on.
    #[inline(always)]
    pub const fn rook_home(self, color: Color) -> Square {
        match self {
            Self::Short => Square::H1.rank_relative_to(color),
            Self::Long => Square::A1.rank_relative_to(color),
        }
    }

    /// The square the castling Rook lands on, beside the King.
    #[inline(always)]
    pub const fn rook_destination(self, color: Color) -> Square {
        match self {
            Self::Short => Square::F1.rank_relative_to(color),
            Self::Long => Square::D1.rank_relative_to(color),
        }
    }
}

/// Castling rights of both players, as four independent flags.
///
/// ```text
///   _ _ _ _
///   ^ ^ ^ ^
///   | | | +-- White short (K)
///   | | +---- White long  (Q)
///   | +------ Black short (k)
///   +-------- Black long  (q)
/// ```
///
/// Rights are only ever removed while playing a game; [`Position::unmake_move`](crate::Position::unmake_move)
/// restores them wholesale from the saved artifacts.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling allowed for either player.
    pub const NONE: Self = Self(0);

    /// Every castling right held.
    pub const ALL: Self = Self(0b1111);

    #[inline(always)]
    const fn flag(color: Color, side: CastleSide) -> u8 {
        let side = match side {
            CastleSide::Short => 0b01,
            CastleSide::Long => 0b10,
        };
        side << (2 * color.index())
    }

    /// Returns the raw bits of these rights.
    #[inline(always)]
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Returns `true` if `color` may still castle toward `side`.
    #[inline(always)]
    pub const fn has(&self, color: Color, side: CastleSide) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    /// Returns `true` if `color` may castle toward either side.
    #[inline(always)]
    pub const fn has_any(&self, color: Color) -> bool {
        self.has(color, CastleSide::Short) || self.has(color, CastleSide::Long)
    }

    /// Grants `color` the right to castle toward `side`.
    #[inline(always)]
    pub fn grant(&mut self, color: Color, side: CastleSide) {
        self.0 |= Self::flag(color, side);
    }

    /// Removes the right of `color` to castle toward `side`.
    #[inline(always)]
    pub fn clear(&mut self, color: Color, side: CastleSide) {
        self.0 &= !Self::flag(color, side);
    }

    /// Removes both castling rights of `color`.
    #[inline(always)]
    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, CastleSide::Short);
        self.clear(color, CastleSide::Long);
    }

    /// Parses the castling field of a FEN string.
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let rights = CastlingRights::from_uci("Kq").unwrap();
    /// assert!(rights.has(Color::White, CastleSide::Short));
    /// assert!(!rights.has(Color::White, CastleSide::Long));
    /// assert!(rights.has(Color::Black, CastleSide::Long));
    /// assert_eq!(CastlingRights::from_uci("-").unwrap(), CastlingRights::NONE);
    /// assert!(CastlingRights::from_uci("KX").is_err());
    /// ```
    pub fn from_uci(uci: &str) -> Result<Self> {
        let mut rights = Self::NONE;
        if uci == "-" {
            return Ok(rights);
        }

        for c in uci.chars() {
            let (color, side) = match c {
                'K' => (Color::White, CastleSide::Short),
                'Q' => (Color::White, CastleSide::Long),
                'k' => (Color::Black, CastleSide::Short),
                'q' => (Color::Black, CastleSide::Long),
                _ => bail!("Invalid castling rights {uci:?}: unexpected char {c:?}"),
            };
            rights.grant(color, side);
        }

        Ok(rights)
    }

    /// Formats these rights as the castling field of a FEN string.
    pub fn to_uci(&self) -> String {
        let mut castling = String::with_capacity(4);
        for (color, side, c) in [
            (Color::White, CastleSide::Short, 'K'),
            (Color::White, CastleSide::Long, 'Q'),
            (Color::Black, CastleSide::Short, 'k'),
            (Color::Black, CastleSide::Long, 'q'),
        ] {
            if self.has(color, side) {
                castling.push(c);
            }
        }

        if castling.is_empty() {
            castling.push('-');
        }
        castling
    }
}

impl FromStr for CastlingRights {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_uci(s)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastlingRights({})", self.to_uci())
    }
}

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of castling rights, en passant, or move counters. If you need those, see [`Position`].
///
/// Internally a 128-entry mailbox in 0x88 layout. The off-board half of the array is never written to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    mailbox: [Option<Piece>; Square::BOARD_SIZE],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use chess88::Board;
    /// let board = Board::new();
    /// assert_eq!(board.to_fen(), "8/8/8/8/8/8/8/8");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            mailbox: [None; Square::BOARD_SIZE],
        }
    }

    /// Constructs a [`Board`] from the placement field of a FEN string.
    ///
    /// If `fen` contains more than the placements, everything after the first space is ignored.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut board = Self::new();

        let placements = fen.split(' ').next().unwrap_or_default();

        if placements.matches('/').count() != 7 {
            bail!("Invalid FEN placements {placements:?}: expected 8 ranks separated by `/`");
        }

        // FEN lists rank 8 first
        for (rank, row) in placements.split('/').rev().enumerate() {
            let mut file = 0;

            for c in row.chars() {
                if let Some(empty) = c.to_digit(10) {
                    if !(1..=8).contains(&empty) {
                        bail!("Invalid FEN placements {placements:?}: bad empty-square count {c:?}");
                    }
                    file += empty as u8;
                } else {
                    let piece = Piece::from_uci(c)?;
                    if file >= 8 {
                        bail!("Invalid FEN placements {placements:?}: rank {} is too long", rank + 1);
                    }
                    board.place(piece, Square::new(file, rank as u8));
                    file += 1;
                }

                if file > 8 {
                    bail!("Invalid FEN placements {placements:?}: rank {} is too long", rank + 1);
                }
            }

            if file != 8 {
                bail!("Invalid FEN placements {placements:?}: rank {} is too short", rank + 1);
            }
        }

        for color in Color::all() {
            board.check_material(color).map_err(|err| {
                anyhow!("Invalid FEN placements {placements:?}: {color:?} {err}")
            })?;
        }

        Ok(board)
    }

    /// Checks that `color` has no more material than promoting its Pawns could produce.
    ///
    /// This keeps the number of pseudo-legal moves of any accepted position within [`MAX_NUM_MOVES`](crate::MAX_NUM_MOVES).
    fn check_material(&self, color: Color) -> Result<()> {
        let count = |kind: PieceKind| {
            let piece = Piece::new(color, kind);
            self.iter().filter(|&(_, p)| p == piece).count()
        };

        let pawns = count(PieceKind::Pawn);
        if pawns > 8 {
            bail!("has {pawns} Pawns");
        }

        let kings = count(PieceKind::King);
        if kings > 1 {
            bail!("has {kings} Kings");
        }

        // Every piece beyond the starting set must have been a Pawn
        let promoted = count(PieceKind::Queen).saturating_sub(1)
            + count(PieceKind::Rook).saturating_sub(2)
            + count(PieceKind::Bishop).saturating_sub(2)
            + count(PieceKind::Knight).saturating_sub(2);
        if pawns + promoted > 8 {
            bail!("has more promoted pieces than missing Pawns");
        }

        Ok(())
    }

    /// Generates the placement field of a FEN string from this [`Board`].
    pub fn to_fen(&self) -> String {
        let mut placements = Vec::with_capacity(8);

        for rank in (0..8).rev() {
            let mut row = String::with_capacity(8);
            let mut empty_spaces = 0;

            for file in 0..8 {
                if let Some(piece) = self.piece_at(Square::new(file, rank)) {
                    if empty_spaces != 0 {
                        row += &empty_spaces.to_string();
                        empty_spaces = 0;
                    }
                    row.push(piece.char());
                } else {
                    empty_spaces += 1;
                }
            }

            if empty_spaces != 0 {
                row += &empty_spaces.to_string();
            }
            placements.push(row);
        }

        placements.join("/")
    }

    /// Places `piece` on `square`, replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.mailbox[square.index()] = Some(piece);
    }

    /// Removes any piece on `square`.
    #[inline(always)]
    pub fn clear(&mut self, square: Square) {
        self.mailbox[square.index()] = None;
    }

    /// Removes and returns the piece on `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()].take()
    }

    /// Returns the piece on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.mailbox[square.index()]
    }

    /// Returns `true` if there is a piece on `square`.
    #[inline(always)]
    pub const fn has(&self, square: Square) -> bool {
        self.piece_at(square).is_some()
    }

    /// Iterates over every occupied square and its piece, from A1 to H8.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|square| self.piece_at(square).map(|piece| (square, piece)))
    }

    /// Finds the square of the first piece equal to `piece`, scanning from A1.
    pub fn find(&self, piece: Piece) -> Option<Square> {
        self.iter()
            .find_map(|(square, found)| (found == piece).then_some(square))
    }
}

impl Default for Board {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self.mailbox[index.index()]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{}|", rank + 1)?;
            for file in 0..8 {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map(|piece| piece.char())
                    .unwrap_or('.');
                write!(f, " {occupant}")?;
            }
            writeln!(f)?;
        }
        write!(f, " +----------------\n   a b c d e f g h")
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.to_fen())
    }
}

/// Represents the current state of the game, including move counters.
///
/// Analogous to a FEN string.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Piece placements.
    pub(crate) board: Board,

    /// The [`Color`] of the current player.
    pub(crate) side_to_move: Color,

    /// Castling rights for both players.
    pub(crate) castling: CastlingRights,

    /// The square a pawn skipped over with a double push on the previous ply.
    pub(crate) ep_square: Option<Square>,

    /// Used to enforce the fifty-move rule.
    ///
    /// - Incremented after each move.
    /// - Reset after a capture or a pawn moves.
    pub(crate) halfmove: usize,

    /// Number of moves since the beginning of the game.
    ///
    /// A fullmove is a complete turn by white and then by black.
    pub(crate) fullmove: usize,
}

impl Position {
    /// Creates a new, empty [`Position`] with the following properties:
    /// * No pieces on the board
    /// * White moves first
    /// * No castling rights
    /// * No en passant square available
    /// * Halfmove counter set to 0
    /// * Fullmove counter set to 1
    ///
    /// # Example
    /// ```
    /// # use chess88::Position;
    /// let state = Position::new();
    /// assert_eq!(state.to_fen(), "8/8/8/8/8/8/8/8 w - - 0 1");
    /// ```
    pub const fn new() -> Self {
        Self {
            board: Board::new(),
            side_to_move: Color::White,
            castling: CastlingRights::NONE,
            ep_square: None,
            halfmove: 0,
            fullmove: 1,
        }
    }

    /// Creates a new [`Position`] from the provided FEN string.
    ///
    /// Trailing fields may be omitted, in which case they default to `w - - 0 1`.
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R").unwrap();
    /// assert_eq!(pos.to_fen(), "4k3/8/8/8/8/8/8/4K2R w - - 0 1");
    /// assert!(Position::from_fen("4k3/8/8/8/8/8/8/4K2R x").is_err());
    /// ```
    pub fn from_fen(fen: &str) -> Result<Self> {
        let mut pos = Self::new();
        let mut split = fen.split_ascii_whitespace();

        let placements = split.next().ok_or(anyhow!(
            "Invalid FEN string: FEN string must have piece placements."
        ))?;
        pos.board = Board::from_fen(placements)?;

        let active_color = split.next().unwrap_or("w");
        pos.side_to_move = Color::from_str(active_color)?;

        let castling = split.next().unwrap_or("-");
        pos.castling = CastlingRights::from_uci(castling)?;

        let en_passant_target = split.next().unwrap_or("-");
        pos.ep_square = match en_passant_target {
            "-" => None,
            square => Some(Square::from_uci(square)?),
        };

        let halfmove = split.next().unwrap_or("0");
        pos.halfmove = halfmove.parse().or(Err(anyhow!(
            "Invalid FEN string: FEN string must have valid halfmove counter. Got {halfmove}"
        )))?;

        let fullmove = split.next().unwrap_or("1");
        pos.fullmove = fullmove.parse().or(Err(anyhow!(
            "Invalid FEN string: FEN string must have valid fullmove counter. Got {fullmove}"
        )))?;

        if let Some(extra) = split.next() {
            bail!("Invalid FEN string: unexpected trailing field {extra:?}");
        }

        Ok(pos)
    }

    /// Generates a FEN string from this [`Position`].
    pub fn to_fen(&self) -> String {
        let placements = self.board.to_fen();
        let active_color = self.side_to_move;
        let castling = self.castling;

        let en_passant_target = self
            .ep_square
            .map(|square| square.to_uci())
            .unwrap_or(String::from("-"));

        let halfmove = self.halfmove;
        let fullmove = self.fullmove;

        format!("{placements} {active_color} {castling} {en_passant_target} {halfmove} {fullmove}")
    }

    /// Returns the current player as a [`Color`].
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// If en passant can be performed, returns the en passant [`Square`].
    #[inline(always)]
    pub const fn ep_square(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the [`CastlingRights`] of the current position.
    #[inline(always)]
    pub const fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the half-move counter of the current position.
    #[inline(always)]
    pub const fn halfmove(&self) -> usize {
        self.halfmove
    }

    /// Returns the full-move counter of the current position.
    #[inline(always)]
    pub const fn fullmove(&self) -> usize {
        self.fullmove
    }

    /// Fetches this position's [`Board`]
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Mutably fetches this position's [`Board`]
    #[inline(always)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Toggles the current player from White to Black (or vice versa).
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Returns the color-mirrored twin of this position.
    ///
    /// Every piece is flipped vertically and changes color, as do the side to move, the castling rights
    /// and the en passant square. Both players face exactly the same situation as in `self`.
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/R3K3 w Q d6 0 3").unwrap();
    /// assert_eq!(pos.mirrored().to_fen(), "r3k3/8/8/8/3Pp3/8/8/4K3 b q d3 0 3");
    /// ```
    pub fn mirrored(&self) -> Self {
        let mut board = Board::new();
        for (square, piece) in self.board.iter() {
            board.place(piece.opponent(), square.flipped());
        }

        let mut castling = CastlingRights::NONE;
        for color in Color::all() {
            for side in CastleSide::ALL {
                if self.castling.has(color, side) {
                    castling.grant(color.opponent(), side);
                }
            }
        }

        Self {
            board,
            side_to_move: self.side_to_move.opponent(),
            castling,
            ep_square: self.ep_square.map(Square::flipped),
            halfmove: self.halfmove,
            fullmove: self.fullmove,
        }
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl Deref for Position {
    type Target = Board;
    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        self.board()
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        // Safe unwrap because the FEN for startpos is always valid
        Self::from_fen(FEN_STARTPOS).unwrap()
    }
}

impl fmt::Display for Position {
    /// Display this position's FEN string
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{}|", rank + 1)?;
            for file in 0..8 {
                let piece = self.board.piece_at(Square::new(file, rank));
                let piece_char = piece.map(|p| p.char()).unwrap_or('.');
                write!(f, " {piece_char}")?;
            }

            match rank {
                6 => write!(f, "           FEN: {}", self.to_fen())?,
                5 => write!(f, "          Side: {}", self.side_to_move)?,
                4 => write!(f, "      Castling: {}", self.castling)?,
                3 => {
                    let ep = self
                        .ep_square
                        .map(|t| t.to_uci())
                        .unwrap_or(String::from("-"));
                    write!(f, "            EP: {ep}")?
                }
                2 => write!(f, "     Half-move: {}", self.halfmove)?,
                1 => write!(f, "     Full-move: {}", self.fullmove)?,
                _ => {}
            }
            writeln!(f)?;
        }
        write!(f, " +----------------\n   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, FEN_KIWIPETE};

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            FEN_STARTPOS,
            FEN_KIWIPETE,
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            "8/8/8/8/k7/8/2Kp4/2R5 b - - 1 3",
            "rnbq1rk1/ppp2ppp/3bpB2/3p4/3PN3/8/PPQ1PPPP/2KR1BNR w - - 3 8",
        ];

        for fen in fens {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(pos.to_fen(), fen);
            assert_eq!(pos.to_string(), fen);
        }
    }

    #[test]
    fn test_startpos_contents() {
        let pos = Position::default();
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.castling_rights(), CastlingRights::ALL);
        assert_eq!(pos.ep_square(), None);
        assert_eq!(pos.halfmove(), 0);
        assert_eq!(pos.fullmove(), 1);

        assert_eq!(
            pos.piece_at(Square::E1),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            pos.piece_at(Square::D8),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(pos.iter().count(), 32);
    }

    #[test]
    fn test_malformed_fens_are_rejected() {
        let bad = [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/7/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR white KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQxq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 -1",
            // More material than the side could ever have
            "4k3/8/8/8/8/8/PPPPPPPP/4K2P w - - 0 1",
            "4k3/8/8/8/8/8/8/K3K3 w - - 0 1",
            "QQQQkQQQ/QQQQQQQQ/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/PPPPPPPP/QQQ1K3 w - - 0 1",
        ];

        for fen in bad {
            assert!(Position::from_fen(fen).is_err(), "{fen:?} should be rejected");
        }
    }

    #[test]
    fn test_castling_rights_flags() {
        let mut rights = CastlingRights::ALL;
        assert_eq!(rights.bits(), 0b1111);

        rights.clear(Color::White, CastleSide::Long);
        assert_eq!(rights.bits(), 0b1101);
        assert_eq!(rights.to_uci(), "Kkq");

        rights.clear_color(Color::Black);
        assert_eq!(rights.to_uci(), "K");
        assert!(rights.has_any(Color::White));
        assert!(!rights.has_any(Color::Black));

        rights.clear(Color::White, CastleSide::Short);
        assert_eq!(rights, CastlingRights::NONE);
        assert_eq!(rights.to_uci(), "-");
    }

    #[test]
    fn test_castle_side_squares() {
        let side = CastleSide::Short;
        assert_eq!(CastleSide::king_home(Color::Black), Square::E8);
        assert_eq!(side.king_destination(Color::White), Square::G1);
        assert_eq!(side.rook_home(Color::Black), Square::H8);
        assert_eq!(side.rook_destination(Color::Black), Square::F8);

        let side = CastleSide::Long;
        assert_eq!(side.king_destination(Color::Black), Square::C8);
        assert_eq!(side.rook_home(Color::White), Square::A1);
        assert_eq!(side.rook_destination(Color::White), Square::D1);
    }

    #[test]
    fn test_mirroring_twice_is_identity() {
        let pos = Position::from_fen(FEN_KIWIPETE).unwrap();
        assert_eq!(pos.mirrored().mirrored(), pos);
        assert_ne!(pos.mirrored(), pos);
    }
}
