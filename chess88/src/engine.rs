/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{sync::atomic::AtomicBool, time::Duration};

use anyhow::Result;

use super::{
    iterative_deepening, spawn_timed_search, Move, Position, SearchHandle, SearchLimits,
    SearchReport,
};

/// A playing session: the position being played, the best move found for it, and at most one running search.
///
/// Starting a search while another is running stops the running one first.
#[derive(Debug, Default)]
pub struct Engine {
    position: Position,
    best_move: Option<Move>,
    search: Option<SearchHandle>,
}

impl Engine {
    /// Creates a new [`Engine`] set up with the standard starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stops any running search and returns to the starting position.
    pub fn new_game(&mut self) {
        self.stop();
        self.position = Position::default();
        self.best_move = None;
    }

    /// The position that the next search will start from.
    #[inline(always)]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Replaces the position that the next search will start from.
    ///
    /// A running search is stopped first, and its result discarded.
    pub fn set_position(&mut self, position: Position) {
        self.stop();
        self.position = position;
        self.best_move = None;
    }

    /// Sets up the position given by `fen`, then plays each of `moves` (in UCI notation) on it.
    ///
    /// Nothing changes if any part of the input is invalid.
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let mut engine = Engine::new();
    /// engine.set_position_with_moves(FEN_STARTPOS, ["e2e4", "c7c5"]).unwrap();
    /// assert_eq!(
    ///     engine.position().to_fen(),
    ///     "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2"
    /// );
    ///
    /// assert!(engine.set_position_with_moves(FEN_STARTPOS, ["e2e5"]).is_err());
    /// ```
    pub fn set_position_with_moves<'a>(
        &mut self,
        fen: &str,
        moves: impl IntoIterator<Item = &'a str>,
    ) -> Result<()> {
        let mut position = Position::from_fen(fen)?;

        for uci in moves {
            let mv = Move::from_uci(&position, uci)?;
            position.make_move(mv);
        }

        self.set_position(position);
        Ok(())
    }

    /// Plays a move, given in UCI notation, on the current position.
    ///
    /// A running search is stopped first, and its result discarded.
    pub fn play(&mut self, uci: &str) -> Result<Move> {
        let mv = Move::from_uci(&self.position, uci)?;
        self.stop();
        self.position.make_move(mv);
        self.best_move = None;
        Ok(mv)
    }

    /// Best move found by the last search that completed at least one depth.
    #[inline(always)]
    pub const fn best_move(&self) -> Option<Move> {
        self.best_move
    }

    /// Returns `true` if a background search has been started and not yet collected.
    pub fn is_searching(&self) -> bool {
        self.search.as_ref().is_some_and(|search| !search.is_finished())
    }

    /// Searches the current position to `depth` on this thread, returning once it is done.
    ///
    /// A `depth` of 0 searches to depth 1, so `None` always means the side to move has no legal moves.
    pub fn go_depth(&mut self, depth: usize) -> Option<SearchReport> {
        self.stop();

        let mut position = self.position;
        let stop = AtomicBool::new(false);
        let limits = SearchLimits::depth(depth.max(1));
        let report = iterative_deepening(&mut position, &limits, &stop, |_| {});

        self.record(report)
    }

    /// Starts searching the current position in the background for `movetime`.
    ///
    /// Collect the result with [`Engine::wait`] or [`Engine::stop`].
    pub fn go_movetime(&mut self, movetime: Duration) {
        self.go(SearchLimits::movetime(movetime));
    }

    /// Starts searching the current position in the background until it is stopped or `max_depth` is completed.
    pub fn go_infinite(&mut self) {
        self.go(SearchLimits::default());
    }

    /// Starts a background search of the current position bounded by `limits`.
    pub fn go(&mut self, limits: SearchLimits) {
        self.stop();
        tracing::debug!(fen = %self.position, ?limits, "starting search");
        self.search = Some(spawn_timed_search(self.position, limits));
    }

    /// Waits for the running search, if any, to end on its own.
    pub fn wait(&mut self) -> Option<SearchReport> {
        let report = self.search.take().and_then(SearchHandle::wait);
        self.record(report)
    }

    /// Stops the running search, if any, after its current depth.
    pub fn stop(&mut self) -> Option<SearchReport> {
        let report = self.search.take().and_then(SearchHandle::stop);
        self.record(report)
    }

    fn record(&mut self, report: Option<SearchReport>) -> Option<SearchReport> {
        if let Some(report) = report {
            self.best_move = Some(report.best_move);
        }
        report
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.stop();
    }
}
