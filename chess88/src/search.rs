/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crossbeam_channel::RecvTimeoutError;

use super::{evaluate, generate_legal_moves, is_in_check, Move, Position};

/// Bound on every score the search can produce.
pub const INFINITY: i32 = 1_000_000;

/// Score of being checkmated on the spot. Mates found further away score closer to zero.
pub const MATE_SCORE: i32 = 100_000;

/// Score of a stalemate.
pub const DRAW_SCORE: i32 = 0;

/// Deepest search that [`SearchLimits::default`] allows.
pub const MAX_DEPTH: usize = 64;

/// Bounds placed on a single search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchLimits {
    /// Last depth iterative deepening will attempt.
    pub max_depth: usize,

    /// How long a timed search may run before it is asked to stop.
    ///
    /// `None` lets it run until `max_depth` completes or it is stopped by hand.
    pub movetime: Option<Duration>,
}

impl SearchLimits {
    /// Search exactly to `max_depth`, with no time limit.
    pub const fn depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            movetime: None,
        }
    }

    /// Search as deep as possible for `movetime`.
    pub const fn movetime(movetime: Duration) -> Self {
        Self {
            max_depth: MAX_DEPTH,
            movetime: Some(movetime),
        }
    }
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self::depth(MAX_DEPTH)
    }
}

/// Outcome of one fully completed iteration of iterative deepening.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchReport {
    /// Depth that was completed.
    pub depth: usize,

    /// Best move found at that depth.
    pub best_move: Move,

    /// Score of `best_move`, from the perspective of the side to move.
    pub score: i32,

    /// Nodes visited across every depth completed so far.
    pub nodes: u64,

    /// Time since the search began.
    pub elapsed: Duration,
}

/// Negamax search with fail-hard alpha-beta pruning.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Searcher {
    nodes: u64,
    ply: i32,
}

impl Searcher {
    /// Creates a new [`Searcher`] that has visited no nodes.
    pub const fn new() -> Self {
        Self { nodes: 0, ply: 0 }
    }

    /// Number of nodes visited since this [`Searcher`] was created.
    #[inline(always)]
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Searches `position` to `depth` within the `(alpha, beta)` window, returning the best move.
    ///
    /// Returns `None` only if the side to move has no legal moves.
    /// `position` is identical to how it was passed in once this returns.
    ///
    /// # Example
    /// ```
    /// # use chess88::*;
    /// let mut pos = Position::from_fen("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").unwrap();
    /// let best = Searcher::new().search(&mut pos, 2, -INFINITY, INFINITY);
    /// assert_eq!(best.map(|mv| mv.to_uci()).as_deref(), Some("a1a8"));
    /// ```
    pub fn search(
        &mut self,
        position: &mut Position,
        depth: usize,
        alpha: i32,
        beta: i32,
    ) -> Option<Move> {
        self.search_scored(position, depth, alpha, beta)
            .map(|(mv, _)| mv)
    }

    /// Same as [`Searcher::search`], but also returns the score of the best move.
    pub fn search_scored(
        &mut self,
        position: &mut Position,
        depth: usize,
        mut alpha: i32,
        beta: i32,
    ) -> Option<(Move, i32)> {
        self.nodes += 1;
        let mut best: Option<(Move, i32)> = None;

        // The root always looks at least one ply ahead
        let child_depth = depth.saturating_sub(1);

        for mv in generate_legal_moves(position) {
            let artifacts = position.make_move(mv);
            self.ply += 1;
            let score = -self.alpha_beta(position, -beta, -alpha, child_depth);
            self.ply -= 1;
            position.unmake_move(mv, artifacts);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }

            if score >= beta {
                break;
            }
            if score > alpha {
                alpha = score;
            }
        }

        best
    }

    /// Scores `position` from the perspective of the side to move, searching `depth` plies ahead.
    ///
    /// Scores are clamped to the `(alpha, beta)` window.
    /// A side with no legal moves scores [`MATE_SCORE`] below zero (less the distance to the mate) if it is in check,
    /// and [`DRAW_SCORE`] otherwise.
    pub fn alpha_beta(
        &mut self,
        position: &mut Position,
        mut alpha: i32,
        beta: i32,
        depth: usize,
    ) -> i32 {
        self.nodes += 1;

        if depth == 0 {
            return evaluate(position);
        }

        let moves = generate_legal_moves(position);
        if moves.is_empty() {
            return if is_in_check(position, position.side_to_move()) {
                -MATE_SCORE + self.ply
            } else {
                DRAW_SCORE
            };
        }

        for mv in moves {
            let artifacts = position.make_move(mv);
            self.ply += 1;
            let score = -self.alpha_beta(position, -beta, -alpha, depth - 1);
            self.ply -= 1;
            position.unmake_move(mv, artifacts);

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }
}

/// Runs searches of depth `1, 2, 3, ...` on `position` until `limits.max_depth` is completed or `stop` is raised.
///
/// `stop` is only checked between depths, so a depth that has begun is always finished.
/// `on_depth` is called with the result of every completed depth, in increasing order of depth.
///
/// Returns the report of the deepest completed depth, or `None` if no depth was completed
/// (because `stop` was already raised, or because the side to move has no legal moves).
pub fn iterative_deepening(
    position: &mut Position,
    limits: &SearchLimits,
    stop: &AtomicBool,
    mut on_depth: impl FnMut(SearchReport),
) -> Option<SearchReport> {
    let start = Instant::now();
    let mut searcher = Searcher::new();
    let mut last = None;

    for depth in 1..=limits.max_depth {
        if stop.load(Ordering::Relaxed) {
            tracing::trace!(depth, "stop requested before starting depth");
            break;
        }

        let Some((best_move, score)) =
            searcher.search_scored(position, depth, -INFINITY, INFINITY)
        else {
            tracing::debug!(fen = %position, "no legal moves to search");
            break;
        };

        let report = SearchReport {
            depth,
            best_move,
            score,
            nodes: searcher.nodes(),
            elapsed: start.elapsed(),
        };

        tracing::debug!(
            depth,
            score,
            nodes = report.nodes,
            best_move = %best_move.to_uci(),
            elapsed = ?report.elapsed,
            "completed depth"
        );

        on_depth(report);
        last = Some(report);

        // Nothing deeper can change a forced mate that has already been found
        if score.abs() >= MATE_SCORE - depth as i32 {
            break;
        }
    }

    last
}

/// A search running in the background, started by [`spawn_timed_search`].
#[derive(Debug)]
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    workers: Vec<JoinHandle<()>>,
    collector: JoinHandle<Option<SearchReport>>,
}

impl SearchHandle {
    /// Returns `true` once every depth the search will complete has been collected.
    pub fn is_finished(&self) -> bool {
        self.collector.is_finished()
    }

    /// Asks the search to stop after its current depth, then waits for it.
    ///
    /// Returns the deepest completed result, if any.
    pub fn stop(self) -> Option<SearchReport> {
        tracing::trace!("stop requested");
        self.stop.store(true, Ordering::Relaxed);
        self.wait()
    }

    /// Waits for the search to end on its own, returning the deepest completed result, if any.
    pub fn wait(self) -> Option<SearchReport> {
        for worker in self.workers {
            if worker.join().is_err() {
                tracing::warn!("search worker panicked");
            }
        }

        let report = self.collector.join().ok().flatten();

        match &report {
            Some(report) => tracing::info!(
                depth = report.depth,
                score = report.score,
                nodes = report.nodes,
                best_move = %report.best_move.to_uci(),
                "search finished"
            ),
            None => tracing::info!("search finished without completing a depth"),
        }

        report
    }
}

/// Starts a search of `position` on a background thread, bounded by `limits`.
///
/// The search owns its own copy of `position`. If `limits.movetime` is set, a deadline thread asks the search to stop
/// once it elapses, and a collector thread keeps the deepest result received from the search.
pub fn spawn_timed_search(position: Position, limits: SearchLimits) -> SearchHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let (report_tx, report_rx) = crossbeam_channel::bounded::<SearchReport>(0);
    let (done_tx, done_rx) = crossbeam_channel::bounded::<()>(0);

    let mut workers = Vec::with_capacity(2);

    if let Some(movetime) = limits.movetime {
        let stop = Arc::clone(&stop);
        workers.push(thread::spawn(move || {
            // The search dropping its end of the channel wakes us up early
            if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(movetime) {
                tracing::trace!(?movetime, "movetime elapsed");
                stop.store(true, Ordering::Relaxed);
            }
        }));
    }

    {
        let stop = Arc::clone(&stop);
        workers.push(thread::spawn(move || {
            let _done = done_tx;
            let mut position = position;

            iterative_deepening(&mut position, &limits, &stop, |report| {
                // A closed channel means nobody is waiting on this search anymore
                let _ = report_tx.send(report);
            });
        }));
    }

    let collector = thread::spawn(move || report_rx.iter().last());

    SearchHandle {
        stop,
        workers,
        collector,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FEN_KIWIPETE;

    const MATE_IN_ONE: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

    #[test]
    fn test_finds_mate_in_one() {
        let mut pos = Position::from_fen(MATE_IN_ONE).unwrap();
        let original = pos;
        let mut searcher = Searcher::new();

        let (best, score) = searcher
            .search_scored(&mut pos, 2, -INFINITY, INFINITY)
            .unwrap();
        assert_eq!(best.to_uci(), "a1a8");
        assert_eq!(score, MATE_SCORE - 1);
        assert_eq!(pos, original);
        assert!(searcher.nodes() > 0);
    }

    #[test]
    fn test_mated_side_to_move() {
        // Black has been mated by the rook on a8
        let mut pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let mut searcher = Searcher::new();

        assert_eq!(searcher.search(&mut pos, 3, -INFINITY, INFINITY), None);
        assert_eq!(searcher.alpha_beta(&mut pos, -INFINITY, INFINITY, 1), -MATE_SCORE);
    }

    #[test]
    fn test_stalemate_is_a_draw() {
        let mut pos = Position::from_fen("k7/8/1Q6/8/8/8/8/7K b - - 0 1").unwrap();
        let mut searcher = Searcher::new();

        assert_eq!(searcher.search(&mut pos, 3, -INFINITY, INFINITY), None);
        assert_eq!(searcher.alpha_beta(&mut pos, -INFINITY, INFINITY, 2), DRAW_SCORE);
    }

    #[test]
    fn test_depth_zero_is_static_eval() {
        let mut pos = Position::from_fen(FEN_KIWIPETE).unwrap();
        let mut searcher = Searcher::new();

        let expected = evaluate(&pos);
        assert_eq!(searcher.alpha_beta(&mut pos, -INFINITY, INFINITY, 0), expected);
        assert_eq!(searcher.nodes(), 1);
    }

    #[test]
    fn test_fail_hard_window() {
        // White is a queen up, which is far outside this window
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").unwrap();
        let mut searcher = Searcher::new();

        assert_eq!(searcher.alpha_beta(&mut pos, -10, 10, 2), 10);
        assert_eq!(searcher.alpha_beta(&mut pos, 2000, 3000, 2), 2000);
    }

    #[test]
    fn test_takes_hanging_queen() {
        let mut pos = Position::from_fen("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1").unwrap();
        let best = Searcher::new().search(&mut pos, 2, -INFINITY, INFINITY);
        assert_eq!(best.map(|mv| mv.to_uci()).as_deref(), Some("d2d5"));
    }

    #[test]
    fn test_iterative_deepening_reports_every_depth() {
        let mut pos = Position::default();
        let stop = AtomicBool::new(false);
        let mut depths = Vec::new();

        let last = iterative_deepening(&mut pos, &SearchLimits::depth(3), &stop, |report| {
            depths.push(report.depth)
        });

        assert_eq!(depths, vec![1, 2, 3]);
        assert_eq!(last.map(|report| report.depth), Some(3));
        assert_eq!(pos, Position::default());
    }

    #[test]
    fn test_iterative_deepening_stops_between_depths() {
        let mut pos = Position::default();
        let stop = AtomicBool::new(false);
        let mut depths = Vec::new();

        let last = iterative_deepening(&mut pos, &SearchLimits::depth(10), &stop, |report| {
            depths.push(report.depth);
            if report.depth == 2 {
                stop.store(true, Ordering::Relaxed);
            }
        });

        assert_eq!(depths, vec![1, 2]);
        assert_eq!(last.map(|report| report.depth), Some(2));

        // Already stopped, so nothing is searched at all
        assert_eq!(
            iterative_deepening(&mut pos, &SearchLimits::depth(10), &stop, |_| {}),
            None
        );
    }

    #[test]
    fn test_iterative_deepening_ends_on_forced_mate() {
        let mut pos = Position::from_fen(MATE_IN_ONE).unwrap();
        let stop = AtomicBool::new(false);

        let last = iterative_deepening(&mut pos, &SearchLimits::depth(10), &stop, |_| {}).unwrap();
        assert_eq!(last.best_move.to_uci(), "a1a8");
        assert_eq!(last.depth, 2);
    }

    #[test]
    fn test_fixed_depth_in_background() {
        let handle = spawn_timed_search(Position::default(), SearchLimits::depth(2));
        let report = handle.wait().unwrap();
        assert_eq!(report.depth, 2);
    }

    #[test]
    fn test_timed_search_respects_movetime() {
        let limits = SearchLimits::movetime(Duration::from_millis(200));
        let start = Instant::now();

        let report = spawn_timed_search(Position::from_fen(FEN_KIWIPETE).unwrap(), limits)
            .wait()
            .unwrap();

        assert!(report.depth >= 1);
        assert!(report.depth < MAX_DEPTH);
        // The depth in progress when time ran out is allowed to finish
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[test]
    fn test_timed_search_can_be_stopped() {
        let handle = spawn_timed_search(Position::default(), SearchLimits::default());
        thread::sleep(Duration::from_millis(50));
        let report = handle.stop().unwrap();
        assert!(report.depth >= 1);
    }

    #[test]
    fn test_timed_search_with_no_moves() {
        let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        let handle = spawn_timed_search(pos, SearchLimits::movetime(Duration::from_secs(5)));
        assert_eq!(handle.wait(), None);
    }
}
