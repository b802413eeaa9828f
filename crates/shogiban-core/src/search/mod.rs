//! Fixed-depth minimax search with alpha-beta pruning
//!
//! Leaves are scored with [`Evaluator::evaluate`], which is negated when the
//! AI plays first. The side to play at each node is passed down the
//! recursion; `Position::side_to_move` is never touched.

mod minimax;

#[cfg(test)]
mod tests;

use crate::eval::{Evaluator, PositionalEvaluator};
use crate::position::{Position, PositionError};
use crate::types::{Color, Decision, Move};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Score of a side with no legal moves left (from the loser's opponent's view).
pub const WIN_SCORE: f64 = 9999.0;

/// At the last ply only captures and promotions are looked at when the mover
/// has more than this many moves.
pub const NOISY_HORIZON_MIN_MOVES: usize = 5;

/// 探索エラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("board error during search: {0}")]
    Position(#[from] PositionError),

    #[error("search stopped")]
    Stopped,
}

/// Node statistics for one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// minimax nodes visited
    pub nodes: u64,
    /// static evaluations
    pub evaluations: u64,
    /// beta cutoffs
    pub cutoffs: u64,
    /// nodes resolved by the capture/promotion-only horizon
    pub noisy_horizons: u64,
}

/// 探索結果
#[derive(Clone, Debug)]
pub struct SearchResult {
    /// `None` when there is nothing to play and resigning was not required
    pub decision: Option<Decision>,
    /// Score of the chosen move (absent for resignations and random picks)
    pub score: Option<f64>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Whether a move is a capture or a promotion in `pos`.
#[inline]
pub fn is_noisy(pos: &Position, mv: Move) -> bool {
    pos.is_capture(mv) || mv.is_promote()
}

/// 合法手からランダムに1手（合法手がなければ投了）
pub fn random_move<R: Rng + ?Sized>(pos: &Position, color: Color, rng: &mut R) -> Decision {
    let moves = pos.legal_moves_for(color);
    match moves.choose(rng) {
        Some(&mv) => Decision::Move(mv),
        None => Decision::Resign,
    }
}

/// 探索器
pub struct Searcher {
    ai: Color,
    max_depth: u8,
    random_move_rate: f64,
    prune: bool,
    rng: Xoshiro256PlusPlus,
    evaluator: Arc<dyn Evaluator + Send + Sync>,
    stop: Option<Arc<AtomicBool>>,
    stats: SearchStats,
}

impl Searcher {
    /// Searcher for `ai` at a fixed depth, with a randomly seeded RNG.
    pub fn new(ai: Color, max_depth: u8) -> Self {
        Searcher {
            ai,
            max_depth: max_depth.max(1),
            random_move_rate: 0.0,
            prune: true,
            rng: Xoshiro256PlusPlus::seed_from_u64(rand::random()),
            evaluator: Arc::new(PositionalEvaluator::default()),
            stop: None,
            stats: SearchStats::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        self
    }

    /// Probability of replacing the best move by a random legal move.
    pub fn with_random_move_rate(mut self, rate: f64) -> Self {
        self.random_move_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// `false` gives plain full-width minimax.
    pub fn with_pruning(mut self, prune: bool) -> Self {
        self.prune = prune;
        self
    }

    pub fn with_evaluator(mut self, evaluator: Arc<dyn Evaluator + Send + Sync>) -> Self {
        self.evaluator = evaluator;
        self
    }

    /// Abort with [`SearchError::Stopped`] once the flag is raised.
    pub fn with_stop_flag(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn ai(&self) -> Color {
        self.ai
    }

    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// 最善手を探す
    ///
    /// Returns `Resign` when the AI king is gone, or when there are no legal
    /// moves and `force_move` is set. With no legal moves and no obligation to
    /// move, returns `None`.
    pub fn find_best_move(
        &mut self,
        pos: &mut Position,
        force_move: bool,
    ) -> Result<Option<Decision>, SearchError> {
        self.search(pos, force_move).map(|r| r.decision)
    }

    /// Like [`Searcher::find_best_move`], with the score and statistics.
    pub fn search(&mut self, pos: &mut Position, force_move: bool) -> Result<SearchResult, SearchError> {
        let start = Instant::now();
        self.stats = SearchStats::default();

        let finish = |decision: Option<Decision>, score: Option<f64>, stats: SearchStats| SearchResult {
            decision,
            score,
            stats,
            elapsed: start.elapsed(),
        };

        if pos.king_square(self.ai).is_none() {
            log::info!("{} king is gone, resigning", self.ai);
            return Ok(finish(Some(Decision::Resign), None, self.stats));
        }

        let moves = pos.legal_moves_for(self.ai);
        if moves.is_empty() {
            if force_move {
                log::info!("{} has no legal moves, resigning", self.ai);
                return Ok(finish(Some(Decision::Resign), None, self.stats));
            }
            log::warn!("{} has no legal moves", self.ai);
            return Ok(finish(None, None, self.stats));
        }

        let mut best: Option<(Move, f64)> = None;
        for &mv in moves.iter() {
            let captured = pos.do_move(mv)?;
            let result = self.minimax(
                pos,
                self.max_depth - 1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                false,
            );
            pos.undo_move(mv, captured)?;
            let score = result?;
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((mv, score));
            }
        }

        let mut decision = best.map(|(mv, _)| Decision::Move(mv));
        let mut score = best.map(|(_, s)| s);

        if self.random_move_rate > 0.0 && self.rng.random::<f64>() < self.random_move_rate {
            if let Some(&mv) = moves.choose(&mut self.rng) {
                log::debug!("random override: {mv}");
                decision = Some(Decision::Move(mv));
                score = None;
            }
        }

        let result = finish(decision, score, self.stats);
        log::debug!(
            "search ai={} depth={} moves={} nodes={} evals={} cutoffs={} horizons={} best={} score={:?} elapsed={:?}",
            self.ai,
            self.max_depth,
            moves.len(),
            result.stats.nodes,
            result.stats.evaluations,
            result.stats.cutoffs,
            result.stats.noisy_horizons,
            result.decision.map_or_else(|| "-".to_string(), |d| d.to_string()),
            result.score,
            result.elapsed,
        );
        Ok(result)
    }

    #[inline]
    fn check_stop(&self) -> Result<(), SearchError> {
        match &self.stop {
            Some(flag) if flag.load(Ordering::Relaxed) => Err(SearchError::Stopped),
            _ => Ok(()),
        }
    }

    /// Static value of a leaf in the second-relative convention of
    /// [`Evaluator::evaluate`].
    #[inline]
    fn static_score(&mut self, pos: &Position, depth: u8) -> f64 {
        self.stats.evaluations += 1;
        self.evaluator.evaluate(pos, self.ai, depth, self.max_depth)
    }
}
