use super::{NOISY_HORIZON_MIN_MOVES, SearchError, Searcher, WIN_SCORE, is_noisy};
use crate::position::Position;
use crate::types::Move;

impl Searcher {
    /// minimax + alpha-beta
    ///
    /// `maximizing` selects the side to play: the AI when true, its opponent
    /// otherwise. The board is restored before returning, on every path.
    pub fn minimax(
        &mut self,
        pos: &mut Position,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> Result<f64, SearchError> {
        self.check_stop()?;
        self.stats.nodes += 1;

        if depth == 0 {
            return Ok(self.static_score(pos, 0));
        }

        let side = if maximizing { self.ai } else { self.ai.opponent() };
        let moves = pos.legal_moves_for(side);

        if depth == 1 && moves.len() > NOISY_HORIZON_MIN_MOVES {
            let noisy: Vec<Move> = moves.iter().copied().filter(|&mv| is_noisy(pos, mv)).collect();
            if !noisy.is_empty() {
                self.stats.noisy_horizons += 1;
                return self.noisy_horizon(pos, &noisy, alpha, beta, maximizing);
            }
        }

        if moves.is_empty() {
            return Ok(if maximizing { -WIN_SCORE } else { WIN_SCORE });
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            let captured = pos.do_move(mv)?;
            let result = self.minimax(pos, depth - 1, alpha, beta, !maximizing);
            pos.undo_move(mv, captured)?;
            let value = result?;

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if self.prune && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }

    /// Score each noisy move by the static evaluation right after it.
    fn noisy_horizon(
        &mut self,
        pos: &mut Position,
        moves: &[Move],
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> Result<f64, SearchError> {
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for &mv in moves {
            let captured = pos.do_move(mv)?;
            let value = self.static_score(pos, 0);
            pos.undo_move(mv, captured)?;

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(value);
            } else {
                best = best.min(value);
                beta = beta.min(value);
            }

            if self.prune && beta <= alpha {
                self.stats.cutoffs += 1;
                break;
            }
        }

        Ok(best)
    }
}
