//! Evaluation function for shogi
//!
//! A hand-tuned weighted sum of material, piece placement, attacks, mobility,
//! king shelter and pieces in hand.

use crate::catalog;
use crate::position::Position;
use crate::types::{Color, Square};

/// Trait for position evaluation
///
/// Contract:
/// - `score` is from the AI's own perspective: positive favours `ai`.
/// - `evaluate` is the canonical second-relative form: positive favours the
///   second player (White), whichever side the AI plays.
/// - `depth` is the remaining search depth at the evaluated node; the bonus
///   `0.1 * (max_depth - depth)` pushes a non-zero score further from zero.
pub trait Evaluator {
    fn score(&self, pos: &Position, ai: Color, depth: u8, max_depth: u8) -> f64;

    fn evaluate(&self, pos: &Position, ai: Color, depth: u8, max_depth: u8) -> f64 {
        let s = self.score(pos, ai, depth, max_depth);
        match ai {
            Color::Black => -s,
            Color::White => s,
        }
    }
}

/// Implement Evaluator for Arc<T> where T: Evaluator
impl<T: Evaluator + ?Sized> Evaluator for std::sync::Arc<T> {
    fn score(&self, pos: &Position, ai: Color, depth: u8, max_depth: u8) -> f64 {
        (**self).score(pos, ai, depth, max_depth)
    }
}

/// 各評価項目の重み
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Weights {
    pub material: f64,
    pub attack: f64,
    pub mobility: f64,
    pub king_safety: f64,
    pub hand: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            material: 1.0,
            attack: 0.8,
            mobility: 0.5,
            king_safety: 1.2,
            hand: 0.7,
        }
    }
}

/// The full evaluator used by the AI.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalEvaluator {
    pub weights: Weights,
}

impl Evaluator for PositionalEvaluator {
    fn score(&self, pos: &Position, ai: Color, depth: u8, max_depth: u8) -> f64 {
        let w = &self.weights;
        let raw = material(pos, ai) * w.material
            + attack_potential(pos, ai) * w.attack
            + mobility(pos, ai) * w.mobility
            + king_safety(pos, ai) * w.king_safety
            + hand(pos, ai) * w.hand;
        with_depth_urgency(raw, depth, max_depth)
    }
}

/// 駒の価値と位置だけの軽量評価
#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn score(&self, pos: &Position, ai: Color, depth: u8, max_depth: u8) -> f64 {
        with_depth_urgency(material(pos, ai) + hand(pos, ai), depth, max_depth)
    }
}

/// Push a winning score up and a losing score down the shallower the node is.
pub fn with_depth_urgency(score: f64, depth: u8, max_depth: u8) -> f64 {
    let bonus = 0.1 * (f64::from(max_depth) - f64::from(depth));
    if score > 0.0 {
        score + bonus
    } else if score < 0.0 {
        score - bonus
    } else {
        score
    }
}

#[inline]
fn signed(owner: Color, ai: Color, value: f64) -> f64 {
    if owner == ai { value } else { -value }
}

/// 駒の価値 + 0.1 × 位置評価
pub fn material(pos: &Position, ai: Color) -> f64 {
    pos.occupied()
        .map(|(sq, p)| {
            let placement = catalog::position_value(p.piece_type, p.color, sq);
            let total = f64::from(p.value()) + f64::from(placement) * 0.1;
            signed(p.color, ai, total)
        })
        .sum()
}

/// 自分の駒が取れる相手の駒の価値 × 0.1
pub fn attack_potential(pos: &Position, ai: Color) -> f64 {
    let mut score = 0.0;
    for (from, _) in pos.pieces_of(ai) {
        for to in pos.movable_squares(from) {
            if let Some(target) = pos.piece_on(to) {
                if target.color != ai {
                    score += f64::from(target.value()) * 0.1;
                }
            }
        }
    }
    score
}

/// (自分の合法手数 - 相手の合法手数) × 0.1
pub fn mobility(pos: &Position, ai: Color) -> f64 {
    let ours = pos.legal_moves_for(ai).len() as f64;
    let theirs = pos.legal_moves_for(ai.opponent()).len() as f64;
    (ours - theirs) * 0.1
}

/// 自玉の守り駒 × 5 + 相手玉に迫る自駒 × 3（どちらかの玉がなければ 0）
pub fn king_safety(pos: &Position, ai: Color) -> f64 {
    let (Some(own_king), Some(their_king)) = (pos.king_square(ai), pos.king_square(ai.opponent()))
    else {
        return 0.0;
    };
    let ours_around = |center: Square| {
        center
            .neighbors()
            .filter(|&sq| pos.piece_on(sq).is_some_and(|p| p.color == ai))
            .count() as f64
    };
    ours_around(own_king) * 5.0 + ours_around(their_king) * 3.0
}

/// 持ち駒の価値 × 0.8（自分 - 相手）
pub fn hand(pos: &Position, ai: Color) -> f64 {
    let worth = |color: Color| -> f64 {
        pos.hand(color)
            .iter()
            .map(|(pt, n)| f64::from(catalog::base_value(pt)) * f64::from(n) * 0.8)
            .sum()
    };
    worth(ai) - worth(ai.opponent())
}
