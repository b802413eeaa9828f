//! 持ち駒

use super::PositionError;
use crate::types::PieceType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pieces held in hand by one side, indexed in `PieceType::HAND` order.
///
/// Serialised as a map containing only non-zero counts, e.g. `{"P": 2, "R": 1}`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "BTreeMap<PieceType, u8>", try_from = "BTreeMap<PieceType, u8>")]
pub struct Hand {
    counts: [u8; 7],
}

impl Hand {
    pub const fn new() -> Self {
        Hand { counts: [0; 7] }
    }

    /// 指定駒種の枚数（玉は常に0）
    #[inline]
    pub fn count(&self, piece_type: PieceType) -> u8 {
        piece_type.hand_index().map_or(0, |i| self.counts[i])
    }

    #[inline]
    pub fn has(&self, piece_type: PieceType) -> bool {
        self.count(piece_type) > 0
    }

    pub fn add(&mut self, piece_type: PieceType) -> Result<(), PositionError> {
        let i = piece_type.hand_index().ok_or(PositionError::KingInHand)?;
        self.counts[i] = self.counts[i].saturating_add(1);
        Ok(())
    }

    /// 1枚減らす。0枚なら `None` を返し、何も変更しない
    pub fn remove(&mut self, piece_type: PieceType) -> Option<()> {
        let i = piece_type.hand_index()?;
        self.counts[i] = self.counts[i].checked_sub(1)?;
        Some(())
    }

    /// (駒種, 枚数) を飛角金銀桂香歩の順に。0枚の駒種は含まない
    pub fn iter(&self) -> impl Iterator<Item = (PieceType, u8)> + '_ {
        PieceType::HAND
            .iter()
            .zip(self.counts.iter())
            .filter(|(_, n)| **n > 0)
            .map(|(pt, n)| (*pt, *n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&n| n == 0)
    }

    /// 持ち駒の総数
    pub fn total(&self) -> u32 {
        self.counts.iter().map(|&n| u32::from(n)).sum()
    }
}

impl From<Hand> for BTreeMap<PieceType, u8> {
    fn from(hand: Hand) -> Self {
        hand.iter().collect()
    }
}

impl TryFrom<BTreeMap<PieceType, u8>> for Hand {
    type Error = PositionError;

    fn try_from(map: BTreeMap<PieceType, u8>) -> Result<Self, Self::Error> {
        let mut hand = Hand::new();
        for (pt, n) in map {
            let i = pt.hand_index().ok_or(PositionError::KingInHand)?;
            if n > pt.full_set_count() {
                return Err(PositionError::HandOverflow {
                    piece_type: pt,
                    count: n,
                });
            }
            hand.counts[i] = n;
        }
        Ok(hand)
    }
}
