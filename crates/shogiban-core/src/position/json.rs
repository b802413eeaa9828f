//! UI 向けの盤面スナップショット (JSON)

use super::{Hand, Position};
use crate::types::{Color, Move, Piece, Square};
use serde::{Deserialize, Serialize};

/// 盤面の1マス
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CellState {
    /// "9a" ~ "1i" 形式
    pub square: Square,
    /// 駒（存在しない場合はnull）
    pub piece: Option<Piece>,
}

/// 両者の持ち駒
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandsState {
    pub first: Hand,
    pub second: Hand,
}

/// 直前の指し手（打ち駒は `from: null`）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LastMove {
    pub from: Option<Square>,
    pub to: Square,
    pub promote: bool,
}

impl From<Move> for LastMove {
    fn from(mv: Move) -> Self {
        LastMove {
            from: mv.from(),
            to: mv.to(),
            promote: mv.is_promote(),
        }
    }
}

/// 盤面全体の状態
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardState {
    /// 9x9のセル配列（行0 = 一段目、列0 = 9筋）
    pub cells: Vec<Vec<CellState>>,
    pub hands: HandsState,
    pub turn: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_move: Option<LastMove>,
}

impl Position {
    /// 現局面のスナップショット
    pub fn to_board_state(&self, last_move: Option<Move>) -> BoardState {
        let cells = (0..9u8)
            .map(|row| {
                (0..9u8)
                    .map(|col| {
                        let square = Square::new(row, col);
                        CellState {
                            square,
                            piece: self.piece_on(square),
                        }
                    })
                    .collect()
            })
            .collect();

        BoardState {
            cells,
            hands: HandsState {
                first: *self.hand(Color::Black),
                second: *self.hand(Color::White),
            },
            turn: self.side_to_move(),
            last_move: last_move.map(LastMove::from),
        }
    }
}
