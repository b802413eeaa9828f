//! 探索のテスト

mod find_best_move;

use crate::position::Position;

fn pos(sfen: &str) -> Position {
    Position::from_sfen(sfen).unwrap()
}
