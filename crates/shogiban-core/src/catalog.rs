//! 駒の動き・価値・位置評価テーブル
//!
//! Directions are written from Black's point of view (up = row - 1). The
//! position layer negates both components for White pieces.

use crate::types::{Color, PieceType, Square};

/// A (row, col) delta from Black's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

impl Direction {
    pub const UP: Direction = Direction::new(-1, 0);
    pub const DOWN: Direction = Direction::new(1, 0);
    pub const LEFT: Direction = Direction::new(0, -1);
    pub const RIGHT: Direction = Direction::new(0, 1);
    pub const UP_LEFT: Direction = Direction::new(-1, -1);
    pub const UP_RIGHT: Direction = Direction::new(-1, 1);
    pub const DOWN_LEFT: Direction = Direction::new(1, -1);
    pub const DOWN_RIGHT: Direction = Direction::new(1, 1);
    pub const KNIGHT_LEFT: Direction = Direction::new(-2, -1);
    pub const KNIGHT_RIGHT: Direction = Direction::new(-2, 1);

    pub const fn new(dr: i8, dc: i8) -> Self {
        Direction { dr, dc }
    }

    /// The delta as seen by `color` (White's board is rotated 180 degrees).
    #[inline]
    pub const fn for_color(self, color: Color) -> (i8, i8) {
        match color {
            Color::Black => (self.dr, self.dc),
            Color::White => (-self.dr, -self.dc),
        }
    }
}

/// One entry of a movement pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Exactly one step in the direction.
    One(Direction),
    /// Any number of steps until blocked.
    Slide(Direction),
}

impl Step {
    pub const fn direction(self) -> Direction {
        match self {
            Step::One(d) | Step::Slide(d) => d,
        }
    }
}

use Direction as D;
use Step::{One, Slide};

const KING_STEPS: &[Step] = &[
    One(D::UP),
    One(D::DOWN),
    One(D::LEFT),
    One(D::RIGHT),
    One(D::UP_LEFT),
    One(D::UP_RIGHT),
    One(D::DOWN_LEFT),
    One(D::DOWN_RIGHT),
];

const ROOK_STEPS: &[Step] = &[Slide(D::UP), Slide(D::DOWN), Slide(D::LEFT), Slide(D::RIGHT)];

const BISHOP_STEPS: &[Step] = &[
    Slide(D::UP_LEFT),
    Slide(D::UP_RIGHT),
    Slide(D::DOWN_LEFT),
    Slide(D::DOWN_RIGHT),
];

const GOLD_STEPS: &[Step] = &[
    One(D::UP),
    One(D::DOWN),
    One(D::LEFT),
    One(D::RIGHT),
    One(D::UP_LEFT),
    One(D::UP_RIGHT),
];

const SILVER_STEPS: &[Step] = &[
    One(D::UP),
    One(D::UP_LEFT),
    One(D::UP_RIGHT),
    One(D::DOWN_LEFT),
    One(D::DOWN_RIGHT),
];

const KNIGHT_STEPS: &[Step] = &[One(D::KNIGHT_LEFT), One(D::KNIGHT_RIGHT)];

const LANCE_STEPS: &[Step] = &[Slide(D::UP)];

const PAWN_STEPS: &[Step] = &[One(D::UP)];

// 竜王: 飛車の動き + 斜め1マス
const DRAGON_STEPS: &[Step] = &[
    Slide(D::UP),
    Slide(D::DOWN),
    Slide(D::LEFT),
    Slide(D::RIGHT),
    One(D::UP_LEFT),
    One(D::UP_RIGHT),
    One(D::DOWN_LEFT),
    One(D::DOWN_RIGHT),
];

// 竜馬: 角行の動き + 上下左右1マス
const HORSE_STEPS: &[Step] = &[
    Slide(D::UP_LEFT),
    Slide(D::UP_RIGHT),
    Slide(D::DOWN_LEFT),
    Slide(D::DOWN_RIGHT),
    One(D::UP),
    One(D::DOWN),
    One(D::LEFT),
    One(D::RIGHT),
];

/// Movement pattern for a piece type in the given promotion state.
pub const fn move_pattern(piece_type: PieceType, promoted: bool) -> &'static [Step] {
    match (piece_type, promoted) {
        (PieceType::King, _) => KING_STEPS,
        (PieceType::Gold, _) => GOLD_STEPS,
        (PieceType::Rook, false) => ROOK_STEPS,
        (PieceType::Rook, true) => DRAGON_STEPS,
        (PieceType::Bishop, false) => BISHOP_STEPS,
        (PieceType::Bishop, true) => HORSE_STEPS,
        (PieceType::Silver, false) => SILVER_STEPS,
        (PieceType::Knight, false) => KNIGHT_STEPS,
        (PieceType::Lance, false) => LANCE_STEPS,
        (PieceType::Pawn, false) => PAWN_STEPS,
        (PieceType::Silver | PieceType::Knight | PieceType::Lance | PieceType::Pawn, true) => {
            GOLD_STEPS
        }
    }
}

/// 駒の基本価値
pub const fn base_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::King => 10000,
        PieceType::Rook => 12,
        PieceType::Bishop => 10,
        PieceType::Gold => 8,
        PieceType::Silver => 7,
        PieceType::Knight => 5,
        PieceType::Lance => 5,
        PieceType::Pawn => 1,
    }
}

/// 成駒の価値（金・玉は成れないので基本価値）
pub const fn promoted_value(piece_type: PieceType) -> i32 {
    match piece_type {
        PieceType::Rook => 17,
        PieceType::Bishop => 14,
        PieceType::Silver | PieceType::Knight | PieceType::Lance | PieceType::Pawn => 8,
        PieceType::King | PieceType::Gold => base_value(piece_type),
    }
}

type Table = [[i32; 9]; 9];

const PAWN_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [20, 20, 20, 20, 20, 20, 20, 20, 20],
    [15, 15, 15, 15, 15, 15, 15, 15, 15],
    [10, 10, 10, 10, 10, 10, 10, 10, 10],
    [5, 5, 5, 5, 5, 5, 5, 5, 5],
    [2, 2, 2, 2, 2, 2, 2, 2, 2],
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

// 香車: 前方への進出
const LANCE_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [15, 15, 15, 15, 15, 15, 15, 15, 15],
    [10, 10, 10, 10, 10, 10, 10, 10, 10],
    [8, 8, 8, 8, 8, 8, 8, 8, 8],
    [5, 5, 5, 5, 5, 5, 5, 5, 5],
    [3, 3, 3, 3, 3, 3, 3, 3, 3],
    [2, 2, 2, 2, 2, 2, 2, 2, 2],
    [1, 1, 1, 1, 1, 1, 1, 1, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [15, 18, 20, 20, 20, 20, 20, 18, 15],
    [12, 15, 18, 18, 18, 18, 18, 15, 12],
    [8, 10, 12, 12, 15, 12, 12, 10, 8],
    [5, 8, 10, 10, 10, 10, 10, 8, 5],
    [3, 5, 8, 8, 8, 8, 8, 5, 3],
    [2, 2, 3, 3, 5, 3, 3, 2, 2],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

// 銀将: 中央寄り
const SILVER_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [10, 12, 15, 15, 15, 15, 15, 12, 10],
    [8, 10, 12, 12, 12, 12, 12, 10, 8],
    [5, 8, 10, 10, 10, 10, 10, 8, 5],
    [3, 5, 8, 8, 8, 8, 8, 5, 3],
    [2, 3, 5, 5, 5, 5, 5, 3, 2],
    [1, 2, 3, 3, 3, 3, 3, 2, 1],
    [0, 1, 2, 2, 2, 2, 2, 1, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const GOLD_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [15, 18, 20, 20, 20, 20, 20, 18, 15],
    [12, 15, 18, 18, 18, 18, 18, 15, 12],
    [10, 12, 15, 15, 15, 15, 15, 12, 10],
    [5, 8, 10, 10, 10, 10, 10, 8, 5],
    [3, 5, 8, 8, 8, 8, 8, 5, 3],
    [2, 3, 5, 5, 5, 5, 5, 3, 2],
    [1, 2, 3, 3, 3, 3, 3, 2, 1],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
];

const BISHOP_TABLE: Table = [
    [5, 5, 5, 5, 5, 5, 5, 5, 5],
    [5, 8, 8, 8, 8, 8, 8, 8, 5],
    [5, 8, 10, 10, 10, 10, 10, 8, 5],
    [5, 8, 10, 12, 12, 12, 10, 8, 5],
    [5, 8, 10, 12, 15, 12, 10, 8, 5],
    [5, 8, 10, 12, 12, 12, 10, 8, 5],
    [5, 8, 10, 10, 10, 10, 10, 8, 5],
    [5, 8, 8, 8, 8, 8, 8, 8, 5],
    [5, 5, 5, 5, 5, 5, 5, 5, 5],
];

const ROOK_TABLE: Table = [
    [5, 5, 5, 8, 8, 8, 5, 5, 5],
    [5, 5, 5, 8, 10, 8, 5, 5, 5],
    [5, 5, 5, 8, 10, 8, 5, 5, 5],
    [8, 8, 8, 10, 12, 10, 8, 8, 8],
    [8, 10, 10, 12, 15, 12, 10, 10, 8],
    [8, 8, 8, 10, 12, 10, 8, 8, 8],
    [5, 5, 5, 8, 10, 8, 5, 5, 5],
    [5, 5, 5, 8, 10, 8, 5, 5, 5],
    [5, 5, 5, 8, 8, 8, 5, 5, 5],
];

// 玉: 自陣の隅を好む
const KING_TABLE: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0, 0, 0, 0, 0],
    [1, 1, 1, 0, 0, 0, 1, 1, 1],
    [3, 5, 5, 0, 0, 0, 5, 5, 3],
    [5, 10, 15, 0, 0, 0, 15, 10, 5],
];

const fn table(piece_type: PieceType) -> &'static Table {
    match piece_type {
        PieceType::King => &KING_TABLE,
        PieceType::Rook => &ROOK_TABLE,
        PieceType::Bishop => &BISHOP_TABLE,
        PieceType::Gold => &GOLD_TABLE,
        PieceType::Silver => &SILVER_TABLE,
        PieceType::Knight => &KNIGHT_TABLE,
        PieceType::Lance => &LANCE_TABLE,
        PieceType::Pawn => &PAWN_TABLE,
    }
}

/// Table row for a board row: unchanged for Black, reflected for White.
#[inline]
pub const fn mirror_row(row: u8, color: Color) -> u8 {
    match color {
        Color::Black => row,
        Color::White => 8 - row,
    }
}

/// 位置評価値（先手視点のテーブルを後手用に反転して参照）
///
/// Promoted pieces use the table of their base type.
#[inline]
pub const fn position_value(piece_type: PieceType, color: Color, sq: Square) -> i32 {
    table(piece_type)[mirror_row(sq.row(), color) as usize][sq.col() as usize]
}
