//! 手番（Color）

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 手番（先手/後手）
///
/// `Black` is the first player. It starts on rows 6-8 and moves toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    #[serde(rename = "first", alias = "black", alias = "sente")]
    Black = 0,
    #[serde(rename = "second", alias = "white", alias = "gote")]
    White = 1,
}

impl Color {
    /// 手番の数
    pub const NUM: usize = 2;

    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    /// 相手番を返す
    #[inline]
    pub const fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// インデックスとして使用（配列アクセス用）
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The rank this side can never move past (row 0 for Black, row 8 for White).
    #[inline]
    pub const fn farthest_row(self) -> u8 {
        match self {
            Color::Black => 0,
            Color::White => 8,
        }
    }

    /// Distance in rows from `row` to this side's farthest rank.
    #[inline]
    pub const fn rows_to_far_edge(self, row: u8) -> u8 {
        row.abs_diff(self.farthest_row())
    }

    /// 敵陣（成れる三段）かどうか
    #[inline]
    pub const fn in_promotion_zone(self, row: u8) -> bool {
        self.rows_to_far_edge(row) <= 2
    }
}

impl std::ops::Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => f.write_str("first"),
            Color::White => f.write_str("second"),
        }
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" | "black" | "sente" | "b" => Ok(Color::Black),
            "second" | "white" | "gote" | "w" => Ok(Color::White),
            other => Err(format!("unknown side '{other}' (expected first or second)")),
        }
    }
}
