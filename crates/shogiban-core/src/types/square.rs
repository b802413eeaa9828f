//! Square on the 9x9 board

use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤上のマス (0-80)
///
/// Row 0 is the top of the board (White's back rank), row 8 the bottom
/// (Black's back rank). Columns run left to right, 0-8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    /// マスの数
    pub const NUM: usize = 81;

    /// Create square from row and column
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < 9 && col < 9);
        Square(row * 9 + col)
    }

    /// Checked constructor for signed coordinates produced by step arithmetic.
    #[inline]
    pub const fn from_coords(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < 9 && col >= 0 && col < 9 {
            Some(Square(row as u8 * 9 + col as u8))
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / 9
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % 9
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The square `(dr, dc)` away, if still on the board.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        Square::from_coords(self.row() as i8 + dr, self.col() as i8 + dc)
    }

    /// 180度回転（先後反転）
    #[inline]
    pub const fn flip(self) -> Self {
        Square(80 - self.0)
    }

    /// All squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..Self::NUM as u8).map(Square)
    }

    /// The up to eight squares adjacent to this one.
    pub fn neighbors(self) -> impl Iterator<Item = Square> {
        const AROUND: [(i8, i8); 8] =
            [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];
        AROUND.into_iter().filter_map(move |(dr, dc)| self.offset(dr, dc))
    }

    /// Parse the USI form ("7g", "5e").
    pub fn from_usi(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0];
        let rank = bytes[1];
        if !(b'1'..=b'9').contains(&file) || !(b'a'..=b'i').contains(&rank) {
            return None;
        }
        Some(Square::new(rank - b'a', 8 - (file - b'1')))
    }
}

/// Display square in USI notation (e.g., "5e")
///
/// USI_file = 9 - col, USI_rank = 'a' + row.
/// - Square::new(0, 0) → "9a"
/// - Square::new(8, 8) → "1i"
/// - Square::new(4, 4) → "5e"
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = b'9' - self.col();
        let rank = b'a' + self.row();
        write!(f, "{}{}", file as char, rank as char)
    }
}

impl TryFrom<String> for Square {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Square::from_usi(&value).ok_or_else(|| format!("invalid square '{value}'"))
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_string()
    }
}
