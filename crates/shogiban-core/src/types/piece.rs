//! Piece types and pieces

use super::Color;
use crate::catalog;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Piece types (8 types)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    #[serde(rename = "K")]
    King = 0,
    #[serde(rename = "R")]
    Rook = 1,
    #[serde(rename = "B")]
    Bishop = 2,
    #[serde(rename = "G")]
    Gold = 3,
    #[serde(rename = "S")]
    Silver = 4,
    #[serde(rename = "N")]
    Knight = 5,
    #[serde(rename = "L")]
    Lance = 6,
    #[serde(rename = "P")]
    Pawn = 7,
}

impl PieceType {
    pub const ALL: [PieceType; 8] = [
        PieceType::King,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// 持ち駒になる駒種（飛, 角, 金, 銀, 桂, 香, 歩 の順）
    pub const HAND: [PieceType; 7] = [
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Gold,
        PieceType::Silver,
        PieceType::Knight,
        PieceType::Lance,
        PieceType::Pawn,
    ];

    /// 平手一式に含まれる枚数（持ち駒の上限）
    pub const fn full_set_count(self) -> u8 {
        match self {
            PieceType::King | PieceType::Rook | PieceType::Bishop => 2,
            PieceType::Gold | PieceType::Silver | PieceType::Knight | PieceType::Lance => 4,
            PieceType::Pawn => 18,
        }
    }

    /// Index into a hand array (`None` for the King).
    #[inline]
    pub const fn hand_index(self) -> Option<usize> {
        match self {
            PieceType::King => None,
            PieceType::Rook => Some(0),
            PieceType::Bishop => Some(1),
            PieceType::Gold => Some(2),
            PieceType::Silver => Some(3),
            PieceType::Knight => Some(4),
            PieceType::Lance => Some(5),
            PieceType::Pawn => Some(6),
        }
    }

    /// Check if piece can promote
    #[inline]
    pub const fn can_promote(self) -> bool {
        !matches!(self, PieceType::King | PieceType::Gold)
    }

    /// USI/SFEN letter (upper case).
    pub const fn usi_char(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Gold => 'G',
            PieceType::Silver => 'S',
            PieceType::Knight => 'N',
            PieceType::Lance => 'L',
            PieceType::Pawn => 'P',
        }
    }

    pub fn from_usi_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceType::King),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'G' => Some(PieceType::Gold),
            'S' => Some(PieceType::Silver),
            'N' => Some(PieceType::Knight),
            'L' => Some(PieceType::Lance),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }

    /// 駒の基本価値
    #[inline]
    pub const fn value(self) -> i32 {
        catalog::base_value(self)
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.usi_char())
    }
}

/// Complete piece representation including promoted pieces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub promoted: bool,
}

impl Piece {
    /// Create new piece
    #[inline]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Piece {
            piece_type,
            color,
            promoted: false,
        }
    }

    /// Create promoted piece
    #[inline]
    pub const fn promoted(piece_type: PieceType, color: Color) -> Self {
        Piece {
            piece_type,
            color,
            promoted: true,
        }
    }

    /// 現在の状態での価値（成駒なら成駒の価値）
    #[inline]
    pub const fn value(self) -> i32 {
        if self.promoted {
            catalog::promoted_value(self.piece_type)
        } else {
            catalog::base_value(self.piece_type)
        }
    }

    /// 取られた駒は成りが戻り、持ち主が入れ替わる
    #[inline]
    pub const fn captured_by(self, capturer: Color) -> Self {
        Piece::new(self.piece_type, capturer)
    }

    /// Board glyph: `玉` for the first player's king, `王` for the second's.
    pub const fn kanji(self) -> char {
        if self.promoted {
            match self.piece_type {
                PieceType::Rook => '龍',
                PieceType::Bishop => '馬',
                PieceType::Silver => '全',
                PieceType::Knight => '圭',
                PieceType::Lance => '杏',
                PieceType::Pawn => 'と',
                PieceType::King | PieceType::Gold => Piece::new(self.piece_type, self.color).kanji(),
            }
        } else {
            match self.piece_type {
                PieceType::King => match self.color {
                    Color::Black => '玉',
                    Color::White => '王',
                },
                PieceType::Rook => '飛',
                PieceType::Bishop => '角',
                PieceType::Gold => '金',
                PieceType::Silver => '銀',
                PieceType::Knight => '桂',
                PieceType::Lance => '香',
                PieceType::Pawn => '歩',
            }
        }
    }

    /// SFEN token ("P", "+r", ...). Upper case for Black.
    pub fn sfen_token(self) -> String {
        let c = self.piece_type.usi_char();
        let c = match self.color {
            Color::Black => c,
            Color::White => c.to_ascii_lowercase(),
        };
        if self.promoted {
            format!("+{c}")
        } else {
            c.to_string()
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sfen_token())
    }
}
