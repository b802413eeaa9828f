//! SFEN形式の解析・出力

use super::Position;
use crate::types::{Color, Piece, PieceType, Square};

/// 平手初期局面のSFEN
pub const SFEN_HIRATE: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";

/// SFENパースエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SfenError {
    /// 盤面の形式が不正
    #[error("Invalid board: {0}")]
    Board(String),
    /// 手番の形式が不正
    #[error("Invalid side to move: {0}")]
    SideToMove(String),
    /// 手駒の形式が不正
    #[error("Invalid hand: {0}")]
    Hand(String),
    /// 手数の形式が不正
    #[error("Invalid ply: {0}")]
    Ply(String),
}

impl Position {
    /// SFEN文字列から局面を作る（手数は読み捨てる）
    pub fn from_sfen(sfen: &str) -> Result<Self, SfenError> {
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(SfenError::Board("SFEN must have at least 3 parts".to_string()));
        }

        let mut pos = Position::empty();
        pos.parse_board(parts[0])?;

        pos.side_to_move = match parts[1] {
            "b" => Color::Black,
            "w" => Color::White,
            other => {
                return Err(SfenError::SideToMove(format!("Expected 'b' or 'w', got '{other}'")));
            }
        };

        pos.parse_hand(parts[2])?;

        if let Some(ply) = parts.get(3) {
            ply.parse::<u32>().map_err(|_| SfenError::Ply(ply.to_string()))?;
        }

        Ok(pos)
    }

    /// 現局面のSFEN文字列（手数1）
    pub fn to_sfen(&self) -> String {
        self.to_sfen_with_ply(1)
    }

    pub fn to_sfen_with_ply(&self, ply: u32) -> String {
        let mut result = String::new();

        for row in 0..9u8 {
            let mut empty_count = 0;
            for col in 0..9u8 {
                match self.piece_on(Square::new(row, col)) {
                    None => empty_count += 1,
                    Some(pc) => {
                        if empty_count > 0 {
                            result.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        result.push_str(&pc.sfen_token());
                    }
                }
            }
            if empty_count > 0 {
                result.push_str(&empty_count.to_string());
            }
            if row < 8 {
                result.push('/');
            }
        }

        result.push(' ');
        result.push(match self.side_to_move {
            Color::Black => 'b',
            Color::White => 'w',
        });

        result.push(' ');
        let hand_str = self.hand_to_sfen();
        if hand_str.is_empty() {
            result.push('-');
        } else {
            result.push_str(&hand_str);
        }

        result.push(' ');
        result.push_str(&ply.to_string());
        result
    }

    fn parse_board(&mut self, board_str: &str) -> Result<(), SfenError> {
        let ranks: Vec<&str> = board_str.split('/').collect();
        if ranks.len() != 9 {
            return Err(SfenError::Board(format!("Expected 9 ranks, got {}", ranks.len())));
        }

        for (row, rank_str) in ranks.iter().enumerate() {
            let mut col = 0u32;
            let mut promoted = false;

            for c in rank_str.chars() {
                if c == '+' {
                    promoted = true;
                    continue;
                }

                if let Some(digit) = c.to_digit(10) {
                    col += digit;
                    if col > 9 {
                        return Err(SfenError::Board(format!("Too many squares in rank {row}")));
                    }
                    continue;
                }

                if col >= 9 {
                    return Err(SfenError::Board(format!("Too many pieces in rank {row}")));
                }
                let pc = sfen_char_to_piece(c, promoted)?;
                self.put_piece(Square::new(row as u8, col as u8), pc);
                promoted = false;
                col += 1;
            }

            if col != 9 {
                return Err(SfenError::Board(format!("Rank {row} has wrong number of squares")));
            }
        }

        Ok(())
    }

    fn parse_hand(&mut self, hand_str: &str) -> Result<(), SfenError> {
        if hand_str == "-" {
            return Ok(());
        }

        let too_many = |what: &str| SfenError::Hand(format!("Hand count too large: {what}"));
        let mut count: Option<u32> = None;
        for c in hand_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                let n = count
                    .unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(digit))
                    .ok_or_else(|| too_many(hand_str))?;
                count = Some(n);
                continue;
            }
            let pt = PieceType::from_usi_char(c)
                .filter(|&pt| pt != PieceType::King)
                .ok_or_else(|| SfenError::Hand(format!("Unknown hand piece: {c}")))?;
            let color = if c.is_ascii_uppercase() {
                Color::Black
            } else {
                Color::White
            };
            let n = count.take().unwrap_or(1);
            let held: u32 = Color::ALL
                .iter()
                .map(|&side| u32::from(self.hand(side).count(pt)))
                .sum();
            if n == 0 {
                return Err(SfenError::Hand(format!("Zero count for {c}")));
            }
            if held + n > u32::from(pt.full_set_count()) {
                return Err(too_many(&format!("{n}{c}")));
            }
            for _ in 0..n {
                self.hand_mut(color)
                    .add(pt)
                    .map_err(|e| SfenError::Hand(e.to_string()))?;
            }
        }
        if count.is_some() {
            return Err(SfenError::Hand(format!("Count without piece: {hand_str}")));
        }

        Ok(())
    }

    fn hand_to_sfen(&self) -> String {
        let mut result = String::new();
        for color in Color::ALL {
            for (pt, cnt) in self.hand(color).iter() {
                if cnt > 1 {
                    result.push_str(&cnt.to_string());
                }
                result.push_str(&Piece::new(pt, color).sfen_token());
            }
        }
        result
    }
}

fn sfen_char_to_piece(c: char, promoted: bool) -> Result<Piece, SfenError> {
    let pt = PieceType::from_usi_char(c)
        .ok_or_else(|| SfenError::Board(format!("Unknown piece: {c}")))?;
    if promoted && !pt.can_promote() {
        return Err(SfenError::Board(format!("Piece cannot be promoted: +{c}")));
    }
    let color = if c.is_ascii_uppercase() {
        Color::Black
    } else {
        Color::White
    };
    Ok(Piece {
        piece_type: pt,
        color,
        promoted,
    })
}
