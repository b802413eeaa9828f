//! Move representation

use super::{Color, Piece, PieceType, Square};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A move on the board or a drop from hand.
///
/// `Normal` records the piece as it stood on `from` before the move, so a
/// move can be undone without looking anything up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Move {
    Normal {
        from: Square,
        to: Square,
        piece: Piece,
        promote: bool,
    },
    Drop {
        piece_type: PieceType,
        to: Square,
        color: Color,
    },
}

impl Move {
    /// Create a normal move (piece moving on board)
    #[inline]
    pub const fn normal(from: Square, to: Square, piece: Piece, promote: bool) -> Self {
        Move::Normal {
            from,
            to,
            piece,
            promote,
        }
    }

    /// Create a drop move (placing piece from hand)
    #[inline]
    pub const fn drop(piece_type: PieceType, to: Square, color: Color) -> Self {
        Move::Drop {
            piece_type,
            to,
            color,
        }
    }

    /// Get source square (None for drops)
    #[inline]
    pub const fn from(self) -> Option<Square> {
        match self {
            Move::Normal { from, .. } => Some(from),
            Move::Drop { .. } => None,
        }
    }

    #[inline]
    pub const fn to(self) -> Square {
        match self {
            Move::Normal { to, .. } | Move::Drop { to, .. } => to,
        }
    }

    #[inline]
    pub const fn is_drop(self) -> bool {
        matches!(self, Move::Drop { .. })
    }

    #[inline]
    pub const fn is_promote(self) -> bool {
        matches!(self, Move::Normal { promote: true, .. })
    }

    /// 指し手の手番
    #[inline]
    pub const fn color(self) -> Color {
        match self {
            Move::Normal { piece, .. } => piece.color,
            Move::Drop { color, .. } => color,
        }
    }

    #[inline]
    pub const fn piece_type(self) -> PieceType {
        match self {
            Move::Normal { piece, .. } => piece.piece_type,
            Move::Drop { piece_type, .. } => piece_type,
        }
    }
}

/// USI形式で表示 ("7g7f", "8h2b+", "P*5e")
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                from, to, promote, ..
            } => {
                write!(f, "{from}{to}")?;
                if promote {
                    f.write_str("+")?;
                }
                Ok(())
            }
            Move::Drop { piece_type, to, .. } => write!(f, "{piece_type}*{to}"),
        }
    }
}

/// What the AI decided to do on its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", content = "move", rename_all = "snake_case")]
pub enum Decision {
    Move(Move),
    Resign,
}

impl Decision {
    pub const fn as_move(self) -> Option<Move> {
        match self {
            Decision::Move(mv) => Some(mv),
            Decision::Resign => None,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Move(mv) => write!(f, "{mv}"),
            Decision::Resign => f.write_str("resign"),
        }
    }
}
