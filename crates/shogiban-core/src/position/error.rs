use crate::types::{Color, Move, PieceType, Square};

/// 局面操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("piece on {square} belongs to {owner}, not {mover}")]
    NotOwnPiece {
        square: Square,
        owner: Color,
        mover: Color,
    },

    #[error("piece on {0} does not match the move")]
    PieceMismatch(Square),

    #[error("{0} cannot capture its own piece")]
    FriendlyCapture(Square),

    #[error("{color} has no {piece_type} in hand")]
    NotInHand { piece_type: PieceType, color: Color },

    #[error("cannot drop onto occupied square {0}")]
    Occupied(Square),

    #[error("a king cannot be held in hand")]
    KingInHand,

    #[error("{count} {piece_type} exceeds a full set")]
    HandOverflow { piece_type: PieceType, count: u8 },

    #[error("cannot undo {mv}: {reason}")]
    InconsistentUndo { mv: Move, reason: &'static str },
}
