//! 指し手の実行と取り消し
//!
//! Both operations validate everything before touching the board, so an
//! error leaves the position unchanged.

use super::{Position, PositionError};
use crate::types::{Move, Piece, PieceType};

impl Position {
    /// 指し手を実行する
    ///
    /// Returns the captured piece exactly as it stood on the board. A captured
    /// non-king piece goes un-promoted into the mover's hand; a captured king
    /// goes nowhere. The side to move is not changed.
    pub fn do_move(&mut self, mv: Move) -> Result<Option<Piece>, PositionError> {
        match mv {
            Move::Normal {
                from,
                to,
                piece,
                promote,
            } => {
                let moving = self.piece_on(from).ok_or(PositionError::EmptySquare(from))?;
                if moving.color != piece.color {
                    return Err(PositionError::NotOwnPiece {
                        square: from,
                        owner: moving.color,
                        mover: piece.color,
                    });
                }
                if moving != piece {
                    return Err(PositionError::PieceMismatch(from));
                }
                let captured = self.piece_on(to);
                if captured.is_some_and(|c| c.color == piece.color) {
                    return Err(PositionError::FriendlyCapture(to));
                }

                if let Some(c) = captured.filter(|c| c.piece_type != PieceType::King) {
                    let taken = c.captured_by(piece.color);
                    self.hand_mut(taken.color).add(taken.piece_type)?;
                }
                self.remove_piece(from);
                let landed = Piece {
                    promoted: piece.promoted || (promote && piece.piece_type.can_promote()),
                    ..piece
                };
                self.put_piece(to, landed);
                Ok(captured)
            }
            Move::Drop {
                piece_type,
                to,
                color,
            } => {
                if piece_type == PieceType::King {
                    return Err(PositionError::KingInHand);
                }
                if self.piece_on(to).is_some() {
                    return Err(PositionError::Occupied(to));
                }
                self.hand_mut(color)
                    .remove(piece_type)
                    .ok_or(PositionError::NotInHand { piece_type, color })?;
                self.put_piece(to, Piece::new(piece_type, color));
                Ok(None)
            }
        }
    }

    /// 指し手を取り消す
    ///
    /// `captured` must be the value `do_move` returned for `mv`.
    pub fn undo_move(&mut self, mv: Move, captured: Option<Piece>) -> Result<(), PositionError> {
        match mv {
            Move::Normal {
                from, to, piece, ..
            } => {
                let landed = self.piece_on(to).ok_or(PositionError::InconsistentUndo {
                    mv,
                    reason: "destination is empty",
                })?;
                if landed.color != piece.color || landed.piece_type != piece.piece_type {
                    return Err(PositionError::InconsistentUndo {
                        mv,
                        reason: "destination holds a different piece",
                    });
                }
                if self.piece_on(from).is_some() {
                    return Err(PositionError::InconsistentUndo {
                        mv,
                        reason: "origin is occupied",
                    });
                }
                let refund = captured.filter(|c| c.piece_type != PieceType::King);
                if let Some(c) = refund {
                    if !self.hand(piece.color).has(c.piece_type) {
                        return Err(PositionError::InconsistentUndo {
                            mv,
                            reason: "captured piece missing from hand",
                        });
                    }
                }

                if let Some(c) = refund {
                    self.hand_mut(piece.color).remove(c.piece_type);
                }
                self.board[to.index()] = captured;
                self.put_piece(from, piece);
                Ok(())
            }
            Move::Drop {
                piece_type,
                to,
                color,
            } => {
                if self.piece_on(to) != Some(Piece::new(piece_type, color)) {
                    return Err(PositionError::InconsistentUndo {
                        mv,
                        reason: "dropped piece not found",
                    });
                }
                self.hand_mut(color).add(piece_type)?;
                self.remove_piece(to);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Square};

    #[test]
    fn test_do_undo_restores_startpos() {
        let mut pos = Position::startpos();
        let original = pos.clone();
        for mv in original.legal_moves() {
            let captured = pos.do_move(mv).unwrap();
            pos.undo_move(mv, captured).unwrap();
            assert_eq!(pos, original, "{mv}");
        }
    }

    #[test]
    fn test_capture_goes_to_hand_unpromoted() {
        let mut pos = Position::from_sfen("4k4/9/4+r4/4G4/9/9/9/9/4K4 b - 1").unwrap();
        let before = pos.clone();
        let gold = Piece::new(PieceType::Gold, Color::Black);
        let mv = Move::normal(Square::new(3, 4), Square::new(2, 4), gold, false);

        let captured = pos.do_move(mv).unwrap();
        assert_eq!(captured, Some(Piece::promoted(PieceType::Rook, Color::White)));
        assert_eq!(pos.hand(Color::Black).count(PieceType::Rook), 1);
        assert_eq!(pos.piece_on(Square::new(2, 4)), Some(gold));

        pos.undo_move(mv, captured).unwrap();
        assert_eq!(pos, before);
    }

    #[test]
    fn test_promotion_and_undo() {
        let mut pos = Position::from_sfen("4k4/9/9/4S4/9/9/9/9/4K4 b - 1").unwrap();
        let before = pos.clone();
        let silver = Piece::new(PieceType::Silver, Color::Black);
        let mv = Move::normal(Square::new(3, 4), Square::new(2, 4), silver, true);
        pos.do_move(mv).unwrap();
        assert_eq!(pos.piece_on(Square::new(2, 4)), Some(Piece::promoted(PieceType::Silver, Color::Black)));
        pos.undo_move(mv, None).unwrap();
        assert_eq!(pos, before);
    }

    #[test]
    fn test_king_capture_not_added_to_hand() {
        let mut pos = Position::from_sfen("9/9/9/9/4k4/4R4/9/9/4K4 b - 1").unwrap();
        let rook = Piece::new(PieceType::Rook, Color::Black);
        let mv = Move::normal(Square::new(5, 4), Square::new(4, 4), rook, false);
        let captured = pos.do_move(mv).unwrap();
        assert_eq!(captured, Some(Piece::new(PieceType::King, Color::White)));
        assert!(pos.hand(Color::Black).is_empty());
        assert_eq!(pos.king_square(Color::White), None);
        pos.undo_move(mv, captured).unwrap();
        assert_eq!(pos.king_square(Color::White), Some(Square::new(4, 4)));
    }

    #[test]
    fn test_drop_and_undo() {
        let mut pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 w 2p 1").unwrap();
        let before = pos.clone();
        let mv = Move::drop(PieceType::Pawn, Square::new(4, 4), Color::White);
        let on_board = pos.occupied().count();
        assert_eq!(pos.do_move(mv).unwrap(), None);
        assert_eq!(pos.hand(Color::White).count(PieceType::Pawn), 1);
        assert_eq!(pos.occupied().count(), on_board + 1);
        assert_eq!(pos.piece_on(Square::new(4, 4)), Some(Piece::new(PieceType::Pawn, Color::White)));
        pos.undo_move(mv, None).unwrap();
        assert_eq!(pos, before);
    }

    #[test]
    fn test_errors_leave_position_untouched() {
        let mut pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b - 1").unwrap();
        let before = pos.clone();
        let pawn = Piece::new(PieceType::Pawn, Color::Black);

        let empty = Move::normal(Square::new(5, 5), Square::new(4, 5), pawn, false);
        assert_eq!(pos.do_move(empty), Err(PositionError::EmptySquare(Square::new(5, 5))));

        let king = Piece::new(PieceType::King, Color::Black);
        let wrong_owner = Move::normal(Square::new(0, 4), Square::new(1, 4), king, false);
        assert!(matches!(pos.do_move(wrong_owner), Err(PositionError::NotOwnPiece { .. })));

        let no_hand = Move::drop(PieceType::Pawn, Square::new(4, 4), Color::Black);
        assert_eq!(
            pos.do_move(no_hand),
            Err(PositionError::NotInHand {
                piece_type: PieceType::Pawn,
                color: Color::Black
            })
        );

        let occupied = Move::drop(PieceType::Pawn, Square::new(8, 4), Color::Black);
        assert_eq!(pos.do_move(occupied), Err(PositionError::Occupied(Square::new(8, 4))));

        assert_eq!(pos, before);
    }

    #[test]
    fn test_undo_against_wrong_board_fails() {
        let mut pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b - 1").unwrap();
        let pawn = Piece::new(PieceType::Pawn, Color::Black);
        let mv = Move::normal(Square::new(5, 5), Square::new(4, 5), pawn, false);
        assert!(matches!(
            pos.undo_move(mv, None),
            Err(PositionError::InconsistentUndo { .. })
        ));
    }
}
