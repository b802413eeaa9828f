//! 合法手生成
//!
//! There is no check detection: a move that leaves the king en prise is
//! legal, and capturing a king ends the game.

use super::Position;
use crate::catalog::{self, Step};
use crate::types::{Color, Move, Piece, PieceType, Square};
use smallvec::SmallVec;
use std::ops::Deref;

/// Destinations of a single piece. A dragon or horse reaches at most 20 squares.
pub type SquareList = SmallVec<[Square; 20]>;

/// 指し手リスト
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    pub fn new() -> Self {
        MoveList {
            moves: Vec::with_capacity(128),
        }
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        self.moves.push(mv);
    }

}

impl Deref for MoveList {
    type Target = [Move];

    fn deref(&self) -> &[Move] {
        &self.moves
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl Position {
    /// 駒が移動できるマス
    ///
    /// Sliding steps stop at the first occupied square, which is included
    /// only when it holds an opposing piece. Empty `from` yields nothing.
    pub fn movable_squares(&self, from: Square) -> SquareList {
        let mut out = SquareList::new();
        let Some(piece) = self.piece_on(from) else {
            return out;
        };

        for step in catalog::move_pattern(piece.piece_type, piece.promoted) {
            let (dr, dc) = step.direction().for_color(piece.color);
            let mut cur = from;
            while let Some(next) = cur.offset(dr, dc) {
                match self.piece_on(next) {
                    Some(other) => {
                        if other.color != piece.color {
                            out.push(next);
                        }
                        break;
                    }
                    None => out.push(next),
                }
                if matches!(step, Step::One(_)) {
                    break;
                }
                cur = next;
            }
        }
        out
    }

    /// 成れるかどうか（移動元か移動先が敵陣）
    #[inline]
    pub fn can_promote(piece: Piece, from_row: u8, to_row: u8) -> bool {
        !piece.promoted
            && piece.piece_type.can_promote()
            && (piece.color.in_promotion_zone(from_row) || piece.color.in_promotion_zone(to_row))
    }

    /// 駒を打てるかどうか
    ///
    /// Checks occupancy, the two-pawn rule and the dead-piece ranks. Hand
    /// contents are not consulted.
    pub fn can_drop_piece(&self, piece_type: PieceType, color: Color, sq: Square) -> bool {
        if self.piece_on(sq).is_some() || piece_type == PieceType::King {
            return false;
        }
        let to_edge = color.rows_to_far_edge(sq.row());
        match piece_type {
            PieceType::Pawn => to_edge >= 1 && !self.has_unpromoted_pawn_in_column(color, sq.col()),
            PieceType::Lance => to_edge >= 1,
            PieceType::Knight => to_edge >= 2,
            _ => true,
        }
    }

    fn has_unpromoted_pawn_in_column(&self, color: Color, col: u8) -> bool {
        (0..9).any(|row| {
            self.piece_on(Square::new(row, col)).is_some_and(|p| {
                p.piece_type == PieceType::Pawn && p.color == color && !p.promoted
            })
        })
    }

    /// 打てるマス（行優先順）
    pub fn droppable_squares(&self, piece_type: PieceType, color: Color) -> Vec<Square> {
        Square::all().filter(|&sq| self.can_drop_piece(piece_type, color, sq)).collect()
    }

    /// 指定した手番の合法手（盤上の駒の移動 → 打ち駒）
    pub fn legal_moves_for(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();

        for (from, piece) in self.pieces_of(color) {
            for to in self.movable_squares(from) {
                if Self::can_promote(piece, from.row(), to.row()) {
                    moves.push(Move::normal(from, to, piece, true));
                }
                moves.push(Move::normal(from, to, piece, false));
            }
        }

        let hand = self.hand(color);
        for pt in PieceType::HAND {
            if !hand.has(pt) {
                continue;
            }
            for to in self.droppable_squares(pt, color) {
                moves.push(Move::drop(pt, to, color));
            }
        }

        moves
    }

    /// 手番側の合法手
    pub fn legal_moves(&self) -> MoveList {
        self.legal_moves_for(self.side_to_move)
    }

    /// 駒を取る手かどうか（局面に対して判定）
    pub fn is_capture(&self, mv: Move) -> bool {
        match mv {
            Move::Normal { to, piece, .. } => {
                self.piece_on(to).is_some_and(|p| p.color != piece.color)
            }
            Move::Drop { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(sfen: &str) -> Position {
        Position::from_sfen(sfen).unwrap()
    }

    #[test]
    fn test_startpos_move_count() {
        // 平手の初期局面は30手
        let p = Position::startpos();
        assert_eq!(p.legal_moves().len(), 30);
        assert_eq!(p.legal_moves_for(Color::White).len(), 30);
    }

    #[test]
    fn test_slide_stops_at_blocker() {
        // 香車: 前方の自駒で止まる / 敵駒は取れる
        let p = pos("4k4/9/4p4/9/9/9/9/9/4L3K b - 1");
        let dests = p.movable_squares(Square::new(8, 4));
        assert_eq!(dests.len(), 6);
        assert!(dests.contains(&Square::new(2, 4)));
        assert!(!dests.contains(&Square::new(1, 4)));

        let p = pos("4k4/9/4P4/9/9/9/9/9/4L3K b - 1");
        let dests = p.movable_squares(Square::new(8, 4));
        assert_eq!(dests.len(), 5);
    }

    #[test]
    fn test_white_pieces_move_down() {
        let p = pos("4k4/9/4p4/9/9/9/9/9/4K4 w - 1");
        let dests = p.movable_squares(Square::new(2, 4));
        assert_eq!(dests.as_slice(), &[Square::new(3, 4)]);
    }

    #[test]
    fn test_knight_pattern() {
        let p = pos("4k4/9/9/9/4N4/9/9/9/4K4 b - 1");
        let dests = p.movable_squares(Square::new(4, 4));
        assert_eq!(dests.as_slice(), &[Square::new(2, 3), Square::new(2, 5)]);
    }

    #[test]
    fn test_promotion_variants_emitted_in_order() {
        // 3段目に入る歩は成・不成の両方（成が先）
        let p = pos("4k4/9/9/4P4/9/9/9/9/4K4 b - 1");
        let pawn_moves: Vec<Move> = p
            .legal_moves()
            .iter()
            .copied()
            .filter(|m| m.from() == Some(Square::new(3, 4)))
            .collect();
        assert_eq!(pawn_moves.len(), 2);
        assert!(pawn_moves[0].is_promote());
        assert!(!pawn_moves[1].is_promote());
    }

    #[test]
    fn test_can_promote_boundary() {
        let black_silver = Piece::new(PieceType::Silver, Color::Black);
        assert!(Position::can_promote(black_silver, 3, 2));
        assert!(Position::can_promote(black_silver, 2, 3));
        assert!(!Position::can_promote(black_silver, 4, 3));

        let white_silver = Piece::new(PieceType::Silver, Color::White);
        assert!(Position::can_promote(white_silver, 5, 6));
        assert!(!Position::can_promote(white_silver, 4, 5));

        let gold = Piece::new(PieceType::Gold, Color::Black);
        assert!(!Position::can_promote(gold, 3, 2));
        let tokin = Piece::promoted(PieceType::Pawn, Color::Black);
        assert!(!Position::can_promote(tokin, 3, 2));
    }

    #[test]
    fn test_drop_restrictions() {
        let p = pos("4k4/9/9/9/9/9/9/9/4K4 b PLN 1");
        assert!(!p.can_drop_piece(PieceType::Pawn, Color::Black, Square::new(0, 0)));
        assert!(p.can_drop_piece(PieceType::Pawn, Color::Black, Square::new(1, 0)));
        assert!(!p.can_drop_piece(PieceType::Lance, Color::Black, Square::new(0, 0)));
        assert!(p.can_drop_piece(PieceType::Lance, Color::Black, Square::new(1, 0)));
        assert!(!p.can_drop_piece(PieceType::Knight, Color::Black, Square::new(1, 0)));
        assert!(p.can_drop_piece(PieceType::Knight, Color::Black, Square::new(2, 0)));
        // 占有マスには打てない
        assert!(!p.can_drop_piece(PieceType::Gold, Color::Black, Square::new(8, 4)));
    }

    #[test]
    fn test_two_pawns_rule() {
        let p = pos("4k4/9/9/9/9/9/2P6/9/4K4 b P 1");
        assert!(p.droppable_squares(PieceType::Pawn, Color::Black).iter().all(|sq| sq.col() != 2));
        // と金は二歩にならない
        let p = pos("4k4/9/9/9/9/9/2+P6/9/4K4 b P 1");
        assert!(p.can_drop_piece(PieceType::Pawn, Color::Black, Square::new(4, 2)));
    }

    #[test]
    fn test_drops_follow_hand_order() {
        let p = pos("4k4/9/9/9/9/9/9/9/4K4 b RP 1");
        let moves = p.legal_moves();
        let drops: Vec<PieceType> = moves.iter().filter(|m| m.is_drop()).map(|m| m.piece_type()).collect();
        let first_pawn = drops.iter().position(|&pt| pt == PieceType::Pawn).unwrap();
        assert!(drops[..first_pawn].iter().all(|&pt| pt == PieceType::Rook));
        // 盤上の手が打ち駒より先
        let first_drop = moves.iter().position(|m| m.is_drop()).unwrap();
        assert!(moves[..first_drop].iter().all(|m| !m.is_drop()));
    }

    #[test]
    fn test_is_capture() {
        let p = pos("4k4/9/4p4/4R4/9/9/9/9/4K4 b - 1");
        let rook = Piece::new(PieceType::Rook, Color::Black);
        assert!(p.is_capture(Move::normal(Square::new(3, 4), Square::new(2, 4), rook, true)));
        assert!(!p.is_capture(Move::normal(Square::new(3, 4), Square::new(4, 4), rook, false)));
    }
}
