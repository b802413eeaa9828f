//! 盤面状態
//!
//! A 9x9 mailbox board, both hands and the side to move. The search mutates a
//! `Position` in place through [`Position::do_move`] / [`Position::undo_move`].

mod do_move;
mod error;
mod hand;
mod json;
mod movegen;
mod sfen;

pub use error::PositionError;
pub use hand::Hand;
pub use json::{BoardState, CellState, HandsState, LastMove};
pub use movegen::{MoveList, SquareList};
pub use sfen::{SFEN_HIRATE, SfenError};

use crate::types::{Color, Piece, PieceType, Square};
use std::fmt;

/// 盤面・持ち駒・手番
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; Square::NUM],
    hands: [Hand; Color::NUM],
    side_to_move: Color,
}

const BACK_RANK: [PieceType; 9] = [
    PieceType::Lance,
    PieceType::Knight,
    PieceType::Silver,
    PieceType::Gold,
    PieceType::King,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
];

impl Position {
    /// 空の盤面（先手番）
    pub const fn empty() -> Self {
        Position {
            board: [None; Square::NUM],
            hands: [Hand::new(), Hand::new()],
            side_to_move: Color::Black,
        }
    }

    /// 平手初期局面
    pub fn startpos() -> Self {
        let mut pos = Position::empty();
        for col in 0..9 {
            pos.put_piece(Square::new(0, col), Piece::new(BACK_RANK[col as usize], Color::White));
            pos.put_piece(Square::new(2, col), Piece::new(PieceType::Pawn, Color::White));
            pos.put_piece(Square::new(6, col), Piece::new(PieceType::Pawn, Color::Black));
            pos.put_piece(Square::new(8, col), Piece::new(BACK_RANK[col as usize], Color::Black));
        }
        pos.put_piece(Square::new(1, 1), Piece::new(PieceType::Rook, Color::White));
        pos.put_piece(Square::new(1, 7), Piece::new(PieceType::Bishop, Color::White));
        pos.put_piece(Square::new(7, 1), Piece::new(PieceType::Bishop, Color::Black));
        pos.put_piece(Square::new(7, 7), Piece::new(PieceType::Rook, Color::Black));
        pos
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// 手番を交代する（確定した指し手の後にのみ呼ぶ）
    pub fn switch_turn(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    #[inline]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Place a piece, returning whatever stood there.
    pub fn put_piece(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.board[sq.index()].replace(piece)
    }

    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.index()].take()
    }

    #[inline]
    pub fn hand(&self, color: Color) -> &Hand {
        &self.hands[color.index()]
    }

    #[inline]
    pub fn hand_mut(&mut self, color: Color) -> &mut Hand {
        &mut self.hands[color.index()]
    }

    /// 玉の位置（盤上にいなければ `None`）
    pub fn king_square(&self, color: Color) -> Option<Square> {
        Square::all().find(|&sq| {
            self.piece_on(sq)
                .is_some_and(|p| p.piece_type == PieceType::King && p.color == color)
        })
    }

    /// 指定した手番の盤上の駒（行優先順）
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color == color)
    }

    /// 駒のあるマス（行優先順）
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.piece_on(sq).map(|p| (sq, p)))
    }

    /// Pieces of `color` that the opponent can currently move onto.
    pub fn threatened_pieces(&self, color: Color) -> Vec<Square> {
        let mut hit = [false; Square::NUM];
        for (from, _) in self.pieces_of(color.opponent()) {
            for to in self.movable_squares(from) {
                hit[to.index()] = true;
            }
        }
        self.pieces_of(color)
            .map(|(sq, _)| sq)
            .filter(|sq| hit[sq.index()])
            .collect()
    }

    /// Opponent pieces that `color` can currently capture.
    pub fn capturable_pieces(&self, color: Color) -> Vec<Square> {
        self.threatened_pieces(color.opponent())
    }

    /// 盤上と持ち駒の駒数の合計
    pub fn piece_count(&self) -> u32 {
        let on_board = self.occupied().count() as u32;
        on_board + self.hands.iter().map(Hand::total).sum::<u32>()
    }

    /// Swap colours and rotate the board by 180 degrees.
    ///
    /// The result is the same game seen from the other side of the table.
    pub fn mirrored(&self) -> Self {
        let mut pos = Position::empty();
        for (sq, p) in self.occupied() {
            let piece = Piece {
                color: p.color.opponent(),
                ..p
            };
            pos.put_piece(sq.flip(), piece);
        }
        pos.hands = [self.hands[1], self.hands[0]];
        pos.side_to_move = self.side_to_move.opponent();
        pos
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

/// 盤面を漢字で表示（後手の駒は `v` を前置）
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "後手の持駒: {}", HandDisplay(self.hand(Color::White)))?;
        writeln!(f, "  ９ ８ ７ ６ ５ ４ ３ ２ １")?;
        for row in 0..9u8 {
            f.write_str("|")?;
            for col in 0..9u8 {
                match self.piece_on(Square::new(row, col)) {
                    Some(p) if p.color == Color::White => write!(f, "v{}", p.kanji())?,
                    Some(p) => write!(f, " {}", p.kanji())?,
                    None => f.write_str(" ・")?,
                }
            }
            writeln!(f, "|{}", (b'a' + row) as char)?;
        }
        writeln!(f, "先手の持駒: {}", HandDisplay(self.hand(Color::Black)))?;
        write!(f, "手番: {}", self.side_to_move)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({})", self.to_sfen())
    }
}

struct HandDisplay<'a>(&'a Hand);

impl fmt::Display for HandDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("なし");
        }
        for (pt, n) in self.0.iter() {
            let kanji = Piece::new(pt, Color::Black).kanji();
            if n > 1 {
                write!(f, "{kanji}{n} ")?;
            } else {
                write!(f, "{kanji} ")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_layout() {
        let pos = Position::startpos();
        assert_eq!(pos.side_to_move(), Color::Black);
        assert_eq!(pos.king_square(Color::Black), Some(Square::new(8, 4)));
        assert_eq!(pos.king_square(Color::White), Some(Square::new(0, 4)));
        assert_eq!(
            pos.piece_on(Square::new(7, 7)),
            Some(Piece::new(PieceType::Rook, Color::Black))
        );
        assert_eq!(
            pos.piece_on(Square::new(1, 7)),
            Some(Piece::new(PieceType::Bishop, Color::White))
        );
        assert_eq!(pos.piece_count(), 40);
        assert_eq!(pos.to_sfen(), SFEN_HIRATE);
    }

    #[test]
    fn test_switch_turn() {
        let mut pos = Position::startpos();
        pos.switch_turn();
        assert_eq!(pos.side_to_move(), Color::White);
        pos.switch_turn();
        assert_eq!(pos.side_to_move(), Color::Black);
    }

    #[test]
    fn test_mirrored_startpos() {
        let mut pos = Position::startpos();
        let mirrored = pos.mirrored();
        // 平手は180度回転で先後対称
        pos.switch_turn();
        assert_eq!(mirrored, pos);
    }

    #[test]
    fn test_threatened_pieces() {
        // 先手の飛車が後手の金を狙っている
        let pos = Position::from_sfen("4k4/9/4g4/9/9/9/9/4R4/4K4 b - 1").unwrap();
        assert_eq!(pos.threatened_pieces(Color::White), vec![Square::new(2, 4)]);
        assert_eq!(pos.capturable_pieces(Color::Black), vec![Square::new(2, 4)]);
        assert!(pos.threatened_pieces(Color::Black).is_empty());
    }

    #[test]
    fn test_king_square_missing() {
        let pos = Position::from_sfen("9/9/9/9/9/9/9/9/4K4 b - 1").unwrap();
        assert_eq!(pos.king_square(Color::White), None);
    }
}
