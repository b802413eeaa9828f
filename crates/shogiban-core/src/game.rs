//! 対局の進行管理
//!
//! Validates submitted moves against the side to move, applies them and ends
//! the game when a king is captured or a side resigns.

use crate::position::{BoardState, Position, PositionError};
use crate::types::{Color, Decision, Move, Piece, PieceType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("the game is over")]
    GameOver,

    #[error("it is {expected}'s turn, not {got}'s")]
    WrongSide { expected: Color, got: Color },

    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error(transparent)]
    Position(#[from] PositionError),
}

/// 終局理由
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinReason {
    KingCaptured,
    Resignation,
}

/// 対局状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Finished { winner: Color, reason: WinReason },
}

/// A move as it was played, with what it took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub mv: Move,
    pub captured: Option<Piece>,
}

/// 対局
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    history: Vec<PlayedMove>,
    status: GameStatus,
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

impl Game {
    /// 平手で開始
    pub fn new() -> Self {
        Game::from_position(Position::startpos())
    }

    pub fn from_position(position: Position) -> Self {
        Game {
            position,
            history: Vec::new(),
            status: GameStatus::InProgress,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Finished { .. })
    }

    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Finished { winner, .. } => Some(winner),
            GameStatus::InProgress => None,
        }
    }

    pub fn history(&self) -> &[PlayedMove] {
        &self.history
    }

    /// 手数（次に指す手が何手目か）
    pub fn ply(&self) -> u32 {
        self.history.len() as u32 + 1
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|p| p.mv)
    }

    /// 指し手を適用する
    ///
    /// The move must be in the legal move list of the side to move. Capturing
    /// the king ends the game; otherwise the turn passes.
    pub fn play(&mut self, mv: Move) -> Result<Option<Piece>, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        let side = self.position.side_to_move();
        if mv.color() != side {
            return Err(GameError::WrongSide {
                expected: side,
                got: mv.color(),
            });
        }
        if !self.position.legal_moves().contains(&mv) {
            return Err(GameError::IllegalMove(mv));
        }

        let captured = self.position.do_move(mv)?;
        self.history.push(PlayedMove { mv, captured });

        if captured.is_some_and(|p| p.piece_type == PieceType::King) {
            self.status = GameStatus::Finished {
                winner: side,
                reason: WinReason::KingCaptured,
            };
            log::info!("{side} captured the king with {mv}");
        } else {
            self.position.switch_turn();
        }
        Ok(captured)
    }

    /// 投了
    pub fn resign(&mut self, color: Color) -> Result<(), GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        self.status = GameStatus::Finished {
            winner: color.opponent(),
            reason: WinReason::Resignation,
        };
        log::info!("{color} resigned");
        Ok(())
    }

    /// AI の決定をそのまま適用する（投了は手番側の投了）
    pub fn apply(&mut self, decision: Decision) -> Result<(), GameError> {
        match decision {
            Decision::Move(mv) => self.play(mv).map(|_| ()),
            Decision::Resign => self.resign(self.position.side_to_move()),
        }
    }

    /// 平手初期局面に戻す
    pub fn reset(&mut self) {
        *self = Game::new();
    }

    pub fn to_sfen(&self) -> String {
        self.position.to_sfen_with_ply(self.ply())
    }

    pub fn board_state(&self) -> BoardState {
        self.position.to_board_state(self.last_move())
    }
}
