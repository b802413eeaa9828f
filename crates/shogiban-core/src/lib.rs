//! Shogi rules engine with a fixed-depth alpha-beta AI
//!
//! - [`position`]: board, hands, move generation (drops and promotion), make/unmake
//! - [`search`]: minimax with alpha-beta pruning over a [`eval::Evaluator`]
//! - [`ai`]: async orchestrator with timeout, fallback and minimum thinking time
//! - [`game`]: referee that applies moves and detects the end of the game

pub mod ai;
pub mod catalog;
pub mod eval;
pub mod game;
pub mod position;
pub mod search;
pub mod types;

pub use ai::{AiPlayer, AiSettings, Difficulty};
pub use game::{Game, GameError, GameStatus, WinReason};
pub use position::{Position, PositionError, SFEN_HIRATE, SfenError};
pub use search::{SearchError, SearchResult, Searcher};
pub use types::{Color, Decision, Move, Piece, PieceType, Square};
