//! Basic types: colors, squares, pieces and moves

mod color;
mod moves;
mod piece;
mod square;

pub use color::Color;
pub use moves::{Decision, Move};
pub use piece::{Piece, PieceType};
pub use square::Square;
