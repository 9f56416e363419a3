pub mod board;
pub mod r#move;
pub mod piece;
pub mod types;

pub use board::{BoardModel, BoardSnapshot, PieceId};
pub use piece::{Piece, PieceKind};
pub use r#move::Move;
pub use types::{Mode, Side, Square, COLS, ROWS};
