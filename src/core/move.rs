use super::types::Square;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 指し手 (move intent from one square to another)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Move { from, to }
    }

    /// Decodes the `[r1, c1, r2, c2]` form used by the AI endpoint.
    pub fn from_quad(quad: [u8; 4]) -> Option<Move> {
        let from = Square::try_new(quad[0], quad[1])?;
        let to = Square::try_new(quad[2], quad[3])?;
        Some(Move { from, to })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
