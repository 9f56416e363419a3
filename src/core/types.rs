use serde::{Deserialize, Serialize};
use std::fmt;

/// 盤面の行数 (10 ranks)
pub const ROWS: u8 = 10;
/// 盤面の列数 (9 files)
pub const COLS: u8 = 9;

/// 手番側。先手が紅、後手が黒
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "R")]
    Red,
    #[serde(rename = "B")]
    Black,
}

impl Default for Side {
    fn default() -> Self {
        Side::Red
    }
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Black,
            Side::Black => Side::Red,
        }
    }

    /// 駒コード先頭の文字
    pub fn letter(self) -> char {
        match self {
            Side::Red => 'R',
            Side::Black => 'B',
        }
    }

    pub fn from_letter(c: char) -> Option<Side> {
        match c {
            'R' => Some(Side::Red),
            'B' => Some(Side::Black),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Red => "Red",
            Side::Black => "Black",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 対局モード。人間同士は扱わない
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    HumanVsAi,
    AiVsAi,
}

/// 盤面座標 (row 0-9, col 0-8, 左上原点)
///
/// Serialized as `[row, col]`, which is what the backend expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[u8; 2]", into = "[u8; 2]")]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }

    /// Checked constructor for coordinates coming off the wire.
    pub fn try_new(row: u8, col: u8) -> Option<Self> {
        (row < ROWS && col < COLS).then_some(Square { row, col })
    }

    /// Every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..ROWS).flat_map(|row| (0..COLS).map(move |col| Square { row, col }))
    }
}

impl From<[u8; 2]> for Square {
    fn from([row, col]: [u8; 2]) -> Self {
        Square { row, col }
    }
}

impl From<Square> for [u8; 2] {
    fn from(sq: Square) -> Self {
        [sq.row, sq.col]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}
