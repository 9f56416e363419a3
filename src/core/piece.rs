use super::types::Side;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 駒の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    General,  // 帥/将
    Advisor,  // 仕/士
    Elephant, // 相/象
    Horse,    // 馬
    Chariot,  // 車
    Cannon,   // 炮
    Soldier,  // 兵/卒
}

impl PieceKind {
    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceKind::General),
            'A' => Some(PieceKind::Advisor),
            'B' => Some(PieceKind::Elephant),
            'N' => Some(PieceKind::Horse),
            'R' => Some(PieceKind::Chariot),
            'C' => Some(PieceKind::Cannon),
            'P' => Some(PieceKind::Soldier),
            _ => None,
        }
    }

    pub fn letter(&self) -> char {
        match self {
            PieceKind::General => 'K',
            PieceKind::Advisor => 'A',
            PieceKind::Elephant => 'B',
            PieceKind::Horse => 'N',
            PieceKind::Chariot => 'R',
            PieceKind::Cannon => 'C',
            PieceKind::Soldier => 'P',
        }
    }
}

/// 駒の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Piece { kind, side }
    }

    /// Parses a two-character piece code such as `RK` or `Bc`.
    ///
    /// Padding whitespace is ignored; blank codes and unknown letters yield `None`.
    pub fn from_code(code: &str) -> Option<Piece> {
        let mut chars = code.trim().chars();
        let side = Side::from_letter(chars.next()?)?;
        let kind = PieceKind::from_letter(chars.next()?)?;
        if chars.next().is_some() {
            return None;
        }
        Some(Piece { kind, side })
    }

    /// 正規化した駒コード (kind letter is upper case for red, lower case for black)
    pub fn code(&self) -> String {
        let kind = match self.side {
            Side::Red => self.kind.letter(),
            Side::Black => self.kind.letter().to_ascii_lowercase(),
        };
        format!("{}{}", self.side.letter(), kind)
    }

    pub fn glyph(&self) -> char {
        match (self.side, self.kind) {
            (_, PieceKind::Chariot) => '车',
            (_, PieceKind::Horse) => '马',
            (_, PieceKind::Cannon) => '炮',
            (Side::Red, PieceKind::General) => '帅',
            (Side::Red, PieceKind::Advisor) => '仕',
            (Side::Red, PieceKind::Elephant) => '相',
            (Side::Red, PieceKind::Soldier) => '兵',
            (Side::Black, PieceKind::General) => '将',
            (Side::Black, PieceKind::Advisor) => '士',
            (Side::Black, PieceKind::Elephant) => '象',
            (Side::Black, PieceKind::Soldier) => '卒',
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}
