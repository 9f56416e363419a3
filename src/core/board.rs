use super::piece::Piece;
use super::types::{Square, COLS, ROWS};
use std::collections::HashMap;

/// Identity of one physical piece for the lifetime of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceId(pub u32);

/// Validated 10x9 snapshot as delivered by the backend's reset endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    cells: Vec<Vec<String>>,
}

impl BoardSnapshot {
    /// Shape-checks a raw grid. Codes are trimmed; contents are not interpreted here.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, String> {
        if rows.len() != ROWS as usize {
            return Err(format!("expected {} rows, got {}", ROWS, rows.len()));
        }
        let mut cells = Vec::with_capacity(rows.len());
        for (r, row) in rows.into_iter().enumerate() {
            if row.len() != COLS as usize {
                return Err(format!(
                    "row {} has {} columns, expected {}",
                    r,
                    row.len(),
                    COLS
                ));
            }
            cells.push(row.into_iter().map(|c| c.trim().to_string()).collect());
        }
        Ok(BoardSnapshot { cells })
    }

    pub fn empty() -> Self {
        BoardSnapshot {
            cells: vec![vec![String::new(); COLS as usize]; ROWS as usize],
        }
    }

    pub fn set(&mut self, sq: Square, code: &str) {
        self.cells[sq.row as usize][sq.col as usize] = code.trim().to_string();
    }

    pub fn code(&self, sq: Square) -> &str {
        &self.cells[sq.row as usize][sq.col as usize]
    }
}

/// 盤面 (client-side working copy)
///
/// Maps each square to the identity of the piece standing on it. This is the
/// only place clicks are resolved against, so a piece's square can never go
/// stale after it has been animated somewhere else.
#[derive(Debug, Clone, Default)]
pub struct BoardModel {
    squares: HashMap<Square, PieceId>,
    pieces: HashMap<PieceId, Piece>,
}

impl BoardModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the model from a snapshot, returning codes that could not be parsed.
    pub fn from_snapshot(snapshot: &BoardSnapshot) -> (Self, Vec<(Square, String)>) {
        let mut model = BoardModel::new();
        let mut unknown = Vec::new();
        let mut next_id = 0;

        for sq in Square::all() {
            let code = snapshot.code(sq);
            if code.is_empty() {
                continue;
            }
            match Piece::from_code(code) {
                Some(piece) => {
                    let id = PieceId(next_id);
                    next_id += 1;
                    model.squares.insert(sq, id);
                    model.pieces.insert(id, piece);
                }
                None => unknown.push((sq, code.to_string())),
            }
        }
        (model, unknown)
    }

    pub fn occupant(&self, sq: Square) -> Option<(PieceId, Piece)> {
        let id = *self.squares.get(&sq)?;
        self.pieces.get(&id).map(|p| (id, *p))
    }

    pub fn square_of(&self, id: PieceId) -> Option<Square> {
        self.squares
            .iter()
            .find(|(_, pid)| **pid == id)
            .map(|(sq, _)| *sq)
    }

    /// Moves whatever stands on `from` to `to`, returning the id that was displaced.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<PieceId> {
        let mover = self.squares.remove(&from)?;
        let captured = self.squares.insert(to, mover);
        if let Some(id) = captured {
            self.pieces.remove(&id);
        }
        captured
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }
}
