//! Render model of the board.
//!
//! The scene is what the terminal view draws: one element per square (a piece
//! or an empty placeholder so the square stays clickable), plus transient
//! capture effects and the board-level status flags. Piece elements only
//! reference a [`PieceId`]; which square a piece is on is owned by
//! [`BoardModel`], and [`Scene::rebuild`] projects it wholesale.

use crate::core::{BoardModel, Piece, PieceId, Square};
use std::collections::BTreeMap;

/// Width and height of one square in layout units.
pub const CELL_SIZE: u32 = 50;
/// Offset of an element inside its square.
pub const CELL_INSET: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EffectId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Piece { id: PieceId, piece: Piece },
    Placeholder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub id: ElementId,
    pub kind: ElementKind,
    pub square: Square,
    pub left: u32,
    pub top: u32,
    pub z_index: i32,
    pub selected: bool,
    /// Horizontal shake offset used for rejection feedback.
    pub nudge: i32,
}

impl Element {
    pub fn is_piece(&self) -> bool {
        matches!(self.kind, ElementKind::Piece { .. })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.kind, ElementKind::Placeholder)
    }

    /// Sunk elements are captured pieces waiting to be removed.
    pub fn is_sunk(&self) -> bool {
        self.z_index < 0
    }
}

/// Transient "captured" marker. Never blocks input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureEffect {
    pub id: EffectId,
    pub square: Square,
}

pub fn position_of(sq: Square) -> (u32, u32) {
    (
        sq.col as u32 * CELL_SIZE + CELL_INSET,
        sq.row as u32 * CELL_SIZE + CELL_INSET,
    )
}

#[derive(Debug, Default)]
pub struct Scene {
    elements: BTreeMap<ElementId, Element>,
    effects: BTreeMap<EffectId, CaptureEffect>,
    next_id: u64,
    /// Board-level flag while a square is selected.
    pub selecting: bool,
    pub status: Option<String>,
    pub notice: Option<String>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Replaces every element with a fresh projection of `board`.
    ///
    /// Capture effects and the notice are not part of the projection and stay.
    pub fn rebuild(&mut self, board: &BoardModel) {
        self.elements.clear();
        self.selecting = false;

        for sq in Square::all() {
            match board.occupant(sq) {
                Some((id, piece)) => {
                    self.insert(sq, ElementKind::Piece { id, piece });
                }
                None => {
                    self.insert_placeholder(sq);
                }
            }
        }
    }

    fn insert(&mut self, square: Square, kind: ElementKind) -> ElementId {
        let id = ElementId(self.alloc());
        let (left, top) = position_of(square);
        self.elements.insert(
            id,
            Element {
                id,
                kind,
                square,
                left,
                top,
                z_index: 0,
                selected: false,
                nudge: 0,
            },
        );
        id
    }

    pub fn insert_placeholder(&mut self, square: Square) -> ElementId {
        self.insert(square, ElementKind::Placeholder)
    }

    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        self.elements.remove(&id)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    pub fn elements_at(&self, sq: Square) -> impl Iterator<Item = &Element> {
        self.elements.values().filter(move |e| e.square == sq)
    }

    pub fn piece_element(&self, piece: PieceId) -> Option<ElementId> {
        self.elements
            .values()
            .find(|e| matches!(e.kind, ElementKind::Piece { id, .. } if id == piece))
            .map(|e| e.id)
    }

    /// The visible (not sunk) piece element on `sq`.
    pub fn piece_element_at(&self, sq: Square) -> Option<ElementId> {
        self.elements_at(sq)
            .find(|e| e.is_piece() && !e.is_sunk())
            .map(|e| e.id)
    }

    pub fn placeholder_at(&self, sq: Square) -> Option<ElementId> {
        self.elements_at(sq)
            .find(|e| e.is_placeholder())
            .map(|e| e.id)
    }

    /// Moves an element, keeping its recorded square and layout position in step.
    pub fn move_element(&mut self, id: ElementId, to: Square) {
        if let Some(el) = self.elements.get_mut(&id) {
            let (left, top) = position_of(to);
            el.square = to;
            el.left = left;
            el.top = top;
        }
    }

    pub fn sink(&mut self, id: ElementId) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.z_index = -1;
        }
    }

    pub fn set_selected(&mut self, id: ElementId, selected: bool) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.selected = selected;
        }
    }

    pub fn clear_selected(&mut self) {
        for el in self.elements.values_mut() {
            el.selected = false;
        }
    }

    pub fn selected_elements(&self) -> Vec<ElementId> {
        self.elements
            .values()
            .filter(|e| e.selected)
            .map(|e| e.id)
            .collect()
    }

    pub fn set_nudge(&mut self, id: ElementId, offset: i32) {
        if let Some(el) = self.elements.get_mut(&id) {
            el.nudge = offset;
        }
    }

    pub fn spawn_effect(&mut self, square: Square) -> EffectId {
        let id = EffectId(self.alloc());
        self.effects.insert(id, CaptureEffect { id, square });
        id
    }

    pub fn expire_effect(&mut self, id: EffectId) {
        self.effects.remove(&id);
    }

    pub fn effects(&self) -> impl Iterator<Item = &CaptureEffect> {
        self.effects.values()
    }

    pub fn effect_at(&self, sq: Square) -> bool {
        self.effects.values().any(|e| e.square == sq)
    }

    /// Squares that do not hold exactly one element, with their element count.
    pub fn invariant_violations(&self) -> Vec<(Square, usize)> {
        Square::all()
            .map(|sq| (sq, self.elements_at(sq).count()))
            .filter(|(_, n)| *n != 1)
            .collect()
    }
}
