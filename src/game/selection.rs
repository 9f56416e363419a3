use crate::core::{Side, Square};
use crate::display::scene::{ElementId, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub square: Square,
    pub element: ElementId,
}

/// What a click on a square should do, given the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    Ignore,
    Select(Square),
    Deselect,
    /// Another own piece was clicked while one is selected.
    Switch(Square),
    Attempt { from: Square, to: Square },
}

/// Resolves a click. Same-square and same-side checks come before the move
/// fallback, so clicking another own piece never turns into a move.
pub fn resolve_click(
    selected: Option<Square>,
    clicked: Square,
    owner: Option<Side>,
    side_to_move: Side,
) -> ClickAction {
    let own_piece = owner == Some(side_to_move);
    match selected {
        None if own_piece => ClickAction::Select(clicked),
        None => ClickAction::Ignore,
        Some(from) if from == clicked => ClickAction::Deselect,
        Some(_) if own_piece => ClickAction::Switch(clicked),
        Some(from) => ClickAction::Attempt { from, to: clicked },
    }
}

#[derive(Debug, Default)]
pub struct SelectionTracker {
    current: Option<Selection>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Selection> {
        self.current
    }

    pub fn select(&mut self, square: Square, element: ElementId, scene: &mut Scene) {
        self.clear(scene);
        scene.set_selected(element, true);
        scene.selecting = true;
        self.current = Some(Selection { square, element });
    }

    pub fn clear(&mut self, scene: &mut Scene) {
        scene.clear_selected();
        scene.selecting = false;
        self.current = None;
    }
}
