use super::{Controller, Timer};
use crate::core::{Side, Square};
use tracing::warn;

impl Controller {
    /// Plays a confirmed move onto the board model and the scene.
    ///
    /// The moving piece's square is updated immediately so that any click
    /// after this call resolves against the new position. Removal of the
    /// captured element and placeholder restoration happen on the settle
    /// timer; the capture effect expires on its own.
    pub(crate) fn animate(
        &mut self,
        from: Square,
        to: Square,
        capture: bool,
        terminal: bool,
        winner: Option<Side>,
    ) {
        match self.board.occupant(from) {
            None => {
                warn!(%from, %to, "animate: no piece on source square");
                self.log
                    .push(format!("invariant violation: no piece at {} to move", from));
            }
            Some((piece, _)) => match self.scene.piece_element(piece) {
                Some(mover) => {
                    let occupant = self.scene.piece_element_at(to);

                    if capture {
                        let fx = self.scene.spawn_effect(to);
                        self.schedule(self.timing.capture_effect, Timer::ExpireEffect(fx));
                    }
                    if let Some(victim) = occupant {
                        self.scene.sink(victim);
                        self.schedule(self.timing.settle, Timer::RemoveElement(victim));
                    }

                    self.board.relocate(from, to);
                    self.scene.move_element(mover, to);
                    self.schedule(self.timing.settle, Timer::Settle { from, to });
                }
                None => {
                    // Model and scene disagree; re-project rather than guess.
                    warn!(%from, %to, ?piece, "animate: piece has no element, rebuilding scene");
                    self.log
                        .push(format!("invariant violation: piece at {} not drawn", from));
                    self.board.relocate(from, to);
                    self.scene.rebuild(&self.board);
                    if capture {
                        let fx = self.scene.spawn_effect(to);
                        self.schedule(self.timing.capture_effect, Timer::ExpireEffect(fx));
                    }
                    self.log.push(format!("{} -> {}", from, to));
                }
            },
        }

        if terminal {
            self.arbiter.mark_terminal(winner);
            // 着手の settle が済んでから
            self.schedule(
                self.timing.settle + self.timing.game_over_notice,
                Timer::GameOverNotice(winner),
            );
        }
    }

    /// Restores the one-element-per-square rule on both squares of a move.
    pub(crate) fn settle(&mut self, from: Square, to: Square) {
        self.reconcile(from);
        self.reconcile(to);
        self.log.push(format!("{} -> {}", from, to));
    }

    fn reconcile(&mut self, sq: Square) {
        let placeholders: Vec<_> = self
            .scene
            .elements_at(sq)
            .filter(|e| e.is_placeholder())
            .map(|e| e.id)
            .collect();

        if self.board.occupant(sq).is_some() {
            for id in placeholders {
                self.scene.remove(id);
            }
        } else if placeholders.is_empty() {
            if self.scene.piece_element_at(sq).is_none() {
                self.scene.insert_placeholder(sq);
            }
        } else {
            for id in placeholders.into_iter().skip(1) {
                self.scene.remove(id);
            }
        }
    }

    pub(crate) fn show_game_over(&mut self, winner: Option<Side>) {
        let notice = match winner {
            Some(side) => format!("Game over! {} wins!", side),
            None => "Game over!".to_string(),
        };
        self.log.push(notice.clone());
        self.scene.notice = Some(notice);
    }
}
