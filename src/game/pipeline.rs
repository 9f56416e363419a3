use super::selection::{resolve_click, ClickAction};
use super::{Command, Controller, Pending, Ticket, Timer};
use crate::core::{Move, Square};
use crate::network::error::ClientResult;
use crate::network::protocol::MoveResponse;
use tracing::{debug, warn};

/// Pixel offset of the "illegal move" shake.
const NUDGE_OFFSET: i32 = 5;

impl Controller {
    pub(crate) fn on_click(&mut self, sq: Square) {
        if !self.arbiter.can_act() {
            debug!(%sq, "click ignored: not a human turn");
            return;
        }

        let owner = self.board.occupant(sq).map(|(_, piece)| piece.side);
        let selected = self.selection.current().map(|s| s.square);
        match resolve_click(selected, sq, owner, self.arbiter.side_to_move()) {
            ClickAction::Ignore => {}
            ClickAction::Select(target) | ClickAction::Switch(target) => {
                match self.scene.piece_element_at(target) {
                    Some(el) => self.selection.select(target, el, &mut self.scene),
                    None => warn!(%target, "selectable piece has no element"),
                }
            }
            ClickAction::Deselect => self.selection.clear(&mut self.scene),
            ClickAction::Attempt { from, to } => self.submit_move(Move::new(from, to)),
        }
    }

    /// Sends a move to the backend unless another request is still pending.
    ///
    /// Only a human turn may submit, and only with a piece of the side to move.
    pub(crate) fn submit_move(&mut self, mv: Move) {
        if !self.arbiter.can_act() {
            debug!(%mv, "move not sent: not a human turn");
            return;
        }
        let owner = self.board.occupant(mv.from).map(|(_, piece)| piece.side);
        if !self.arbiter.owns_turn(owner) {
            debug!(%mv, ?owner, "move not sent: piece does not belong to the side to move");
            return;
        }
        if self.in_flight.is_some() {
            self.log
                .push(format!("waiting for the backend, {} not sent", mv));
            return;
        }
        let ticket = self.issue(Pending::Move(mv));
        debug!(%mv, ?ticket, "submitting move");
        self.commands.push(Command::SubmitMove { ticket, mv });
    }

    pub(crate) fn on_move_reply(&mut self, ticket: Ticket, result: ClientResult<MoveResponse>) {
        let mv = match self.accept(ticket) {
            Some(Pending::Move(mv)) => mv,
            _ => return,
        };

        match result {
            Ok(resp) if resp.success => {
                let next = self.apply_confirmed(mv, resp.capture, resp.game_over, resp.winner);
                if let Some(reported) = resp.current_turn {
                    if reported != next && !resp.game_over {
                        warn!(%reported, local = %next, "backend turn disagrees with local turn");
                    }
                }
                if !self.arbiter.is_terminal() {
                    self.schedule(self.timing.human_to_ai, Timer::CheckAi);
                }
            }
            Ok(resp) => self.reject(mv, &resp.message),
            Err(e) => {
                warn!(error = %e, %mv, "move submission failed");
                self.log.push(format!("move {} failed: {}", mv, e));
            }
        }
    }

    fn reject(&mut self, mv: Move, message: &str) {
        if let Some(el) = self.scene.piece_element_at(mv.from) {
            self.scene.set_nudge(el, NUDGE_OFFSET);
            self.schedule(self.timing.nudge, Timer::ClearNudge(el));
        }
        let reason = if message.is_empty() {
            "illegal move"
        } else {
            message
        };
        self.log.push(format!("rejected {}: {}", mv, reason));
    }
}
