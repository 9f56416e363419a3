use super::{Command, Controller, Pending, Ticket, Timer};
use crate::network::error::ClientResult;
use crate::network::protocol::AiMoveResponse;
use tracing::{debug, info, warn};

impl Controller {
    /// Requests a move if it is an AI side's turn and nothing else is pending.
    pub(crate) fn maybe_act_ai(&mut self) {
        if self.arbiter.is_terminal() || self.ai_halted {
            return;
        }
        if !self.arbiter.is_ai_turn() {
            return;
        }
        if self.in_flight.is_some() {
            debug!("AI check skipped: request already in flight");
            return;
        }

        let side = self.arbiter.side_to_move();
        let model = self.arbiter.config().model_for(side).to_string();
        self.scene.status = Some(format!("{} thinking...", model));

        let ticket = self.issue(Pending::Ai {
            side,
            model: model.clone(),
        });
        info!(%side, %model, ?ticket, "requesting AI move");
        self.commands.push(Command::RequestAiMove { ticket, model });
    }

    pub(crate) fn on_ai_reply(&mut self, ticket: Ticket, result: ClientResult<AiMoveResponse>) {
        let (side, model) = match self.accept(ticket) {
            Some(Pending::Ai { side, model }) => (side, model),
            _ => return,
        };
        self.scene.status = Some("Waiting...".to_string());

        let resp = match result {
            Ok(resp) => resp,
            Err(e) => {
                warn!(error = %e, %model, "AI request failed");
                self.halt_ai(format!("{} request failed: {}", model, e));
                return;
            }
        };

        let mv = match resp.confirmed_move() {
            Ok(mv) => mv,
            Err(reason) => {
                self.halt_ai(format!("{} ({}) resigned or failed: {}", model, side, reason));
                return;
            }
        };

        if !resp.message.is_empty() && resp.message != "ok" {
            self.log.push(format!("{}: {}", model, resp.message));
        }
        self.apply_confirmed(mv, resp.capture, resp.game_over, resp.winner);

        if self.arbiter.is_ai_turn() {
            self.schedule(self.timing.ai_chain, Timer::CheckAi);
        }
    }

    fn halt_ai(&mut self, reason: String) {
        self.ai_halted = true;
        self.scene.status = Some("AI stopped ([n] for a new game)".to_string());
        self.log.push(reason);
    }
}
