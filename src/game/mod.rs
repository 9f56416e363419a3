//! Session controller.
//!
//! A single-threaded state machine. Inputs arrive as [`Event`]s stamped with
//! the time elapsed since the runtime started; outputs are backend
//! [`Command`]s (drained by the runtime) and mutations of the [`Scene`].
//! Delays never block: they are entries in the controller's own timer queue,
//! fired by [`Controller::advance`].

pub mod ai_loop;
pub mod animator;
pub mod arbiter;
pub mod log;
pub mod pipeline;
pub mod selection;
pub mod timers;


use crate::core::{BoardModel, BoardSnapshot, Move, Side, Square};
use crate::display::scene::Scene;
use crate::network::error::ClientResult;
use crate::network::protocol::{AiMoveResponse, MoveResponse};
use std::time::Duration;
use tracing::{debug, warn};

pub use arbiter::{GameConfig, TurnArbiter};
pub use log::LogSink;
pub use selection::{ClickAction, SelectionTracker};
pub use timers::{Timer, TimerQueue, Timing};

/// Tags every outgoing request. `session` changes on each new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket {
    pub session: u64,
    pub seq: u64,
}

#[derive(Debug)]
pub enum Event {
    Click(Square),
    NewGame(GameConfig),
    ResetReply {
        ticket: Ticket,
        result: ClientResult<BoardSnapshot>,
    },
    MoveReply {
        ticket: Ticket,
        result: ClientResult<MoveResponse>,
    },
    AiReply {
        ticket: Ticket,
        result: ClientResult<AiMoveResponse>,
    },
}

/// Backend work requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reset { ticket: Ticket },
    SubmitMove { ticket: Ticket, mv: Move },
    RequestAiMove { ticket: Ticket, model: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Pending {
    Reset,
    Move(Move),
    Ai { side: Side, model: String },
}

#[derive(Debug, Clone)]
struct InFlight {
    ticket: Ticket,
    pending: Pending,
}

pub struct Controller {
    timing: Timing,
    session: u64,
    seq: u64,
    arbiter: TurnArbiter,
    selection: SelectionTracker,
    board: BoardModel,
    scene: Scene,
    timers: TimerQueue,
    log: LogSink,
    in_flight: Option<InFlight>,
    ai_halted: bool,
    commands: Vec<Command>,
    now: Duration,
}

impl Controller {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            session: 0,
            seq: 0,
            arbiter: TurnArbiter::new(GameConfig::default()),
            selection: SelectionTracker::new(),
            board: BoardModel::new(),
            scene: Scene::new(),
            timers: TimerQueue::new(),
            log: LogSink::new(),
            in_flight: None,
            ai_halted: false,
            commands: Vec::new(),
            now: Duration::ZERO,
        }
    }

    pub fn arbiter(&self) -> &TurnArbiter {
        &self.arbiter
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    pub fn selection(&self) -> &SelectionTracker {
        &self.selection
    }

    pub fn log(&self) -> &LogSink {
        &self.log
    }

    /// True while a reset, move or AI request awaits its reply.
    pub fn is_waiting(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn ai_halted(&self) -> bool {
        self.ai_halted
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Fires every timer due at or before `now`, in deadline order.
    pub fn advance(&mut self, now: Duration) {
        while let Some((due, timer)) = self.timers.pop_due(now) {
            self.now = self.now.max(due);
            self.fire(timer);
        }
        self.now = self.now.max(now);
    }

    pub fn handle(&mut self, event: Event, now: Duration) {
        self.advance(now);
        match event {
            Event::Click(sq) => self.on_click(sq),
            Event::NewGame(config) => self.start_game(config),
            Event::ResetReply { ticket, result } => self.on_reset_reply(ticket, result),
            Event::MoveReply { ticket, result } => self.on_move_reply(ticket, result),
            Event::AiReply { ticket, result } => self.on_ai_reply(ticket, result),
        }
    }

    /// Discards all session state and asks the backend for a fresh board.
    pub fn start_game(&mut self, config: GameConfig) {
        self.session += 1;
        debug!(session = self.session, ?config, "new game");

        self.arbiter = TurnArbiter::new(config);
        self.selection = SelectionTracker::new();
        self.board = BoardModel::new();
        self.scene = Scene::new();
        self.scene.status = Some("Connecting...".to_string());
        self.timers.clear();
        self.in_flight = None;
        self.ai_halted = false;

        let ticket = self.issue(Pending::Reset);
        self.commands.push(Command::Reset { ticket });
    }

    fn issue(&mut self, pending: Pending) -> Ticket {
        self.seq += 1;
        let ticket = Ticket {
            session: self.session,
            seq: self.seq,
        };
        self.in_flight = Some(InFlight { ticket, pending });
        ticket
    }

    /// Releases the in-flight slot if `ticket` is the one being waited on.
    fn accept(&mut self, ticket: Ticket) -> Option<Pending> {
        let expected = self
            .in_flight
            .as_ref()
            .is_some_and(|flight| flight.ticket == ticket);
        if !expected {
            debug!(?ticket, current = self.session, "discarding stale reply");
            return None;
        }
        self.in_flight.take().map(|flight| flight.pending)
    }

    fn schedule(&mut self, delay_ms: u64, timer: Timer) {
        self.timers.schedule(self.now + Timing::ms(delay_ms), timer);
    }

    fn on_reset_reply(&mut self, ticket: Ticket, result: ClientResult<BoardSnapshot>) {
        if self.accept(ticket).is_none() {
            return;
        }
        match result {
            Ok(snapshot) => {
                let (board, unknown) = BoardModel::from_snapshot(&snapshot);
                for (sq, code) in unknown {
                    warn!(%sq, %code, "unknown piece code in snapshot");
                    self.log
                        .push(format!("unknown piece code {:?} at {}", code, sq));
                }
                self.board = board;
                self.scene.rebuild(&self.board);
                self.scene.status = None;
                self.log.push("Game started");
                self.maybe_act_ai();
            }
            Err(e) => {
                warn!(error = %e, "reset failed");
                self.scene.status = Some("Backend unavailable ([n] to retry)".to_string());
                self.log.push(format!("reset failed: {}", e));
            }
        }
    }

    /// The shared path for any backend-confirmed move, human or AI.
    fn apply_confirmed(
        &mut self,
        mv: Move,
        capture: bool,
        game_over: bool,
        winner: Option<Side>,
    ) -> Side {
        self.animate(mv.from, mv.to, capture, game_over, winner);
        let next = self.arbiter.advance_turn();
        self.selection.clear(&mut self.scene);
        next
    }

    fn fire(&mut self, timer: Timer) {
        match timer {
            Timer::CheckAi => self.maybe_act_ai(),
            Timer::ClearNudge(el) => self.scene.set_nudge(el, 0),
            Timer::RemoveElement(el) => {
                self.scene.remove(el);
            }
            Timer::ExpireEffect(fx) => self.scene.expire_effect(fx),
            Timer::Settle { from, to } => self.settle(from, to),
            Timer::GameOverNotice(winner) => self.show_game_over(winner),
        }
    }
}
