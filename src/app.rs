//! Runtime around the controller.
//!
//! One task owns the [`Controller`]. Backend calls run as spawned tasks and
//! report back through the same channel keyboard input arrives on, so the
//! controller itself never awaits anything.

use crate::display::{self, DisplayState};
use crate::game::{Command, Controller, Event, GameConfig, Timing};
use crate::network::Backend;
use crate::ui::Input;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, info};

#[derive(Debug)]
pub enum AppEvent {
    Input(Input),
    Game(Event),
}

pub struct Runtime<B: Backend + 'static> {
    backend: Arc<B>,
    controller: Controller,
    display: DisplayState,
    game: GameConfig,
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    started: Instant,
}

impl<B: Backend + 'static> Runtime<B> {
    pub fn new(backend: B, timing: Timing, game: GameConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            backend: Arc::new(backend),
            controller: Controller::new(timing),
            display: DisplayState::new(),
            game,
            tx,
            rx,
            started: Instant::now(),
        }
    }

    /// For the input thread.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn new_game(&mut self) {
        let now = self.elapsed();
        self.controller
            .handle(Event::NewGame(self.game.clone()), now);
        self.dispatch();
    }

    /// Renders after every step until the user quits.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        self.new_game();
        loop {
            display::render(&self.controller, &self.display)?;
            if !self.step().await {
                break;
            }
        }
        info!("quit");
        Ok(())
    }

    /// Waits for one event or the next timer. Returns false on quit.
    pub async fn step(&mut self) -> bool {
        let deadline = self
            .controller
            .next_deadline()
            .map(|due| self.started + due);

        tokio::select! {
            event = self.rx.recv() => match event {
                Some(event) => {
                    if !self.on_event(event) {
                        return false;
                    }
                }
                None => return false,
            },
            _ = async {
                match deadline {
                    Some(at) => sleep_until(at).await,
                    None => std::future::pending::<()>().await,
                }
            } => {
                let now = self.elapsed();
                self.controller.advance(now);
            }
        }

        self.dispatch();
        true
    }

    fn on_event(&mut self, event: AppEvent) -> bool {
        let now = self.elapsed();
        match event {
            AppEvent::Input(Input::Quit) => return false,
            AppEvent::Input(Input::Cursor { d_row, d_col }) => {
                self.display.move_cursor(d_row, d_col);
                self.controller.advance(now);
            }
            AppEvent::Input(Input::Click) => {
                let sq = self.display.cursor;
                self.controller.handle(Event::Click(sq), now);
            }
            AppEvent::Input(Input::NewGame) => {
                self.controller
                    .handle(Event::NewGame(self.game.clone()), now);
            }
            AppEvent::Game(event) => self.controller.handle(event, now),
        }
        true
    }

    fn dispatch(&mut self) {
        for command in self.controller.take_commands() {
            debug!(?command, "dispatch");
            let backend = Arc::clone(&self.backend);
            let tx = self.tx.clone();

            tokio::spawn(async move {
                let event = match command {
                    Command::Reset { ticket } => Event::ResetReply {
                        ticket,
                        result: backend.reset().await,
                    },
                    Command::SubmitMove { ticket, mv } => Event::MoveReply {
                        ticket,
                        result: backend.submit_move(mv).await,
                    },
                    Command::RequestAiMove { ticket, model } => Event::AiReply {
                        ticket,
                        result: backend.request_ai_move(&model).await,
                    },
                };
                // 受信側が閉じていれば終了済み
                let _ = tx.send(AppEvent::Game(event));
            });
        }
    }
}
