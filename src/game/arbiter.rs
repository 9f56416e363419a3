use crate::core::{Mode, Side};
use serde::{Deserialize, Serialize};

/// Start-of-game choices: mode, per-side AI model and which side the human plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: Mode,
    pub red_model: String,
    pub black_model: String,
    /// Ignored in AI-vs-AI.
    pub human_side: Side,
}

impl GameConfig {
    pub fn model_for(&self, side: Side) -> &str {
        match side {
            Side::Red => &self.red_model,
            Side::Black => &self.black_model,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            mode: Mode::HumanVsAi,
            red_model: "Deepseek".to_string(),
            black_model: "Qwen".to_string(),
            human_side: Side::Red,
        }
    }
}

/// 手番管理 (owner of the session state)
///
/// All turn and terminal mutations go through here; everything else only reads.
#[derive(Debug, Clone)]
pub struct TurnArbiter {
    config: GameConfig,
    side_to_move: Side,
    terminal: bool,
    winner: Option<Side>,
}

impl TurnArbiter {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            side_to_move: Side::Red,
            terminal: false,
            winner: None,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Whether a human click may do anything right now.
    pub fn can_act(&self) -> bool {
        if self.terminal {
            return false;
        }
        match self.config.mode {
            Mode::AiVsAi => false,
            Mode::HumanVsAi => self.side_to_move == self.config.human_side,
        }
    }

    /// Whether a square owned by `owner` belongs to the side to move.
    pub fn owns_turn(&self, owner: Option<Side>) -> bool {
        owner == Some(self.side_to_move)
    }

    pub fn is_ai_side(&self, side: Side) -> bool {
        match self.config.mode {
            Mode::AiVsAi => true,
            Mode::HumanVsAi => side != self.config.human_side,
        }
    }

    pub fn is_ai_turn(&self) -> bool {
        !self.terminal && self.is_ai_side(self.side_to_move)
    }

    pub fn advance_turn(&mut self) -> Side {
        self.side_to_move = self.side_to_move.opponent();
        self.side_to_move
    }

    /// Latches the game as over. Only a new arbiter clears it.
    pub fn mark_terminal(&mut self, winner: Option<Side>) {
        if self.terminal {
            return;
        }
        self.terminal = true;
        self.winner = winner;
    }

    pub fn turn_indicator(&self) -> String {
        match self.side_to_move {
            Side::Red => "Red to move".to_string(),
            Side::Black => "Black to move".to_string(),
        }
    }
}
