use crate::core::{BoardSnapshot, Move, Side};
use crate::network::error::{ClientError, ClientResult};
use serde::{Deserialize, Serialize};

/// Sentinel telling the backend to use its own tracked position.
pub const SERVER_TRACKED_BOARD: &str = "backend_gen";

// Client -> Server

#[derive(Debug, Clone, Serialize)]
pub struct AiMoveRequest {
    pub model: String,
    pub board_str: String,
}

impl AiMoveRequest {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            board_str: SERVER_TRACKED_BOARD.to_string(),
        }
    }
}

// Server -> Client

#[derive(Debug, Clone, Deserialize)]
pub struct ResetResponse {
    #[serde(default)]
    pub status: Option<String>,
    pub board: Vec<Vec<String>>,
}

impl ResetResponse {
    pub fn into_snapshot(self) -> ClientResult<BoardSnapshot> {
        BoardSnapshot::from_rows(self.board).map_err(ClientError::protocol)
    }
}

/// Verdict on a submitted move
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MoveResponse {
    pub success: bool,
    #[serde(default)]
    pub current_turn: Option<Side>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<Side>,
    #[serde(default)]
    pub capture: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AiMoveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, rename = "move")]
    pub mv: Option<[u8; 4]>,
    #[serde(default)]
    pub capture: bool,
    #[serde(default)]
    pub message: String,
    /// Only present when the backend reports the end of the game itself.
    #[serde(default)]
    pub game_over: bool,
    #[serde(default)]
    pub winner: Option<Side>,
    /// Some failures (unknown model) come back as a bare `{"error": ...}`.
    #[serde(default)]
    pub error: Option<String>,
}

impl AiMoveResponse {
    /// The confirmed move, or the reason there is none.
    pub fn confirmed_move(&self) -> Result<Move, String> {
        if !self.success {
            return Err(self.reason());
        }
        match self.mv {
            Some(quad) => Move::from_quad(quad)
                .ok_or_else(|| format!("move out of bounds: {:?}", quad)),
            None => Err("success without a move".to_string()),
        }
    }

    pub fn reason(&self) -> String {
        match (&self.error, self.message.is_empty()) {
            (Some(err), _) => err.clone(),
            (None, false) => self.message.clone(),
            (None, true) => "no reason given".to_string(),
        }
    }
}
