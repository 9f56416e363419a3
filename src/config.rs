use crate::core::{Mode, Side};
use crate::game::{GameConfig, Timing};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::warn;

pub const CONFIG_PATH: &str = "xiangqi_client.json";
pub const BACKEND_URL_ENV: &str = "XIANGQI_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub backend_url: String,
    /// Choices offered by the model pickers.
    pub models: Vec<String>,
    pub red_model: String,
    pub black_model: String,
    pub human_side: Side,
    pub request_timeout_ms: u64,
    pub log_file: String,
    pub timing: Timing,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            backend_url: "http://127.0.0.1:5000".to_string(),
            models: vec![
                "Deepseek".to_string(),
                "Qwen".to_string(),
                "Kimi".to_string(),
            ],
            red_model: "Deepseek".to_string(),
            black_model: "Qwen".to_string(),
            human_side: Side::Red,
            request_timeout_ms: 30_000,
            log_file: "xiangqi_client.log".to_string(),
            timing: Timing::default(),
        }
    }
}

impl ClientConfig {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(path)?;
        let config: ClientConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Falls back to defaults when the file is missing or broken, then applies
    /// the environment override and fixes zero delays.
    pub fn load_or_default() -> Self {
        let mut config = Self::load().unwrap_or_else(|_| Self::default());
        if let Ok(url) = std::env::var(BACKEND_URL_ENV) {
            config.apply_backend_override(&url);
        }
        config.sanitize();
        config
    }

    pub fn apply_backend_override(&mut self, url: &str) {
        let url = url.trim();
        if !url.is_empty() {
            self.backend_url = url.to_string();
        }
    }

    pub fn sanitize(&mut self) {
        for field in self.timing.sanitize() {
            warn!(field, "zero delay raised to 1ms");
        }
        if self.models.is_empty() {
            self.models = Self::default().models;
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn game_config(&self, mode: Mode) -> GameConfig {
        GameConfig {
            mode,
            red_model: self.red_model.clone(),
            black_model: self.black_model.clone(),
            human_side: self.human_side,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ClientConfig = serde_json::from_str(
            r#"{"backend_url": "http://example:8000", "timing": {"settle": 50}}"#,
        )
        .unwrap();
        assert_eq!(config.backend_url, "http://example:8000");
        assert_eq!(config.timing.settle, 50);
        assert_eq!(config.timing.ai_chain, 1000);
        assert_eq!(config.red_model, "Deepseek");
        assert_eq!(config.human_side, Side::Red);
    }

    #[test]
    fn test_human_side_letter() {
        let config: ClientConfig = serde_json::from_str(r#"{"human_side": "B"}"#).unwrap();
        assert_eq!(config.human_side, Side::Black);
        let game = config.game_config(Mode::HumanVsAi);
        assert_eq!(game.human_side, Side::Black);
        assert_eq!(game.model_for(Side::Black), "Qwen");
    }

    #[test]
    fn test_sanitize() {
        let mut config: ClientConfig =
            serde_json::from_str(r#"{"models": [], "timing": {"nudge": 0, "ai_chain": 0}}"#)
                .unwrap();
        config.sanitize();
        assert_eq!(config.timing.nudge, 1);
        assert_eq!(config.timing.ai_chain, 1);
        assert_eq!(config.timing.settle, 300);
        assert_eq!(config.models.len(), 3);
    }

    #[test]
    fn test_backend_override() {
        let mut config = ClientConfig::default();
        config.apply_backend_override("   ");
        assert_eq!(config.backend_url, "http://127.0.0.1:5000");
        config.apply_backend_override(" http://10.0.0.2:5000 ");
        assert_eq!(config.backend_url, "http://10.0.0.2:5000");
    }

    #[test]
    fn test_load_from_missing_file() {
        assert!(ClientConfig::load_from("does/not/exist.json").is_err());
    }
}
