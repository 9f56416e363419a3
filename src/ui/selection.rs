use crate::config::ClientConfig;
use crate::core::{Mode, Side};
use crate::game::GameConfig;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::io::Write;
use std::time::Duration;

/// Start menu. `Ok(None)` means the user quit.
pub fn start_menu(config: &ClientConfig) -> anyhow::Result<Option<GameConfig>> {
    print!("=== Xiangqi (backend: {}) ===\r\n", config.backend_url);

    let mode = match select_mode()? {
        Some(mode) => mode,
        None => return Ok(None),
    };

    let mut game = config.game_config(mode);
    for side in [Side::Red, Side::Black] {
        // 人間側のモデルは使わない
        if mode == Mode::HumanVsAi && side == game.human_side {
            continue;
        }
        let current = game.model_for(side).to_string();
        let label = format!("{} model", side);
        let picked = match select_model(&label, &config.models, &current)? {
            Some(model) => model,
            None => return Ok(None),
        };
        match side {
            Side::Red => game.red_model = picked,
            Side::Black => game.black_model = picked,
        }
    }

    Ok(Some(game))
}

pub fn select_mode() -> anyhow::Result<Option<Mode>> {
    print!("\r\nSelect mode:\r\n");
    print!("1. Human vs AI\r\n");
    print!("2. AI vs AI\r\n");
    std::io::stdout().flush()?;

    loop {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('1') => return Ok(Some(Mode::HumanVsAi)),
                    KeyCode::Char('2') => return Ok(Some(Mode::AiVsAi)),
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    _ => {}
                }
            }
        }
    }
}

/// ↑/↓ で選んで Enter。初期位置は `current`
pub fn select_model(
    label: &str,
    models: &[String],
    current: &str,
) -> anyhow::Result<Option<String>> {
    if models.is_empty() {
        return Ok(Some(current.to_string()));
    }
    let mut selected_idx = models.iter().position(|m| m == current).unwrap_or(0);

    print!("\r\nSelect {} (Use ↑/↓ and Enter):\r\n", label);

    loop {
        for (i, model) in models.iter().enumerate() {
            let prefix = if i == selected_idx { "> " } else { "  " };
            print!("\r\x1B[K{}{}\r\n", prefix, model);
        }
        std::io::stdout().flush()?;

        // Move cursor back up
        print!("\x1B[{}A", models.len());

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Up => selected_idx = step(selected_idx, models.len(), -1),
                    KeyCode::Down => selected_idx = step(selected_idx, models.len(), 1),
                    KeyCode::Enter => {
                        print!("\x1B[{}B", models.len());
                        print!("{}: {}\r\n", label, models[selected_idx]);
                        return Ok(Some(models[selected_idx].clone()));
                    }
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(None),
                    _ => {}
                }
            }
        }
    }
}

fn step(idx: usize, len: usize, delta: i32) -> usize {
    if delta < 0 {
        idx.saturating_sub(1)
    } else if idx + 1 < len {
        idx + 1
    } else {
        idx
    }
}
