use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

pub mod selection;

/// Board-screen input, already decoupled from crossterm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Cursor { d_row: i8, d_col: i8 },
    Click,
    NewGame,
    Quit,
}

pub fn map_key(key: KeyEvent) -> Option<Input> {
    // Windows では Release も届く
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Up => Some(Input::Cursor { d_row: -1, d_col: 0 }),
        KeyCode::Down => Some(Input::Cursor { d_row: 1, d_col: 0 }),
        KeyCode::Left => Some(Input::Cursor { d_row: 0, d_col: -1 }),
        KeyCode::Right => Some(Input::Cursor { d_row: 0, d_col: 1 }),
        KeyCode::Enter | KeyCode::Char(' ') => Some(Input::Click),
        KeyCode::Char('n') => Some(Input::NewGame),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}
