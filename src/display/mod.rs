pub mod scene;

use crate::core::{Side, Square, COLS, ROWS};
use crate::game::Controller;
use crossterm::{cursor, queue, style::Stylize, terminal};
use std::io::{self, Write};

use scene::{Element, ElementKind};

/// Log lines shown under the board.
const LOG_LINES: usize = 8;

pub struct DisplayState {
    pub cursor: Square,
    pub show_cursor: bool,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            // 紅方の帥の位置から
            cursor: Square::new(9, 4),
            show_cursor: true,
        }
    }
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_cursor(&mut self, d_row: i8, d_col: i8) {
        let row = (self.cursor.row as i8 + d_row).clamp(0, ROWS as i8 - 1);
        let col = (self.cursor.col as i8 + d_col).clamp(0, COLS as i8 - 1);
        self.cursor = Square::new(row as u8, col as u8);
    }
}

/// One cell of text for the square, already padded to four columns.
fn cell_text(el: Option<&Element>, effect: bool) -> (String, Option<Side>) {
    if effect {
        return (" 吃 ".to_string(), None);
    }
    match el.map(|e| (e.kind, e.nudge)) {
        Some((ElementKind::Piece { piece, .. }, nudge)) => {
            let text = if nudge != 0 {
                format!("  {}", piece.glyph())
            } else {
                format!(" {} ", piece.glyph())
            };
            (text, Some(piece.side))
        }
        _ => (" ·  ".to_string(), None),
    }
}

/// Wraps a cell, keeping it four columns wide (glyphs are double width).
fn bracket(text: &str, open: char, close: char) -> String {
    let inner = text.trim();
    if inner.is_ascii() || inner == "·" {
        format!("{}{} {}", open, inner, close)
    } else {
        format!("{}{}{}", open, inner, close)
    }
}

pub fn render(controller: &Controller, state: &DisplayState) -> io::Result<()> {
    let mut out = io::stdout();
    let scene = controller.scene();
    let arbiter = controller.arbiter();

    // 画面クリア（スクロール防止）
    queue!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;

    write!(out, "=== Xiangqi ===\r\n")?;
    let indicator = arbiter.turn_indicator();
    match arbiter.side_to_move() {
        Side::Red => write!(out, "{}", indicator.red().bold())?,
        Side::Black => write!(out, "{}", indicator.white().bold())?,
    }
    if let Some(status) = &scene.status {
        write!(out, "   {}", status.clone().yellow())?;
    }
    write!(out, "\r\n")?;
    if let Some(notice) = &scene.notice {
        write!(out, "{}\r\n", notice.clone().bold().green())?;
    } else {
        write!(out, "\r\n")?;
    }

    write!(out, "    ")?;
    for col in 0..COLS {
        write!(out, "  {} ", col)?;
    }
    write!(out, "\r\n")?;
    write!(out, "   +{}+\r\n", "----".repeat(COLS as usize))?;

    for row in 0..ROWS {
        write!(out, "{:2} |", row)?;
        for col in 0..COLS {
            let sq = Square::new(row, col);
            // Sunk elements are captured pieces about to disappear.
            let el = scene
                .elements_at(sq)
                .find(|e| !e.is_sunk())
                .or_else(|| scene.elements_at(sq).next());
            let (text, side) = cell_text(el, scene.effect_at(sq));

            let is_cursor = state.show_cursor && state.cursor == sq;
            let is_selected = el.map(|e| e.selected).unwrap_or(false);
            let is_nudged = el.map(|e| e.nudge != 0).unwrap_or(false);

            let text = if is_nudged {
                text
            } else if is_cursor {
                bracket(&text, '[', ']')
            } else if is_selected {
                bracket(&text, '|', '|')
            } else {
                text
            };

            if scene.effect_at(sq) {
                write!(out, "{}", text.red().bold())?;
            } else if is_cursor {
                write!(out, "{}", text.yellow())?;
            } else if is_selected {
                write!(out, "{}", text.blue())?;
            } else {
                match side {
                    Some(Side::Red) => write!(out, "{}", text.red())?,
                    Some(Side::Black) => write!(out, "{}", text.white())?,
                    None => write!(out, "{}", text.dark_grey())?,
                }
            }
        }
        write!(out, "|\r\n")?;

        // 河界
        if row == 4 {
            write!(out, "   |{:^width$}|\r\n", "~~ river ~~", width = COLS as usize * 4)?;
        }
    }
    write!(out, "   +{}+\r\n", "----".repeat(COLS as usize))?;
    write!(
        out,
        "[Arrows]: Move | [Enter]: Select | [n]: New game | [q]: Quit\r\n\r\n"
    )?;

    for entry in controller.log().recent(LOG_LINES) {
        write!(
            out,
            "{} {}\r\n",
            entry.at.format("%H:%M:%S").to_string().dark_grey(),
            entry.message
        )?;
    }

    out.flush()
}
