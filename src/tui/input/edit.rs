use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::tui::app::{App, Mode, Pending};
use crate::util::unicode;

/// Single-line editor for a new project name. `input_cursor` is a byte
/// offset that always sits on a grapheme boundary.
pub(super) fn handle_input(app: &mut App, key: KeyEvent, estimate: bool) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => finish(app),
        KeyCode::Enter => {
            let name = app.input_buffer.trim().to_string();
            finish(app);
            if !name.is_empty() {
                app.pending = Some(Pending::Add { name, estimate });
            }
        }
        KeyCode::Backspace => {
            if let Some(start) = unicode::prev_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_buffer.replace_range(start..app.input_cursor, "");
                app.input_cursor = start;
            }
        }
        KeyCode::Delete => {
            if let Some(end) = unicode::next_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_buffer.replace_range(app.input_cursor..end, "");
            }
        }
        KeyCode::Left => {
            if let Some(pos) = unicode::prev_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_cursor = pos;
            }
        }
        KeyCode::Right => {
            if let Some(pos) = unicode::next_grapheme_boundary(&app.input_buffer, app.input_cursor) {
                app.input_cursor = pos;
            }
        }
        KeyCode::Home => app.input_cursor = 0,
        KeyCode::End => app.input_cursor = app.input_buffer.len(),
        KeyCode::Char('a') if ctrl => app.input_cursor = 0,
        KeyCode::Char('e') if ctrl => app.input_cursor = app.input_buffer.len(),
        KeyCode::Char('u') if ctrl => {
            app.input_buffer.replace_range(..app.input_cursor, "");
            app.input_cursor = 0;
        }
        KeyCode::Char('w') if ctrl => {
            let start = unicode::word_boundary_left(&app.input_buffer, app.input_cursor);
            app.input_buffer.replace_range(start..app.input_cursor, "");
            app.input_cursor = start;
        }
        KeyCode::Char(c) if !ctrl => {
            app.input_buffer.insert(app.input_cursor, c);
            app.input_cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn finish(app: &mut App) {
    app.input_buffer.clear();
    app.input_cursor = 0;
    app.mode = Mode::Navigate;
}
