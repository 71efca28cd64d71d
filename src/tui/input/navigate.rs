use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode, Pending};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    let len = app.records().len();
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,

        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < len {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = len.saturating_sub(1),

        KeyCode::Char('a') => begin_input(app, false),
        KeyCode::Char('A') => begin_input(app, true),

        KeyCode::Char(' ') | KeyCode::Enter => {
            if let Some(idx) = app.selected() {
                app.pending = Some(Pending::Toggle(idx));
            }
        }
        KeyCode::Char('d') => {
            if let Some(index) = app.selected() {
                app.mode = Mode::ConfirmDelete { index };
            }
        }
        KeyCode::Char('b') => {
            if let Some(idx) = app.selected() {
                app.pending = Some(Pending::BreakDown(idx));
            }
        }
        KeyCode::Char('s') => app.pending = Some(Pending::Load),
        KeyCode::Char('i') => app.pending = Some(Pending::Advice),
        KeyCode::Char('r') => app.pending = Some(Pending::Report),
        _ => {}
    }
}

fn begin_input(app: &mut App, estimate: bool) {
    app.input_buffer.clear();
    app.input_cursor = 0;
    app.mode = Mode::Input { estimate };
}
