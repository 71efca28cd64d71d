use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode, Pending};

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent, index: usize) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.mode = Mode::Navigate;
            app.pending = Some(Pending::Delete(index));
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        _ => {}
    }
}
