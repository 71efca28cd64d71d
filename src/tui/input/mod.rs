mod confirm;
mod edit;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};

use confirm::handle_confirm;
use edit::handle_input;
use navigate::handle_navigate;

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Write-failure popup intercepts all input until dismissed
    if app.write_error().is_some() {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter) {
            app.dismiss_error();
        }
        return;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc) {
            app.show_help = false;
        }
        return;
    }

    match app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::Input { estimate } => handle_input(app, key, estimate),
        Mode::ConfirmDelete { index } => handle_confirm(app, key, index),
    }
}
