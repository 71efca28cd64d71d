pub mod advice_panel;
pub mod error_popup;
pub mod header;
pub mod help_overlay;
pub mod project_list;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::App;

/// Rows given to the AI panel, borders included
const ADVICE_PANEL_HEIGHT: u16 = 8;

/// Main render function, dispatches to sub-renderers
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: header (2 rows) | project list | AI panel | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(ADVICE_PANEL_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    project_list::render_project_list(frame, app, chunks[1]);
    advice_panel::render_advice_panel(frame, app, chunks[2]);
    status_row::render_status_row(frame, app, chunks[3]);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    // Write-failure popup sits above everything
    if app.write_error().is_some() {
        error_popup::render_error_popup(frame, app, area);
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Word-wrap `text` into lines of at most `max_width` characters.
/// Every line (including the first) is prefixed with `indent`.
pub(super) fn wrap_text(indent: &str, text: &str, max_width: usize) -> Vec<String> {
    let indent_len = indent.len();
    let mut lines = Vec::new();
    let mut current = indent.to_string();

    for word in text.split_whitespace() {
        let space = if current.len() == indent_len { 0 } else { 1 };
        if current.len() + space + word.len() > max_width && current.len() > indent_len {
            lines.push(current);
            current = indent.to_string();
        }
        if current.len() > indent_len {
            current.push(' ');
        }
        current.push_str(word);
    }
    if current.len() > indent_len || lines.is_empty() {
        lines.push(current);
    }
    lines
}
