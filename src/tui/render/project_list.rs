use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::{display_width, truncate_to_width};

const EMPTY_HINT: &str = " No projects yet. Press a to add one.";

/// Render the project list, keeping the cursor row in view
pub fn render_project_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let visible_height = area.height as usize;

    if app.records().is_empty() {
        let hint = Line::from(Span::styled(
            EMPTY_HINT,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(hint).style(Style::default().bg(bg)), area);
        return;
    }

    if visible_height > 0 {
        if app.cursor < app.scroll_offset {
            app.scroll_offset = app.cursor;
        } else if app.cursor >= app.scroll_offset + visible_height {
            app.scroll_offset = app.cursor.saturating_sub(visible_height - 1);
        }
    }

    let lines: Vec<Line> = app
        .records()
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(visible_height)
        .map(|(idx, record)| {
            let selected = idx == app.cursor;
            let row_bg = if selected { app.theme.selection_bg } else { bg };
            let fg = if selected {
                app.theme.text_bright
            } else if record.completed {
                app.theme.dim
            } else {
                app.theme.text
            };

            let prefix = format!(" {} | ", record.marker());
            let room = width.saturating_sub(display_width(&prefix));
            let label = truncate_to_width(record.label(), room);
            let fill = room.saturating_sub(display_width(&label));

            let style = Style::default().fg(fg).bg(row_bg);
            Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(label, style),
                Span::styled(" ".repeat(fill), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(bg)), area);
}
