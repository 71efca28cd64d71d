use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

const TITLE: &str = " Projects";

/// Title on the left, sync status on the right, separator underneath
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let status = format!("Status: {} ", app.status());
    let title_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let status_style = Style::default()
        .fg(app.theme.status_color(app.status()))
        .bg(bg);

    let used = display_width(TITLE) + display_width(&status);
    let padding = width.saturating_sub(used);
    let title_line = Line::from(vec![
        Span::styled(TITLE, title_style),
        Span::styled(" ".repeat(padding), Style::default().bg(bg)),
        Span::styled(status, status_style),
    ]);
    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(width),
        Style::default().fg(app.theme.border).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![title_line, separator]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
