use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::app::App;

const PLACEHOLDER: &str = "AI insights will appear here...";

/// Bordered panel holding the latest advisor output
pub fn render_advice_panel(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.panel;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border).bg(bg))
        .title(Span::styled(
            " AI Insights ",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .style(Style::default().bg(bg));

    let (text, fg) = match &app.ai_output {
        Some(text) => (text.as_str(), app.theme.text),
        None => (PLACEHOLDER, app.theme.dim),
    };

    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().fg(fg).bg(bg))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
