use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::centered_rect_fixed;

const BINDINGS: &[(&str, &str)] = &[
    ("\u{2191}\u{2193}/jk", "Move cursor up/down"),
    ("g/G", "Jump to first/last project"),
    ("a", "Add a project"),
    ("A", "Add a project with an AI time estimate"),
    ("space/Enter", "Toggle completed"),
    ("d", "Delete (asks y/n)"),
    ("b", "Break the project into subtasks with AI"),
    ("s", "Sync with the server"),
    ("i", "AI advice on what to do next"),
    ("r", "AI progress report"),
    ("?", "Toggle this help"),
    ("q", "Quit"),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(Span::styled(" Key Bindings", header_style)));
    lines.push(Line::from(""));
    for (key, desc) in BINDINGS {
        add_binding(&mut lines, key, desc, key_style, desc_style);
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Press ? or Esc to close",
        Style::default().fg(app.theme.dim).bg(bg),
    )));

    let overlay_area = centered_rect_fixed(56, lines.len() as u16 + 2, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn add_binding<'a>(
    lines: &mut Vec<Line<'a>>,
    key: &'a str,
    desc: &'a str,
    key_style: Style,
    desc_style: Style,
) {
    let key_width = 14;
    let padded_key = format!(" {:<width$}", key, width = key_width);
    lines.push(Line::from(vec![
        Span::styled(padded_key, key_style),
        Span::styled(desc, desc_style),
    ]));
}
