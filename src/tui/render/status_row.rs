use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

const NAVIGATE_HINTS: &str =
    " a add  A estimate  space toggle  d delete  b split  s sync  ? help  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = if let Some(pending) = &app.pending {
        Line::from(Span::styled(
            format!(" {}", pending.busy_message()),
            Style::default().fg(app.theme.yellow).bg(bg),
        ))
    } else {
        match app.mode {
            Mode::Navigate => Line::from(Span::styled(
                truncate_to_width(NAVIGATE_HINTS, width),
                Style::default().fg(app.theme.dim).bg(bg),
            )),
            Mode::Input { estimate } => input_line(app, estimate, width),
            Mode::ConfirmDelete { index } => {
                let name = app.records().get(index).map_or("", |r| r.label());
                Line::from(Span::styled(
                    truncate_to_width(&format!(" Delete \"{}\"? (y/n)", name), width),
                    Style::default()
                        .fg(app.theme.red)
                        .bg(bg)
                        .add_modifier(Modifier::BOLD),
                ))
            }
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Prompt, buffer split at the caret, and a right-aligned hint when it fits
fn input_line(app: &App, estimate: bool, width: usize) -> Line<'static> {
    let bg = app.theme.background;
    let prompt = if estimate {
        " New project (AI estimate): "
    } else {
        " New project: "
    };
    let (before, after) = app.input_buffer.split_at(app.input_cursor);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);

    let mut spans = vec![
        Span::styled(prompt, Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(before.to_string(), text_style),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(after.to_string(), text_style),
    ];

    let hint = "Enter save  Esc cancel";
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
    Line::from(spans)
}
