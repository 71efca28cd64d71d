use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::{centered_rect_fixed, wrap_text};

/// Modal shown when neither the server nor the offline file took the data
pub fn render_error_popup(frame: &mut Frame, app: &App, area: Rect) {
    let popup_w: u16 = 52.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let red = app.theme.red;
    let header_style = Style::default()
        .fg(red)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let bright_style = Style::default().fg(app.theme.text_bright).bg(bg);

    let detail = app.write_error().unwrap_or("");

    let mut styled_lines: Vec<(String, Style)> = Vec::new();
    styled_lines.push((" Save Failed".into(), header_style));
    styled_lines.push(("".into(), text_style));
    for s in wrap_text(
        " ",
        "The server is unreachable and the offline file could not be written.",
        inner_w,
    ) {
        styled_lines.push((s, text_style));
    }
    styled_lines.push(("".into(), text_style));
    for s in wrap_text("   ", detail, inner_w) {
        styled_lines.push((s, bright_style));
    }
    styled_lines.push(("".into(), text_style));
    for s in wrap_text(" ", "Press Esc to dismiss.", inner_w) {
        styled_lines.push((s, text_style));
    }

    // Dynamic height from content + 2 for borders
    let popup_h = ((styled_lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let lines: Vec<Line> = styled_lines
        .into_iter()
        .map(|(text, style)| Line::from(Span::styled(text, style)))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(red).bg(bg))
        .style(Style::default().bg(bg));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}
