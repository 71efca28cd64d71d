use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 0 {
        return String::new();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = display_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `byte_offset`, or None at the end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let rest = s.get(byte_offset..)?;
    let first = rest.graphemes(true).next()?;
    Some(byte_offset + first.len())
}

/// Byte offset where the grapheme before `byte_offset` starts, or None at the start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    let head = s.get(..byte_offset)?;
    let last = head.graphemes(true).next_back()?;
    Some(byte_offset - last.len())
}

/// Start of the word before `byte_offset`, skipping any whitespace first.
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let Some(head) = s.get(..byte_offset) else {
        return 0;
    };
    let trimmed = head.trim_end();
    match trimmed.rfind(char::is_whitespace) {
        Some(i) => i + trimmed[i..].chars().next().map_or(1, char::len_utf8),
        None => 0,
    }
}
