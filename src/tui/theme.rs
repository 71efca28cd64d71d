use ratatui::style::Color;

use crate::model::UiConfig;
use crate::ops::sync::SyncStatus;

/// Parsed color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub text_bright: Color,
    pub highlight: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub selection_bg: Color,
    pub border: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x1E, 0x1E, 0x1E),
            panel: Color::Rgb(0x25, 0x25, 0x26),
            text: Color::Rgb(0xCC, 0xCC, 0xCC),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            highlight: Color::Rgb(0x00, 0x7A, 0xCC),
            dim: Color::Rgb(0xAA, 0xAA, 0xAA),
            red: Color::Rgb(0xFF, 0x55, 0x55),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x4E, 0xC9, 0x71),
            selection_bg: Color::Rgb(0x00, 0x7A, 0xCC),
            border: Color::Rgb(0x3E, 0x3E, 0x42),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Create a theme from the UI config, falling back to defaults
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        for (key, value) in &ui.colors {
            if let Some(color) = parse_hex_color(value) {
                match key.as_str() {
                    "background" => theme.background = color,
                    "panel" => theme.panel = color,
                    "text" => theme.text = color,
                    "text_bright" => theme.text_bright = color,
                    "highlight" => theme.highlight = color,
                    "dim" => theme.dim = color,
                    "red" => theme.red = color,
                    "yellow" => theme.yellow = color,
                    "green" => theme.green = color,
                    "selection_bg" => theme.selection_bg = color,
                    "border" => theme.border = color,
                    _ => {}
                }
            }
        }

        theme
    }

    /// Get the color for the sync status indicator
    pub fn status_color(&self, status: SyncStatus) -> Color {
        match status {
            SyncStatus::Checking | SyncStatus::Syncing => self.dim,
            SyncStatus::Synced => self.green,
            SyncStatus::LocalMode => self.red,
            SyncStatus::SavedLocally => self.yellow,
        }
    }
}
