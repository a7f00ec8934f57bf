use ratatui::style::Color;

use crate::model::config::UiConfig;
use crate::model::task::TaskStatus;

/// Colors used by the TUI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight: Color,
    pub done: Color,
    pub deleted: Color,
    pub accent: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            done: Color::Rgb(0x44, 0xFF, 0x88),
            deleted: Color::Rgb(0xFF, 0x44, 0x44),
            accent: Color::Rgb(0x44, 0xDD, 0xFF),
            error: Color::Rgb(0xFF, 0xD7, 0x00),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Defaults with `[ui.colors]` overrides applied
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (slot, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match slot.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "dim" => theme.dim = color,
                "highlight" => theme.highlight = color,
                "done" => theme.done = color,
                "deleted" => theme.deleted = color,
                "accent" => theme.accent = color,
                "error" => theme.error = color,
                _ => {}
            }
        }
        theme
    }

    /// Color for a section header and its task markers
    pub fn status_color(&self, status: TaskStatus) -> Color {
        match status {
            TaskStatus::Active => self.text,
            TaskStatus::Done => self.done,
            TaskStatus::Deleted => self.deleted,
        }
    }
}
