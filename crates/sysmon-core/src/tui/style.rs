//! Color scheme and styles.

use ratatui::style::{Color, Modifier, Style};

/// Color palette.
pub struct Theme;

impl Theme {
    pub const BG: Color = Color::Reset;
    pub const HEADER_BG: Color = Color::Blue;

    pub const FG: Color = Color::White;
    pub const FG_DIM: Color = Color::DarkGray;
    pub const HEADER_FG: Color = Color::White;

    pub const HIGHLIGHT_MODIFIED: Color = Color::Yellow;
    pub const HIGHLIGHT_CRITICAL: Color = Color::Red;

    pub const CPU_COLOR: Color = Color::Cyan;
    pub const MEM_COLOR: Color = Color::Magenta;
}

/// Pre-defined styles.
pub struct Styles;

impl Styles {
    /// Default text style.
    pub fn default() -> Style {
        Style::default().fg(Theme::FG).bg(Theme::BG)
    }

    /// Header bar style.
    pub fn header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Table header style.
    pub fn table_header() -> Style {
        Style::default()
            .fg(Theme::HEADER_FG)
            .bg(Theme::HEADER_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Warning value style (yellow).
    pub fn modified_item() -> Style {
        Style::default().fg(Theme::HIGHLIGHT_MODIFIED)
    }

    /// Critical value style (red).
    pub fn critical() -> Style {
        Style::default()
            .fg(Theme::HIGHLIGHT_CRITICAL)
            .add_modifier(Modifier::BOLD)
    }

    /// Dimmed text style.
    pub fn dim() -> Style {
        Style::default().fg(Theme::FG_DIM)
    }

    /// CPU metric style.
    pub fn cpu() -> Style {
        Style::default().fg(Theme::CPU_COLOR)
    }

    /// Memory metric style.
    pub fn mem() -> Style {
        Style::default().fg(Theme::MEM_COLOR)
    }

    /// Style for a utilization fraction: red above 90%, yellow above 70%,
    /// otherwise `base`.
    pub fn level(fraction: f64, base: Style) -> Style {
        if fraction > 0.9 {
            Self::critical()
        } else if fraction > 0.7 {
            Self::modified_item()
        } else {
            base
        }
    }
}
