//! TUI styles and color themes.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
pub struct ColorTheme {
    pub primary: Color,
    pub success: Color,
    pub muted: Color,
    pub track: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            success: Color::Green,
            muted: Color::DarkGray,
            track: Color::Gray,
        }
    }
}

impl ColorTheme {
    /// Get the style for a header.
    #[must_use]
    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    /// Get the style for muted text.
    #[must_use]
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Get the style for the empty part of a lane.
    #[must_use]
    pub fn track_style(&self) -> Style {
        Style::default().fg(self.track)
    }

    /// Get the style for the winner banner.
    #[must_use]
    pub fn winner_style(&self) -> Style {
        Style::default()
            .fg(self.success)
            .add_modifier(Modifier::BOLD)
    }
}

/// Terminal color of an entrant.
#[must_use]
pub fn lane_color((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

/// Bold style in an entrant's color.
#[must_use]
pub fn lane_style(color: (u8, u8, u8)) -> Style {
    Style::default()
        .fg(lane_color(color))
        .add_modifier(Modifier::BOLD)
}
