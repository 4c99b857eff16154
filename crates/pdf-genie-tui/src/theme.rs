use ratatui::style::{Color, Modifier, Style};

use crate::notification::Level;

/// Color theme for the TUI.
pub struct Theme {
    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub highlight_bg: Color,
    pub spinner: Color,

    pub info: Color,
    pub warning: Color,
    pub error: Color,
}

impl Theme {
    /// Hacker-green terminal theme.
    pub fn hacker() -> Self {
        Self {
            header_fg: Color::Black,
            header_bg: Color::Rgb(0, 210, 0),
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            accent: Color::Cyan,
            highlight_bg: Color::Rgb(60, 60, 0),
            spinner: Color::Cyan,
            info: Color::Rgb(0, 210, 0),
            warning: Color::Yellow,
            error: Color::Red,
        }
    }

    /// Modern theme: white text, electric blue accents.
    pub fn modern() -> Self {
        Self {
            header_fg: Color::White,
            header_bg: Color::Rgb(30, 60, 120),
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: Color::Rgb(120, 120, 140),
            accent: Color::Rgb(60, 140, 255),
            highlight_bg: Color::Rgb(80, 70, 20),
            spinner: Color::Rgb(60, 140, 255),
            info: Color::Rgb(0, 200, 80),
            warning: Color::Rgb(255, 200, 0),
            error: Color::Rgb(255, 80, 80),
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "modern" => Self::modern(),
            _ => Self::hacker(),
        }
    }

    pub fn level_color(&self, level: Level) -> Color {
        match level {
            Level::Info => self.info,
            Level::Warning => self.warning,
            Level::Error => self.error,
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }
}
