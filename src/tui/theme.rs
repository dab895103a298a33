//! Theme configuration for the labeler
//!
//! Colours for the TUI live here so the widgets never hard-code them.

use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary text color
    pub text_primary: Color,
    /// Secondary/dimmed text color (key hints, progress)
    pub text_secondary: Color,
    /// Accent color for the title and the active filename
    pub accent: Color,
    /// Backdrop behind the image
    pub panel: Color,
    /// Screen background
    pub background: Color,
    /// Error/warning color
    pub error: Color,
    /// Success color
    pub success: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

impl Theme {
    /// Dark navy background with a coral accent.
    pub fn midnight() -> Self {
        Self {
            text_primary: Color::Rgb(0xea, 0xea, 0xea),
            text_secondary: Color::Rgb(0xa1, 0xa1, 0xa1),
            accent: Color::Rgb(0xe9, 0x45, 0x60),
            panel: Color::Rgb(0x16, 0x21, 0x3e),
            background: Color::Rgb(0x1a, 0x1a, 0x2e),
            error: Color::LightRed,
            success: Color::LightGreen,
        }
    }

    /// Plain ANSI colours for terminals without truecolor.
    pub fn classic() -> Self {
        Self {
            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: Color::Red,
            panel: Color::Reset,
            background: Color::Reset,
            error: Color::LightRed,
            success: Color::Green,
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text_primary).bg(self.background)
    }

    pub fn text_secondary_style(&self) -> Style {
        Style::default().fg(self.text_secondary).bg(self.background)
    }

    pub fn accent_style(&self) -> Style {
        Style::default().fg(self.accent).bg(self.background)
    }

    pub fn accent_bold_style(&self) -> Style {
        self.accent_style().add_modifier(Modifier::BOLD)
    }

    pub fn panel_style(&self) -> Style {
        Style::default().fg(self.text_secondary).bg(self.panel)
    }

    pub fn error_style(&self) -> Style {
        Style::default()
            .fg(self.error)
            .bg(self.background)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success_style(&self) -> Style {
        Style::default().fg(self.success).bg(self.background)
    }
}

/// Get the active theme.
pub fn current_theme() -> Theme {
    Theme::default()
}
