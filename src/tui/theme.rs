//! Color theme definitions for the terminal UI

use crate::config::ThemeChoice;
use ratatui::style::{Color, Modifier, Style};

/// Theme configuration for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background of the row under the cursor
    pub cursor_bg: Color,
    /// Foreground of the row under the cursor
    pub cursor_fg: Color,
    /// Checkbox mark
    pub checked: Color,
    /// Group header text
    pub group: Color,
    /// Pills
    pub pill: Color,
    /// Counter
    pub counter: Color,
    /// Borders
    pub border: Color,
    /// Border of the focused search field
    pub focused_border: Color,
    /// Placeholder and descriptions
    pub dimmed: Color,
    /// Errors in the status line
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Palette for a configured theme
    #[must_use]
    pub const fn for_choice(choice: ThemeChoice) -> Self {
        match choice {
            ThemeChoice::Dark => Self::dark(),
            ThemeChoice::Light => Self::light(),
        }
    }

    /// Dark theme (default)
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            cursor_bg: Color::Blue,
            cursor_fg: Color::White,
            checked: Color::Green,
            group: Color::Cyan,
            pill: Color::Magenta,
            counter: Color::Yellow,
            border: Color::DarkGray,
            focused_border: Color::Cyan,
            dimmed: Color::DarkGray,
            error: Color::Red,
        }
    }

    /// Light theme
    #[must_use]
    pub const fn light() -> Self {
        Self {
            cursor_bg: Color::LightBlue,
            cursor_fg: Color::Black,
            checked: Color::Green,
            group: Color::Blue,
            pill: Color::Magenta,
            counter: Color::Red,
            border: Color::Gray,
            focused_border: Color::Blue,
            dimmed: Color::Gray,
            error: Color::Red,
        }
    }

    #[must_use]
    pub fn cursor_style(&self) -> Style {
        Style::default()
            .bg(self.cursor_bg)
            .fg(self.cursor_fg)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn checked_style(&self) -> Style {
        Style::default()
            .fg(self.checked)
            .add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn group_style(&self) -> Style {
        Style::default().fg(self.group).add_modifier(Modifier::BOLD)
    }

    #[must_use]
    pub fn pill_style(&self) -> Style {
        Style::default()
            .fg(self.pill)
            .add_modifier(Modifier::REVERSED)
    }

    #[must_use]
    pub fn counter_style(&self) -> Style {
        Style::default().fg(self.counter)
    }

    /// Border style, highlighted while the dropdown is open
    #[must_use]
    pub fn border_style(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focused_border)
        } else {
            Style::default().fg(self.border)
        }
    }

    #[must_use]
    pub fn dimmed_style(&self) -> Style {
        Style::default().fg(self.dimmed)
    }

    #[must_use]
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }
}
