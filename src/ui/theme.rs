//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemePreference;

/// Color palette for a theme.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Brand Colors
    pub primary: Color,
    pub accent: Color,

    // Semantic Colors
    pub success: Color,
    pub error: Color,

    // Background Colors
    pub bg: Color,
    pub bg_card: Color,
    pub bg_highlight: Color,

    // Text Colors
    pub text: Color,
    pub text_muted: Color,
    pub text_dim: Color,

    // Card Colors
    pub card_hidden: Color,
    pub card_revealed: Color,
    pub card_matched: Color,
}

/// Theme struct that holds colors and provides style methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub preference: ThemePreference,
    pub colors: ThemeColors,
}

impl Theme {
    pub fn new(preference: ThemePreference) -> Self {
        let colors = match preference {
            ThemePreference::Light => Self::light_colors(),
            ThemePreference::Dark => Self::dark_colors(),
        };
        Self { preference, colors }
    }

    fn light_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors
            primary: Color::Rgb(79, 70, 229),       // Indigo 600
            accent: Color::Rgb(219, 39, 119),       // Pink 600

            // Semantic Colors
            success: Color::Rgb(22, 163, 74),       // Green 600
            error: Color::Rgb(220, 38, 38),         // Red 600

            // Background Colors
            bg: Color::Rgb(250, 250, 249),          // Stone 50
            bg_card: Color::Rgb(241, 245, 249),     // Slate 100
            bg_highlight: Color::Rgb(226, 232, 240), // Slate 200

            // Text Colors
            text: Color::Rgb(15, 23, 42),           // Slate 900
            text_muted: Color::Rgb(71, 85, 105),    // Slate 600
            text_dim: Color::Rgb(148, 163, 184),    // Slate 400

            // Card Colors
            card_hidden: Color::Rgb(148, 163, 184), // Slate 400
            card_revealed: Color::Rgb(79, 70, 229), // Indigo 600
            card_matched: Color::Rgb(22, 163, 74),  // Green 600
        }
    }

    fn dark_colors() -> ThemeColors {
        ThemeColors {
            // Brand Colors
            primary: Color::Rgb(99, 102, 241),      // Indigo
            accent: Color::Rgb(236, 72, 153),       // Pink

            // Semantic Colors
            success: Color::Rgb(34, 197, 94),       // Green
            error: Color::Rgb(239, 68, 68),         // Red

            // Background Colors
            bg: Color::Rgb(15, 23, 42),             // Slate 900
            bg_card: Color::Rgb(30, 41, 59),        // Slate 800
            bg_highlight: Color::Rgb(71, 85, 105),  // Slate 600

            // Text Colors
            text: Color::Rgb(248, 250, 252),        // Slate 50
            text_muted: Color::Rgb(148, 163, 184),  // Slate 400
            text_dim: Color::Rgb(100, 116, 139),    // Slate 500

            // Card Colors
            card_hidden: Color::Rgb(100, 116, 139), // Slate 500
            card_revealed: Color::Rgb(129, 140, 248), // Indigo 400
            card_matched: Color::Rgb(34, 197, 94),  // Green
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Styles
    // ══════════════════════════════════════════════════════════════════════

    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.colors.text)
            .add_modifier(Modifier::BOLD)
    }

    pub fn subtitle(&self) -> Style {
        Style::default().fg(self.colors.text_muted)
    }

    pub fn highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_hidden(&self) -> Style {
        Style::default().fg(self.colors.card_hidden)
    }

    pub fn card_revealed(&self) -> Style {
        Style::default()
            .fg(self.colors.card_revealed)
            .add_modifier(Modifier::BOLD)
    }

    pub fn card_matched(&self) -> Style {
        Style::default().fg(self.colors.card_matched)
    }

    pub fn cursor(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn stat_completed(&self) -> Style {
        Style::default()
            .fg(self.colors.success)
            .add_modifier(Modifier::BOLD)
    }

    pub fn stat_remaining(&self) -> Style {
        Style::default()
            .fg(self.colors.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn stat_timer(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.colors.text_dim)
    }

    pub fn key_highlight(&self) -> Style {
        Style::default()
            .fg(self.colors.accent)
            .add_modifier(Modifier::BOLD)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(ThemePreference::Light)
    }
}
