//! Main application state and event wiring.

use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::theme::Theme;
use super::widgets::{board_height, grid_cols, BoardWidget, GameOverOverlay, KeyHints, Logo, StatusBar};
use crate::config::{Config, ThemePreference};
use crate::game::{format_elapsed, Game, Phase};

// ══════════════════════════════════════════════════════════════════════════
// Application State
// ══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    Complete,
}

pub struct App {
    pub screen: Screen,
    pub running: bool,

    // Config and theme
    pub config: Config,
    pub theme: Theme,

    // Round state
    pub game: Game,
    pub cursor: usize,
}

impl App {
    /// `session_theme` overrides the saved preference without persisting it.
    pub fn new(config: Config, session_theme: Option<ThemePreference>) -> Self {
        let theme = Theme::new(session_theme.unwrap_or(config.theme));

        Self {
            screen: Screen::Menu,
            running: true,
            config,
            theme,
            game: Game::new(),
            cursor: 0,
        }
    }

    pub fn start_round(&mut self) {
        let mut rng = rand::rng();
        self.game.start(&mut rng, Instant::now());
        self.cursor = 0;
        self.screen = Screen::Playing;
    }

    pub fn abandon_round(&mut self) {
        self.game.reset();
        self.screen = Screen::Menu;
    }

    /// Flip to the opposite theme and persist the choice. Only reachable from
    /// the menu; an active round never changes theme.
    pub fn toggle_theme(&mut self) {
        let next = self.theme.preference.toggled();
        self.theme = Theme::new(next);
        self.config.theme = next;
        let _ = self.config.save();
    }

    fn move_cursor(&mut self, dx: isize, dy: isize) {
        let len = self.game.cards().len();
        if len == 0 {
            return;
        }
        let cols = grid_cols(len) as isize;
        let step = dx + dy * cols;
        self.cursor = (self.cursor as isize + step).rem_euclid(len as isize) as usize;
    }

    // ══════════════════════════════════════════════════════════════════════
    // Event Handling
    // ══════════════════════════════════════════════════════════════════════

    pub fn handle_events(&mut self) -> anyhow::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match self.screen {
                        Screen::Menu => self.handle_menu_keys(key.code),
                        Screen::Playing => self.handle_playing_keys(key.code),
                        Screen::Complete => self.handle_complete_keys(key.code),
                    }
                }
            }
        }
        self.advance_clock();
        Ok(())
    }

    /// Apply due resolutions and follow the controller into the completion
    /// screen when the finish transition fires.
    fn advance_clock(&mut self) {
        self.game.tick(Instant::now());
        if self.screen == Screen::Playing && self.game.phase() == Phase::Complete {
            self.screen = Screen::Complete;
        }
    }

    fn handle_menu_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Char('t') => self.toggle_theme(),
            KeyCode::Enter | KeyCode::Char('s') => self.start_round(),
            _ => {}
        }
    }

    fn handle_playing_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => self.abandon_round(),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.game.reveal(self.cursor, Instant::now());
            }
            _ => {}
        }
    }

    fn handle_complete_keys(&mut self, key: KeyCode) {
        match key {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char(' ') => {
                self.game.acknowledge_completion();
                self.screen = Screen::Menu;
            }
            _ => {}
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Rendering
    // ══════════════════════════════════════════════════════════════════════

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        // Clear with background
        frame.render_widget(Clear, area);
        frame.render_widget(
            ratatui::widgets::Block::default().style(Style::default().bg(self.theme.colors.bg)),
            area,
        );

        match self.screen {
            Screen::Menu => self.render_menu(frame, area),
            Screen::Playing => self.render_playing(frame, area),
            Screen::Complete => self.render_complete(frame, area),
        }
    }

    fn render_menu(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::vertical([
            Constraint::Length(2),  // Top padding
            Constraint::Length(11), // Logo
            Constraint::Length(2),  // Spacing
            Constraint::Length(1),  // Last round line
            Constraint::Min(1),     // Spacer
            Constraint::Length(3),  // Help
        ])
        .split(area);

        frame.render_widget(Logo::new(&self.theme), chunks[1]);

        if let Some(summary) = self.game.last_round() {
            let line = Line::from(vec![
                Span::styled("Last round: ", self.theme.subtitle()),
                Span::styled(format_elapsed(summary.elapsed), self.theme.highlight()),
                Span::styled(
                    format!(" · {} moves", summary.moves),
                    self.theme.subtitle(),
                ),
            ]);
            frame.render_widget(
                Paragraph::new(line).alignment(Alignment::Center),
                chunks[3],
            );
        }

        let theme_hint = format!("[{}]", self.theme.preference.display_name());
        let hints_data: [(&str, &str); 3] = [
            ("Enter", "play"),
            ("t", &theme_hint),
            ("q", "quit"),
        ];
        let hints = KeyHints::new(&hints_data, &self.theme);
        frame.render_widget(hints, chunks[5]);
    }

    fn render_playing(&mut self, frame: &mut Frame, area: Rect) {
        let cards = self.game.cards();
        let chunks = Layout::vertical([
            Constraint::Length(2),                        // Header
            Constraint::Length(1),                        // Status bar
            Constraint::Length(1),                        // Separator
            Constraint::Min(board_height(cards.len())),   // Board
            Constraint::Length(2),                        // Hints
        ])
        .split(area);

        let header = Paragraph::new(Line::from(Span::styled("Pairs", self.theme.title())))
            .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        let now = Instant::now();
        frame.render_widget(
            StatusBar::new(
                self.game.matched_pairs(),
                self.game.remaining_pairs(),
                self.game.timer_display(now),
                self.game.moves(),
                &self.theme,
            ),
            chunks[1],
        );

        frame.render_widget(BoardWidget::new(cards, self.cursor, &self.theme), chunks[3]);

        let hints = KeyHints::new(
            &[
                ("hjkl/←↓↑→", "move"),
                ("Space", "reveal"),
                ("Esc", "abandon"),
            ],
            &self.theme,
        );
        frame.render_widget(hints, chunks[4]);
    }

    fn render_complete(&mut self, frame: &mut Frame, area: Rect) {
        let overlay_area = centered_rect(50, 40, area);
        frame.render_widget(
            GameOverOverlay::new(self.game.last_round(), &self.theme),
            overlay_area,
        );
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Helper Functions
// ══════════════════════════════════════════════════════════════════════════

/// Create a centered rectangle.
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_app() -> App {
        let mut app = App::new(Config::default(), None);
        app.start_round();
        app
    }

    #[test]
    fn starting_a_round_moves_to_the_playing_screen() {
        let app = playing_app();
        assert_eq!(app.screen, Screen::Playing);
        assert_eq!(app.game.cards().len(), 16);
        assert_eq!(app.game.phase(), Phase::Running);
    }

    #[test]
    fn abandoning_a_round_returns_to_an_idle_menu() {
        let mut app = playing_app();
        app.abandon_round();
        assert_eq!(app.screen, Screen::Menu);
        assert_eq!(app.game.phase(), Phase::Idle);
        assert!(app.game.cards().is_empty());
    }

    #[test]
    fn cursor_wraps_around_the_grid() {
        let mut app = playing_app();
        assert_eq!(app.cursor, 0);

        app.move_cursor(-1, 0);
        assert_eq!(app.cursor, 15);
        app.move_cursor(1, 0);
        assert_eq!(app.cursor, 0);
        app.move_cursor(0, 1);
        assert_eq!(app.cursor, 4);
        app.move_cursor(0, -1);
        assert_eq!(app.cursor, 0);
        app.move_cursor(0, -1);
        assert_eq!(app.cursor, 12);
    }

    #[test]
    fn session_theme_override_does_not_touch_the_config() {
        let config = Config::default();
        let app = App::new(config, Some(ThemePreference::Dark));
        assert_eq!(app.theme.preference, ThemePreference::Dark);
        assert_eq!(app.config.theme, ThemePreference::Light);
    }
}
