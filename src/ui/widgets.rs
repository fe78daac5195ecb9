//! Custom widgets for the memory game TUI.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, Paragraph, Widget},
};

use super::theme::Theme;
use crate::game::RoundSummary;
use crate::models::Card;

// ══════════════════════════════════════════════════════════════════════════
// Logo Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct Logo<'a> {
    theme: &'a Theme,
}

impl<'a> Logo<'a> {
    const ART: &'static str = r#"
    ╭──────────────────────────────────────────╮
    │  ____       _                            │
    │ |  _ \ __ _(_)_ __ ___                   │
    │ | |_) / _` | | '__/ __|                  │
    │ |  __/ (_| | | |  \__ \                  │
    │ |_|   \__,_|_|_|  |___/                  │
    │                       ┌───────────────┐  │
    │      ╭────╮ ╭────╮    │ Memory        │  │
    │      │ 🍒 │ │ ?  │    │ Matching      │  │
    │      ╰────╯ ╰────╯    │ Game          │  │
    ╰──────────────────────────────────────────╯"#;

    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for Logo<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = Self::ART
            .lines()
            .skip(1)
            .map(|line| {
                Line::from(vec![Span::styled(
                    line,
                    Style::default().fg(self.theme.colors.primary),
                )])
            })
            .collect();

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Status Bar Widget
// ══════════════════════════════════════════════════════════════════════════

/// The three read-only round displays plus the move count.
pub struct StatusBar<'a> {
    completed: usize,
    remaining: usize,
    elapsed: String,
    moves: u32,
    theme: &'a Theme,
}

impl<'a> StatusBar<'a> {
    pub fn new(
        completed: usize,
        remaining: usize,
        elapsed: String,
        moves: u32,
        theme: &'a Theme,
    ) -> Self {
        Self {
            completed,
            remaining,
            elapsed,
            moves,
            theme,
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::horizontal([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

        let completed_text = Line::from(vec![
            Span::styled("● ", self.theme.stat_completed()),
            Span::styled("Found: ", Style::default().fg(self.theme.colors.text_muted)),
            Span::styled(self.completed.to_string(), self.theme.stat_completed()),
        ]);
        Paragraph::new(completed_text)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        let remaining_text = Line::from(vec![
            Span::styled("● ", self.theme.stat_remaining()),
            Span::styled("Left: ", Style::default().fg(self.theme.colors.text_muted)),
            Span::styled(self.remaining.to_string(), self.theme.stat_remaining()),
        ]);
        Paragraph::new(remaining_text)
            .alignment(Alignment::Center)
            .render(chunks[1], buf);

        let timer_text = Line::from(vec![
            Span::styled("⏱ ", self.theme.stat_timer()),
            Span::styled(self.elapsed, self.theme.stat_timer()),
        ]);
        Paragraph::new(timer_text)
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let moves_text = Line::from(vec![
            Span::styled("Moves: ", Style::default().fg(self.theme.colors.text_muted)),
            Span::styled(
                self.moves.to_string(),
                Style::default().fg(self.theme.colors.text_dim),
            ),
        ]);
        Paragraph::new(moves_text)
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Board Widget
// ══════════════════════════════════════════════════════════════════════════

const CELL_WIDTH: u16 = 9;
const CELL_HEIGHT: u16 = 3;
const CELL_GAP: u16 = 1;

/// Number of columns for a deck of `len` cards: the smallest square that
/// holds them all. 16 cards render as a 4x4 grid.
pub fn grid_cols(len: usize) -> usize {
    let mut cols = 1;
    while cols * cols < len {
        cols += 1;
    }
    cols
}

/// Renders one bordered cell per card, re-synchronized from model state every
/// frame: blank face when hidden, the symbol when revealed, a settled style
/// when matched, the cursor as a highlighted border.
pub struct BoardWidget<'a> {
    cards: &'a [Card],
    cursor: usize,
    theme: &'a Theme,
}

impl<'a> BoardWidget<'a> {
    pub fn new(cards: &'a [Card], cursor: usize, theme: &'a Theme) -> Self {
        Self {
            cards,
            cursor,
            theme,
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.cards.is_empty() {
            return;
        }

        let cols = grid_cols(self.cards.len()) as u16;
        let stride_x = CELL_WIDTH + CELL_GAP;
        let board_width = cols * CELL_WIDTH + (cols - 1) * CELL_GAP;
        let offset_x = area.x + area.width.saturating_sub(board_width) / 2;

        for (i, card) in self.cards.iter().enumerate() {
            let row = i as u16 / cols;
            let col = i as u16 % cols;
            let cell = Rect {
                x: offset_x + col * stride_x,
                y: area.y + row * CELL_HEIGHT,
                width: CELL_WIDTH,
                height: CELL_HEIGHT,
            };
            if cell.right() > area.right() || cell.bottom() > area.bottom() {
                continue;
            }

            let border_style = if i == self.cursor {
                self.theme.cursor()
            } else if card.matched {
                self.theme.card_matched()
            } else if card.revealed {
                self.theme.card_revealed()
            } else {
                self.theme.card_hidden()
            };

            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(border_style);
            let inner = block.inner(cell);
            block.render(cell, buf);

            let face = if card.revealed { card.symbol } else { "" };
            let face_style = if card.matched {
                self.theme.card_matched()
            } else {
                Style::default().fg(self.theme.colors.text)
            };
            Paragraph::new(Line::from(Span::styled(face, face_style)))
                .alignment(Alignment::Center)
                .render(inner, buf);
        }
    }
}

/// Height in rows a deck of `len` cards needs.
pub fn board_height(len: usize) -> u16 {
    let cols = grid_cols(len);
    let rows = len.div_ceil(cols) as u16;
    rows * CELL_HEIGHT
}

// ══════════════════════════════════════════════════════════════════════════
// Key Hints Widget
// ══════════════════════════════════════════════════════════════════════════

pub struct KeyHints<'a> {
    hints: &'a [(&'a str, &'a str)],
    theme: &'a Theme,
}

impl<'a> KeyHints<'a> {
    pub fn new(hints: &'a [(&'a str, &'a str)], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for KeyHints<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let spans: Vec<Span> = self
            .hints
            .iter()
            .flat_map(|(key, desc)| {
                vec![
                    Span::styled(*key, self.theme.key_highlight()),
                    Span::styled(format!(" {} ", desc), self.theme.key_hint()),
                    Span::styled("│ ", Style::default().fg(self.theme.colors.text_dim)),
                ]
            })
            .collect();

        Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .render(area, buf);
    }
}

// ══════════════════════════════════════════════════════════════════════════
// End-of-Game Overlay Widget
// ══════════════════════════════════════════════════════════════════════════

/// Full-round completion message. Purely presentational: it renders the
/// summary captured when the round finished and holds no game state.
pub struct GameOverOverlay<'a> {
    summary: Option<&'a RoundSummary>,
    theme: &'a Theme,
}

impl<'a> GameOverOverlay<'a> {
    pub fn new(summary: Option<&'a RoundSummary>, theme: &'a Theme) -> Self {
        Self { summary, theme }
    }
}

impl Widget for GameOverOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.theme.colors.success))
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(
                    "GAME COMPLETE",
                    Style::default()
                        .fg(self.theme.colors.success)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ]))
            .title_alignment(Alignment::Center);

        let inner = block.inner(area);
        block.render(area, buf);

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "All pairs found!",
                Style::default()
                    .fg(self.theme.colors.success)
                    .add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
        ];

        if let Some(summary) = self.summary {
            text.push(Line::from(vec![
                Span::styled("Time: ", Style::default().fg(self.theme.colors.text_muted)),
                Span::styled(
                    crate::game::format_elapsed(summary.elapsed),
                    Style::default()
                        .fg(self.theme.colors.primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
            text.push(Line::from(vec![
                Span::styled("Moves: ", Style::default().fg(self.theme.colors.text_muted)),
                Span::styled(
                    summary.moves.to_string(),
                    Style::default()
                        .fg(self.theme.colors.primary)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        text.push(Line::from(""));
        text.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(self.theme.colors.text_dim)),
            Span::styled("Enter", self.theme.key_highlight()),
            Span::styled(
                " to play again",
                Style::default().fg(self.theme.colors.text_dim),
            ),
        ]));

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_the_smallest_square_that_fits() {
        assert_eq!(grid_cols(16), 4);
        assert_eq!(grid_cols(4), 2);
        assert_eq!(grid_cols(5), 3);
        assert_eq!(grid_cols(1), 1);
    }

    #[test]
    fn board_height_accounts_for_partial_rows() {
        assert_eq!(board_height(16), 4 * CELL_HEIGHT);
        assert_eq!(board_height(5), 2 * CELL_HEIGHT);
    }
}
