//! Round state and match resolution.
//!
//! The controller is free of any rendering concern: every operation takes the
//! current instant as a parameter, so the whole round can be driven from tests
//! with a hand-advanced clock.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::models::{build_deck, Card, PAIRS};

/// Delay before a resolution (match or mismatch) settles on the board.
pub const RESOLVE_DELAY: Duration = Duration::from_millis(1000);

// ══════════════════════════════════════════════════════════════════════════
// Delay Queue
// ══════════════════════════════════════════════════════════════════════════

/// One-shot scheduled actions with a cancel-all handle.
///
/// Entries fire in scheduling order once due. Dropping the whole queue on
/// round reset is what keeps stale resolutions from ever touching a new round.
#[derive(Debug)]
struct DelayQueue<T> {
    entries: Vec<(Instant, T)>,
}

impl<T> DelayQueue<T> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn schedule(&mut self, at: Instant, action: T) {
        self.entries.push((at, action));
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    /// Remove and return every action due at `now`, preserving scheduling order.
    fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].0 <= now {
                due.push(self.entries.remove(i).1);
            } else {
                i += 1;
            }
        }
        due
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Round Timer
// ══════════════════════════════════════════════════════════════════════════

/// Elapsed-time counter for a round.
///
/// `start` offsets the reference instant by any previously banked time, so a
/// stopped timer resumes where it left off. Reads recompute from the current
/// instant; nothing ticks on its own.
#[derive(Debug, Default)]
pub struct RoundTimer {
    reference: Option<Instant>,
    banked: Duration,
}

impl RoundTimer {
    pub fn start(&mut self, now: Instant) {
        self.reference = Some(now - self.banked);
    }

    pub fn stop(&mut self, now: Instant) {
        if let Some(reference) = self.reference.take() {
            self.banked = now.saturating_duration_since(reference);
        }
    }

    pub fn reset(&mut self) {
        self.reference = None;
        self.banked = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.reference.is_some()
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.reference {
            Some(reference) => now.saturating_duration_since(reference),
            None => self.banked,
        }
    }
}

/// Zero-padded `MM:SS`, whole seconds.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    format!("{:02}:{:02}", total / 60, total % 60)
}

// ══════════════════════════════════════════════════════════════════════════
// Game Controller
// ══════════════════════════════════════════════════════════════════════════

/// Round lifecycle. Idle is both the initial and the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Complete,
}

/// Result of evaluating two revealed cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Match,
    Mismatch,
}

/// Actions waiting out their resolution delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    HideMismatch { first: usize, second: usize },
    Unlock,
    Finish,
}

/// What a finished round looked like, captured before the reset wipes it.
#[derive(Debug, Clone, Copy)]
pub struct RoundSummary {
    pub elapsed: Duration,
    pub moves: u32,
}

/// Owns all round state: the dealt cards, the reveal buffer, the counters,
/// the board lock and the pending resolutions.
#[derive(Debug)]
pub struct Game {
    cards: Vec<Card>,
    reveal_buffer: Vec<usize>,
    matched_pairs: usize,
    pairs: usize,
    moves: u32,
    locked: bool,
    phase: Phase,
    timer: RoundTimer,
    queue: DelayQueue<Pending>,
    last_round: Option<RoundSummary>,
}

impl Game {
    pub fn new() -> Self {
        Self {
            cards: Vec::new(),
            reveal_buffer: Vec::new(),
            matched_pairs: 0,
            pairs: PAIRS,
            moves: 0,
            locked: false,
            phase: Phase::Idle,
            timer: RoundTimer::default(),
            queue: DelayQueue::new(),
            last_round: None,
        }
    }

    /// Start a fresh round with a shuffled deck.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R, now: Instant) {
        self.deal(build_deck(rng), now);
    }

    /// Start a round from an explicit deck ordering.
    pub fn deal(&mut self, deck: Vec<Card>, now: Instant) {
        self.clear_round();
        self.pairs = deck.len() / 2;
        self.cards = deck;
        self.phase = Phase::Running;
        self.timer.start(now);
    }

    /// Abandon whatever is in progress and return to idle.
    pub fn reset(&mut self) {
        self.clear_round();
        self.phase = Phase::Idle;
    }

    fn clear_round(&mut self) {
        self.cards.clear();
        self.reveal_buffer.clear();
        self.matched_pairs = 0;
        self.pairs = PAIRS;
        self.moves = 0;
        self.locked = false;
        self.timer.reset();
        self.queue.clear();
    }

    /// Reveal the card at `index`.
    ///
    /// Silently ignored unless the round is running, the board is unlocked,
    /// fewer than two cards are buffered and the target is still face down.
    /// Rejected input is not an error.
    pub fn reveal(&mut self, index: usize, now: Instant) {
        if self.phase != Phase::Running || self.locked || self.reveal_buffer.len() >= 2 {
            return;
        }
        let Some(card) = self.cards.get_mut(index) else {
            return;
        };
        if card.revealed {
            return;
        }

        card.revealed = true;
        self.reveal_buffer.push(index);

        if self.reveal_buffer.len() == 2 {
            self.evaluate(now);
        }
    }

    /// Compare the two buffered cards, committing a match immediately and
    /// deferring everything else behind [`RESOLVE_DELAY`].
    fn evaluate(&mut self, now: Instant) -> Outcome {
        let (first, second) = (self.reveal_buffer[0], self.reveal_buffer[1]);
        self.locked = true;
        self.moves += 1;

        let outcome = if self.cards[first].symbol == self.cards[second].symbol {
            Outcome::Match
        } else {
            Outcome::Mismatch
        };

        match outcome {
            Outcome::Match => {
                self.cards[first].matched = true;
                self.cards[second].matched = true;
                self.matched_pairs += 1;
                self.reveal_buffer.clear();

                if self.matched_pairs == self.pairs {
                    self.timer.stop(now);
                    self.queue.schedule(now + RESOLVE_DELAY, Pending::Finish);
                }
            }
            Outcome::Mismatch => {
                self.queue
                    .schedule(now + RESOLVE_DELAY, Pending::HideMismatch { first, second });
            }
        }

        // The unlock lands after the delay window in both branches. On the
        // round-completing match it fires into an already reset game, which
        // is harmless.
        self.queue.schedule(now + RESOLVE_DELAY, Pending::Unlock);

        outcome
    }

    /// Advance the controller clock, applying any due resolutions.
    pub fn tick(&mut self, now: Instant) {
        for action in self.queue.drain_due(now) {
            match action {
                Pending::HideMismatch { first, second } => {
                    self.conceal(first);
                    self.conceal(second);
                    self.reveal_buffer.clear();
                    self.locked = false;
                }
                Pending::Unlock => self.locked = false,
                Pending::Finish => self.finish(now),
            }
        }
    }

    fn conceal(&mut self, index: usize) {
        if let Some(card) = self.cards.get_mut(index) {
            if !card.matched {
                card.revealed = false;
            }
        }
    }

    fn finish(&mut self, now: Instant) {
        self.last_round = Some(RoundSummary {
            elapsed: self.timer.elapsed(now),
            moves: self.moves,
        });
        self.clear_round();
        self.phase = Phase::Complete;
    }

    /// Dismiss the completion overlay, returning to idle.
    pub fn acknowledge_completion(&mut self) {
        if self.phase == Phase::Complete {
            self.phase = Phase::Idle;
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Accessors
    // ══════════════════════════════════════════════════════════════════════

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    pub fn remaining_pairs(&self) -> usize {
        self.pairs - self.matched_pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn reveal_buffer(&self) -> &[usize] {
        &self.reveal_buffer
    }

    pub fn timer_display(&self, now: Instant) -> String {
        format_elapsed(self.timer.elapsed(now))
    }

    pub fn last_round(&self) -> Option<&RoundSummary> {
        self.last_round.as_ref()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Symbol;

    fn fixed_deck(symbols: &[Symbol]) -> Vec<Card> {
        symbols.iter().map(|&s| Card::new(s)).collect()
    }

    fn after(start: Instant, ms: u64) -> Instant {
        start + Duration::from_millis(ms)
    }

    #[test]
    fn reveal_is_ignored_while_idle() {
        let mut game = Game::new();
        game.reveal(0, Instant::now());
        assert!(game.reveal_buffer().is_empty());
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn revealing_an_already_revealed_card_is_ignored() {
        let t0 = Instant::now();
        let mut game = Game::new();
        game.deal(fixed_deck(&["A", "B", "A", "B"]), t0);

        game.reveal(0, t0);
        game.reveal(0, t0);
        assert_eq!(game.reveal_buffer(), &[0]);
    }

    #[test]
    fn third_reveal_during_resolution_has_no_effect() {
        let t0 = Instant::now();
        let mut game = Game::new();
        game.deal(fixed_deck(&["A", "B", "A", "B"]), t0);

        game.reveal(0, t0);
        game.reveal(1, t0); // mismatch, board locks
        assert!(game.is_locked());

        game.reveal(2, t0);
        assert_eq!(game.reveal_buffer().len(), 2);
        assert!(!game.cards()[2].revealed);
    }

    #[test]
    fn match_commits_immediately_and_unlocks_after_the_delay() {
        let t0 = Instant::now();
        let mut game = Game::new();
        game.deal(fixed_deck(&["A", "B", "A", "B"]), t0);

        game.reveal(0, t0);
        game.reveal(2, t0);

        assert_eq!(game.matched_pairs(), 1);
        assert_eq!(game.remaining_pairs(), 1);
        assert_eq!(game.moves(), 1);
        assert!(game.reveal_buffer().is_empty());
        assert!(game.is_locked());
        assert!(game.cards()[0].matched && game.cards()[2].matched);

        game.tick(after(t0, 1000));
        assert!(!game.is_locked());
        // Matched cards stay face up.
        assert!(game.cards()[0].revealed && game.cards()[2].revealed);
    }

    #[test]
    fn mismatch_hides_both_cards_after_the_delay() {
        let t0 = Instant::now();
        let mut game = Game::new();
        game.deal(fixed_deck(&["A", "B", "A", "B"]), t0);

        game.reveal(0, t0);
        game.reveal(1, t0);

        assert!(game.is_locked());
        assert!(game.cards()[0].revealed && game.cards()[1].revealed);
        assert_eq!(game.matched_pairs(), 0);

        // Not yet due: nothing moves.
        game.tick(after(t0, 500));
        assert!(game.is_locked());
        assert!(game.cards()[0].revealed);

        game.tick(after(t0, 1000));
        assert!(!game.cards()[0].revealed);
        assert!(!game.cards()[1].revealed);
        assert!(game.reveal_buffer().is_empty());
        assert!(!game.is_locked());
        assert_eq!(game.phase(), Phase::Running);
    }

    #[test]
    fn full_round_reaches_completion_and_resets_to_idle_defaults() {
        let t0 = Instant::now();
        let mut game = Game::new();
        game.deal(fixed_deck(&["A", "B", "A", "B"]), t0);

        game.reveal(0, t0);
        game.reveal(2, t0);
        game.tick(after(t0, 1100));

        let t1 = after(t0, 2000);
        game.reveal(1, t1);
        game.reveal(3, t1);
        assert_eq!(game.matched_pairs(), 2);

        // Timer stops at the final match even before the finish fires.
        assert_eq!(game.timer_display(after(t0, 30_000)), "00:02");

        game.tick(after(t0, 3100));
        assert_eq!(game.phase(), Phase::Complete);

        let summary = game.last_round().expect("finished round recorded");
        assert_eq!(summary.elapsed.as_secs(), 2);
        assert_eq!(summary.moves, 2);

        // The round itself is back at idle defaults.
        assert!(game.cards().is_empty());
        assert_eq!(game.matched_pairs(), 0);
        assert_eq!(game.remaining_pairs(), PAIRS);
        assert_eq!(game.timer_display(after(t0, 9000)), "00:00");

        game.acknowledge_completion();
        assert_eq!(game.phase(), Phase::Idle);
    }

    #[test]
    fn reset_cancels_pending_resolutions() {
        let t0 = Instant::now();
        let mut game = Game::new();
        game.deal(fixed_deck(&["A", "B", "A", "B"]), t0);

        game.reveal(0, t0);
        game.reveal(1, t0); // mismatch scheduled
        game.reset();

        game.tick(after(t0, 5000));
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.cards().is_empty());
        assert!(!game.is_locked());
        assert!(game.queue.is_empty());
    }

    #[test]
    fn reset_on_an_idle_game_is_idempotent() {
        let mut game = Game::new();
        game.reset();
        let first = (
            game.matched_pairs(),
            game.remaining_pairs(),
            game.timer_display(Instant::now()),
            game.cards().len(),
            game.phase(),
        );
        game.reset();
        let second = (
            game.matched_pairs(),
            game.remaining_pairs(),
            game.timer_display(Instant::now()),
            game.cards().len(),
            game.phase(),
        );
        assert_eq!(first, (0, PAIRS, "00:00".to_string(), 0, Phase::Idle));
        assert_eq!(first, second);
    }

    #[test]
    fn starting_a_new_round_replaces_the_previous_deck() {
        let t0 = Instant::now();
        let mut game = Game::new();
        game.deal(fixed_deck(&["A", "B", "A", "B"]), t0);
        game.reveal(0, t0);

        game.deal(fixed_deck(&["C", "D", "C", "D"]), after(t0, 100));
        assert_eq!(game.cards().len(), 4);
        assert!(game.reveal_buffer().is_empty());
        assert!(game.cards().iter().all(|c| !c.revealed));
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn timer_resumes_from_banked_time_and_formats_padded() {
        let t0 = Instant::now();
        let mut timer = RoundTimer::default();

        timer.start(t0);
        timer.stop(after(t0, 65_000));
        assert_eq!(format_elapsed(timer.elapsed(after(t0, 99_000))), "01:05");

        // Resume: banked time carries forward.
        timer.start(after(t0, 100_000));
        assert_eq!(format_elapsed(timer.elapsed(after(t0, 101_000))), "01:06");

        timer.reset();
        assert_eq!(format_elapsed(timer.elapsed(after(t0, 200_000))), "00:00");
        assert!(!timer.is_running());
    }

    #[test]
    fn delay_queue_fires_in_scheduling_order() {
        let t0 = Instant::now();
        let mut queue: DelayQueue<u8> = DelayQueue::new();
        queue.schedule(after(t0, 10), 1);
        queue.schedule(after(t0, 10), 2);
        queue.schedule(after(t0, 500), 3);

        assert_eq!(queue.drain_due(after(t0, 10)), vec![1, 2]);
        assert_eq!(queue.drain_due(after(t0, 10)), Vec::<u8>::new());
        assert_eq!(queue.drain_due(after(t0, 500)), vec![3]);
        assert!(queue.is_empty());
    }
}
