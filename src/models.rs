//! Data model for cards and decks.

use rand::Rng;

use crate::shuffle::fisher_yates;

/// A card face. Only identity matters; there is no ordering between symbols.
pub type Symbol = &'static str;

/// Number of pairs in a round.
pub const PAIRS: usize = 8;

/// The symbol pool, one entry per pair.
pub const SYMBOLS: [Symbol; PAIRS] = ["🍎", "🍌", "🍇", "🍓", "🍍", "🥝", "🍑", "🍒"];

/// A single board cell with a hidden identity.
///
/// A matched card keeps `revealed == true` for the rest of the round; the
/// `matched` flag only tells the view to draw it as settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    pub symbol: Symbol,
    pub revealed: bool,
    pub matched: bool,
}

impl Card {
    pub const fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            revealed: false,
            matched: false,
        }
    }
}

/// Build a round's deck: every symbol exactly twice, uniformly shuffled.
pub fn build_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    let mut deck: Vec<Card> = SYMBOLS
        .iter()
        .flat_map(|&symbol| [Card::new(symbol), Card::new(symbol)])
        .collect();
    fisher_yates(&mut deck, rng);
    deck
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn new_card_starts_face_down() {
        let card = Card::new("🍎");
        assert!(!card.revealed);
        assert!(!card.matched);
        assert_eq!(card.symbol, "🍎");
    }

    #[test]
    fn deck_has_every_symbol_exactly_twice() {
        let mut rng = StdRng::seed_from_u64(99);
        let deck = build_deck(&mut rng);

        assert_eq!(deck.len(), 2 * PAIRS);

        let mut counts: HashMap<Symbol, usize> = HashMap::new();
        for card in &deck {
            *counts.entry(card.symbol).or_default() += 1;
            assert!(!card.revealed);
            assert!(!card.matched);
        }

        assert_eq!(counts.len(), PAIRS);
        for symbol in SYMBOLS {
            assert_eq!(counts[symbol], 2, "wrong count for {symbol}");
        }
    }
}
