//! The 52-card deck with known cards removed.
//!
//! Live cards occupy the prefix `cards[..len]` of a fixed array. Drawing is a
//! partial Fisher-Yates shuffle: a random live slot is swapped to the end of
//! the prefix and the prefix shrinks, so a card can never be drawn twice.

use std::fmt;

use rand::Rng;

use super::card::Card;
use crate::equity::error::EquityError;

/// A deck of playing cards supporting uniform draws without replacement.
#[derive(Clone)]
pub struct Deck {
    /// Card storage; only `cards[..len]` is still in the deck.
    cards: [Card; 52],
    /// Number of cards remaining.
    len: usize,
    /// Bitmask of cards no longer in the deck (removed or drawn).
    dead_mask: u64,
}

impl Deck {
    /// Create the full 52-card universe in standard order (2c, 2d, ..., As).
    pub fn new() -> Self {
        let mut cards = [Card::from_id(0); 52];
        for (i, slot) in cards.iter_mut().enumerate() {
            *slot = Card::from_id(i as u8);
        }
        Self {
            cards,
            len: 52,
            dead_mask: 0,
        }
    }

    /// Create a deck with the known cards removed.
    ///
    /// Fails with `DuplicateCard` if `known` repeats a card.
    pub fn without(known: &[Card]) -> Result<Self, EquityError> {
        let mut deck = Self::new();
        deck.remove_known(known)?;
        Ok(deck)
    }

    /// Remove known cards from the deck.
    ///
    /// Fails with `DuplicateCard` if `known` repeats a card or names a card
    /// that is already out of the deck.
    pub fn remove_known(&mut self, known: &[Card]) -> Result<(), EquityError> {
        for &card in known {
            if self.dead_mask & card.mask() != 0 {
                return Err(EquityError::DuplicateCard { card });
            }
            self.dead_mask |= card.mask();
        }

        // Compact live cards to the front, keeping enumeration order stable
        let mut write_idx = 0;
        for read_idx in 0..self.len {
            let card = self.cards[read_idx];
            if self.dead_mask & card.mask() == 0 {
                self.cards[write_idx] = card;
                write_idx += 1;
            }
        }
        self.len = write_idx;
        Ok(())
    }

    /// Draw one card uniformly at random.
    pub fn draw_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Card> {
        if self.len == 0 {
            return None;
        }
        let pick = rng.gen_range(0..self.len);
        self.len -= 1;
        self.cards.swap(pick, self.len);
        let card = self.cards[self.len];
        self.dead_mask |= card.mask();
        Some(card)
    }

    /// Fill `out` with cards drawn uniformly at random without replacement.
    ///
    /// Fails with `InsufficientCards` (drawing nothing) if `out` is longer
    /// than the remaining deck.
    pub fn draw_into<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        out: &mut [Card],
    ) -> Result<(), EquityError> {
        if out.len() > self.len {
            return Err(EquityError::InsufficientCards {
                requested: out.len(),
                remaining: self.len,
            });
        }
        for slot in out.iter_mut() {
            let pick = rng.gen_range(0..self.len);
            self.len -= 1;
            self.cards.swap(pick, self.len);
            *slot = self.cards[self.len];
            self.dead_mask |= slot.mask();
        }
        Ok(())
    }

    /// Draw `count` cards uniformly at random without replacement.
    pub fn draw<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<Card>, EquityError> {
        let mut cards = vec![Card::from_id(0); count];
        self.draw_into(rng, &mut cards)?;
        Ok(cards)
    }

    /// Get the number of remaining cards.
    pub fn remaining(&self) -> usize {
        self.len
    }

    /// Check if a card is still in the deck.
    pub fn contains(&self, card: Card) -> bool {
        self.dead_mask & card.mask() == 0
    }

    /// Get remaining cards as a slice.
    pub fn remaining_cards(&self) -> &[Card] {
        &self.cards[..self.len]
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Deck({} remaining)", self.remaining())
    }
}
