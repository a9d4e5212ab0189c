//! Poker hand evaluation.
//!
//! This module provides hand ranking and comparison for 5-7 card poker hands.
//! The evaluator classifies the whole card set in one pass from a rank
//! histogram, per-suit rank bitmasks and a straight scan, which yields the
//! same result as scoring every 5-card subset and keeping the best.

use std::fmt;

use super::card::{Board, Card, HoleCards};

/// Hand rank categories, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A hand score that can be compared.
///
/// Ordering is derived: category first, then the tie-break ranks (2-14)
/// lexicographically. Unused tie-break slots are 0, so two hands are equal
/// exactly when category and every tie-break rank match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank {
    category: HandCategory,
    kickers: [u8; 5],
}

impl HandRank {
    /// Create a new hand rank.
    fn new(category: HandCategory, tiebreak: impl IntoIterator<Item = u8>) -> Self {
        let mut kickers = [0u8; 5];
        for (slot, k) in kickers.iter_mut().zip(tiebreak) {
            *slot = k;
        }
        Self { category, kickers }
    }

    /// Get the hand category.
    pub fn category(&self) -> HandCategory {
        self.category
    }

    /// Tie-break ranks in significance order.
    pub fn kickers(&self) -> &[u8] {
        let used = self.kickers.iter().take_while(|&&k| k != 0).count();
        &self.kickers[..used]
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.kickers())
    }
}

/// Ranks with a bit set in `bits` (bit r = rank r), highest first.
fn ranks_desc(bits: u16) -> impl Iterator<Item = u8> {
    (2..=14u8).rev().filter(move |&r| bits & (1 << r) != 0)
}

/// Find the highest straight from a rank bitmask.
/// Returns the high card of the straight, or None if no straight.
fn find_straight(rank_bits: u16) -> Option<u8> {
    // Ace also plays low: copy bit 14 to bit 1 for the wheel (A-2-3-4-5)
    let bits = rank_bits | ((rank_bits >> 14) & 1) << 1;

    (5..=14u8).rev().find(|&high| {
        let mask = 0b11111u16 << (high - 4);
        bits & mask == mask
    })
}

/// Hand evaluator for poker hands.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandEvaluator;

impl HandEvaluator {
    /// Create a new hand evaluator.
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the best 5-card hand among 5, 6 or 7 distinct cards.
    pub fn evaluate(&self, cards: &[Card]) -> HandRank {
        debug_assert!(
            (5..=7).contains(&cards.len()),
            "evaluate expects 5-7 cards, got {}",
            cards.len()
        );

        // Build rank counts and per-suit rank masks
        let mut rank_counts = [0u8; 15];
        let mut suit_bits = [0u16; 4];
        let mut rank_bits = 0u16;

        for card in cards {
            let rank = card.rank().value();
            rank_counts[rank as usize] += 1;
            suit_bits[card.suit().index() as usize] |= 1 << rank;
            rank_bits |= 1 << rank;
        }

        // Flush (at most one suit can hold five of seven cards)
        let flush_bits = suit_bits.iter().copied().find(|b| b.count_ones() >= 5);

        if let Some(bits) = flush_bits {
            if let Some(high) = find_straight(bits) {
                return HandRank::new(HandCategory::StraightFlush, [high]);
            }
        }

        // Categorize by rank counts
        let mut quads = 0u16;
        let mut trips = 0u16;
        let mut pairs = 0u16;
        let mut singles = 0u16;

        for rank in 2..=14u8 {
            match rank_counts[rank as usize] {
                4 => quads |= 1 << rank,
                3 => trips |= 1 << rank,
                2 => pairs |= 1 << rank,
                1 => singles |= 1 << rank,
                _ => {}
            }
        }

        // Four of a kind: kicker is the best remaining rank of any count
        if let Some(quad) = ranks_desc(quads).next() {
            let kicker = ranks_desc(rank_bits & !(1 << quad)).next().unwrap_or(0);
            return HandRank::new(HandCategory::FourOfAKind, [quad, kicker]);
        }

        // Full house: a second trips can play as the pair
        if let Some(trip) = ranks_desc(trips).next() {
            let pair = ranks_desc((trips & !(1 << trip)) | pairs).next();
            if let Some(pair) = pair {
                return HandRank::new(HandCategory::FullHouse, [trip, pair]);
            }
        }

        // Flush
        if let Some(bits) = flush_bits {
            return HandRank::new(HandCategory::Flush, ranks_desc(bits).take(5));
        }

        // Straight
        if let Some(high) = find_straight(rank_bits) {
            return HandRank::new(HandCategory::Straight, [high]);
        }

        // Three of a kind (no pairs exist here, or it would be a full house)
        if let Some(trip) = ranks_desc(trips).next() {
            let kickers = ranks_desc(singles).take(2);
            return HandRank::new(HandCategory::ThreeOfAKind, std::iter::once(trip).chain(kickers));
        }

        // Two pair: a third pair can only contribute its rank as the kicker
        let mut pair_ranks = ranks_desc(pairs);
        if let (Some(high), Some(low)) = (pair_ranks.next(), pair_ranks.next()) {
            let kicker = ranks_desc(rank_bits & !(1 << high) & !(1 << low))
                .next()
                .unwrap_or(0);
            return HandRank::new(HandCategory::TwoPair, [high, low, kicker]);
        }

        // One pair
        if let Some(pair) = ranks_desc(pairs).next() {
            let kickers = ranks_desc(singles).take(3);
            return HandRank::new(HandCategory::OnePair, std::iter::once(pair).chain(kickers));
        }

        // High card
        HandRank::new(HandCategory::HighCard, ranks_desc(singles).take(5))
    }

    /// Evaluate hole cards against a board of 3 to 5 cards.
    pub fn evaluate_hand(&self, hole_cards: &HoleCards, board: &Board) -> HandRank {
        let mut cards = [hole_cards.card1; 7];
        cards[1] = hole_cards.card2;
        let n = 2 + board.len();
        cards[2..n].copy_from_slice(board.cards());
        self.evaluate(&cards[..n])
    }
}
