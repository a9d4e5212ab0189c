//! Card selections as they arrive from the presentation layer.
//!
//! Every card position is a rank selector plus a suit selector, either of
//! which may still be empty. A slot only names a card once both are chosen;
//! half-filled board slots are ignored, half-filled hole slots are an error.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::config::{MAX_OPPONENTS, MIN_OPPONENTS};
use super::error::EquityError;
use crate::poker::card::{Board, Card, HoleCards, Rank, Suit};

/// One card position whose rank and suit may be unselected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CardSlot {
    /// Selected rank, if any.
    pub rank: Option<Rank>,
    /// Selected suit, if any.
    pub suit: Option<Suit>,
}

impl CardSlot {
    /// An unselected slot.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A fully selected slot.
    pub fn of(card: Card) -> Self {
        Self {
            rank: Some(card.rank()),
            suit: Some(card.suit()),
        }
    }

    /// Build a slot from selector text; an empty string means unselected.
    pub fn parse(rank: &str, suit: &str) -> Result<Self, EquityError> {
        Ok(Self {
            rank: parse_selector(rank, Rank::from_char)?,
            suit: parse_selector(suit, Suit::from_char)?,
        })
    }

    /// The card this slot names, if both rank and suit are selected.
    pub fn card(&self) -> Option<Card> {
        match (self.rank, self.suit) {
            (Some(rank), Some(suit)) => Some(Card::new(rank, suit)),
            _ => None,
        }
    }
}

fn parse_selector<T>(text: &str, parse: fn(char) -> Option<T>) -> Result<Option<T>, EquityError> {
    let text = text.trim();
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) => parse(c).map(Some).ok_or_else(|| EquityError::InvalidCard {
            input: text.to_string(),
        }),
        _ => Err(EquityError::InvalidCard {
            input: text.to_string(),
        }),
    }
}

/// A win-rate request exactly as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityRequest {
    /// The player's two hole card slots (both mandatory).
    pub hole: [CardSlot; 2],
    /// Up to five board slots, each optional.
    #[serde(default)]
    pub board: Vec<CardSlot>,
    /// Number of opponents (1-8).
    pub opponents: usize,
    /// Number of simulation trials.
    pub trials: u64,
}

/// Inputs that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// The player's hole cards.
    pub hole_cards: HoleCards,
    /// Fully specified board cards, in slot order.
    pub board: Board,
    /// Number of opponents.
    pub opponents: usize,
    /// Number of trials.
    pub trials: u64,
}

impl EquityRequest {
    /// Check the request and resolve its slots into cards.
    ///
    /// Checks run in order: missing hole cards, board size, duplicate cards,
    /// opponent count, trial count.
    pub fn validate(&self) -> Result<ValidatedRequest, EquityError> {
        let card1 = self.hole[0]
            .card()
            .ok_or(EquityError::MissingHoleCard { index: 0 })?;
        let card2 = self.hole[1]
            .card()
            .ok_or(EquityError::MissingHoleCard { index: 1 })?;

        let board_cards: Vec<Card> = self.board.iter().filter_map(CardSlot::card).collect();
        let board = Board::from_cards(board_cards)?;

        let mut seen = FxHashSet::default();
        for card in [card1, card2].iter().chain(board.cards()) {
            if !seen.insert(*card) {
                return Err(EquityError::DuplicateCard { card: *card });
            }
        }

        if !(MIN_OPPONENTS..=MAX_OPPONENTS).contains(&self.opponents) {
            return Err(EquityError::InvalidOpponentCount {
                count: self.opponents,
            });
        }

        if self.trials == 0 {
            return Err(EquityError::InvalidTrialCount);
        }

        Ok(ValidatedRequest {
            hole_cards: HoleCards::new(card1, card2),
            board,
            opponents: self.opponents,
            trials: self.trials,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(s: &str) -> CardSlot {
        CardSlot::of(s.parse().unwrap())
    }

    fn request(hole: [CardSlot; 2], board: Vec<CardSlot>) -> EquityRequest {
        EquityRequest {
            hole,
            board,
            opponents: 2,
            trials: 1000,
        }
    }

    #[test]
    fn test_slot_parsing() {
        let s = CardSlot::parse("A", "♠").unwrap();
        assert_eq!(s.card(), Some("As".parse().unwrap()));

        let s = CardSlot::parse("T", "").unwrap();
        assert_eq!(s.rank, Some(Rank::Ten));
        assert_eq!(s.card(), None);

        assert_eq!(CardSlot::parse("", "").unwrap(), CardSlot::empty());
        assert!(CardSlot::parse("X", "h").is_err());
        assert!(CardSlot::parse("10", "h").is_err());
    }

    #[test]
    fn test_valid_request() {
        let req = request(
            [slot("Kd"), slot("Ah")],
            vec![slot("2c"), CardSlot::empty(), slot("9s"), CardSlot::parse("J", "").unwrap()],
        );
        let valid = req.validate().unwrap();
        assert_eq!(valid.hole_cards.to_string(), "AhKd");
        // Partially selected board slots are not cards
        assert_eq!(valid.board.to_string(), "2c 9s");
        assert_eq!(valid.opponents, 2);
    }

    #[test]
    fn test_missing_hole_card() {
        let half = CardSlot::parse("A", "").unwrap();
        let err = request([slot("As"), half], vec![]).validate().unwrap_err();
        assert_eq!(err, EquityError::MissingHoleCard { index: 1 });

        let err = request([CardSlot::empty(), slot("As")], vec![]).validate().unwrap_err();
        assert_eq!(err, EquityError::MissingHoleCard { index: 0 });
    }

    #[test]
    fn test_duplicate_hole_cards() {
        let err = request([slot("As"), slot("As")], vec![]).validate().unwrap_err();
        assert_eq!(err.kind(), "duplicate_card");
    }

    #[test]
    fn test_duplicate_hole_and_board() {
        let err = request([slot("As"), slot("Kd")], vec![slot("7h"), slot("Kd")])
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            EquityError::DuplicateCard {
                card: "Kd".parse().unwrap()
            }
        );
    }

    #[test]
    fn test_too_many_board_cards() {
        let board = ["2c", "3c", "4c", "5c", "6c", "7c"].iter().map(|s| slot(s)).collect();
        let err = request([slot("As"), slot("Kd")], board).validate().unwrap_err();
        assert_eq!(err, EquityError::TooManyBoardCards { count: 6 });
    }

    #[test]
    fn test_opponent_and_trial_bounds() {
        let mut req = request([slot("As"), slot("Kd")], vec![]);
        req.opponents = 9;
        assert_eq!(
            req.validate().unwrap_err(),
            EquityError::InvalidOpponentCount { count: 9 }
        );

        req.opponents = 1;
        req.trials = 0;
        assert_eq!(req.validate().unwrap_err(), EquityError::InvalidTrialCount);
    }

    #[test]
    fn test_request_from_json() {
        let req: EquityRequest = serde_json::from_str(
            r#"{
                "hole": [{ "rank": "Ace", "suit": "Spades" }, { "rank": "King", "suit": "Spades" }],
                "board": [{ "rank": "Queen", "suit": "Spades" }, { "rank": null, "suit": null }],
                "opponents": 3,
                "trials": 2000
            }"#,
        )
        .unwrap();
        let valid = req.validate().unwrap();
        assert!(valid.hole_cards.is_suited());
        assert_eq!(valid.board.len(), 1);
    }
}
