//! Error types for equity estimation.

use serde::Serialize;
use thiserror::Error;

use crate::poker::card::Card;

/// Every way an equity calculation can fail.
///
/// Validation errors are detected once, before any trial runs, and are
/// deterministic for a given input.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EquityError {
    /// A hole card's rank or suit is unspecified (`index` is 0 or 1).
    #[error("hole card {} is not fully specified", .index + 1)]
    MissingHoleCard {
        /// Zero-based hole card position.
        index: usize,
    },

    /// The same card appears more than once among hole and board cards.
    #[error("card {card} is used more than once; every card must be unique")]
    DuplicateCard {
        /// The repeated card.
        card: Card,
    },

    /// A draw asked for more cards than the deck holds.
    #[error("cannot draw {requested} cards, only {remaining} remain in the deck")]
    InsufficientCards {
        /// Cards the draw needed.
        requested: usize,
        /// Cards left in the deck.
        remaining: usize,
    },

    /// Text that does not name a card.
    #[error("invalid card: {input:?}")]
    InvalidCard {
        /// The rejected text.
        input: String,
    },

    /// More than five community cards.
    #[error("board has {count} cards, at most 5 are allowed")]
    TooManyBoardCards {
        /// Cards supplied.
        count: usize,
    },

    /// Opponent count outside 1..=8.
    #[error("opponent count {count} is out of range [1, 8]")]
    InvalidOpponentCount {
        /// Opponents requested.
        count: usize,
    },

    /// Zero trials requested.
    #[error("trial count must be positive")]
    InvalidTrialCount,

    /// The caller cancelled the run; no estimate is produced.
    #[error("simulation cancelled before all trials completed")]
    Cancelled,

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {reason}")]
    ThreadPool {
        /// Message from rayon.
        reason: String,
    },

    /// A configuration file could not be read or parsed.
    #[error("invalid configuration: {reason}")]
    Config {
        /// What was wrong with the configuration.
        reason: String,
    },
}

impl EquityError {
    /// Stable identifier of the error variant.
    pub fn kind(&self) -> &'static str {
        match self {
            EquityError::MissingHoleCard { .. } => "missing_hole_card",
            EquityError::DuplicateCard { .. } => "duplicate_card",
            EquityError::InsufficientCards { .. } => "insufficient_cards",
            EquityError::InvalidCard { .. } => "invalid_card",
            EquityError::TooManyBoardCards { .. } => "too_many_board_cards",
            EquityError::InvalidOpponentCount { .. } => "invalid_opponent_count",
            EquityError::InvalidTrialCount => "invalid_trial_count",
            EquityError::Cancelled => "cancelled",
            EquityError::ThreadPool { .. } => "thread_pool",
            EquityError::Config { .. } => "config",
        }
    }
}
