//! Card model, deck and hand evaluation.
//!
//! ## Modules
//!
//! - `card`: Card, rank, suit, hole cards and board representations
//! - `deck`: The 52-card deck with known cards removed and random draws
//! - `hand_eval`: 5-7 card hand evaluation

pub mod card;
pub mod deck;
pub mod hand_eval;

// Re-export commonly used types
pub use card::{parse_cards, Board, Card, HandClass, HoleCards, Rank, Suit};
pub use deck::Deck;
pub use hand_eval::{HandCategory, HandEvaluator, HandRank};
