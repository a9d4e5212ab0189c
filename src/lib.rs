//! # Hold'em Equity
//!
//! Monte Carlo equity calculator for Texas Hold'em.
//!
//! Given a player's two hole cards, zero to five known community cards and a
//! number of opponents, the calculator estimates how often the player wins,
//! ties or loses at showdown.
//!
//! ## Features
//!
//! - **Native Evaluator**: Closed-form 5-7 card ranking with full kicker tie-breaks
//! - **Unbiased Sampling**: Partial Fisher-Yates draws from the unseen cards
//! - **Parallel Trials**: Seeded chunks on rayon, reproducible on any thread count
//! - **Cancellation**: Runs can be aborted between trials
//!
//! ## Modules
//!
//! - [`poker`]: Cards, deck and hand evaluation
//! - [`equity`]: Trial simulation, aggregation and result interpretation
//!
//! ## Architecture
//!
//! ```text
//!  ┌──────────┐    ┌──────────┐    ┌──────────────┐    ┌──────────────────┐
//!  │   Card   │───▶│   Deck   │───▶│ TrialSetup   │───▶│ EquityCalculator │
//!  │  model   │    │ (unseen) │    │ (one trial)  │    │  (N trials)      │
//!  └──────────┘    └──────────┘    └──────┬───────┘    └────────┬─────────┘
//!                                         │                     │
//!                                         ▼                     ▼
//!                                  ┌──────────────┐     win / tie / loss
//!                                  │HandEvaluator │
//!                                  └──────────────┘
//! ```

#![warn(missing_docs)]

/// Card model, deck and hand evaluator.
pub mod poker;

/// Monte Carlo equity estimation.
pub mod equity;

// Re-export commonly used types at crate root for convenience
pub use equity::{estimate_equity, Equity, EquityCalculator, EquityConfig, EquityError, EquityResult};
pub use poker::{Board, Card, HandEvaluator, HandRank, HoleCards};
