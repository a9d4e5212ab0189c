//! Monte Carlo equity estimation.
//!
//! This module turns hole cards, a partial board and an opponent count into
//! win/tie/loss probabilities by simulating random run-outs and opponent
//! holdings.
//!
//! # Overview
//!
//! 1. Inputs are validated once (`input`, `simulation::TrialSetup`)
//! 2. Each trial completes the board, deals opponents and scores every hand
//! 3. Trials run in seeded chunks on rayon and their tallies are merged
//!
//! # Example
//!
//! ```
//! use holdem_equity::equity::{EquityCalculator, EquityConfig};
//! use holdem_equity::poker::{Board, HoleCards};
//!
//! let hole: HoleCards = "AsAh".parse().unwrap();
//! let config = EquityConfig::default().with_trials(2000).with_seed(1);
//! let equity = EquityCalculator::new(config).estimate(hole, &Board::new()).unwrap();
//! assert!(equity.win > 0.75);
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod simulation;

// Re-export main types for convenient access
pub use calculator::{
    calculate_win_rate, estimate_equity, CancelToken, Equity, EquityCalculator, EquityResult, Tally,
};
pub use config::{EquityConfig, MAX_OPPONENTS, MIN_OPPONENTS, RECOMMENDED_TRIALS};
pub use error::EquityError;
pub use input::{CardSlot, EquityRequest, ValidatedRequest};
pub use output::{describe, PlayAdvice, StrengthCategory};
pub use simulation::{run_trial, Deal, Outcome, TieRule, TrialSetup};
