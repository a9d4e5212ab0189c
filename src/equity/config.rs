//! Configuration options for equity estimation.
//!
//! This module provides the configuration struct that controls how the
//! Monte Carlo estimate is run: table size, sample budget, seeding, worker
//! threads and the tie rule.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::EquityError;
use super::simulation::TieRule;

/// Fewest opponents a calculation accepts.
pub const MIN_OPPONENTS: usize = 1;

/// Most opponents a calculation accepts.
pub const MAX_OPPONENTS: usize = 8;

/// Trial counts the presentation layer offers.
pub const RECOMMENDED_TRIALS: std::ops::RangeInclusive<u64> = 1_000..=10_000;

/// Configuration for the equity calculator.
///
/// # Example
/// ```
/// use holdem_equity::equity::EquityConfig;
///
/// let config = EquityConfig::default().with_opponents(3).with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EquityConfig {
    /// Number of opponents dealt random hands (1-8).
    pub opponents: usize,

    /// Number of Monte Carlo trials.
    pub trials: u64,

    /// Random seed for reproducibility.
    ///
    /// If set, the same inputs always produce the same estimate regardless
    /// of thread count. If `None`, a seed is drawn from entropy.
    pub seed: Option<u64>,

    /// Number of worker threads.
    ///
    /// Set to `None` to use the global rayon pool (all available cores).
    pub num_threads: Option<usize>,

    /// How a trial where the player matches an opponent is classified.
    pub tie_rule: TieRule,

    /// Draw a progress bar on stderr while trials run.
    pub show_progress: bool,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            opponents: 1,
            trials: 5_000,
            seed: None,
            num_threads: None,
            tie_rule: TieRule::AnyMatch,
            show_progress: false,
        }
    }
}

impl EquityConfig {
    /// Create a new EquityConfig with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the number of opponents.
    pub fn with_opponents(mut self, opponents: usize) -> Self {
        self.opponents = opponents;
        self
    }

    /// Builder method: set the number of trials.
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Builder method: set random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder method: set number of threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.num_threads = Some(threads);
        self
    }

    /// Builder method: set the tie rule.
    pub fn with_tie_rule(mut self, tie_rule: TieRule) -> Self {
        self.tie_rule = tie_rule;
        self
    }

    /// Builder method: enable or disable the progress bar.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, EquityError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| EquityError::Config {
            reason: format!("{}: {}", path.as_ref().display(), e),
        })?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, EquityError> {
        let config: Self = serde_json::from_str(json).map_err(|e| EquityError::Config {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration and return any errors.
    pub fn validate(&self) -> Result<(), EquityError> {
        if !(MIN_OPPONENTS..=MAX_OPPONENTS).contains(&self.opponents) {
            return Err(EquityError::InvalidOpponentCount {
                count: self.opponents,
            });
        }

        if self.trials == 0 {
            return Err(EquityError::InvalidTrialCount);
        }

        if self.num_threads == Some(0) {
            return Err(EquityError::Config {
                reason: "num_threads must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = EquityConfig::default();
        assert!(config.validate().is_ok());
        assert!(RECOMMENDED_TRIALS.contains(&config.trials));
        assert_eq!(config.tie_rule, TieRule::AnyMatch);
    }

    #[test]
    fn test_opponent_bounds() {
        assert!(EquityConfig::new().with_opponents(8).validate().is_ok());
        assert_eq!(
            EquityConfig::new().with_opponents(0).validate(),
            Err(EquityError::InvalidOpponentCount { count: 0 })
        );
        assert_eq!(
            EquityConfig::new().with_opponents(9).validate(),
            Err(EquityError::InvalidOpponentCount { count: 9 })
        );
    }

    #[test]
    fn test_trials_must_be_positive() {
        assert_eq!(
            EquityConfig::new().with_trials(0).validate(),
            Err(EquityError::InvalidTrialCount)
        );
        // Outside the recommended range is still accepted
        assert!(EquityConfig::new().with_trials(1).validate().is_ok());
        assert!(EquityConfig::new().with_trials(250_000).validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let err = EquityConfig::new().with_threads(0).validate().unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_from_json_str() {
        let config = EquityConfig::from_json_str(
            r#"{ "opponents": 3, "trials": 2000, "seed": 7, "tie_rule": "standard" }"#,
        )
        .unwrap();
        assert_eq!(config.opponents, 3);
        assert_eq!(config.trials, 2000);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.tie_rule, TieRule::Standard);
        // Unlisted fields take defaults
        assert_eq!(config.num_threads, None);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_from_json_str_validates() {
        let err = EquityConfig::from_json_str(r#"{ "opponents": 12 }"#).unwrap_err();
        assert_eq!(err, EquityError::InvalidOpponentCount { count: 12 });

        let err = EquityConfig::from_json_str("not json").unwrap_err();
        assert_eq!(err.kind(), "config");
    }

    #[test]
    fn test_missing_file() {
        let err = EquityConfig::from_json_file("/nonexistent/equity.json").unwrap_err();
        assert_eq!(err.kind(), "config");
    }
}
