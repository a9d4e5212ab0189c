//! Monte Carlo equity aggregation.
//!
//! Trials are split into fixed-size chunks. Each chunk owns a random stream
//! seeded from the run seed and its chunk index, runs its trials
//! sequentially and returns a `Tally`; chunks run in parallel on rayon and
//! the tallies are merged with a reduction. A fixed seed therefore gives the
//! same estimate on any number of threads.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::config::EquityConfig;
use super::error::EquityError;
use super::input::EquityRequest;
use super::simulation::{Outcome, TrialSetup};
use crate::poker::card::{Board, HoleCards};

/// Trials run by one chunk on one random stream.
pub const TRIALS_PER_CHUNK: u64 = 1024;

/// Win/tie/loss counts over a number of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Trials won outright.
    pub wins: u64,
    /// Trials tied.
    pub ties: u64,
    /// Trials lost.
    pub losses: u64,
}

impl Tally {
    /// Count one trial outcome.
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Tie => self.ties += 1,
            Outcome::Loss => self.losses += 1,
        }
    }

    /// Combine two partial tallies.
    pub fn merge(self, other: Self) -> Self {
        Self {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
        }
    }

    /// Total trials counted.
    pub fn trials(&self) -> u64 {
        self.wins + self.ties + self.losses
    }
}

/// A completed equity estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equity {
    /// Fraction of trials won outright.
    pub win: f64,
    /// Fraction of trials tied.
    pub tie: f64,
    /// Remaining fraction, `1 - win - tie`.
    pub loss: f64,
    /// Raw counts behind the fractions.
    pub tally: Tally,
    /// Seed that reproduces this estimate.
    pub seed: u64,
}

impl Equity {
    /// Reduce a tally of at least one trial to probabilities.
    fn from_tally(tally: Tally, seed: u64) -> Self {
        let trials = tally.trials() as f64;
        let win = tally.wins as f64 / trials;
        let tie = tally.ties as f64 / trials;
        Self {
            win,
            tie,
            loss: (1.0 - win - tie).max(0.0),
            tally,
            seed,
        }
    }
}

/// Equity as handed to the presentation layer.
///
/// When `error` is set the probabilities are all zero and are not an
/// estimate; the error must be shown instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityResult {
    /// Win probability.
    pub win: f64,
    /// Tie probability.
    pub tie: f64,
    /// Loss probability.
    pub loss: f64,
    /// Why no estimate was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<EquityError>,
}

impl EquityResult {
    /// A failed calculation with zeroed probabilities.
    pub fn failed(error: EquityError) -> Self {
        Self {
            win: 0.0,
            tie: 0.0,
            loss: 0.0,
            error: Some(error),
        }
    }

    /// Check if this result holds a real estimate.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl From<Result<Equity, EquityError>> for EquityResult {
    fn from(result: Result<Equity, EquityError>) -> Self {
        match result {
            Ok(equity) => Self {
                win: equity.win,
                tie: equity.tie,
                loss: equity.loss,
                error: None,
            },
            Err(error) => Self::failed(error),
        }
    }
}

/// Cooperative cancellation flag, checked between trials.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token that is not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every run holding a clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Seed for one chunk's random stream (splitmix64 finalizer).
fn chunk_seed(seed: u64, chunk: usize) -> u64 {
    let mut z = seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Monte Carlo equity calculator.
#[derive(Debug, Clone, Default)]
pub struct EquityCalculator {
    config: EquityConfig,
}

impl EquityCalculator {
    /// Create a calculator with the given configuration.
    pub fn new(config: EquityConfig) -> Self {
        Self { config }
    }

    /// Get reference to the configuration.
    pub fn config(&self) -> &EquityConfig {
        &self.config
    }

    /// Estimate the player's win/tie/loss probabilities.
    pub fn estimate(&self, hole_cards: HoleCards, board: &Board) -> Result<Equity, EquityError> {
        self.estimate_with_cancel(hole_cards, board, &CancelToken::new())
    }

    /// Estimate equity, stopping early with `Cancelled` if `cancel` fires.
    ///
    /// All validation happens before the first trial; an invalid input runs
    /// no trials at all.
    pub fn estimate_with_cancel(
        &self,
        hole_cards: HoleCards,
        board: &Board,
        cancel: &CancelToken,
    ) -> Result<Equity, EquityError> {
        self.config.validate()?;
        let setup = TrialSetup::new(hole_cards, board, self.config.opponents)?;
        let seed = self.config.seed.unwrap_or_else(rand::random);

        log::debug!(
            "estimating {} on [{}] vs {} opponents: {} trials, seed {}, tie rule {}",
            hole_cards,
            board,
            self.config.opponents,
            self.config.trials,
            seed,
            self.config.tie_rule
        );

        let start = Instant::now();
        let tally = match self.config.num_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| EquityError::ThreadPool {
                    reason: e.to_string(),
                })?
                .install(|| self.run_chunks(&setup, seed, cancel)),
            None => self.run_chunks(&setup, seed, cancel),
        };

        let tally = match tally {
            Err(EquityError::Cancelled) => {
                log::warn!("equity run for {} cancelled, discarding partial trials", hole_cards);
                return Err(EquityError::Cancelled);
            }
            other => other?,
        };

        let equity = Equity::from_tally(tally, seed);
        log::info!(
            "{} on [{}]: win {:.4} tie {:.4} loss {:.4} ({} trials in {:.2}s)",
            hole_cards,
            board,
            equity.win,
            equity.tie,
            equity.loss,
            tally.trials(),
            start.elapsed().as_secs_f64()
        );
        Ok(equity)
    }

    fn run_chunks(
        &self,
        setup: &TrialSetup,
        seed: u64,
        cancel: &CancelToken,
    ) -> Result<Tally, EquityError> {
        let trials = self.config.trials;
        let tie_rule = self.config.tie_rule;
        let chunks = trials.div_ceil(TRIALS_PER_CHUNK);

        let progress = if self.config.show_progress {
            let bar = ProgressBar::new(trials);
            if let Ok(style) =
                ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} trials ({eta})")
            {
                bar.set_style(style);
            }
            bar
        } else {
            ProgressBar::hidden()
        };

        let result = (0..chunks as usize)
            .into_par_iter()
            .map(|chunk| {
                let first = chunk as u64 * TRIALS_PER_CHUNK;
                let count = TRIALS_PER_CHUNK.min(trials - first);
                let mut rng = StdRng::seed_from_u64(chunk_seed(seed, chunk));

                let mut tally = Tally::default();
                for _ in 0..count {
                    if cancel.is_cancelled() {
                        return Err(EquityError::Cancelled);
                    }
                    tally.record(setup.run_trial(&mut rng, tie_rule)?);
                }
                progress.inc(count);
                Ok(tally)
            })
            .try_reduce(Tally::default, |a, b| Ok(a.merge(b)));

        progress.finish_and_clear();
        result
    }

    /// Estimate equity for a request entered through card selectors.
    ///
    /// The request's opponent and trial counts override the configuration.
    pub fn calculate(&self, request: &EquityRequest) -> Result<Equity, EquityError> {
        let valid = request.validate()?;
        let config = self
            .config
            .clone()
            .with_opponents(valid.opponents)
            .with_trials(valid.trials);
        EquityCalculator::new(config).estimate(valid.hole_cards, &valid.board)
    }
}

/// Estimate equity with default settings and an entropy seed.
pub fn estimate_equity(
    hole_cards: HoleCards,
    board: &Board,
    opponents: usize,
    trials: u64,
) -> EquityResult {
    let config = EquityConfig::default()
        .with_opponents(opponents)
        .with_trials(trials);
    EquityCalculator::new(config).estimate(hole_cards, board).into()
}

/// Validate selector input and estimate equity, reporting any error inline.
pub fn calculate_win_rate(request: &EquityRequest, config: &EquityConfig) -> EquityResult {
    EquityCalculator::new(config.clone()).calculate(request).into()
}
