//! Hold'em equity calculator.
//!
//! Estimates win/tie/loss probabilities for a starting hand on an optional
//! board against random opponents.
//!
//! Example: `holdem-equity --hole AsKs --board "Qs Js 2d" -o 3 -n 10000`

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use holdem_equity::equity::{
    describe, EquityCalculator, EquityConfig, EquityError, EquityResult, StrengthCategory, TieRule,
};
use holdem_equity::poker::{Board, HoleCards};

#[derive(Parser, Debug)]
#[command(
    name = "holdem-equity",
    about = "Estimate Texas Hold'em hand equity with Monte Carlo simulation"
)]
struct Args {
    /// Hole cards, e.g. "AsKs" or "A♠ K♠"
    #[arg(long)]
    hole: HoleCards,

    /// Known community cards (0-5), e.g. "Qs Js 2d"
    #[arg(long, default_value = "")]
    board: Board,

    /// Number of opponents (1-8)
    #[arg(short = 'o', long)]
    opponents: Option<usize>,

    /// Number of trials
    #[arg(short = 'n', long)]
    trials: Option<u64>,

    /// Random seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Tie classification: "standard" or "any-match"
    #[arg(long)]
    tie_rule: Option<TieRule>,

    /// JSON configuration file; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,
}

impl Args {
    fn equity_config(&self) -> Result<EquityConfig, EquityError> {
        let mut config = match &self.config {
            Some(path) => EquityConfig::from_json_file(path)?,
            None => EquityConfig::default(),
        };
        if let Some(opponents) = self.opponents {
            config = config.with_opponents(opponents);
        }
        if let Some(trials) = self.trials {
            config = config.with_trials(trials);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        if let Some(tie_rule) = self.tie_rule {
            config = config.with_tie_rule(tie_rule);
        }
        let show_progress = self.progress || config.show_progress;
        Ok(config.with_progress(show_progress))
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let config = match args.equity_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let opponents = config.opponents;
    let trials = config.trials;

    let start = Instant::now();
    let estimate = EquityCalculator::new(config).estimate(args.hole, &args.board);
    let elapsed = start.elapsed();

    let seed = estimate.as_ref().ok().map(|e| e.seed);
    let result = EquityResult::from(estimate);

    if args.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing result: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        println!("=== Hold'em Equity ===\n");
        println!("{}", describe(&result, &args.hole, &args.board, opponents));
        if result.is_ok() {
            println!();
            println!("Win:  {:>6.2}%", result.win * 100.0);
            println!("Tie:  {:>6.2}%", result.tie * 100.0);
            println!("Loss: {:>6.2}%", result.loss * 100.0);
            println!("Strength: {}", StrengthCategory::from_win_rate(result.win));
            println!();
            println!(
                "{} trials in {:.2}s (seed {})",
                trials,
                elapsed.as_secs_f64(),
                seed.unwrap_or_default()
            );
        }
    }

    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
