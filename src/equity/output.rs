//! Interpretation of equity results for display.

use std::fmt;

use serde::Serialize;

use super::calculator::EquityResult;
use crate::poker::card::{Board, HoleCards};

/// Coarse hand-strength label for a win probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum StrengthCategory {
    /// Below 30%.
    VeryWeak,
    /// 30% to 40%.
    Weak,
    /// 40% to 50%.
    Average,
    /// 50% to 65%.
    Strong,
    /// 65% to 80%.
    Premium,
    /// 80% and above.
    Monster,
}

impl StrengthCategory {
    /// Label a win probability in [0, 1].
    pub fn from_win_rate(win: f64) -> Self {
        match win {
            w if w >= 0.80 => StrengthCategory::Monster,
            w if w >= 0.65 => StrengthCategory::Premium,
            w if w >= 0.50 => StrengthCategory::Strong,
            w if w >= 0.40 => StrengthCategory::Average,
            w if w >= 0.30 => StrengthCategory::Weak,
            _ => StrengthCategory::VeryWeak,
        }
    }

    /// Get the category name.
    pub fn name(&self) -> &'static str {
        match self {
            StrengthCategory::Monster => "Monster hand",
            StrengthCategory::Premium => "Premium hand",
            StrengthCategory::Strong => "Strong hand",
            StrengthCategory::Average => "Average hand",
            StrengthCategory::Weak => "Weak hand",
            StrengthCategory::VeryWeak => "Very weak hand",
        }
    }
}

impl fmt::Display for StrengthCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Suggested line of play for a win probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayAdvice {
    /// 80% and above.
    PlayAggressively,
    /// 60% to 80%.
    RaiseOrBet,
    /// 45% to 60%.
    Situational,
    /// 30% to 45%.
    ContinueWithOdds,
    /// Below 30%.
    Fold,
}

impl PlayAdvice {
    /// Advice for a win probability in [0, 1].
    pub fn from_win_rate(win: f64) -> Self {
        let pct = win * 100.0;
        if pct >= 80.0 {
            PlayAdvice::PlayAggressively
        } else if pct >= 60.0 {
            PlayAdvice::RaiseOrBet
        } else if pct >= 45.0 {
            PlayAdvice::Situational
        } else if pct >= 30.0 {
            PlayAdvice::ContinueWithOdds
        } else {
            PlayAdvice::Fold
        }
    }

    /// One-sentence explanation.
    pub fn message(&self) -> &'static str {
        match self {
            PlayAdvice::PlayAggressively => {
                "This is a **very strong** hand. Play it aggressively."
            }
            PlayAdvice::RaiseOrBet => "This is a **strong** hand. Usually consider raising or betting.",
            PlayAdvice::Situational => {
                "This hand has **average** strength. Decide based on the situation."
            }
            PlayAdvice::ContinueWithOdds => {
                "This is a **weak** hand. Play carefully and continue only with good odds."
            }
            PlayAdvice::Fold => "This is a **very weak** hand. Folding is usually best.",
        }
    }
}

/// Text summary of a win-rate result.
///
/// An errored result is described by its error message alone.
pub fn describe(
    result: &EquityResult,
    hole_cards: &HoleCards,
    board: &Board,
    opponents: usize,
) -> String {
    if let Some(error) = &result.error {
        return format!("Error: {}", error);
    }

    let hand = format!(
        "{}{} {}{}",
        hole_cards.card1.rank(),
        hole_cards.card1.suit().symbol(),
        hole_cards.card2.rank(),
        hole_cards.card2.suit().symbol()
    );
    let win_pct = result.win * 100.0;
    let noun = if opponents == 1 { "opponent" } else { "opponents" };

    let mut text = if board.is_empty() {
        format!(
            "Hand **{}** ({}) has a **{:.1}%** win rate against **{} {}**.",
            hand,
            hole_cards.hand_class(),
            win_pct,
            opponents,
            noun
        )
    } else {
        let board_str: Vec<String> = board
            .cards()
            .iter()
            .map(|c| format!("{}{}", c.rank(), c.suit().symbol()))
            .collect();
        format!(
            "Hand **{}** ({}) on board **{}** has a **{:.1}%** win rate against **{} {}**.",
            hand,
            hole_cards.hand_class(),
            board_str.join(" "),
            win_pct,
            opponents,
            noun
        )
    };

    if result.tie > 0.0 {
        text.push_str(&format!(" It ties {:.1}% of the time.", result.tie * 100.0));
    }

    text.push_str("\n\n");
    text.push_str(PlayAdvice::from_win_rate(result.win).message());
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equity::error::EquityError;

    fn result(win: f64, tie: f64) -> EquityResult {
        EquityResult {
            win,
            tie,
            loss: 1.0 - win - tie,
            error: None,
        }
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(StrengthCategory::from_win_rate(0.85), StrengthCategory::Monster);
        assert_eq!(StrengthCategory::from_win_rate(0.80), StrengthCategory::Monster);
        assert_eq!(StrengthCategory::from_win_rate(0.70), StrengthCategory::Premium);
        assert_eq!(StrengthCategory::from_win_rate(0.50), StrengthCategory::Strong);
        assert_eq!(StrengthCategory::from_win_rate(0.45), StrengthCategory::Average);
        assert_eq!(StrengthCategory::from_win_rate(0.30), StrengthCategory::Weak);
        assert_eq!(StrengthCategory::from_win_rate(0.10), StrengthCategory::VeryWeak);
        assert!(StrengthCategory::Monster > StrengthCategory::Weak);
    }

    #[test]
    fn test_advice_thresholds() {
        assert_eq!(PlayAdvice::from_win_rate(0.81), PlayAdvice::PlayAggressively);
        assert_eq!(PlayAdvice::from_win_rate(0.60), PlayAdvice::RaiseOrBet);
        assert_eq!(PlayAdvice::from_win_rate(0.45), PlayAdvice::Situational);
        assert_eq!(PlayAdvice::from_win_rate(0.31), PlayAdvice::ContinueWithOdds);
        assert_eq!(PlayAdvice::from_win_rate(0.12), PlayAdvice::Fold);
    }

    #[test]
    fn test_describe_preflop() {
        let hole: HoleCards = "AsKs".parse().unwrap();
        let text = describe(&result(0.642, 0.0), &hole, &Board::new(), 2);
        assert!(text.starts_with("Hand **A♠ K♠** (AKs) has a **64.2%** win rate against **2 opponents**."));
        assert!(text.contains("**strong**"));
        assert!(!text.contains("ties"));
    }

    #[test]
    fn test_describe_with_board() {
        let hole: HoleCards = "7h2c".parse().unwrap();
        let board: Board = "Ad 9c 4s".parse().unwrap();
        let text = describe(&result(0.05, 0.02), &hole, &board, 1);
        assert!(text.contains("on board **A♦ 9♣ 4♠**"));
        assert!(text.contains("against **1 opponent**"));
        assert!(text.contains("ties 2.0%"));
        assert!(text.contains("**very weak**"));
    }

    #[test]
    fn test_describe_error() {
        let hole: HoleCards = "AsKs".parse().unwrap();
        let failed = EquityResult::failed(EquityError::MissingHoleCard { index: 0 });
        let text = describe(&failed, &hole, &Board::new(), 1);
        assert_eq!(text, "Error: hole card 1 is not fully specified");
    }
}
