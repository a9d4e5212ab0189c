//! Single Monte Carlo trial.
//!
//! A trial completes the board from the deck of unseen cards, deals two cards
//! to every opponent, scores all 7-card hands and classifies the result for
//! the evaluated player. Trials share nothing but the random stream.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{MAX_OPPONENTS, MIN_OPPONENTS};
use super::error::EquityError;
use crate::poker::card::{Board, Card, HoleCards};
use crate::poker::deck::Deck;
use crate::poker::hand_eval::{HandEvaluator, HandRank};

/// Result of one trial from the evaluated player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Strictly better than every opponent.
    Win,
    /// Split with at least one opponent.
    Tie,
    /// Beaten.
    Loss,
}

/// How ties are classified when several opponents reach showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieRule {
    /// Loss if any opponent is strictly better, otherwise tie if any
    /// opponent is equal, otherwise win.
    Standard,
    /// Tie whenever any opponent matches the player, even if another
    /// opponent is strictly better.
    #[default]
    AnyMatch,
}

impl TieRule {
    /// Classify the player's score against every opponent score.
    pub fn classify<I>(self, player: HandRank, opponents: I) -> Outcome
    where
        I: IntoIterator<Item = HandRank>,
    {
        let mut beaten = false;
        let mut matched = false;
        for opponent in opponents {
            if opponent > player {
                beaten = true;
            } else if opponent == player {
                matched = true;
            }
        }

        match self {
            TieRule::Standard if beaten => Outcome::Loss,
            TieRule::AnyMatch if matched => Outcome::Tie,
            _ if beaten => Outcome::Loss,
            _ if matched => Outcome::Tie,
            _ => Outcome::Win,
        }
    }
}

impl FromStr for TieRule {
    type Err = EquityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "standard" => Ok(TieRule::Standard),
            "any_match" => Ok(TieRule::AnyMatch),
            _ => Err(EquityError::Config {
                reason: format!("unknown tie rule {:?}", s),
            }),
        }
    }
}

impl fmt::Display for TieRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieRule::Standard => write!(f, "standard"),
            TieRule::AnyMatch => write!(f, "any-match"),
        }
    }
}

/// Cards dealt in one trial.
#[derive(Debug, Clone)]
pub struct Deal {
    /// Completed five-card board: known cards first, then drawn cards.
    pub board: [Card; 5],
    hands: [[Card; 2]; MAX_OPPONENTS],
    opponents: usize,
}

impl Deal {
    /// Two-card hands dealt to the opponents.
    pub fn opponent_hands(&self) -> &[[Card; 2]] {
        &self.hands[..self.opponents]
    }
}

/// Fixed inputs for a series of trials, validated once.
#[derive(Debug, Clone)]
pub struct TrialSetup {
    hole_cards: HoleCards,
    board: [Card; 5],
    known_board: usize,
    opponents: usize,
    deck: Deck,
    evaluator: HandEvaluator,
}

impl TrialSetup {
    /// Validate the inputs and build the deck of unseen cards.
    ///
    /// Fails with `DuplicateCard` if a card is repeated across hole cards
    /// and board, `InvalidOpponentCount` outside 1-8, and
    /// `InsufficientCards` if the deck cannot cover the deal.
    pub fn new(hole_cards: HoleCards, board: &Board, opponents: usize) -> Result<Self, EquityError> {
        if !(MIN_OPPONENTS..=MAX_OPPONENTS).contains(&opponents) {
            return Err(EquityError::InvalidOpponentCount { count: opponents });
        }

        let mut known = Vec::with_capacity(7);
        known.extend_from_slice(&hole_cards.cards());
        known.extend_from_slice(board.cards());
        let deck = Deck::without(&known)?;

        let needed = board.missing() + 2 * opponents;
        if needed > deck.remaining() {
            return Err(EquityError::InsufficientCards {
                requested: needed,
                remaining: deck.remaining(),
            });
        }

        let mut full_board = [hole_cards.card1; 5];
        full_board[..board.len()].copy_from_slice(board.cards());

        Ok(Self {
            hole_cards,
            board: full_board,
            known_board: board.len(),
            opponents,
            deck,
            evaluator: HandEvaluator::new(),
        })
    }

    /// Number of opponents per trial.
    pub fn opponents(&self) -> usize {
        self.opponents
    }

    /// Deal the missing board cards and the opponents' hands.
    pub fn deal<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Deal, EquityError> {
        let mut deck = self.deck.clone();

        let mut board = self.board;
        deck.draw_into(rng, &mut board[self.known_board..])?;

        let mut dealt = [self.hole_cards.card1; 2 * MAX_OPPONENTS];
        deck.draw_into(rng, &mut dealt[..2 * self.opponents])?;

        let mut hands = [[self.hole_cards.card1; 2]; MAX_OPPONENTS];
        for (hand, pair) in hands.iter_mut().zip(dealt.chunks_exact(2)) {
            *hand = [pair[0], pair[1]];
        }

        Ok(Deal {
            board,
            hands,
            opponents: self.opponents,
        })
    }

    /// Score a deal and classify it for the player.
    pub fn score(&self, deal: &Deal, tie_rule: TieRule) -> Outcome {
        let mut cards = [self.hole_cards.card1; 7];
        cards[2..].copy_from_slice(&deal.board);

        cards[1] = self.hole_cards.card2;
        let player = self.evaluator.evaluate(&cards);

        let opponents = deal.opponent_hands().iter().map(|hand| {
            let mut cards = cards;
            cards[0] = hand[0];
            cards[1] = hand[1];
            self.evaluator.evaluate(&cards)
        });

        tie_rule.classify(player, opponents)
    }

    /// Run one complete trial.
    pub fn run_trial<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        tie_rule: TieRule,
    ) -> Result<Outcome, EquityError> {
        let deal = self.deal(rng)?;
        Ok(self.score(&deal, tie_rule))
    }
}

/// Run a single trial for the given inputs with the default tie rule.
pub fn run_trial<R: Rng + ?Sized>(
    hole_cards: HoleCards,
    board: &Board,
    opponents: usize,
    rng: &mut R,
) -> Result<Outcome, EquityError> {
    TrialSetup::new(hole_cards, board, opponents)?.run_trial(rng, TieRule::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::card::{parse_cards, Suit};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hole(s: &str) -> HoleCards {
        s.parse().unwrap()
    }

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn rank(s: &str) -> HandRank {
        HandEvaluator::new().evaluate(&parse_cards(s).unwrap())
    }

    #[test]
    fn test_classify_heads_up() {
        let strong = rank("As Ah Ad Kc Qd");
        let weak = rank("2s 2h 7d 9c Jd");

        for rule in [TieRule::Standard, TieRule::AnyMatch] {
            assert_eq!(rule.classify(strong, [weak]), Outcome::Win);
            assert_eq!(rule.classify(weak, [strong]), Outcome::Loss);
            assert_eq!(rule.classify(strong, [strong]), Outcome::Tie);
        }
    }

    #[test]
    fn test_classify_multiway_tie_rules() {
        let best = rank("As Ah Ad Kc Qd");
        let middle = rank("Ks Kh 7d 9c Jd");
        let worst = rank("2s 3h 7d 9c Jd");

        // Tied with one opponent, another is strictly better
        assert_eq!(TieRule::Standard.classify(middle, [middle, best]), Outcome::Loss);
        assert_eq!(TieRule::AnyMatch.classify(middle, [middle, best]), Outcome::Tie);

        // Tied with one opponent, the other is worse
        assert_eq!(TieRule::Standard.classify(middle, [middle, worst]), Outcome::Tie);
        assert_eq!(TieRule::AnyMatch.classify(middle, [worst, middle]), Outcome::Tie);

        // Beats everyone
        assert_eq!(TieRule::Standard.classify(best, [middle, worst]), Outcome::Win);
    }

    #[test]
    fn test_default_rule_ties_on_any_match() {
        let kings = rank("Ks Kh 7d 9c Jd");
        let trips = rank("As Ah Ad 9c Jd");
        assert_eq!(TieRule::default(), TieRule::AnyMatch);
        assert_eq!(TieRule::default().classify(kings, [kings, trips]), Outcome::Tie);
    }

    #[test]
    fn test_mirrored_hands_tie() {
        let known = board("Qc 7s 4h 3d 2c");
        let setup = TrialSetup::new(hole("AhKh"), &known, 1).unwrap();
        let mirror = hole("AdKd").cards();

        let mut full_board = [known.cards()[0]; 5];
        full_board.copy_from_slice(known.cards());
        let deal = Deal {
            board: full_board,
            hands: [mirror; MAX_OPPONENTS],
            opponents: 1,
        };
        for rule in [TieRule::Standard, TieRule::AnyMatch] {
            assert_eq!(setup.score(&deal, rule), Outcome::Tie);
        }
    }

    #[test]
    fn test_mirrored_hands_tie_on_random_boards() {
        let player = hole("AhKh");
        let mirror = hole("AdKd");
        let evaluator = HandEvaluator::new();
        let base = Deck::without(&[player.card1, player.card2, mirror.card1, mirror.card2]).unwrap();
        let mut rng = StdRng::seed_from_u64(21);

        let mut checked = 0;
        while checked < 500 {
            let drawn = base.clone().draw(&mut rng, 5).unwrap();
            let suited = |suit: Suit| drawn.iter().filter(|c| c.suit() == suit).count();
            // Three board cards of a hole suit would let one side flush
            if suited(Suit::Hearts) >= 3 || suited(Suit::Diamonds) >= 3 {
                continue;
            }
            let known = Board::from_cards(drawn).unwrap();
            let ours = evaluator.evaluate_hand(&player, &known);
            let theirs = evaluator.evaluate_hand(&mirror, &known);
            assert_eq!(ours, theirs, "board {}", known);
            assert_eq!(TieRule::Standard.classify(ours, [theirs]), Outcome::Tie);
            checked += 1;
        }
    }

    #[test]
    fn test_tie_rule_parsing() {
        assert_eq!("standard".parse::<TieRule>().unwrap(), TieRule::Standard);
        assert_eq!("any-match".parse::<TieRule>().unwrap(), TieRule::AnyMatch);
        assert_eq!("ANY_MATCH".parse::<TieRule>().unwrap(), TieRule::AnyMatch);
        assert!("sometimes".parse::<TieRule>().is_err());
        assert_eq!(TieRule::AnyMatch.to_string().parse::<TieRule>().unwrap(), TieRule::AnyMatch);
    }

    #[test]
    fn test_setup_rejects_duplicates() {
        let err = TrialSetup::new(hole("AsKd"), &board("Qh As 2c"), 1).unwrap_err();
        assert_eq!(
            err,
            EquityError::DuplicateCard {
                card: "As".parse().unwrap()
            }
        );

        let err = TrialSetup::new(hole("AsAs"), &Board::new(), 1).unwrap_err();
        assert_eq!(err.kind(), "duplicate_card");
    }

    #[test]
    fn test_setup_rejects_opponent_count() {
        for count in [0, 9] {
            let err = TrialSetup::new(hole("AsKd"), &Board::new(), count).unwrap_err();
            assert_eq!(err, EquityError::InvalidOpponentCount { count });
        }
    }

    #[test]
    fn test_board_completion_invariant() {
        let mut rng = StdRng::seed_from_u64(3);
        let player = hole("Ah Kh");
        for known in ["", "2c 7d 9s", "2c 7d 9s Jc", "2c 7d 9s Jc 4h"] {
            let known = board(known);
            for opponents in [1, 4, 8] {
                let setup = TrialSetup::new(player, &known, opponents).unwrap();
                for _ in 0..50 {
                    let deal = setup.deal(&mut rng).unwrap();

                    // Known cards stay in place
                    assert_eq!(&deal.board[..known.len()], known.cards());
                    assert_eq!(deal.opponent_hands().len(), opponents);

                    // All dealt and known cards are mutually distinct
                    let mut mask = 0u64;
                    let all = player
                        .cards()
                        .into_iter()
                        .chain(deal.board)
                        .chain(deal.opponent_hands().iter().flatten().copied());
                    let mut count = 0;
                    for card in all {
                        assert_eq!(mask & card.mask(), 0, "{} dealt twice", card);
                        mask |= card.mask();
                        count += 1;
                    }
                    assert_eq!(count, 2 + 5 + 2 * opponents);
                }
            }
        }
    }

    #[test]
    fn test_full_board_split_pot() {
        // Board plays for both players: broadway straight on board
        let setup = TrialSetup::new(hole("2c 3d"), &board("Ah Kd Qs Jc Th"), 1).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        // Only two hearts on board, so no flush or better is possible
        for _ in 0..200 {
            assert_eq!(setup.run_trial(&mut rng, TieRule::Standard).unwrap(), Outcome::Tie);
        }
    }

    #[test]
    fn test_nut_hand_always_wins() {
        // Royal flush in hand with the board; nobody can match it
        let setup = TrialSetup::new(hole("As Ks"), &board("Qs Js Ts 2d 3c"), 8).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            assert_eq!(setup.run_trial(&mut rng, TieRule::Standard).unwrap(), Outcome::Win);
        }
    }

    #[test]
    fn test_run_trial_is_deterministic_for_a_seed() {
        let player = hole("9h 9d");
        let known = board("2s 5c");
        let a: Vec<Outcome> = {
            let mut rng = StdRng::seed_from_u64(77);
            (0..100)
                .map(|_| run_trial(player, &known, 3, &mut rng).unwrap())
                .collect()
        };
        let b: Vec<Outcome> = {
            let mut rng = StdRng::seed_from_u64(77);
            (0..100)
                .map(|_| run_trial(player, &known, 3, &mut rng).unwrap())
                .collect()
        };
        assert_eq!(a, b);
    }
}
