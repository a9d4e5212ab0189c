//! Card representation for poker.
//!
//! This module provides the fundamental card types used by the evaluator and
//! the equity simulation:
//! - `Rank` / `Suit`: the two card attributes, ranks valued 2-14 (Ace high)
//! - `Card`: A single playing card with rank and suit
//! - `HoleCards`: A player's two private cards
//! - `Board`: Community cards (0-5 cards)
//! - `HandClass`: Starting-hand label such as `AKs`, `QJo` or `88`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::equity::error::EquityError;

/// Rank characters for display, indexed by `rank - 2`.
const RANK_CHARS: [char; 13] = ['2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K', 'A'];

/// Suit characters for display, indexed by suit.
const SUIT_CHARS: [char; 4] = ['c', 'd', 'h', 's'];

/// Suit symbols as entered in the presentation layer.
const SUIT_SYMBOLS: [char; 4] = ['♣', '♦', '♥', '♠'];

/// Card rank. The discriminant is the poker value, so natural ordering
/// matches strength (Ace = 14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
    Ace = 14,
}

impl Rank {
    /// All thirteen ranks, deuce first.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Poker value of the rank (2-14).
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Rank from its poker value (2-14).
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            2..=14 => Some(Self::ALL[(value - 2) as usize]),
            _ => None,
        }
    }

    /// Parse a rank character (`2`-`9`, `T`, `J`, `Q`, `K`, `A`).
    pub fn from_char(c: char) -> Option<Self> {
        let upper = c.to_ascii_uppercase();
        RANK_CHARS
            .iter()
            .position(|&r| r == upper)
            .map(|i| Self::ALL[i])
    }

    /// Rank character for display.
    pub fn to_char(self) -> char {
        RANK_CHARS[(self.value() - 2) as usize]
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Suit index (0-3).
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Parse a suit from a letter (`c d h s`) or a symbol (`♣ ♦ ♥ ♠`).
    pub fn from_char(c: char) -> Option<Self> {
        let lower = c.to_ascii_lowercase();
        SUIT_CHARS
            .iter()
            .position(|&s| s == lower)
            .or_else(|| SUIT_SYMBOLS.iter().position(|&s| s == c))
            .map(|i| Self::ALL[i])
    }

    /// Suit letter for display.
    pub fn to_char(self) -> char {
        SUIT_CHARS[self.index() as usize]
    }

    /// Suit symbol for display.
    pub fn symbol(self) -> char {
        SUIT_SYMBOLS[self.index() as usize]
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A single playing card.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    /// Card index 0-51: (rank - 2) * 4 + suit
    id: u8,
}

impl Card {
    /// Create a new card from rank and suit.
    #[inline]
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self {
            id: (rank.value() - 2) * 4 + suit.index(),
        }
    }

    /// Create a card from its ID (0-51).
    #[inline]
    pub fn from_id(id: u8) -> Self {
        debug_assert!(id < 52, "card id must be 0-51");
        Self { id }
    }

    /// Get the card's ID (0-51).
    #[inline]
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Get the card's rank.
    #[inline]
    pub fn rank(&self) -> Rank {
        Rank::ALL[(self.id / 4) as usize]
    }

    /// Get the card's suit.
    #[inline]
    pub fn suit(&self) -> Suit {
        Suit::ALL[(self.id % 4) as usize]
    }

    /// Bit for this card in a 52-bit card mask.
    #[inline]
    pub fn mask(&self) -> u64 {
        1u64 << self.id
    }
}

impl FromStr for Card {
    type Err = EquityError;

    /// Parse a card from strings like "As", "Kh", "2c" or "T♠".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EquityError::InvalidCard {
            input: s.to_string(),
        };
        let mut chars = s.trim().chars();
        let rank = chars.next().and_then(Rank::from_char).ok_or_else(invalid)?;
        let suit = chars.next().and_then(Suit::from_char).ok_or_else(invalid)?;
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(rank, suit))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Split a card list such as "AhKs", "Ah Ks" or "A♥ K♠" into single cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, EquityError> {
    let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace() && *c != ',').collect();
    if chars.len() % 2 != 0 {
        return Err(EquityError::InvalidCard {
            input: s.to_string(),
        });
    }
    chars
        .chunks(2)
        .map(|pair| pair.iter().collect::<String>().parse())
        .collect()
}

/// A player's two hole cards.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HoleCards {
    /// First card (higher rank by convention).
    pub card1: Card,
    /// Second card.
    pub card2: Card,
}

impl HoleCards {
    /// Create hole cards, ordering by rank (higher first).
    pub fn new(card1: Card, card2: Card) -> Self {
        if card1.rank() >= card2.rank() {
            Self { card1, card2 }
        } else {
            Self {
                card1: card2,
                card2: card1,
            }
        }
    }

    /// Check if hole cards are suited.
    pub fn is_suited(&self) -> bool {
        self.card1.suit() == self.card2.suit()
    }

    /// Check if hole cards are a pair.
    pub fn is_pair(&self) -> bool {
        self.card1.rank() == self.card2.rank()
    }

    /// Starting-hand class of these cards.
    pub fn hand_class(&self) -> HandClass {
        HandClass {
            high: self.card1.rank(),
            low: self.card2.rank(),
            suited: self.is_suited(),
        }
    }

    /// Get both cards as an array.
    pub fn cards(&self) -> [Card; 2] {
        [self.card1, self.card2]
    }

    /// Check if a card conflicts with these hole cards.
    pub fn contains(&self, card: Card) -> bool {
        self.card1 == card || self.card2 == card
    }
}

impl FromStr for HoleCards {
    type Err = EquityError;

    /// Parse hole cards from string like "AhKs" or "Ah Ks".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_cards(s)?.as_slice() {
            &[c1, c2] => Ok(Self::new(c1, c2)),
            _ => Err(EquityError::InvalidCard {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.card1, self.card2)
    }
}

impl fmt::Debug for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Community cards on the board.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "BoardCards")]
pub struct Board {
    cards: Vec<Card>,
}

/// Unchecked wire form of a board.
#[derive(Deserialize)]
struct BoardCards {
    cards: Vec<Card>,
}

impl TryFrom<BoardCards> for Board {
    type Error = EquityError;

    fn try_from(raw: BoardCards) -> Result<Self, Self::Error> {
        Board::from_cards(raw.cards)
    }
}

impl Board {
    /// Maximum number of community cards.
    pub const MAX_CARDS: usize = 5;

    /// Create an empty board.
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(Self::MAX_CARDS),
        }
    }

    /// Create a board from cards.
    pub fn from_cards(cards: Vec<Card>) -> Result<Self, EquityError> {
        if cards.len() > Self::MAX_CARDS {
            return Err(EquityError::TooManyBoardCards { count: cards.len() });
        }
        Ok(Self { cards })
    }

    /// Get the number of cards on the board.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if board is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Get the cards on the board.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Number of cards still to come before the river.
    pub fn missing(&self) -> usize {
        Self::MAX_CARDS.saturating_sub(self.cards.len())
    }

    /// Check if the board contains a specific card.
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }
}

impl FromStr for Board {
    type Err = EquityError;

    /// Parse a board from string like "AhKsQd" or "Ah Ks Qd".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_cards(parse_cards(s)?)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

/// Starting-hand class: two ranks plus suitedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandClass {
    /// Higher rank.
    pub high: Rank,
    /// Lower rank (equal to `high` for pairs).
    pub low: Rank,
    /// Whether both cards share a suit. Always false for pairs.
    pub suited: bool,
}

impl HandClass {
    /// Check if this class is a pocket pair.
    pub fn is_pair(&self) -> bool {
        self.high == self.low
    }
}

impl fmt::Display for HandClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pair() {
            write!(f, "{}{}", self.high, self.low)
        } else {
            let tag = if self.suited { 's' } else { 'o' };
            write!(f, "{}{}{}", self.high, self.low, tag)
        }
    }
}
