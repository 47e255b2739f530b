use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Unique within the deck; sorts the same way as [`Ord`].
    pub const fn id(self) -> u16 {
        self.rank.value() as u16 * 10 + self.suit.value() as u16
    }
}

impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.suit.cmp(&other.suit))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCardError {
    Empty,
    UnknownSuit(char),
    UnknownRank(String),
}

impl fmt::Display for ParseCardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCardError::Empty => write!(f, "card text is empty"),
            ParseCardError::UnknownSuit(symbol) => write!(f, "unknown suit symbol '{symbol}'"),
            ParseCardError::UnknownRank(text) => write!(f, "unknown rank '{text}'"),
        }
    }
}

impl std::error::Error for ParseCardError {}

impl FromStr for Card {
    type Err = ParseCardError;

    /// Parses the `Display` form, e.g. `3C`, `10H`, `AS`, `2S`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let suit_symbol = text.chars().last().ok_or(ParseCardError::Empty)?;
        let suit = Suit::from_symbol(suit_symbol).ok_or(ParseCardError::UnknownSuit(suit_symbol))?;
        let rank_text = &text[..text.len() - suit_symbol.len_utf8()];
        let rank = match rank_text.to_ascii_uppercase().as_str() {
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            "2" => Rank::Deuce,
            digits => digits
                .parse::<u8>()
                .ok()
                .filter(|value| (3..=10).contains(value))
                .and_then(Rank::from_value)
                .ok_or_else(|| ParseCardError::UnknownRank(rank_text.to_string()))?,
        };
        Ok(Card::new(rank, suit))
    }
}

/// Parses a whitespace separated list of cards, e.g. `"3C 3H 4C"`.
pub fn parse_cards(text: &str) -> Result<Vec<Card>, ParseCardError> {
    text.split_whitespace().map(str::parse).collect()
}
