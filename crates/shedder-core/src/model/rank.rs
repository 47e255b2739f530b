use core::fmt;
use serde::{Deserialize, Serialize};

/// Card rank. Discriminants are the comparison values; the gap between Ace and
/// Deuce keeps them from ever being straight-adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
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
    Deuce = 16,
}

impl Rank {
    pub const COUNT: usize = 13;

    pub const ORDERED: [Rank; 13] = [
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
        Rank::Deuce,
    ];

    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            7 => Some(Rank::Seven),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            14 => Some(Rank::Ace),
            16 => Some(Rank::Deuce),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Dense position in [`Rank::ORDERED`].
    pub const fn index(self) -> usize {
        match self {
            Rank::Deuce => 12,
            other => (other as u8 - 3) as usize,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ORDERED[index])
        } else {
            None
        }
    }

    /// Consecutive for straights and chains: 3..K plus K-A. Deuce is adjacent
    /// to nothing.
    pub const fn is_straight_adjacent(self, other: Rank) -> bool {
        let a = self.value();
        let b = other.value();
        (a + 1 == b || b + 1 == a) && a <= 14 && b <= 14
    }

    /// Successor used when walking towards stronger ranks. Unlike straight
    /// adjacency, Ace steps up to Deuce.
    pub const fn next_higher(self) -> Option<Rank> {
        match self {
            Rank::Deuce => None,
            Rank::Ace => Some(Rank::Deuce),
            other => Rank::from_value(other.value() + 1),
        }
    }

    /// Copies of this rank in the 48-card deck.
    pub const fn copies_in_deck(self) -> usize {
        match self {
            Rank::Ace => 3,
            Rank::Deuce => 1,
            _ => 4,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
            Rank::Deuce => "2",
        };
        f.write_str(text)
    }
}
