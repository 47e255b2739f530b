use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

pub const DECK_SIZE: usize = 48;
pub const GROUP_SIZE: usize = 16;

/// One deal: both player hands plus the dead group nobody holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub first: Vec<Card>,
    pub second: Vec<Card>,
    pub dead: Vec<Card>,
}

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// 11 full ranks, three Aces (no Diamond) and the single Deuce of Spades.
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for rank in Rank::ORDERED.iter().copied() {
            match rank {
                Rank::Deuce => cards.push(Card::new(Rank::Deuce, Suit::Spades)),
                Rank::Ace => cards.extend(
                    Suit::ALL
                        .iter()
                        .copied()
                        .filter(|suit| *suit != Suit::Diamonds)
                        .map(|suit| Card::new(Rank::Ace, suit)),
                ),
                _ => cards.extend(Suit::ALL.iter().map(|suit| Card::new(rank, *suit))),
            }
        }
        cards.sort();
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Deals round-robin into three sorted groups of [`GROUP_SIZE`].
    pub fn deal(&self) -> Deal {
        let mut groups: [Vec<Card>; 3] = Default::default();
        for (i, card) in self.cards.iter().enumerate() {
            groups[i % 3].push(*card);
        }
        for group in groups.iter_mut() {
            group.sort();
        }
        let [first, second, dead] = groups;
        Deal {
            first,
            second,
            dead,
        }
    }
}
