use crate::model::card::Card;
use crate::model::rank::Rank;
use core::fmt;

/// Multiset of ranks with one slot per [`Rank`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RankCounts {
    counts: [u8; Rank::COUNT],
}

impl RankCounts {
    pub const fn empty() -> Self {
        Self {
            counts: [0; Rank::COUNT],
        }
    }

    pub fn from_cards(cards: &[Card]) -> Self {
        Self::from_ranks(cards.iter().map(|card| card.rank))
    }

    pub fn from_ranks<I: IntoIterator<Item = Rank>>(ranks: I) -> Self {
        let mut counts = Self::empty();
        for rank in ranks {
            counts.add(rank, 1);
        }
        counts
    }

    /// `copies` of a single rank, the usual shape of a "holds N of rank R" query.
    pub fn of(rank: Rank, copies: u8) -> Self {
        let mut counts = Self::empty();
        counts.set(rank, copies);
        counts
    }

    pub fn count(&self, rank: Rank) -> u8 {
        self.counts[rank.index()]
    }

    pub fn set(&mut self, rank: Rank, copies: u8) {
        self.counts[rank.index()] = copies;
    }

    pub fn add(&mut self, rank: Rank, copies: u8) {
        let slot = &mut self.counts[rank.index()];
        *slot = slot.saturating_add(copies);
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    /// Non-zero entries in rank order.
    pub fn iter(&self) -> impl Iterator<Item = (Rank, u8)> + '_ {
        Rank::ORDERED
            .iter()
            .copied()
            .map(|rank| (rank, self.count(rank)))
            .filter(|&(_, count)| count > 0)
    }
}

impl fmt::Display for RankCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (rank, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{rank}x{count}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use super::RankCounts;
    use crate::model::card::parse_cards;
    use crate::model::deck::{DECK_SIZE, Deck};
    use crate::model::rank::Rank;

    #[test]
    fn counts_cards_by_rank() {
        let counts = RankCounts::from_cards(&parse_cards("3C 3H 9S 2S").unwrap());
        assert_eq!(counts.count(Rank::Three), 2);
        assert_eq!(counts.count(Rank::Nine), 1);
        assert_eq!(counts.count(Rank::Deuce), 1);
        assert_eq!(counts.count(Rank::Four), 0);
        assert_eq!(counts.total(), 4);
    }

    #[test]
    fn full_deck_matches_copies() {
        let counts = RankCounts::from_cards(Deck::standard().cards());
        assert_eq!(counts.total(), DECK_SIZE);
        for rank in Rank::ORDERED {
            assert_eq!(counts.count(rank) as usize, rank.copies_in_deck());
        }
    }

    #[test]
    fn iter_skips_empty_slots() {
        let counts = RankCounts::from_ranks([Rank::King, Rank::Three, Rank::King]);
        let entries: Vec<_> = counts.iter().collect();
        assert_eq!(entries, vec![(Rank::Three, 1), (Rank::King, 2)]);
        assert_eq!(counts.to_string(), "{3x1, Kx2}");
        assert!(RankCounts::empty().is_empty());
    }
}
