use crate::model::card::Card;
use crate::model::combination::{Combination, Shape};
use core::fmt;

/// Equivalence key of a seed: the sorted (Shape, Value) pairs. Two seeds
/// with the same key are interchangeable for decision purposes, even when a
/// straight or chain in one is longer than its counterpart in the other.
pub type SeedKey = Vec<(Shape, u8)>;

/// A partition of a hand into combinations, kept sorted by shape, then value,
/// then size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Seed {
    combinations: Vec<Combination>,
}

impl Seed {
    pub fn new(mut combinations: Vec<Combination>) -> Self {
        combinations.sort_by(|a, b| {
            a.shape()
                .cmp(&b.shape())
                .then_with(|| a.value().cmp(&b.value()))
                .then_with(|| a.len().cmp(&b.len()))
                .then_with(|| a.cards().cmp(b.cards()))
        });
        Self { combinations }
    }

    /// Every card as its own single.
    pub fn origin(hand: &[Card]) -> Self {
        Self::new(hand.iter().copied().map(Combination::single).collect())
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn get(&self, index: usize) -> Option<&Combination> {
        self.combinations.get(index)
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combination> {
        self.combinations.iter()
    }

    pub fn key(&self) -> SeedKey {
        self.combinations
            .iter()
            .map(|c| (c.shape(), c.value()))
            .collect()
    }

    /// Union of all combinations, sorted.
    pub fn cards(&self) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .combinations
            .iter()
            .flat_map(|c| c.cards().iter().copied())
            .collect();
        cards.sort();
        cards
    }

    pub fn is_equivalent(&self, other: &Seed) -> bool {
        self.key() == other.key()
    }

    /// Replaces the combinations at `indices` with their union. `None` when
    /// the union is not a valid combination.
    pub fn merge_at(&self, indices: &[usize]) -> Option<Seed> {
        let mut cards = Vec::new();
        for &index in indices {
            cards.extend_from_slice(self.combinations.get(index)?.cards());
        }
        let merged = Combination::new(cards);
        if !merged.is_valid() {
            return None;
        }
        let mut rest: Vec<Combination> = self
            .combinations
            .iter()
            .enumerate()
            .filter(|(i, _)| !indices.contains(i))
            .map(|(_, c)| c.clone())
            .collect();
        rest.push(merged);
        Some(Seed::new(rest))
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, combination) in self.combinations.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{combination}")?;
        }
        f.write_str("]")
    }
}
