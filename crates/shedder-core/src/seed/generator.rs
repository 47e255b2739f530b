//! Worklist closure over seed promotions.
//!
//! Starting from the all-singles seed, every promotion merges two or more
//! combinations of a seed into one larger valid combination. Each promotion
//! strictly reduces the number of combinations, so the closure terminates;
//! deduplication by [`SeedKey`] keeps the explored set small on 16-card hands.

use super::partition::{Seed, SeedKey};
use crate::model::card::Card;
use crate::model::combination::Shape;
use std::collections::{HashSet, VecDeque};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Seeds popped from the worklist and promoted.
    pub expanded: usize,
    /// Valid promotions produced, duplicates included.
    pub promotions: usize,
    /// Promotions dropped because an equivalent seed was already known.
    pub duplicates: usize,
}

#[derive(Debug, Clone, Default)]
pub struct SeedGenerator {
    stats: GenerationStats,
}

impl SeedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> GenerationStats {
        self.stats
    }

    /// All partitions of `hand` reachable from the origin seed, one per
    /// equivalence class, in discovery order. The origin seed comes first.
    pub fn generate(&mut self, hand: &[Card]) -> Vec<Seed> {
        self.stats = GenerationStats::default();

        let origin = Seed::origin(hand);
        let mut known: HashSet<SeedKey> = HashSet::new();
        known.insert(origin.key());
        let mut output = vec![origin.clone()];
        let mut worklist = VecDeque::from([origin]);

        while let Some(seed) = worklist.pop_front() {
            self.stats.expanded += 1;
            for index in 0..seed.len() {
                for promoted in promotions(&seed, index) {
                    self.stats.promotions += 1;
                    if known.insert(promoted.key()) {
                        output.push(promoted.clone());
                        worklist.push_back(promoted);
                    } else {
                        self.stats.duplicates += 1;
                    }
                }
            }
        }
        output
    }
}

pub fn generate_seeds(hand: &[Card]) -> Vec<Seed> {
    SeedGenerator::new().generate(hand)
}

/// Seeds obtained by growing the combination at `index` with later members.
///
/// A single becomes a pair with the next single, opens a five-card straight
/// with a run of consecutive singles, grows a pair or triple of its own rank,
/// or extends a straight. A pair joins a pair, triple or multi-pair; a triple
/// joins a triple or multi-triple. The last combination never promotes.
fn promotions(seed: &Seed, index: usize) -> Vec<Seed> {
    let combinations = seed.combinations();
    if index + 1 >= combinations.len() {
        return Vec::new();
    }
    let current = &combinations[index];
    let mut out = Vec::new();
    let mut push = |indices: &[usize]| {
        if let Some(promoted) = seed.merge_at(indices) {
            out.push(promoted);
        }
    };

    match current.shape() {
        Shape::Single => {
            if combinations[index + 1].shape() == Shape::Single {
                push(&[index, index + 1]);
            }
            if let Some(run) = straight_run(seed, index) {
                push(&run);
            }
            for (later, other) in combinations.iter().enumerate().skip(index + 1) {
                let grows_group = matches!(other.shape(), Shape::Pair | Shape::Triple)
                    && other.value() == current.value();
                if grows_group || other.shape() == Shape::Straight {
                    push(&[index, later]);
                }
            }
        }
        Shape::Pair => {
            for (later, other) in combinations.iter().enumerate().skip(index + 1) {
                if matches!(
                    other.shape(),
                    Shape::Pair | Shape::Triple | Shape::MultiPair
                ) {
                    push(&[index, later]);
                }
            }
        }
        Shape::Triple => {
            for (later, other) in combinations.iter().enumerate().skip(index + 1) {
                if matches!(other.shape(), Shape::Triple | Shape::MultiTriple) {
                    push(&[index, later]);
                }
            }
        }
        _ => {}
    }
    out
}

/// Indices of five singles starting at `index` whose ranks step up by one.
fn straight_run(seed: &Seed, index: usize) -> Option<[usize; 5]> {
    let mut run = [index; 5];
    for slot in 1..run.len() {
        run[slot] = next_consecutive_single(seed, run[slot - 1])?;
    }
    Some(run)
}

/// The first later single one rank above the single at `index`, skipping
/// singles of the same rank and stopping at anything else.
fn next_consecutive_single(seed: &Seed, index: usize) -> Option<usize> {
    let combinations = seed.combinations();
    let current = combinations.get(index)?;
    if current.shape() != Shape::Single {
        return None;
    }
    let rank = current.cards()[0].rank;
    for (later, other) in combinations.iter().enumerate().skip(index + 1) {
        if other.shape() != Shape::Single {
            return None;
        }
        let next = other.cards()[0].rank;
        if next == rank {
            continue;
        }
        return (next > rank && rank.is_straight_adjacent(next)).then_some(later);
    }
    None
}
