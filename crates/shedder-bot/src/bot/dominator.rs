//! Per-combination risk: how likely the opponent can answer it with a
//! stronger combination of the same shape.
//!
//! Every walk starts one rank above the combination and follows
//! [`Rank::next_higher`] (so Ace steps to Deuce). Each step asks the odds
//! engine for the exact multiplicities that would form a beating group.

use crate::bot::params::BotParams;
use shedder_core::model::combination::{Combination, Shape};
use shedder_core::model::rank::Rank;
use shedder_core::probability::{ProbabilityEngine, RankCounts};
use std::collections::HashMap;

type RiskKey = (Shape, u8, usize);

#[derive(Debug, Clone)]
pub struct DominatorModel {
    engine: ProbabilityEngine,
    hand_size: usize,
    straight_reference: Rank,
    memo: HashMap<RiskKey, f64>,
}

impl DominatorModel {
    pub fn new(
        pool: RankCounts,
        opponent_hand_size: usize,
        params: &BotParams,
        cache_capacity: usize,
    ) -> Self {
        Self {
            engine: ProbabilityEngine::new(pool, cache_capacity),
            hand_size: opponent_hand_size,
            straight_reference: params.straight_reference,
            memo: HashMap::new(),
        }
    }

    pub fn opponent_hand_size(&self) -> usize {
        self.hand_size
    }

    pub fn engine(&self) -> &ProbabilityEngine {
        &self.engine
    }

    /// Risk depends only on shape, value and size, so it is memoised per
    /// decision across every seed that shares the combination.
    pub fn risk(&mut self, combination: &Combination) -> f64 {
        let key = (combination.shape(), combination.value(), combination.len());
        if let Some(risk) = self.memo.get(&key) {
            return *risk;
        }
        let risk = self.compute(combination);
        self.memo.insert(key, risk);
        risk
    }

    fn compute(&mut self, combination: &Combination) -> f64 {
        let Some(rank) = combination.rank() else {
            return 0.0;
        };
        match combination.shape() {
            Shape::Single => self.group_walk(rank, 1..=4),
            Shape::Pair => self.group_walk(rank, 2..=4),
            Shape::Triple => self.group_walk(rank, 3..=4),
            Shape::Bomb => self.bomb_walk(rank),
            Shape::TripleWithPair => self.triple_with_pair_walk(rank),
            Shape::MultiPair => self.chain_walk(&combination.defining_ranks(), 2),
            Shape::MultiTriple => self.chain_walk(&combination.defining_ranks(), 3),
            Shape::Straight => self.straight_risk(combination),
            Shape::Invalid => 0.0,
        }
    }

    fn group_walk(&mut self, rank: Rank, copies: std::ops::RangeInclusive<u8>) -> f64 {
        let hand_size = self.hand_size;
        higher_ranks(rank)
            .map(|higher| {
                copies
                    .clone()
                    .map(|count| self.engine.chance(hand_size, &RankCounts::of(higher, count)))
                    .sum::<f64>()
            })
            .sum()
    }

    /// Three Aces already form a bomb, every other rank needs all four.
    fn bomb_walk(&mut self, rank: Rank) -> f64 {
        let hand_size = self.hand_size;
        higher_ranks(rank)
            .map(|higher| {
                let copies = if higher == Rank::Ace { 3 } else { 4 };
                self.engine
                    .chance(hand_size, &RankCounts::of(higher, copies))
            })
            .sum()
    }

    fn triple_with_pair_walk(&mut self, rank: Rank) -> f64 {
        let hand_size = self.hand_size;
        let mut risk = 0.0;
        for higher in higher_ranks(rank).filter(|r| *r != Rank::Ace) {
            for copies in 3..=4u8 {
                let Some(rest) = hand_size.checked_sub(copies as usize) else {
                    continue;
                };
                let triple = self
                    .engine
                    .chance(hand_size, &RankCounts::of(higher, copies));
                if triple > 0.0 {
                    risk += triple * self.pair_chance(rest, higher);
                }
            }
        }
        risk
    }

    /// Chance of holding at least a pair of some rank other than `excluded`
    /// among `hand_size` cards.
    fn pair_chance(&mut self, hand_size: usize, excluded: Rank) -> f64 {
        let mut total = 0.0;
        for rank in Rank::ORDERED.iter().copied().filter(|r| *r != excluded) {
            for copies in 2..=4u8 {
                total += self.engine.chance(hand_size, &RankCounts::of(rank, copies));
            }
        }
        total
    }

    /// Shifts the whole chain up one rank at a time while it stays a legal
    /// chain, then normalises by chain length.
    fn chain_walk(&mut self, ranks: &[Rank], group: u8) -> f64 {
        if ranks.is_empty() {
            return 0.0;
        }
        let hand_size = self.hand_size;
        let mut risk = 0.0;
        let mut current = ranks.to_vec();
        while let Some(shifted) = shift_chain(&current) {
            let mut required = RankCounts::empty();
            for rank in &shifted {
                required.set(*rank, group);
            }
            risk += self.engine.chance(hand_size, &required);
            current = shifted;
        }
        risk / ranks.len() as f64
    }

    /// Step function on the reference rank: a straight that starts below it
    /// is treated as certainly beatable, one that starts at or above it as safe.
    fn straight_risk(&self, combination: &Combination) -> f64 {
        if self.hand_size < combination.len() {
            return 0.0;
        }
        if combination.value() < self.straight_reference.value() {
            1.0
        } else {
            0.0
        }
    }
}

fn higher_ranks(rank: Rank) -> impl Iterator<Item = Rank> {
    std::iter::successors(rank.next_higher(), |r| r.next_higher())
}

fn shift_chain(ranks: &[Rank]) -> Option<Vec<Rank>> {
    let shifted: Vec<Rank> = ranks
        .iter()
        .map(|rank| rank.next_higher())
        .collect::<Option<_>>()?;
    let chained = shifted
        .windows(2)
        .all(|pair| pair[0].is_straight_adjacent(pair[1]));
    chained.then_some(shifted)
}

#[cfg(test)]
mod tests {
    use super::DominatorModel;
    use crate::bot::params::BotParams;
    use shedder_core::model::card::parse_cards;
    use shedder_core::model::combination::Combination;
    use shedder_core::model::deck::Deck;
    use shedder_core::model::rank::Rank;
    use shedder_core::probability::{RankCounts, chance};

    fn combo(text: &str) -> Combination {
        Combination::new(parse_cards(text).unwrap())
    }

    fn full_pool_model(hand_size: usize) -> DominatorModel {
        let pool = RankCounts::from_cards(Deck::standard().cards());
        DominatorModel::new(pool, hand_size, &BotParams::default(), 256)
    }

    #[test]
    fn deuce_single_is_unbeatable() {
        let mut model = full_pool_model(16);
        assert_eq!(model.risk(&combo("2S")), 0.0);
    }

    #[test]
    fn ace_single_only_fears_the_deuce() {
        let mut model = full_pool_model(16);
        let pool = RankCounts::from_cards(Deck::standard().cards());
        let expected = chance(&pool, 16, &RankCounts::of(Rank::Deuce, 1));
        assert!((model.risk(&combo("AS")) - expected).abs() < 1e-12);
    }

    #[test]
    fn lower_singles_are_riskier() {
        let mut model = full_pool_model(10);
        let low = model.risk(&combo("3C"));
        let mid = model.risk(&combo("9C"));
        let high = model.risk(&combo("KC"));
        assert!(low > mid && mid > high && high > 0.0);
    }

    #[test]
    fn pair_walk_counts_two_to_four_copies() {
        let mut pool = RankCounts::empty();
        pool.set(Rank::Queen, 4);
        pool.set(Rank::King, 2);
        pool.set(Rank::Three, 4);
        let mut model = DominatorModel::new(pool, 4, &BotParams::default(), 0);
        // Only two kings are unseen and nothing above them.
        let expected = chance(&pool, 4, &RankCounts::of(Rank::King, 2));
        assert!((model.risk(&combo("QC QH")) - expected).abs() < 1e-12);
    }

    #[test]
    fn bomb_fears_only_higher_bombs() {
        let mut model = full_pool_model(16);
        assert_eq!(model.risk(&combo("AC AH AS")), 0.0);
        let kings = model.risk(&combo("KD KC KH KS"));
        let pool = RankCounts::from_cards(Deck::standard().cards());
        let expected = chance(&pool, 16, &RankCounts::of(Rank::Ace, 3));
        assert!((kings - expected).abs() < 1e-12);
    }

    #[test]
    fn straight_risk_uses_reference_rank() {
        let mut model = full_pool_model(10);
        assert_eq!(model.risk(&combo("3C 4H 5S 6D 7C")), 1.0);
        assert_eq!(model.risk(&combo("9C 10H JS QD KC")), 1.0);
        assert_eq!(model.risk(&combo("10C JH QS KD AC")), 0.0);

        let mut short = full_pool_model(4);
        assert_eq!(short.risk(&combo("3C 4H 5S 6D 7C")), 0.0);
    }

    #[test]
    fn multi_pair_walk_normalises_by_length() {
        let mut pool = RankCounts::empty();
        pool.set(Rank::Five, 2);
        pool.set(Rank::Six, 2);
        let mut model = DominatorModel::new(pool, 4, &BotParams::default(), 0);
        // Only the 5-6 shift is holdable and it takes the whole pool.
        assert!((model.risk(&combo("4C 4H 5C 5H")) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn chain_walk_stops_before_deuce() {
        let mut model = full_pool_model(16);
        assert_eq!(model.risk(&combo("KC KH AC AH")), 0.0);
        assert_eq!(model.risk(&combo("QC QH QS KC KH KS AC AH AS")), 0.0);
    }

    #[test]
    fn triple_with_pair_needs_room_for_the_pair() {
        let mut model = full_pool_model(4);
        assert_eq!(model.risk(&combo("3C 3H 3S 9C 9H")), 0.0);
        let mut roomy = full_pool_model(12);
        assert!(roomy.risk(&combo("3C 3H 3S 9C 9H")) > 0.0);
    }

    #[test]
    fn risk_is_memoised_per_shape_and_value() {
        let mut model = full_pool_model(12);
        let first = model.risk(&combo("7C 7H"));
        let second = model.risk(&combo("7D 7S"));
        assert_eq!(first, second);
    }
}
