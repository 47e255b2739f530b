use crate::bot::dominator::DominatorModel;
use crate::bot::params::BotParams;
use crate::bot::BotContext;
use shedder_core::model::combination::{Combination, Shape};
use shedder_core::seed::Seed;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Empty table: any combination may open.
    Free,
    /// The opening play has to beat the table.
    React,
}

impl Strategy {
    pub const fn as_str(self) -> &'static str {
        match self {
            Strategy::Free => "free",
            Strategy::React => "react",
        }
    }
}

/// One scored way of playing out a seed. Lower scores are better.
#[derive(Debug, Clone)]
pub struct CandidateAction {
    pub seed: Seed,
    pub strategy: Strategy,
    pub score: f64,
    pub sequence: Vec<Combination>,
    /// Risk of each entry of `sequence`, in the same order.
    pub risks: Vec<f64>,
}

impl CandidateAction {
    pub fn opening(&self) -> Option<&Combination> {
        self.sequence.first()
    }
}

/// Pairs the riskiest with the safest member of a bucket, the second riskiest
/// with the second safest and so on, summing the products. An odd middle
/// element adds its own risk.
pub fn bucket_risk(risks: &[f64]) -> f64 {
    let mut sorted = risks.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let n = sorted.len();
    let mut total: f64 = (0..n / 2).map(|i| sorted[i] * sorted[n - 1 - i]).sum();
    if n % 2 == 1 {
        total += sorted[n / 2];
    }
    total
}

pub struct ActionBuilder {
    model: DominatorModel,
    table: Combination,
    opponent_hand_size: usize,
    reverse_at_opponent_cards: usize,
    reverse_at_seed_size: usize,
}

impl ActionBuilder {
    pub fn new(ctx: &BotContext<'_>) -> Self {
        Self::with_model(ctx.dominator_model(), ctx.table().clone(), ctx.params)
    }

    pub fn with_model(model: DominatorModel, table: Combination, params: &BotParams) -> Self {
        Self {
            opponent_hand_size: model.opponent_hand_size(),
            model,
            table,
            reverse_at_opponent_cards: params.reverse_at_opponent_cards,
            reverse_at_seed_size: params.reverse_at_seed_size,
        }
    }

    pub fn strategy(&self) -> Strategy {
        if self.table.is_pass() {
            Strategy::Free
        } else {
            Strategy::React
        }
    }

    pub fn model(&self) -> &DominatorModel {
        &self.model
    }

    /// Candidates for every seed that has one; React seeds with nothing able
    /// to beat the table are skipped.
    pub fn build(&mut self, seeds: &[Seed]) -> Vec<CandidateAction> {
        seeds
            .iter()
            .filter_map(|seed| self.build_seed(seed))
            .collect()
    }

    pub fn build_seed(&mut self, seed: &Seed) -> Option<CandidateAction> {
        let scored: Vec<(Combination, f64)> = seed
            .iter()
            .map(|combination| (combination.clone(), self.model.risk(combination)))
            .collect();
        let score = seed_score(&scored);

        let strategy = self.strategy();
        let mut sequence: Vec<(Combination, f64)> = match strategy {
            Strategy::React => scored
                .into_iter()
                .filter(|(combination, _)| combination.beats(&self.table))
                .collect(),
            Strategy::Free => scored,
        };
        if sequence.is_empty() {
            return None;
        }
        sequence.sort_by(|a, b| b.1.total_cmp(&a.1));
        if strategy == Strategy::Free
            && (self.opponent_hand_size == self.reverse_at_opponent_cards
                || seed.len() == self.reverse_at_seed_size)
        {
            sequence.reverse();
        }

        let (sequence, risks): (Vec<Combination>, Vec<f64>) = sequence.into_iter().unzip();
        Some(CandidateAction {
            seed: seed.clone(),
            strategy,
            score,
            sequence,
            risks,
        })
    }
}

/// Sum of [`bucket_risk`] over the shape buckets of a seed.
fn seed_score(scored: &[(Combination, f64)]) -> f64 {
    Shape::PLAYABLE
        .iter()
        .map(|shape| {
            let risks: Vec<f64> = scored
                .iter()
                .filter(|(combination, _)| combination.shape() == *shape)
                .map(|(_, risk)| *risk)
                .collect();
            bucket_risk(&risks)
        })
        .sum()
}
