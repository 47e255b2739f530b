use super::Policy;
use shedder_core::game::snapshot::StateSnapshot;
use shedder_core::model::combination::{Combination, Shape};
use shedder_core::seed::generate_seeds;

/// Baseline opponent: opens with its lowest single and otherwise answers
/// with the cheapest combination that beats the table, bombs last.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }

    pub fn choose(&self, snapshot: &StateSnapshot) -> Combination {
        if snapshot.is_free_table() {
            return snapshot
                .own_hand
                .iter()
                .min()
                .copied()
                .map(Combination::single)
                .unwrap_or_default();
        }

        let mut beaters: Vec<Combination> = generate_seeds(&snapshot.own_hand)
            .iter()
            .flat_map(|seed| seed.iter().cloned())
            .filter(|combination| combination.beats(&snapshot.table))
            .collect();
        beaters.sort_by(|a, b| {
            (a.shape() == Shape::Bomb, a.value(), a.len())
                .cmp(&(b.shape() == Shape::Bomb, b.value(), b.len()))
                .then_with(|| a.cards().cmp(b.cards()))
        });
        beaters.into_iter().next().unwrap_or_default()
    }
}

impl Policy for GreedyPolicy {
    fn name(&self) -> &'static str {
        "greedy"
    }

    fn decide(&mut self, snapshot: &StateSnapshot) -> Combination {
        self.choose(snapshot)
    }
}
