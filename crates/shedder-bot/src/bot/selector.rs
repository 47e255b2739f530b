use crate::bot::action::CandidateAction;
use rand::Rng;
use shedder_core::model::combination::Combination;

/// Picks uniformly among the lowest-scoring candidates.
#[derive(Debug, Clone, Copy)]
pub struct Selector {
    epsilon: f64,
}

impl Selector {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon: epsilon.max(0.0),
        }
    }

    /// Indices of the candidates sharing the minimum score.
    pub fn best_indices(&self, candidates: &[CandidateAction]) -> Vec<usize> {
        let mut best = f64::INFINITY;
        let mut ties = Vec::new();
        for (index, candidate) in candidates.iter().enumerate() {
            let score = candidate.score;
            if score < best - self.epsilon {
                best = score;
                ties.clear();
                ties.push(index);
            } else if (score - best).abs() <= self.epsilon {
                ties.push(index);
            }
        }
        ties
    }

    pub fn select<'c, R: Rng + ?Sized>(
        &self,
        candidates: &'c [CandidateAction],
        rng: &mut R,
    ) -> Option<&'c CandidateAction> {
        let ties = self.best_indices(candidates);
        if ties.is_empty() {
            return None;
        }
        let pick = ties[rng.gen_range(0..ties.len())];
        candidates.get(pick)
    }

    /// Opening play of the selected candidate; a pass when there is none.
    pub fn choose<R: Rng + ?Sized>(
        &self,
        candidates: &[CandidateAction],
        rng: &mut R,
    ) -> Combination {
        self.select(candidates, rng)
            .and_then(|candidate| candidate.opening().cloned())
            .unwrap_or_default()
    }
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(1e-12)
    }
}
