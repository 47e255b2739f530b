use super::binomial::binomial;
use super::cache::ProbabilityCache;
use super::counts::RankCounts;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

/// Probability that a uniformly random `hand_size` subset of `pool` holds
/// exactly the multiplicities in `required` for every rank it names.
///
/// Impossible requests (more cards than the hand, more copies than the pool)
/// yield `0.0`. A hand larger than the pool is treated as holding the whole
/// pool.
pub fn chance(pool: &RankCounts, hand_size: usize, required: &RankCounts) -> f64 {
    let wanted = required.total();
    if wanted > hand_size {
        return 0.0;
    }
    if required.iter().any(|(rank, count)| count > pool.count(rank)) {
        return 0.0;
    }

    let n = pool.total();
    let k = hand_size.min(n);
    if wanted > k {
        return 0.0;
    }

    let mut numerator = BigUint::from(1u32);
    let mut pooled_required = 0usize;
    for (rank, count) in required.iter() {
        let available = pool.count(rank) as usize;
        numerator *= binomial(available, count as usize);
        pooled_required += available;
    }
    numerator *= binomial(n - pooled_required, k - wanted);
    let denominator = binomial(n, k);
    ratio(&numerator, &denominator)
}

fn ratio(numerator: &BigUint, denominator: &BigUint) -> f64 {
    if denominator.is_zero() || numerator.is_zero() {
        return 0.0;
    }
    match (numerator.to_f64(), denominator.to_f64()) {
        (Some(num), Some(den)) if den.is_finite() && den > 0.0 => (num / den).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// [`chance`] bound to one unseen pool, with an optional memo in front.
#[derive(Debug, Clone)]
pub struct ProbabilityEngine {
    pool: RankCounts,
    cache: ProbabilityCache,
}

impl ProbabilityEngine {
    pub fn new(pool: RankCounts, cache_capacity: usize) -> Self {
        Self {
            pool,
            cache: ProbabilityCache::new(cache_capacity),
        }
    }

    pub fn uncached(pool: RankCounts) -> Self {
        Self::new(pool, 0)
    }

    pub fn pool(&self) -> &RankCounts {
        &self.pool
    }

    pub fn chance(&mut self, hand_size: usize, required: &RankCounts) -> f64 {
        if let Some(hit) = self.cache.get(required, hand_size) {
            return hit;
        }
        let value = chance(&self.pool, hand_size, required);
        self.cache.insert(*required, hand_size, value);
        value
    }

    pub fn cache(&self) -> &ProbabilityCache {
        &self.cache
    }
}
