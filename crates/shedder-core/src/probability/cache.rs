//! Bounded memo for odds queries against a fixed pool.

use super::counts::RankCounts;
use std::collections::{HashMap, VecDeque};

type CacheKey = (RankCounts, usize);

/// First-in first-out eviction; a capacity of zero disables storage.
#[derive(Debug, Clone)]
pub struct ProbabilityCache {
    entries: HashMap<CacheKey, f64>,
    order: VecDeque<CacheKey>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl ProbabilityCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn get(&mut self, required: &RankCounts, hand_size: usize) -> Option<f64> {
        match self.entries.get(&(*required, hand_size)) {
            Some(value) => {
                self.hits += 1;
                Some(*value)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, required: RankCounts, hand_size: usize, value: f64) {
        if self.capacity == 0 {
            return;
        }
        let key = (required, hand_size);
        if self.entries.insert(key, value).is_none() {
            self.order.push_back(key);
        }
        self.evict_if_needed();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn evict_if_needed(&mut self) {
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ProbabilityCache;
    use crate::model::rank::Rank;
    use crate::probability::counts::RankCounts;

    #[test]
    fn cache_respects_capacity() {
        let mut cache = ProbabilityCache::new(1);
        let a = RankCounts::of(Rank::Five, 2);
        let b = RankCounts::of(Rank::Six, 2);
        cache.insert(a, 4, 0.25);
        cache.insert(b, 4, 0.5);
        assert_eq!(cache.get(&a, 4), None);
        assert_eq!(cache.get(&b, 4), Some(0.5));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn hand_size_is_part_of_the_key() {
        let mut cache = ProbabilityCache::new(4);
        let a = RankCounts::of(Rank::Five, 2);
        cache.insert(a, 4, 0.25);
        assert_eq!(cache.get(&a, 5), None);
        assert_eq!(cache.get(&a, 4), Some(0.25));
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn zero_capacity_disables_storage() {
        let mut cache = ProbabilityCache::new(0);
        cache.insert(RankCounts::of(Rank::Ten, 1), 3, 0.1);
        assert!(cache.is_empty());
    }
}
