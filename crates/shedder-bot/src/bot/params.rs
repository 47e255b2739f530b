use shedder_core::model::rank::Rank;

/// Heuristic constants of the risk model and action builder.
#[derive(Debug, Clone)]
pub struct BotParams {
    /// Straights are scored against this rank instead of through the odds engine.
    pub straight_reference: Rank,
    /// Free play goes weakest-first once the opponent is down to this many cards.
    pub reverse_at_opponent_cards: usize,
    /// Free play goes weakest-first for seeds of exactly this many combinations.
    pub reverse_at_seed_size: usize,
    pub cache_capacity: usize,
    /// Scores closer than this count as tied in selection.
    pub tie_epsilon: f64,
}

impl Default for BotParams {
    fn default() -> Self {
        Self {
            straight_reference: Rank::Ten,
            reverse_at_opponent_cards: 1,
            reverse_at_seed_size: 2,
            cache_capacity: 4096,
            tie_epsilon: 1e-12,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::BotParams;
    use shedder_core::model::rank::Rank;

    #[test]
    fn defaults_match_reference_heuristics() {
        let params = BotParams::default();
        assert_eq!(params.straight_reference, Rank::Ten);
        assert_eq!(params.reverse_at_opponent_cards, 1);
        assert_eq!(params.reverse_at_seed_size, 2);
        assert!(params.cache_capacity > 0);
    }
}
