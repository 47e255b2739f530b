mod action;
mod dominator;
mod params;
mod selector;

pub use action::{ActionBuilder, CandidateAction, Strategy, bucket_risk};
pub use dominator::DominatorModel;
pub use params::BotParams;
pub use selector::Selector;

use shedder_core::game::snapshot::StateSnapshot;
use shedder_core::model::combination::Combination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BotFeatures {
    probability_cache: bool,
    decision_details: bool,
}

impl BotFeatures {
    pub const fn new(probability_cache: bool, decision_details: bool) -> Self {
        Self {
            probability_cache,
            decision_details,
        }
    }

    pub fn from_env() -> Self {
        Self::from_reader(|key| std::env::var(key).ok())
    }

    pub const fn probability_cache_enabled(self) -> bool {
        self.probability_cache
    }

    pub const fn decision_details_enabled(self) -> bool {
        self.decision_details
    }

    pub fn with_decision_details(mut self, enabled: bool) -> Self {
        self.decision_details = enabled;
        self
    }

    pub fn with_probability_cache(mut self, enabled: bool) -> Self {
        self.probability_cache = enabled;
        self
    }

    pub fn from_reader<F>(mut read: F) -> Self
    where
        F: FnMut(&str) -> Option<String>,
    {
        let probability_cache = read("SHEDDER_PROB_CACHE")
            .map(|raw| !matches!(raw.trim(), "0" | "false" | "FALSE" | "off" | "OFF"))
            .unwrap_or(true);

        let decision_details = read("SHEDDER_DECISION_DETAILS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "TRUE" | "on" | "ON"))
            .unwrap_or(false);

        Self {
            probability_cache,
            decision_details,
        }
    }
}

impl Default for BotFeatures {
    fn default() -> Self {
        Self {
            probability_cache: true,
            decision_details: false,
        }
    }
}

/// Per-decision view handed to the action builder.
#[derive(Debug, Clone, Copy)]
pub struct BotContext<'a> {
    pub snapshot: &'a StateSnapshot,
    pub params: &'a BotParams,
    pub features: BotFeatures,
    pub round: u32,
}

impl<'a> BotContext<'a> {
    pub fn new(
        snapshot: &'a StateSnapshot,
        params: &'a BotParams,
        features: BotFeatures,
        round: u32,
    ) -> Self {
        Self {
            snapshot,
            params,
            features,
            round,
        }
    }

    pub fn table(&self) -> &'a Combination {
        &self.snapshot.table
    }

    pub fn is_free_table(&self) -> bool {
        self.snapshot.is_free_table()
    }

    pub fn opponent_hand_size(&self) -> usize {
        self.snapshot.opponent_hand_size()
    }

    pub fn cache_capacity(&self) -> usize {
        if self.features.probability_cache_enabled() {
            self.params.cache_capacity
        } else {
            0
        }
    }

    pub fn dominator_model(&self) -> DominatorModel {
        DominatorModel::new(
            self.snapshot.unseen_pool(),
            self.opponent_hand_size(),
            self.params,
            self.cache_capacity(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{BotContext, BotFeatures, BotParams};
    use shedder_core::game::snapshot::StateSnapshot;
    use shedder_core::model::card::parse_cards;
    use shedder_core::model::combination::Combination;
    use std::collections::HashMap;

    fn features_from(pairs: &[(&str, &str)]) -> BotFeatures {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotFeatures::from_reader(|key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let features = features_from(&[]);
        assert!(features.probability_cache_enabled());
        assert!(!features.decision_details_enabled());
        assert_eq!(features, BotFeatures::default());
    }

    #[test]
    fn env_flags_toggle_features() {
        let features = features_from(&[
            ("SHEDDER_PROB_CACHE", "off"),
            ("SHEDDER_DECISION_DETAILS", "1"),
        ]);
        assert!(!features.probability_cache_enabled());
        assert!(features.decision_details_enabled());
    }

    #[test]
    fn unknown_cache_values_keep_it_on() {
        let features = features_from(&[("SHEDDER_PROB_CACHE", "maybe")]);
        assert!(features.probability_cache_enabled());
    }

    #[test]
    fn context_respects_cache_toggle() {
        let snapshot = StateSnapshot::new(parse_cards("3C 4D").unwrap(), Combination::pass());
        let params = BotParams::default();
        let on = BotContext::new(&snapshot, &params, BotFeatures::default(), 1);
        let off = BotContext::new(
            &snapshot,
            &params,
            BotFeatures::default().with_probability_cache(false),
            1,
        );
        assert_eq!(on.cache_capacity(), params.cache_capacity);
        assert_eq!(off.cache_capacity(), 0);
        assert!(on.is_free_table());
        assert_eq!(on.opponent_hand_size(), 2);
    }
}
