use super::Policy;
use crate::bot::{ActionBuilder, BotContext, BotFeatures, BotParams, CandidateAction, Selector, Strategy};
use parking_lot::Mutex;
use rand::SeedableRng;
use rand::rngs::StdRng;
use shedder_core::game::history::History;
use shedder_core::game::snapshot::StateSnapshot;
use shedder_core::model::combination::Combination;
use shedder_core::model::player::PlayerId;
use shedder_core::seed::{GenerationStats, SeedGenerator};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::{Level, event};

/// Source of tie-breaking randomness. Each decision draws from a generator
/// seeded by the base seed and the decision inputs, so identical inputs
/// always break ties the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TieBreaker {
    seed: u64,
}

impl TieBreaker {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn from_entropy() -> Self {
        Self {
            seed: rand::random(),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn rng_for<H: Hash + ?Sized>(&self, inputs: &H) -> StdRng {
        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        inputs.hash(&mut hasher);
        StdRng::seed_from_u64(hasher.finish())
    }
}

/// Everything one decision produced, for logging and inspection.
#[derive(Debug, Clone)]
pub struct Decision {
    pub chosen: Combination,
    pub strategy: Strategy,
    pub seed_count: usize,
    pub candidates: Vec<CandidateAction>,
    pub best_score: Option<f64>,
    pub ties: usize,
    pub generation: GenerationStats,
}

/// Risk-scored decision engine. History is the only state kept between
/// decisions and sits behind a lock that a decision holds until it returns.
pub struct ShedderAi {
    history: Mutex<History>,
    params: BotParams,
    features: BotFeatures,
    selector: Selector,
    ties: TieBreaker,
}

impl ShedderAi {
    pub fn new() -> Self {
        Self::with_config(
            BotParams::default(),
            BotFeatures::from_env(),
            TieBreaker::from_entropy(),
        )
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_config(
            BotParams::default(),
            BotFeatures::from_env(),
            TieBreaker::from_seed(seed),
        )
    }

    pub fn with_config(params: BotParams, features: BotFeatures, ties: TieBreaker) -> Self {
        let selector = Selector::new(params.tie_epsilon);
        Self {
            history: Mutex::new(History::new()),
            params,
            features,
            selector,
            ties,
        }
    }

    pub fn params(&self) -> &BotParams {
        &self.params
    }

    pub fn features(&self) -> BotFeatures {
        self.features
    }

    pub fn tie_breaker(&self) -> TieBreaker {
        self.ties
    }

    pub fn record_play(&self, combination: Combination, player: PlayerId) {
        self.history.lock().record(combination, player);
    }

    pub fn history(&self) -> History {
        self.history.lock().clone()
    }

    pub fn reset(&self) {
        self.history.lock().clear();
    }

    pub fn decide(&self, snapshot: &StateSnapshot) -> Combination {
        self.evaluate(snapshot).chosen
    }

    pub fn evaluate(&self, snapshot: &StateSnapshot) -> Decision {
        let history = self.history.lock();
        let ctx = BotContext::new(snapshot, &self.params, self.features, history.round());

        let mut generator = SeedGenerator::new();
        let seeds = generator.generate(&snapshot.own_hand);
        let mut builder = ActionBuilder::new(&ctx);
        let candidates = builder.build(&seeds);

        let best = self.selector.best_indices(&candidates);
        let mut rng = self.ties.rng_for(&(snapshot, history.len()));
        let mut chosen = self.selector.choose(&candidates, &mut rng);
        if !chosen.is_pass() && !chosen.can_follow(ctx.table()) {
            tracing::warn!(
                target: "shedder_bot::decide",
                chosen = %chosen,
                table = %ctx.table(),
                "selected combination cannot follow the table; passing"
            );
            chosen = Combination::pass();
        }

        let decision = Decision {
            best_score: best.first().map(|&i| candidates[i].score),
            ties: best.len(),
            chosen,
            strategy: builder.strategy(),
            seed_count: seeds.len(),
            candidates,
            generation: generator.stats(),
        };
        log_decision(&ctx, &builder, &decision);
        log_candidates(&ctx, &decision);
        decision
    }
}

impl Default for ShedderAi {
    fn default() -> Self {
        Self::new()
    }
}

impl Policy for ShedderAi {
    fn name(&self) -> &'static str {
        "risk"
    }

    fn decide(&mut self, snapshot: &StateSnapshot) -> Combination {
        ShedderAi::decide(self, snapshot)
    }

    fn record_play(&mut self, combination: &Combination, player: PlayerId) {
        ShedderAi::record_play(self, combination.clone(), player);
    }

    fn reset(&mut self) {
        ShedderAi::reset(self);
    }
}

fn log_decision(ctx: &BotContext<'_>, builder: &ActionBuilder, decision: &Decision) {
    if !tracing::enabled!(target: "shedder_bot::decide", Level::INFO) {
        return;
    }
    let cache = builder.model().engine().cache();
    event!(
        target: "shedder_bot::decide",
        Level::INFO,
        round = ctx.round,
        hand_size = ctx.snapshot.own_hand.len(),
        opponent_cards = ctx.opponent_hand_size(),
        table = %ctx.table(),
        strategy = decision.strategy.as_str(),
        seed_count = decision.seed_count,
        expanded = decision.generation.expanded,
        candidate_count = decision.candidates.len(),
        best_score = decision.best_score.unwrap_or(f64::NAN),
        ties = decision.ties,
        cache_hits = cache.hits(),
        cache_misses = cache.misses(),
        chosen = %decision.chosen,
    );
}

fn log_candidates(ctx: &BotContext<'_>, decision: &Decision) {
    if !ctx.features.decision_details_enabled()
        || !tracing::enabled!(target: "shedder_bot::candidates", Level::DEBUG)
    {
        return;
    }
    let mut ranked: Vec<&CandidateAction> = decision.candidates.iter().collect();
    ranked.sort_by(|a, b| a.score.total_cmp(&b.score));
    for (position, candidate) in ranked.iter().take(8).enumerate() {
        let opening = candidate
            .opening()
            .map(|c| c.to_string())
            .unwrap_or_default();
        event!(
            target: "shedder_bot::candidates",
            Level::DEBUG,
            round = ctx.round,
            position,
            score = candidate.score,
            strategy = candidate.strategy.as_str(),
            opening = %opening,
            sequence_len = candidate.sequence.len(),
            seed = %candidate.seed,
        );
    }
}
