mod greedy;
mod risk;

pub use greedy::GreedyPolicy;
pub use risk::{Decision, ShedderAi, TieBreaker};

use shedder_core::game::snapshot::StateSnapshot;
use shedder_core::model::combination::Combination;
use shedder_core::model::player::PlayerId;

/// Seam between a game host and a decision engine.
pub trait Policy: Send {
    fn name(&self) -> &'static str;

    /// Combination to play for this snapshot; a pass is the empty combination.
    fn decide(&mut self, snapshot: &StateSnapshot) -> Combination;

    /// Called once per move of either player, passes included.
    fn record_play(&mut self, _combination: &Combination, _player: PlayerId) {}

    /// Forget everything learned about the current game.
    fn reset(&mut self) {}
}
