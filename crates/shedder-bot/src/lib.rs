pub mod bot;
pub mod policy;

pub use bot::{
    ActionBuilder, BotContext, BotFeatures, BotParams, CandidateAction, DominatorModel, Selector,
    Strategy, bucket_risk,
};
pub use policy::{GreedyPolicy, Policy, ShedderAi, TieBreaker};
