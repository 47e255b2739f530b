//! Exact hypergeometric odds over the unseen card pool.
//!
//! The opponent's hidden hand is modelled as a uniformly random subset of the
//! unseen pool. All binomials are computed as big integers and only the final
//! ratio is converted to `f64`.

pub mod binomial;
pub mod cache;
pub mod counts;
pub mod engine;

pub use binomial::binomial;
pub use cache::ProbabilityCache;
pub use counts::RankCounts;
pub use engine::{ProbabilityEngine, chance};
