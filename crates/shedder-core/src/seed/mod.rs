//! Hand partitions ("seeds") and their closure-based generation.

pub mod generator;
pub mod partition;

pub use generator::{GenerationStats, SeedGenerator, generate_seeds};
pub use partition::{Seed, SeedKey};
