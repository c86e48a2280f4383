//! Boosting of provably optimal trees.
pub(crate) mod tree_boost;

pub use tree_boost::{TreeBoost, WeightedVote};
