//! Objective strategies: how a cover is scored as a leaf
//! and how children errors combine into their parent's error.
pub(crate) mod objective_trait;
pub(crate) mod classification;
pub(crate) mod clustering;

pub use objective_trait::{LeafScore, Objective};
pub use classification::ClassificationError;
pub use clustering::Dissimilarity;
