//! The materialized outputs of a search:
//! decision trees and clustering partitions.
pub(crate) mod node;
pub(crate) mod tree_struct;
pub(crate) mod partition;
pub(crate) mod materializer;

pub use node::{BranchNode, LeafNode, Node};
pub use tree_struct::Tree;
pub use partition::Partition;
pub(crate) use materializer::materialize;
