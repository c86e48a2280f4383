//! Itemsets (paths through the tree, in canonical form)
//! and the per-search cache of solved subproblems.
pub(crate) mod itemset_struct;
pub(crate) mod cache;

pub use itemset_struct::{Item, Itemset, Polarity};
pub use cache::{CacheEntry, ItemsetCache, NodeState};
