//! Exports the search entry points and the types they produce.
//!
pub use crate::error::SearchError;

pub use crate::search::{
    // Entry points -----------------------------
    solve,
    solve_weighted,
    solve_clusters,
    predict,

    // Search machinery -------------------------
    SearchConfig,
    SearchStatistics,
    Solver,
};

pub use crate::transaction::TransactionStore;

pub use crate::itemset::{
    Item,
    Itemset,
    ItemsetCache,
    Polarity,
};

pub use crate::objective::{
    Objective,
    LeafScore,

    ClassificationError,
    Dissimilarity,
};

pub use crate::tree::{
    Tree,
    Partition,
    Node,
};

pub use crate::booster::{
    TreeBoost,
    WeightedVote,
};
