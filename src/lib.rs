#![warn(missing_docs)]

//!
//! A crate that finds provably optimal decision trees
//! over binary transaction datasets by branch-and-bound search.
//!
//! Unlike greedy induction, the search here carries an optimality
//! guarantee: the returned tree has the minimum achievable error among
//! all trees of the configured depth satisfying the leaf-support
//! constraint. The same engine serves three objectives:
//!
//! - Classification
//!     [`solve`] minimizes the (weighted) misclassification count.
//!
//! - Clustering
//!     [`solve_clusters`] minimizes the total within-leaf
//!     dissimilarity and returns the induced partition.
//!
//! - Boosting
//!     [`TreeBoost`] runs sequential reweighted rounds,
//!     each solving an optimal tree for its distribution,
//!     combined by weighted vote.
//!
//! The engine decomposes the search into subproblems keyed by
//! canonical itemsets (the conjunction of feature tests on a path),
//! memoizes every solved subproblem in a per-search cache,
//! and prunes with admissible lower bounds,
//! so identical subproblems reached through different split orders
//! are solved exactly once.

pub mod error;
pub mod transaction;
pub mod itemset;
pub mod objective;
pub mod search;
pub mod tree;
pub mod booster;
pub mod prelude;


pub use error::SearchError;

pub use search::{predict, solve, solve_clusters, solve_weighted};
pub use search::{SearchConfig, SearchStatistics, Solver};

pub use transaction::TransactionStore;
pub use itemset::{Item, Itemset, ItemsetCache, Polarity};
pub use objective::{ClassificationError, Dissimilarity, LeafScore, Objective};
pub use tree::{Node, Partition, Tree};
pub use booster::{TreeBoost, WeightedVote};
