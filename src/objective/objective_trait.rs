//! The `Objective` trait.
use fixedbitset::FixedBitSet;


use crate::transaction::TransactionStore;


/// Best single-leaf answer for a cover:
/// the predicted value and the error it incurs.
///
/// `value` is a class index for classification and boosting,
/// and a representative (medoid) transaction id for clustering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeafScore {
    /// Prediction assigned when the cover becomes a leaf.
    pub value: usize,

    /// Error incurred by that prediction.
    pub error: f64,
}


/// Scoring strategy injected into the solver at construction.
///
/// The same branch-and-bound recursion serves classification error
/// minimization, clustering dissimilarity minimization, and weighted
/// boosting rounds; only the implementation of this trait changes.
///
/// Implementations must be admissible for the solver's pruning:
/// `leaf_score` never returns a negative error, and `combine` is
/// monotone in both arguments.
pub trait Objective: Sync {
    /// The best prediction for `cover` as a single leaf,
    /// together with its (weighted) error.
    ///
    /// The solver guarantees `cover` is non-empty.
    fn leaf_score(&self, store: &TransactionStore, cover: &FixedBitSet)
        -> LeafScore;


    /// Combine the optimal errors of the two children of a split
    /// into the error of the split.
    /// Errors are additive across a partition for every variant,
    /// so the default is plain summation.
    #[inline]
    fn combine(&self, left: f64, right: f64) -> f64 {
        left + right
    }
}
