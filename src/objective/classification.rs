//! Weighted misclassification objective.
use fixedbitset::FixedBitSet;


use super::{LeafScore, Objective};
use crate::transaction::TransactionStore;


/// Objective `ClassificationError` scores a leaf by the weighted
/// misclassification count of its majority vote.
///
/// The leaf predicts the class with the largest weighted support inside
/// the cover; the error is the total weighted support minus that
/// majority. Ties between classes go to the class with the larger
/// support over the *whole* dataset, then to the lower class index,
/// so the prediction is deterministic.
///
/// Boosting rounds reuse this objective unchanged over a store
/// reweighted with the current distribution.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationError;


impl Objective for ClassificationError {
    fn leaf_score(&self, store: &TransactionStore, cover: &FixedBitSet)
        -> LeafScore
    {
        let supports = store.class_supports(cover);
        let global = store.global_class_supports();

        let mut majority = 0;
        for (c, support) in supports.iter().enumerate().skip(1) {
            if *support > supports[majority]
                || (*support == supports[majority]
                    && global[c] > global[majority])
            {
                majority = c;
            }
        }

        let total = supports.iter().sum::<f64>();
        LeafScore {
            value: majority,
            error: total - supports[majority],
        }
    }
}
