//! Within-leaf dissimilarity objective for clustering searches.
use fixedbitset::FixedBitSet;
use rayon::prelude::*;


use super::{LeafScore, Objective};
use crate::transaction::TransactionStore;


/// Objective `Dissimilarity` scores a leaf by the weighted sum of
/// dissimilarities between its transactions and their medoid.
///
/// The measure is any `Fn(usize, usize) -> f64 + Sync` over transaction
/// ids, so callers may compute dissimilarity on their original feature
/// space rather than on the binarized matrix the search splits on.
/// The leaf value is the medoid: the member transaction minimizing the
/// weighted sum of dissimilarities to every other member, ties going to
/// the lowest transaction id.
pub struct Dissimilarity<D> {
    measure: D,
}


impl<D> Dissimilarity<D>
    where D: Fn(usize, usize) -> f64 + Sync,
{
    /// Wrap a dissimilarity measure over transaction ids.
    /// The measure must be symmetric and non-negative
    /// with `measure(t, t) == 0`.
    pub fn new(measure: D) -> Self {
        Self { measure }
    }
}


impl<D> Objective for Dissimilarity<D>
    where D: Fn(usize, usize) -> f64 + Sync,
{
    fn leaf_score(&self, store: &TransactionStore, cover: &FixedBitSet)
        -> LeafScore
    {
        let members = cover.ones().collect::<Vec<usize>>();

        // Candidate medoids are scanned in parallel;
        // `min_by` over `(cost, id)` keeps the result deterministic.
        let (cost, medoid) = members.par_iter()
            .map(|&m| {
                let cost = members.iter()
                    .map(|&t| store.weight(t) * (self.measure)(m, t))
                    .sum::<f64>();
                (cost, m)
            })
            .min_by(|a, b| {
                a.partial_cmp(b)
                    .expect("dissimilarities must not be NaN")
            })
            .expect("the solver never scores an empty cover");

        LeafScore { value: medoid, error: cost }
    }
}
