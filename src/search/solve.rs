//! The operations the core exposes to wrapper layers.
use super::{SearchConfig, Solver};
use crate::error::SearchError;
use crate::objective::{ClassificationError, Dissimilarity};
use crate::transaction::TransactionStore;
use crate::tree::{Partition, Tree};


/// Find the provably optimal classification tree for a binary
/// transaction matrix and its labels, under the given constraints.
///
/// # Example
/// ```
/// use optree::{solve, SearchConfig};
///
/// let data = vec![
///     vec![0], vec![0], vec![1], vec![1],
/// ];
/// let labels = vec![0, 0, 1, 1];
///
/// let tree = solve(&data, &labels, &SearchConfig::new(1, 1)).unwrap();
/// assert_eq!(tree.error(), 0.0);
/// assert_eq!(tree.depth(), 1);
/// ```
///
/// # Errors
/// Dataset-shape errors surface before any recursion starts;
/// [`NoSolutionFound`](SearchError::NoSolutionFound) reports a timeout
/// or an infeasible error budget.
pub fn solve(
    data: &[Vec<u8>],
    labels: &[usize],
    config: &SearchConfig,
) -> Result<Tree, SearchError>
{
    let store = TransactionStore::new(data, labels)?;
    let objective = ClassificationError;
    Solver::new(&store, &objective, config).solve()
}


/// [`solve`](solve) with one weight per transaction,
/// minimizing the weighted misclassification.
/// Boosting rounds call this with each round's distribution.
pub fn solve_weighted(
    data: &[Vec<u8>],
    labels: &[usize],
    weights: &[f64],
    config: &SearchConfig,
) -> Result<Tree, SearchError>
{
    let store = TransactionStore::new(data, labels)?
        .with_weights(weights.to_vec())?;
    let objective = ClassificationError;
    Solver::new(&store, &objective, config).solve()
}


/// Find the provably optimal clustering partition of a binary
/// transaction matrix: the tree of the configured depth and support
/// whose leaves minimize the total within-leaf dissimilarity.
///
/// `dissimilarity` is measured between transaction ids,
/// so it may be computed on the caller's original feature space.
/// It must be symmetric and non-negative with `d(t, t) == 0`.
pub fn solve_clusters<D>(
    data: &[Vec<u8>],
    dissimilarity: D,
    config: &SearchConfig,
) -> Result<Partition, SearchError>
    where D: Fn(usize, usize) -> f64 + Sync,
{
    let store = TransactionStore::unlabeled(data)?;
    let objective = Dissimilarity::new(dissimilarity);
    let root = Solver::new(&store, &objective, config).solve_root()?;
    Ok(Partition::from_root(root, &store))
}


/// The label a tree predicts for one transaction.
/// Pure lookup over the materialized tree; no search involved.
pub fn predict(tree: &Tree, transaction: &[u8]) -> usize {
    tree.predict(transaction)
}
