//! Bound computation for subproblems.
use fixedbitset::FixedBitSet;


use super::SearchConfig;
use crate::error::SearchError;
use crate::objective::{LeafScore, Objective};
use crate::transaction::TransactionStore;


/// Lower and upper bound on a subproblem's optimal error.
///
/// The lower bound is admissible: it never exceeds the error actually
/// achievable. The upper bound is achievable: it is the error of the
/// best single-leaf (no further split) answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) lower: f64,
    pub(crate) upper: f64,
}


/// Struct `BoundCalculator` evaluates subproblems for the solver:
/// leaf scores, closed-form bounds,
/// and the depth/support feasibility predicates.
pub(crate) struct BoundCalculator<'a, O> {
    store: &'a TransactionStore,
    objective: &'a O,
    config: &'a SearchConfig,
}


impl<'a, O> BoundCalculator<'a, O>
    where O: Objective,
{
    pub(crate) fn new(
        store: &'a TransactionStore,
        objective: &'a O,
        config: &'a SearchConfig,
    ) -> Self
    {
        Self { store, objective, config }
    }


    /// Score `cover` as a single leaf.
    ///
    /// # Errors
    /// Returns [`SearchError::EmptySubproblem`] when `cover` holds no
    /// transaction; an empty leaf must never be scored silently.
    pub(crate) fn leaf(&self, cover: &FixedBitSet)
        -> Result<LeafScore, SearchError>
    {
        if self.store.support(cover) == 0 {
            return Err(SearchError::EmptySubproblem);
        }
        Ok(self.objective.leaf_score(self.store, cover))
    }


    /// Leaf score and bounds for a subproblem with `depth_left`
    /// remaining split levels.
    ///
    /// When the subproblem cannot be split the bounds pinch to the leaf
    /// error. Otherwise the lower bound starts at zero; tighter floors
    /// come only from the cache, where exhausted searches record the
    /// budgets they failed to beat.
    pub(crate) fn subproblem(&self, cover: &FixedBitSet, depth_left: usize)
        -> Result<(LeafScore, Bounds), SearchError>
    {
        let leaf = self.leaf(cover)?;
        let support = self.store.support(cover);

        let lower = if self.must_leaf(support, depth_left) {
            leaf.error
        } else {
            0.0
        };

        Ok((leaf, Bounds { lower, upper: leaf.error }))
    }


    /// Whether the depth or support constraint forces a leaf:
    /// no split level remains, or the cover is too small for both
    /// children to reach the minimal support.
    #[inline]
    pub(crate) fn must_leaf(&self, support: usize, depth_left: usize)
        -> bool
    {
        depth_left == 0 || support < 2 * self.config.min_support
    }


    /// Combine the optimal errors of the two sides of a split
    /// through the objective.
    #[inline]
    pub(crate) fn combine(&self, left: f64, right: f64) -> f64 {
        self.objective.combine(left, right)
    }


    /// Whether a split into covers of the given sizes
    /// satisfies the support constraint on both sides.
    /// A side of size zero (a constant feature) fails here,
    /// so an infeasible split becomes a skipped candidate,
    /// never an empty subproblem.
    #[inline]
    pub(crate) fn split_is_feasible(&self, left: usize, right: usize)
        -> bool
    {
        left >= self.config.min_support && right >= self.config.min_support
    }
}
