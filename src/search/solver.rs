//! The branch-and-bound solver.
use fixedbitset::FixedBitSet;
use rayon::prelude::*;


use super::bounds::BoundCalculator;
use super::{SearchConfig, SearchStatistics};
use crate::error::SearchError;
use crate::itemset::{Itemset, ItemsetCache, NodeState, Polarity};
use crate::objective::Objective;
use crate::transaction::TransactionStore;
use crate::tree::{materialize, Node, Tree};

use std::time::Instant;


/// Struct `Solver` runs one branch-and-bound search over a
/// [`TransactionStore`](TransactionStore) with a fixed
/// [`Objective`](Objective) and [`SearchConfig`](SearchConfig).
///
/// Every subproblem is identified by its canonical
/// [`Itemset`](Itemset); results are memoized in an
/// [`ItemsetCache`](ItemsetCache) scoped to this solver,
/// constructed here and dropped with it — never a process-wide
/// singleton. Candidate features are enumerated in ascending index
/// order and children are solved sequentially, so two runs over the
/// same inputs produce the identical tree.
///
/// # Example
/// ```
/// use optree::{ClassificationError, SearchConfig, Solver, TransactionStore};
///
/// let data = vec![
///     vec![0, 1], vec![0, 0], vec![1, 1], vec![1, 0],
/// ];
/// let labels = vec![0, 0, 1, 1];
///
/// let store = TransactionStore::new(&data, &labels).unwrap();
/// let objective = ClassificationError;
/// let config = SearchConfig::new(1, 1);
///
/// let mut solver = Solver::new(&store, &objective, &config);
/// let tree = solver.solve().unwrap();
/// assert_eq!(tree.error(), 0.0);
/// ```
pub struct Solver<'a, O> {
    store: &'a TransactionStore,
    config: &'a SearchConfig,
    bounds: BoundCalculator<'a, O>,
    cache: ItemsetCache,

    expansions: u64,
    start: Instant,
    deadline: Option<Instant>,
}


impl<'a, O> Solver<'a, O>
    where O: Objective,
{
    /// Initialize a solver.
    /// The itemset cache is created empty here
    /// and lives exactly as long as this search.
    pub fn new(
        store: &'a TransactionStore,
        objective: &'a O,
        config: &'a SearchConfig,
    ) -> Self
    {
        let start = Instant::now();
        Self {
            store,
            config,
            bounds: BoundCalculator::new(store, objective, config),
            cache: ItemsetCache::new(config.max_cache_entries),
            expansions: 0,
            start,
            deadline: config.time_limit.map(|limit| start + limit),
        }
    }


    /// Run the search and materialize the proven-optimal tree.
    ///
    /// # Errors
    /// [`NoSolutionFound`](SearchError::NoSolutionFound) when the time
    /// limit expires or no tree beats the configured error budget;
    /// [`ResourceExhausted`](SearchError::ResourceExhausted) when the
    /// cache capacity is hit.
    pub fn solve(&mut self) -> Result<Tree, SearchError> {
        let root = self.solve_root()?;
        Ok(Tree::new(root))
    }


    /// Run the search and return the raw root node.
    /// Clustering goes through this to relabel leaves
    /// before wrapping them in a partition.
    pub(crate) fn solve_root(&mut self) -> Result<Node, SearchError> {
        let root = Itemset::root();
        let cover = self.store.root_cover();
        let budget = self.config.error_upper_bound
            .unwrap_or(f64::INFINITY);

        let found = self.solve_node(
            &root, &cover, self.config.max_depth, budget,
        )?;

        if self.config.verbose {
            eprintln!("{}", self.statistics());
        }

        if found.is_none() {
            // The search is exhausted: every tree within the
            // constraints has error at least `budget`.
            return Err(SearchError::NoSolutionFound);
        }

        materialize(&self.cache, &root)
    }


    /// The counters collected so far.
    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            expansions: self.expansions,
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
            cache_entries: self.cache.len(),
            elapsed: self.start.elapsed(),
        }
    }


    /// Solve one subproblem under the error budget `ub`.
    ///
    /// Returns `Some(error)` with `error < ub` when a tree beating the
    /// budget exists (the cache entry is then proven optimal), and
    /// `None` when the subproblem was proven to admit nothing below
    /// `ub` (the entry's lower bound is then raised to `ub`).
    fn solve_node(
        &mut self,
        itemset: &Itemset,
        cover: &FixedBitSet,
        depth_left: usize,
        ub: f64,
    ) -> Result<Option<f64>, SearchError>
    {
        let support = self.store.support(cover);
        if support == 0 {
            return Err(SearchError::EmptySubproblem);
        }
        self.check_deadline()?;

        let (entry, _) = self.cache.get_or_insert(itemset)?;

        {
            let guard = entry.read().expect("cache entry lock poisoned");
            if guard.is_solved() {
                // Terminal reuse: a proven-optimal entry is never
                // re-expanded, whatever order reached it.
                let error = guard.error;
                return Ok((error < ub).then_some(error));
            }
            if guard.lower_bound >= ub {
                return Ok(None);
            }
        }

        let (leaf, bounds) =
            self.bounds.subproblem(cover, depth_left)?;
        {
            let mut guard =
                entry.write().expect("cache entry lock poisoned");
            guard.state = NodeState::Bounding;
            guard.leaf_value = leaf.value;
            guard.leaf_error = leaf.error;
        }

        // Depth or support leaves no room to split.
        if self.bounds.must_leaf(support, depth_left) {
            let mut guard =
                entry.write().expect("cache entry lock poisoned");
            guard.solve(NodeState::LeafForced, None, leaf.error);
            return Ok((leaf.error < ub).then_some(leaf.error));
        }

        // The leaf already meets the closed-form floor;
        // no split can improve on it.
        if leaf.error <= bounds.lower {
            let mut guard =
                entry.write().expect("cache entry lock poisoned");
            guard.solve(NodeState::Optimal, None, leaf.error);
            return Ok((leaf.error < ub).then_some(leaf.error));
        }

        self.expansions += 1;
        entry.write().expect("cache entry lock poisoned").state =
            NodeState::Expanding;

        // A split is kept only when strictly better than both the
        // budget and the single-leaf answer, so ties prefer the leaf.
        let mut threshold = ub.min(bounds.upper);
        let mut best_split = None;

        let splits = self.candidate_splits(itemset, cover);
        for (feature, absent_cover, present_cover) in splits {
            let n_absent = self.store.support(&absent_cover);
            let n_present = support - n_absent;
            if !self.bounds.split_is_feasible(n_absent, n_present) {
                continue;
            }
            self.check_deadline()?;

            let absent = itemset.child(feature, Polarity::Absent);
            let present = itemset.child(feature, Polarity::Present);

            // Budget the first child by the cached floor of its
            // sibling: together they must still beat `threshold`.
            let present_floor = self.cached_lower_bound(&present);
            if threshold - present_floor <= 0.0 {
                continue;
            }

            let Some(absent_error) = self.solve_node(
                &absent,
                &absent_cover,
                depth_left - 1,
                threshold - present_floor,
            )? else {
                continue;
            };

            let Some(present_error) = self.solve_node(
                &present,
                &present_cover,
                depth_left - 1,
                threshold - absent_error,
            )? else {
                continue;
            };

            let error = self.bounds.combine(absent_error, present_error);
            if error < threshold {
                threshold = error;
                best_split = Some(feature);
            }
        }

        let mut guard = entry.write().expect("cache entry lock poisoned");
        match best_split {
            Some(feature) => {
                guard.solve(NodeState::Optimal, Some(feature), threshold);
                Ok(Some(threshold))
            },
            None if leaf.error < ub => {
                // Exhausted every candidate without beating the leaf:
                // the leaf itself is the optimum.
                guard.solve(NodeState::Optimal, None, leaf.error);
                Ok(Some(leaf.error))
            },
            None => {
                // Exhausted under budget `ub` without a witness:
                // the optimum is proven to be at least `ub`.
                guard.raise_lower_bound(ub);
                guard.state = NodeState::Bounding;
                Ok(None)
            },
        }
    }


    /// Child covers of every candidate feature not yet tested on this
    /// path, in ascending feature order. The covers are computed in
    /// parallel; order is preserved, so the enumeration stays
    /// deterministic.
    fn candidate_splits(&self, itemset: &Itemset, cover: &FixedBitSet)
        -> Vec<(usize, FixedBitSet, FixedBitSet)>
    {
        let n_feature = self.store.shape().1;
        let candidates = (0..n_feature)
            .filter(|f| !itemset.contains_feature(*f))
            .collect::<Vec<_>>();

        candidates.into_par_iter()
            .map(|f| {
                let absent =
                    self.store.restrict(cover, f, Polarity::Absent);
                let present =
                    self.store.restrict(cover, f, Polarity::Present);
                (f, absent, present)
            })
            .collect()
    }


    /// The tightest proven floor the cache holds for `itemset`.
    /// Zero when the itemset was never visited.
    fn cached_lower_bound(&self, itemset: &Itemset) -> f64 {
        self.cache.peek(itemset)
            .map(|entry| {
                entry.read()
                    .expect("cache entry lock poisoned")
                    .lower_bound
            })
            .unwrap_or(0.0)
    }


    fn check_deadline(&self) -> Result<(), SearchError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                // In-flight entries stay unsolved; the caller must
                // treat the aborted search as having no solution.
                Err(SearchError::NoSolutionFound)
            },
            _ => Ok(()),
        }
    }
}
