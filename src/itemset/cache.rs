//! The per-search memo of solved subproblems.
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};


use super::Itemset;
use crate::error::SearchError;


/// Solve state of a cached subproblem.
///
/// Entries are created in `Bounding`, move to `Expanding` while their
/// candidate splits are enumerated, and end in one of the two solved
/// states. An itemset with no entry at all is the unvisited state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Bounds are being (or have been) computed; not yet proven optimal.
    Bounding,

    /// Candidate splits are being enumerated.
    Expanding,

    /// Proven optimal by exhausting every candidate split
    /// that the bounds could not prune.
    Optimal,

    /// Proven optimal because the depth or support constraint
    /// forced this subproblem to a leaf.
    LeafForced,
}


impl NodeState {
    /// Whether the stored result is proven optimal.
    #[inline]
    pub fn is_solved(self) -> bool {
        matches!(self, Self::Optimal | Self::LeafForced)
    }
}


/// Memoized solver result for one subproblem.
///
/// Updates only ever tighten:
/// the lower bound may only increase, the error may only decrease,
/// and a solved entry is never regressed.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub(crate) state: NodeState,

    // Proven floor on the subproblem's optimal error.
    pub(crate) lower_bound: f64,

    // Exact optimal error once solved; `f64::INFINITY` before.
    pub(crate) error: f64,

    // Best single-leaf prediction and its error.
    pub(crate) leaf_value: usize,
    pub(crate) leaf_error: f64,

    // Chosen splitting feature; `None` marks a leaf.
    pub(crate) split: Option<usize>,
}


impl CacheEntry {
    pub(crate) fn new() -> Self {
        Self {
            state: NodeState::Bounding,
            lower_bound: 0.0,
            error: f64::INFINITY,
            leaf_value: 0,
            leaf_error: f64::INFINITY,
            split: None,
        }
    }


    /// The solve state.
    pub fn state(&self) -> NodeState {
        self.state
    }


    /// Whether the stored result is proven optimal.
    pub fn is_solved(&self) -> bool {
        self.state.is_solved()
    }


    /// Proven floor on this subproblem's optimal error.
    pub fn lower_bound(&self) -> f64 {
        self.lower_bound
    }


    /// Optimal error of this subproblem.
    /// Exact when [`is_solved`](CacheEntry::is_solved);
    /// `f64::INFINITY` otherwise.
    pub fn error(&self) -> f64 {
        self.error
    }


    /// Chosen splitting feature, or `None` for a leaf.
    pub fn split(&self) -> Option<usize> {
        self.split
    }


    /// Raise the lower bound. Never lowers it;
    /// a solved entry keeps its exact error as the floor.
    pub(crate) fn raise_lower_bound(&mut self, bound: f64) {
        if !self.is_solved() {
            self.lower_bound = self.lower_bound.max(bound);
        }
    }


    /// Record the proven-optimal result.
    /// A second solve of the same itemset must agree with the first,
    /// so solved entries are never overwritten.
    pub(crate) fn solve(
        &mut self,
        state: NodeState,
        split: Option<usize>,
        error: f64,
    )
    {
        debug_assert!(state.is_solved());
        if self.is_solved() {
            debug_assert_eq!(self.error, error);
            return;
        }
        self.state = state;
        self.split = split;
        self.error = error;
        self.lower_bound = error;
    }
}


/// Struct `ItemsetCache` maps canonical itemsets
/// to their memoized solver results.
///
/// One instance is constructed per search invocation and lives for the
/// whole search; entries are never evicted, since correctness relies on
/// monotonic tightening rather than recomputation. Memory growth is
/// bounded by the number of distinct itemsets the pruned search visits,
/// not by the power set of features.
///
/// The outer map takes a read lock for lookups and a write lock only to
/// insert a key; each entry carries its own lock, so writes serialize
/// per key while readers on other keys proceed. A parallel driver that
/// finds an entry in `Bounding`/`Expanding` waits on that entry's lock
/// instead of re-solving the itemset.
pub struct ItemsetCache {
    entries: RwLock<HashMap<Itemset, Arc<RwLock<CacheEntry>>>>,
    capacity: Option<usize>,

    hits: AtomicU64,
    misses: AtomicU64,
}


impl ItemsetCache {
    /// Create an empty cache.
    /// `capacity` caps the number of distinct entries;
    /// exceeding it fails the search with
    /// [`SearchError::ResourceExhausted`].
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }


    /// Look up the entry for `itemset`, counting a hit or a miss.
    pub fn lookup(&self, itemset: &Itemset)
        -> Option<Arc<RwLock<CacheEntry>>>
    {
        let entries = self.entries.read()
            .expect("itemset cache lock poisoned");
        let entry = entries.get(itemset).map(Arc::clone);
        match entry {
            Some(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            None => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        entry
    }


    /// Look up the entry for `itemset` without touching the counters.
    /// The materializer reads through this,
    /// so its walk does not distort the search statistics.
    pub(crate) fn peek(&self, itemset: &Itemset)
        -> Option<Arc<RwLock<CacheEntry>>>
    {
        self.entries.read()
            .expect("itemset cache lock poisoned")
            .get(itemset)
            .map(Arc::clone)
    }


    /// The entry for `itemset`, inserting a fresh one on a miss.
    /// Returns the entry and whether it was freshly inserted.
    ///
    /// # Errors
    /// Returns [`SearchError::ResourceExhausted`] when inserting
    /// would exceed the configured capacity.
    pub(crate) fn get_or_insert(&self, itemset: &Itemset)
        -> Result<(Arc<RwLock<CacheEntry>>, bool), SearchError>
    {
        if let Some(entry) = self.lookup(itemset) {
            return Ok((entry, false));
        }

        let mut entries = self.entries.write()
            .expect("itemset cache lock poisoned");

        // A parallel driver may have inserted between the locks.
        if let Some(entry) = entries.get(itemset) {
            return Ok((Arc::clone(entry), false));
        }

        if let Some(capacity) = self.capacity {
            if entries.len() >= capacity {
                return Err(SearchError::ResourceExhausted);
            }
        }

        let entry = Arc::new(RwLock::new(CacheEntry::new()));
        entries.insert(itemset.clone(), Arc::clone(&entry));
        Ok((entry, true))
    }


    /// Number of distinct subproblems stored.
    pub fn len(&self) -> usize {
        self.entries.read()
            .expect("itemset cache lock poisoned")
            .len()
    }


    /// Whether the cache holds no entry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }


    /// Number of lookups that found an entry.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }


    /// Number of lookups that found nothing.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}
