//! Per-search configuration.
use serde::{Serialize, Deserialize};

use std::time::Duration;


/// Struct `SearchConfig` holds the constraints of one search:
/// maximal depth, minimal leaf support, and the optional error budget,
/// time limit, and cache capacity.
///
/// The configuration is read-only for the lifetime of a search
/// and is shared by reference across every subproblem.
///
/// # Example
/// ```
/// use optree::SearchConfig;
/// use std::time::Duration;
///
/// let config = SearchConfig::new(3, 1)
///     .error_upper_bound(10.0)
///     .time_limit(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub(crate) max_depth: usize,
    pub(crate) min_support: usize,
    pub(crate) error_upper_bound: Option<f64>,
    pub(crate) time_limit: Option<Duration>,
    pub(crate) max_cache_entries: Option<usize>,
    pub(crate) verbose: bool,
}


impl SearchConfig {
    /// Create a configuration from the two mandatory constraints.
    /// Both must be at least `1`:
    /// a depth-`0` search has nothing to optimize,
    /// and an empty leaf is an error state, never a goal.
    pub fn new(max_depth: usize, min_support: usize) -> Self {
        assert!(max_depth > 0);
        assert!(min_support > 0);

        Self {
            max_depth,
            min_support,
            error_upper_bound: None,
            time_limit: None,
            max_cache_entries: None,
            verbose: false,
        }
    }


    /// Set the initial error budget of the root subproblem.
    /// A search that proves no tree with error below this budget exists
    /// fails with [`NoSolutionFound`](crate::SearchError::NoSolutionFound)
    /// instead of returning a worse tree.
    pub fn error_upper_bound(mut self, bound: f64) -> Self {
        assert!(bound.is_finite() && bound >= 0.0);
        self.error_upper_bound = Some(bound);
        self
    }


    /// Abort the search after `limit`.
    /// A timed-out search fails with
    /// [`NoSolutionFound`](crate::SearchError::NoSolutionFound);
    /// it never yields a partial tree.
    pub fn time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }


    /// Cap the number of distinct subproblems the cache may hold.
    /// Exceeding the cap fails the search with
    /// [`ResourceExhausted`](crate::SearchError::ResourceExhausted).
    pub fn max_cache_entries(mut self, entries: usize) -> Self {
        assert!(entries > 0);
        self.max_cache_entries = Some(entries);
        self
    }


    /// Print a [`SearchStatistics`](crate::SearchStatistics) report
    /// to stderr when the search finishes.
    pub fn verbose(mut self, flag: bool) -> Self {
        self.verbose = flag;
        self
    }


    /// The maximal tree depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }


    /// The minimal number of transactions per leaf.
    pub fn min_support(&self) -> usize {
        self.min_support
    }
}
