//! Defines [`SearchError`](SearchError),
//! the failure taxonomy of the search engine.
use std::fmt;


/// Enumeration of every way a search can fail.
///
/// Dataset-shape errors are reported before any recursion starts.
/// [`EmptySubproblem`](SearchError::EmptySubproblem) and
/// [`IncompleteSearch`](SearchError::IncompleteSearch) indicate a broken
/// bound/cache invariant and abort the whole search;
/// they never occur in correct operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The transaction matrix is empty, ragged,
    /// or contains a non-binary feature value.
    InvalidDataset(String),

    /// The label or weight vector does not match the transaction matrix.
    InvalidLabels(String),

    /// A subproblem with an empty transaction cover reached the scorer.
    /// The search never silently scores an empty leaf.
    EmptySubproblem,

    /// The materializer visited a cache entry that is not proven optimal.
    IncompleteSearch,

    /// The search ended without a proven-optimal root:
    /// either the time limit expired or the error budget is infeasible.
    /// A timed-out search never yields a partial tree.
    NoSolutionFound,

    /// The itemset cache reached its configured capacity
    /// before the search completed.
    ResourceExhausted,
}


impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDataset(why) => {
                write!(f, "invalid dataset: {why}")
            },
            Self::InvalidLabels(why) => {
                write!(f, "invalid labels or weights: {why}")
            },
            Self::EmptySubproblem => {
                write!(f, "attempted to score a subproblem with empty cover")
            },
            Self::IncompleteSearch => {
                write!(
                    f,
                    "materialization reached a cache entry \
                     that is not proven optimal"
                )
            },
            Self::NoSolutionFound => {
                write!(
                    f,
                    "no tree satisfying the constraints was proven optimal"
                )
            },
            Self::ResourceExhausted => {
                write!(f, "itemset cache capacity exhausted mid-search")
            },
        }
    }
}


impl std::error::Error for SearchError {}
