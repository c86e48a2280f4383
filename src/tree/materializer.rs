//! Reconstruction of the output tree from the cache.
use super::node::Node;
use crate::error::SearchError;
use crate::itemset::{Itemset, ItemsetCache, Polarity};


/// Assemble the subtree rooted at `itemset` by reading
/// the chain of proven-optimal cache entries.
///
/// By the solver's contract everything needed is already cached,
/// so this only reads — it never consults the bound calculator
/// or re-enters the solver.
///
/// # Errors
/// Returns [`SearchError::IncompleteSearch`] when a visited entry is
/// missing or not proven optimal. This is a defensive invariant check;
/// it cannot trigger while the solver upholds its contract.
pub(crate) fn materialize(cache: &ItemsetCache, itemset: &Itemset)
    -> Result<Node, SearchError>
{
    let entry = cache.peek(itemset)
        .ok_or(SearchError::IncompleteSearch)?;
    let entry = entry.read()
        .expect("cache entry lock poisoned")
        .clone();

    if !entry.is_solved() {
        return Err(SearchError::IncompleteSearch);
    }

    match entry.split {
        None => Ok(Node::leaf(entry.leaf_value, entry.leaf_error)),
        Some(feature) => {
            let left = materialize(
                cache, &itemset.child(feature, Polarity::Absent),
            )?;
            let right = materialize(
                cache, &itemset.child(feature, Polarity::Present),
            )?;
            Ok(Node::branch(feature, left, right))
        },
    }
}
