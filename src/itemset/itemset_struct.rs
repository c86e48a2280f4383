//! The canonical itemset representation used as the cache key.
use serde::{Serialize, Deserialize};


/// Polarity of one feature test along a tree path:
/// either the feature must be absent (`0`) or present (`1`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize,
)]
pub enum Polarity {
    /// The feature takes the value `0`.
    Absent,

    /// The feature takes the value `1`.
    Present,
}


/// A single feature test: `(feature index, polarity)`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
    Serialize, Deserialize,
)]
pub struct Item {
    /// Index of the tested feature.
    pub feature: usize,

    /// Required value of the tested feature.
    pub polarity: Polarity,
}


/// A conjunction of feature tests accumulated along a tree path.
///
/// Items are kept sorted by `(feature, polarity)`,
/// so two subproblems reached via different split orderings
/// hash to the same cache key.
/// This collision is what keeps the search polynomial
/// in the number of *distinct* subproblems actually visited,
/// rather than exponential in the enumeration order.
///
/// No feature appears twice:
/// a path never tests the same feature in both directions,
/// and re-testing with the same polarity is a no-op split.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Itemset {
    items: Vec<Item>,
}


impl Itemset {
    /// The empty itemset: the root subproblem covering every transaction.
    pub fn root() -> Self {
        Self { items: Vec::new() }
    }


    /// Number of feature tests on this path.
    pub fn len(&self) -> usize {
        self.items.len()
    }


    /// Whether this is the root itemset.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }


    /// The feature tests, in canonical order.
    pub fn items(&self) -> &[Item] {
        &self.items[..]
    }


    /// Whether `feature` is already tested on this path,
    /// with either polarity.
    #[inline]
    pub fn contains_feature(&self, feature: usize) -> bool {
        self.items
            .binary_search_by_key(&feature, |item| item.feature)
            .is_ok()
    }


    /// The itemset extended by one more feature test,
    /// inserted at its canonical position.
    ///
    /// # Panics
    /// Panics when `feature` is already tested on this path;
    /// the solver never extends a path with a conflicting
    /// or redundant test.
    pub fn child(&self, feature: usize, polarity: Polarity) -> Self {
        let item = Item { feature, polarity };
        let pos = self.items
            .binary_search(&item)
            .expect_err("a feature appears at most once per path");

        assert!(
            !self.contains_feature(feature),
            "feature {feature} is already tested on this path",
        );

        let mut items = Vec::with_capacity(self.items.len() + 1);
        items.extend_from_slice(&self.items[..pos]);
        items.push(item);
        items.extend_from_slice(&self.items[pos..]);

        Self { items }
    }
}
