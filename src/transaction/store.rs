use fixedbitset::FixedBitSet;
use rayon::prelude::*;


use crate::error::SearchError;
use crate::itemset::Polarity;


/// Struct `TransactionStore` holds an immutable binary transaction database:
/// one row per transaction, one binary feature per column,
/// plus a label and a weight per transaction.
///
/// The store derives, once at construction time,
/// a per-feature bitset over transaction ids
/// (bit `t` is set iff feature `f` equals `1` in transaction `t`).
/// Every cover manipulation during the search is a bitset operation
/// over these columns; nothing in the store mutates afterwards,
/// so the search reads it without locking.
///
/// Weights default to `1.0` per transaction.
/// Boosting rounds clone the store and call
/// [`with_weights`](TransactionStore::with_weights)
/// with a fresh distribution.
#[derive(Debug, Clone)]
pub struct TransactionStore {
    n_transaction: usize,
    n_feature: usize,
    n_class: usize,

    // One bitset per feature over transaction ids.
    presence: Vec<FixedBitSet>,

    labels: Vec<usize>,
    weights: Vec<f64>,

    // Weighted support of each class over the whole dataset.
    // Used to break majority-class ties.
    class_supports: Vec<f64>,
}


impl TransactionStore {
    /// Build a store from a binary matrix and one class label per row.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidDataset`] when the matrix is empty,
    /// ragged, has no feature, or contains a value other than `0`/`1`,
    /// and [`SearchError::InvalidLabels`] when the label count
    /// differs from the row count.
    pub fn new(data: &[Vec<u8>], labels: &[usize])
        -> Result<Self, SearchError>
    {
        if labels.len() != data.len() {
            let why = format!(
                "{} labels for {} transactions", labels.len(), data.len(),
            );
            return Err(SearchError::InvalidLabels(why));
        }
        Self::from_parts(data, labels.to_vec())
    }


    /// Build a store without class labels, for clustering searches.
    /// Every transaction gets the label `0`.
    pub fn unlabeled(data: &[Vec<u8>]) -> Result<Self, SearchError> {
        Self::from_parts(data, vec![0; data.len()])
    }


    fn from_parts(data: &[Vec<u8>], labels: Vec<usize>)
        -> Result<Self, SearchError>
    {
        let n_transaction = data.len();
        if n_transaction == 0 {
            let why = String::from("the dataset has no transaction");
            return Err(SearchError::InvalidDataset(why));
        }

        let n_feature = data[0].len();
        if n_feature == 0 {
            let why = String::from("the dataset has no feature");
            return Err(SearchError::InvalidDataset(why));
        }

        for (t, row) in data.iter().enumerate() {
            if row.len() != n_feature {
                let why = format!(
                    "transaction {t} has {got} features, expected {n_feature}",
                    got = row.len(),
                );
                return Err(SearchError::InvalidDataset(why));
            }
            if let Some(x) = row.iter().find(|x| **x > 1) {
                let why = format!(
                    "transaction {t} holds the non-binary value {x}"
                );
                return Err(SearchError::InvalidDataset(why));
            }
        }

        // Derive the per-feature transaction-id bitsets.
        let presence = (0..n_feature).into_par_iter()
            .map(|f| {
                let mut column = FixedBitSet::with_capacity(n_transaction);
                data.iter()
                    .enumerate()
                    .filter(|(_, row)| row[f] == 1)
                    .for_each(|(t, _)| column.insert(t));
                column
            })
            .collect::<Vec<_>>();

        let n_class = labels.iter().copied().max().map_or(1, |c| c + 1);
        let weights = vec![1.0; n_transaction];
        let class_supports = count_class_supports(n_class, &labels, &weights);

        Ok(Self {
            n_transaction,
            n_feature,
            n_class,
            presence,
            labels,
            weights,
            class_supports,
        })
    }


    /// Replace the per-transaction weights.
    /// The derived transaction-id lists are untouched;
    /// only the weighted class supports are recomputed.
    ///
    /// # Errors
    /// Returns [`SearchError::InvalidLabels`] when the weight count
    /// differs from the transaction count
    /// or any weight is negative or non-finite.
    pub fn with_weights(mut self, weights: Vec<f64>)
        -> Result<Self, SearchError>
    {
        if weights.len() != self.n_transaction {
            let why = format!(
                "{} weights for {} transactions",
                weights.len(), self.n_transaction,
            );
            return Err(SearchError::InvalidLabels(why));
        }
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
            let why = String::from(
                "every transaction weight must be finite and non-negative"
            );
            return Err(SearchError::InvalidLabels(why));
        }

        self.class_supports =
            count_class_supports(self.n_class, &self.labels, &weights);
        self.weights = weights;

        Ok(self)
    }


    /// Returns the pair of the number of transactions
    /// and the number of features.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_transaction, self.n_feature)
    }


    /// Number of distinct classes.
    pub fn n_class(&self) -> usize {
        self.n_class
    }


    /// The cover satisfied by every transaction.
    /// This is the root subproblem of a search.
    pub fn root_cover(&self) -> FixedBitSet {
        let mut cover = FixedBitSet::with_capacity(self.n_transaction);
        cover.insert_range(..);
        cover
    }


    /// The fast intersection primitive:
    /// restrict `cover` to the transactions where `feature`
    /// takes the value named by `polarity`.
    #[inline]
    pub fn restrict(
        &self,
        cover: &FixedBitSet,
        feature: usize,
        polarity: Polarity,
    ) -> FixedBitSet
    {
        let mut child = cover.clone();
        match polarity {
            Polarity::Present => child.intersect_with(&self.presence[feature]),
            Polarity::Absent => child.difference_with(&self.presence[feature]),
        }
        child
    }


    /// Number of transactions in `cover`.
    #[inline]
    pub fn support(&self, cover: &FixedBitSet) -> usize {
        cover.count_ones(..)
    }


    /// Total weight of the transactions in `cover`.
    #[inline]
    pub fn weighted_support(&self, cover: &FixedBitSet) -> f64 {
        cover.ones().map(|t| self.weights[t]).sum()
    }


    /// Weighted support of each class within `cover`.
    pub fn class_supports(&self, cover: &FixedBitSet) -> Vec<f64> {
        let mut supports = vec![0.0; self.n_class];
        for t in cover.ones() {
            supports[self.labels[t]] += self.weights[t];
        }
        supports
    }


    /// Weighted support of each class over the whole dataset.
    pub(crate) fn global_class_supports(&self) -> &[f64] {
        &self.class_supports[..]
    }


    /// Label of transaction `t`.
    #[inline]
    pub fn label(&self, t: usize) -> usize {
        self.labels[t]
    }


    /// Weight of transaction `t`.
    #[inline]
    pub fn weight(&self, t: usize) -> f64 {
        self.weights[t]
    }


    /// Whether `feature` is present in transaction `t`.
    #[inline]
    pub fn feature_value(&self, t: usize, feature: usize) -> bool {
        self.presence[feature].contains(t)
    }
}


fn count_class_supports(n_class: usize, labels: &[usize], weights: &[f64])
    -> Vec<f64>
{
    let mut supports = vec![0.0; n_class];
    labels.iter()
        .zip(weights)
        .for_each(|(c, w)| supports[*c] += w);
    supports
}
