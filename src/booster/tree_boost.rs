//! Sequential boosting where every weak hypothesis is itself
//! a provably optimal tree for the round's distribution.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};


use crate::error::SearchError;
use crate::objective::ClassificationError;
use crate::search::{SearchConfig, Solver};
use crate::transaction::TransactionStore;
use crate::tree::Tree;


// Floor on a round's weighted error when computing its vote weight,
// so a perfect round gets a large finite weight.
const ERROR_FLOOR: f64 = 1e-10;


/// Struct `TreeBoost` runs sequential boosting rounds,
/// each of which searches a provably optimal tree
/// for the current distribution over transactions.
///
/// Rounds follow the multi-class SAMME update: a round with weighted
/// error `ε` over `K` classes gets the vote weight
/// `α = ln((1 − ε)/ε) + ln(K − 1)`,
/// and the distribution is multiplied by `exp(α)` on the transactions
/// the round's tree misclassifies, then renormalized.
/// Rounds are strictly sequential — each distribution depends on the
/// previous round's tree — while the search inside a round may use
/// every core.
///
/// Boosting stops early after a perfect round, or when the freshly
/// solved tree is no better than chance (`α ≤ 0`).
///
/// # Example
/// ```
/// use optree::{SearchConfig, TreeBoost};
///
/// let data = vec![
///     vec![0, 1], vec![0, 0], vec![1, 1], vec![1, 0],
/// ];
/// let labels = vec![0, 0, 1, 1];
///
/// let booster = TreeBoost::init(&data, &labels, SearchConfig::new(2, 1))
///     .n_round(5);
/// let ensemble = booster.run().unwrap();
/// assert_eq!(ensemble.predict_all(&data), labels);
/// ```
pub struct TreeBoost<'a> {
    data: &'a [Vec<u8>],
    labels: &'a [usize],
    config: SearchConfig,

    n_round: usize,
}


impl<'a> TreeBoost<'a> {
    /// Initialize the booster.
    /// `config` constrains the per-round tree search;
    /// the default number of rounds is `10`.
    pub fn init(
        data: &'a [Vec<u8>],
        labels: &'a [usize],
        config: SearchConfig,
    ) -> Self
    {
        Self { data, labels, config, n_round: 10 }
    }


    /// Set the number of boosting rounds.
    pub fn n_round(mut self, n_round: usize) -> Self {
        assert!(n_round > 0);
        self.n_round = n_round;
        self
    }


    /// Run the boosting rounds and return the weighted-vote ensemble.
    ///
    /// # Errors
    /// Dataset errors surface before the first round;
    /// a failed round search aborts the whole run.
    pub fn run(self) -> Result<WeightedVote, SearchError> {
        let store = TransactionStore::new(self.data, self.labels)?;
        let (n_sample, _) = store.shape();
        let n_class = store.n_class();

        let mut dist = vec![1.0 / n_sample as f64; n_sample];
        let mut trees = Vec::new();
        let mut weights = Vec::new();

        for _ in 0..self.n_round {
            let round_store =
                store.clone().with_weights(dist.clone())?;
            let objective = ClassificationError;
            let tree = Solver::new(&round_store, &objective, &self.config)
                .solve()?;

            let mistakes = self.data.iter()
                .zip(self.labels)
                .map(|(x, y)| tree.predict(x) != *y)
                .collect::<Vec<bool>>();

            let error = dist.iter()
                .zip(&mistakes)
                .filter(|(_, miss)| **miss)
                .map(|(d, _)| *d)
                .sum::<f64>();

            if error <= 0.0 {
                // The round separates the sample perfectly;
                // give it a large finite vote and stop.
                let weight = ((1.0 - ERROR_FLOOR) / ERROR_FLOOR).ln();
                trees.push(tree);
                weights.push(weight);
                break;
            }

            let error = error.max(ERROR_FLOOR);
            let weight = ((1.0 - error) / error).ln()
                + ((n_class - 1) as f64).ln();
            if weight <= 0.0 {
                // Even the optimal tree is no better than chance
                // under this distribution; further rounds cannot help.
                break;
            }

            // Reweight the mistakes and renormalize.
            let boost = weight.exp();
            dist.par_iter_mut()
                .zip(&mistakes)
                .filter(|(_, miss)| **miss)
                .for_each(|(d, _)| *d *= boost);
            let normalizer = dist.iter().sum::<f64>();
            dist.par_iter_mut()
                .for_each(|d| *d /= normalizer);

            trees.push(tree);
            weights.push(weight);
        }

        Ok(WeightedVote { trees, weights, n_class })
    }
}


/// Struct `WeightedVote` combines the per-round trees
/// by weighted vote over the classes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedVote {
    trees: Vec<Tree>,
    weights: Vec<f64>,
    n_class: usize,
}


impl WeightedVote {
    /// The per-round trees, in round order.
    pub fn trees(&self) -> &[Tree] {
        &self.trees[..]
    }


    /// The vote weight of each tree.
    pub fn weights(&self) -> &[f64] {
        &self.weights[..]
    }


    /// Number of rounds kept in the ensemble.
    pub fn len(&self) -> usize {
        self.trees.len()
    }


    /// Whether no round survived.
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }


    /// The class receiving the largest total vote for `transaction`.
    /// Ties go to the lower class index.
    pub fn predict(&self, transaction: &[u8]) -> usize {
        let mut votes = vec![0.0; self.n_class];
        self.trees.iter()
            .zip(&self.weights)
            .for_each(|(tree, w)| votes[tree.predict(transaction)] += w);

        votes.iter()
            .enumerate()
            .fold(0, |best, (c, v)| {
                if *v > votes[best] { c } else { best }
            })
    }


    /// The predictions for a batch of transactions.
    pub fn predict_all(&self, data: &[Vec<u8>]) -> Vec<usize> {
        data.par_iter()
            .map(|transaction| self.predict(transaction))
            .collect()
    }
}
