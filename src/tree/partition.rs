//! The clustering output: a tree whose leaves are clusters.
use serde::{Serialize, Deserialize};


use super::node::Node;
use super::tree_struct::Tree;
use crate::transaction::TransactionStore;


/// Struct `Partition` is a proven-optimal clustering of the
/// transactions: the leaves of an optimal tree, relabelled with dense
/// cluster ids `0..n_cluster` in left-to-right order.
///
/// Each cluster keeps its medoid (the representative transaction the
/// objective selected), and the total within-cluster dissimilarity is
/// minimal among all partitions induced by trees of the searched depth
/// and support.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partition {
    tree: Tree,
    medoids: Vec<usize>,
    assignments: Vec<usize>,
}


impl Partition {
    /// Relabel the leaves of a solved clustering tree
    /// and assign every transaction of `store` to its cluster.
    pub(crate) fn from_root(mut root: Node, store: &TransactionStore)
        -> Self
    {
        let mut medoids = Vec::new();
        root.relabel_leaves(&mut |medoid| {
            medoids.push(medoid);
            medoids.len() - 1
        });

        let tree = Tree::new(root);

        let n_transaction = store.shape().0;
        let assignments = (0..n_transaction)
            .map(|t| {
                tree.root()
                    .descend(&|f| store.feature_value(t, f))
                    .value()
            })
            .collect();

        Self { tree, medoids, assignments }
    }


    /// The underlying tree. Leaf values are cluster ids.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }


    /// Number of clusters.
    pub fn n_cluster(&self) -> usize {
        self.medoids.len()
    }


    /// Medoid transaction id of each cluster.
    pub fn medoids(&self) -> &[usize] {
        &self.medoids[..]
    }


    /// Cluster id of every training transaction.
    pub fn assignments(&self) -> &[usize] {
        &self.assignments[..]
    }


    /// Total within-cluster dissimilarity of this partition.
    pub fn dissimilarity(&self) -> f64 {
        self.tree.error()
    }


    /// Cluster id for a new transaction,
    /// given as a binary feature row. Pure lookup; no search.
    pub fn assign(&self, transaction: &[u8]) -> usize {
        self.tree.predict(transaction)
    }
}
