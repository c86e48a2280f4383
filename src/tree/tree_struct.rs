//! The decision tree returned by a search.
use rayon::prelude::*;
use serde::{Serialize, Deserialize};


use super::node::Node;


/// Struct `Tree` is a proven-optimal decision tree.
///
/// Trees are produced only by a finished search;
/// prediction walks the materialized structure and never
/// touches the solver or its cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    root: Node,
    error: f64,
    depth: usize,
    n_leaf: usize,
}


impl Tree {
    pub(crate) fn new(root: Node) -> Self {
        let error = root.error();
        let depth = root.depth();
        let n_leaf = root.n_leaf();
        Self { root, error, depth, n_leaf }
    }


    /// The root node.
    pub fn root(&self) -> &Node {
        &self.root
    }


    /// The proven-optimal training error:
    /// no tree of equal or shallower depth satisfying the same
    /// support constraint achieves less.
    pub fn error(&self) -> f64 {
        self.error
    }


    /// Depth of the tree. A single leaf has depth `0`.
    pub fn depth(&self) -> usize {
        self.depth
    }


    /// Number of leaves.
    pub fn n_leaf(&self) -> usize {
        self.n_leaf
    }


    /// The prediction for one transaction,
    /// given as a binary feature row.
    pub fn predict(&self, transaction: &[u8]) -> usize {
        self.root.predict(transaction)
    }


    /// The predictions for a batch of transactions.
    pub fn predict_all(&self, data: &[Vec<u8>]) -> Vec<usize> {
        data.par_iter()
            .map(|transaction| self.predict(transaction))
            .collect()
    }


    /// Serialize this tree to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .expect("a tree always serializes")
    }


    /// Deserialize a tree from a JSON string
    /// produced by [`to_json`](Tree::to_json).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
