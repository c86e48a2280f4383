//! Defines the inner representation of a materialized tree.
use serde::{Serialize, Deserialize};


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that tests one feature and has two children.
    Branch(BranchNode),

    /// A node that predicts a value.
    Leaf(LeafNode),
}


/// Represents the internal nodes of a tree.
/// Transactions where the tested feature is absent descend left;
/// transactions where it is present descend right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(crate) feature: usize,
    pub(crate) left: Box<Node>,
    pub(crate) right: Box<Node>,
}


/// Represents the leaves of a tree.
/// `value` is a class index for classification trees
/// and a cluster id for partitions;
/// `error` is the (weighted) error this leaf achieves
/// on the training transactions it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(crate) value: usize,
    pub(crate) error: f64,
}


impl BranchNode {
    /// Index of the tested feature.
    pub fn feature(&self) -> usize {
        self.feature
    }


    /// Child for transactions where the feature is absent.
    pub fn left(&self) -> &Node {
        &self.left
    }


    /// Child for transactions where the feature is present.
    pub fn right(&self) -> &Node {
        &self.right
    }
}


impl LeafNode {
    /// The predicted value.
    pub fn value(&self) -> usize {
        self.value
    }


    /// The achieved training error of this leaf.
    pub fn error(&self) -> f64 {
        self.error
    }
}


impl Node {
    pub(crate) fn leaf(value: usize, error: f64) -> Self {
        Self::Leaf(LeafNode { value, error })
    }


    pub(crate) fn branch(feature: usize, left: Node, right: Node) -> Self {
        Self::Branch(BranchNode {
            feature,
            left: Box::new(left),
            right: Box::new(right),
        })
    }


    /// Walk the tree with an arbitrary feature accessor.
    /// `predict` and the partition assignment both go through this.
    pub(crate) fn descend<F>(&self, feature_value: &F) -> &LeafNode
        where F: Fn(usize) -> bool,
    {
        match self {
            Self::Leaf(leaf) => leaf,
            Self::Branch(branch) => {
                if feature_value(branch.feature) {
                    branch.right.descend(feature_value)
                } else {
                    branch.left.descend(feature_value)
                }
            },
        }
    }


    /// The prediction for one transaction. Pure lookup; no search.
    pub fn predict(&self, transaction: &[u8]) -> usize {
        self.descend(&|f| transaction[f] != 0).value
    }


    pub(crate) fn error(&self) -> f64 {
        match self {
            Self::Leaf(leaf) => leaf.error,
            Self::Branch(branch) => {
                branch.left.error() + branch.right.error()
            },
        }
    }


    pub(crate) fn depth(&self) -> usize {
        match self {
            Self::Leaf(_) => 0,
            Self::Branch(branch) => {
                1 + branch.left.depth().max(branch.right.depth())
            },
        }
    }


    pub(crate) fn n_leaf(&self) -> usize {
        match self {
            Self::Leaf(_) => 1,
            Self::Branch(branch) => {
                branch.left.n_leaf() + branch.right.n_leaf()
            },
        }
    }


    /// Rewrite every leaf value, left to right.
    /// Partitions use this to turn medoid ids into dense cluster ids.
    pub(crate) fn relabel_leaves<F>(&mut self, relabel: &mut F)
        where F: FnMut(usize) -> usize,
    {
        match self {
            Self::Leaf(leaf) => leaf.value = relabel(leaf.value),
            Self::Branch(branch) => {
                branch.left.relabel_leaves(relabel);
                branch.right.relabel_leaves(relabel);
            },
        }
    }
}
