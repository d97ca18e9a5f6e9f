//!
//! # Decision tree learning
//! `tabula-trees` implements decision tree induction for categorical datasets.
//!
//! # The big picture
//!
//! `tabula-trees` is a crate in the `tabula` workspace, a toolkit for classic supervised learning
//! on tables of categorical attributes.
//!
//! Decision trees are a non-parametric supervised learning method. Every internal node tests a
//! single attribute and has one branch for every value that attribute may take, every leaf
//! predicts a value of the target attribute.
//!
//! # Current state
//!
//! `tabula-trees` currently provides an [implementation](DecisionTree) of ID3, which chooses the
//! attribute with maximal information gain at every node.
//!

mod decision_trees;

pub use decision_trees::*;

pub use tabula::error::Result;
