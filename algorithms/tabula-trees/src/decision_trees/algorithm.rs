//! ID3 decision trees
//!
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::fmt;

use log::{debug, trace};
use ndarray::{ArrayView1, ArrayView2};
use rand::Rng;

use super::{DecisionTreeParams, NodeIter};
use tabula::{
    dataset::{Dataset, Value},
    error::{Error, Result},
    plurality::{argmax_random_tie, plurality_value, value_counts},
    traits::*,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
/// A node in the decision tree
///
/// With the `serde` feature branches serialize as a map keyed by `Value`, so formats restricted
/// to string keys, such as JSON, cannot hold a tree.
pub enum TreeNode {
    /// Tests an attribute and continues with the branch of the example's value
    Fork {
        attr: usize,
        attr_name: String,
        branches: BTreeMap<Value, TreeNode>,
    },
    /// Predicts a constant value
    Leaf { prediction: Value },
}

impl TreeNode {
    /// Returns true if the node has no children
    pub fn is_leaf(&self) -> bool {
        matches!(self, TreeNode::Leaf { .. })
    }

    /// Returns `Some(prediction)` for leaf nodes and `None` for forks.
    pub fn prediction(&self) -> Option<&Value> {
        match self {
            TreeNode::Leaf { prediction } => Some(prediction),
            TreeNode::Fork { .. } => None,
        }
    }

    /// Returns the tested attribute if the node is a fork
    pub fn attr(&self) -> Option<usize> {
        match self {
            TreeNode::Fork { attr, .. } => Some(*attr),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns the name of the tested attribute if the node is a fork,
    /// `None` otherwise
    pub fn attr_name(&self) -> Option<&str> {
        match self {
            TreeNode::Fork { attr_name, .. } => Some(attr_name),
            TreeNode::Leaf { .. } => None,
        }
    }

    pub fn branches(&self) -> Option<&BTreeMap<Value, TreeNode>> {
        match self {
            TreeNode::Fork { branches, .. } => Some(branches),
            TreeNode::Leaf { .. } => None,
        }
    }

    /// Returns the children ordered by their branch value
    pub fn children(&self) -> Vec<&TreeNode> {
        match self {
            TreeNode::Fork { branches, .. } => branches.values().collect(),
            TreeNode::Leaf { .. } => Vec::new(),
        }
    }

    /// Classify an example by following the branches down to a leaf
    ///
    /// If the example has a value without a branch the result is `Value::Unknown`.
    pub fn predict(&self, example: ArrayView1<Value>) -> Value {
        let mut node = self;
        loop {
            match node {
                TreeNode::Leaf { prediction } => return prediction.clone(),
                TreeNode::Fork { attr, branches, .. } => match branches.get(&example[*attr]) {
                    Some(child) => node = child,
                    None => return Value::Unknown,
                },
            }
        }
    }

    /// Writes the subtree with `indent` levels of indentation
    ///
    /// Forks print `Test <attr>` followed by one line per branch, leaves print
    /// `RESULT = <value>`.
    pub fn display<W: fmt::Write>(&self, f: &mut W, indent: usize) -> fmt::Result {
        match self {
            TreeNode::Leaf { prediction } => writeln!(f, "RESULT = {}", prediction),
            TreeNode::Fork {
                attr_name,
                branches,
                ..
            } => {
                writeln!(f, "Test {}", attr_name)?;
                for (value, child) in branches {
                    write!(
                        f,
                        "{:width$} {} = {} ==> ",
                        "",
                        attr_name,
                        value,
                        width = 4 * indent
                    )?;
                    child.display(f, indent + 1)?;
                }

                Ok(())
            }
        }
    }

    fn depth(&self) -> usize {
        self.children()
            .into_iter()
            .map(|child| child.depth() + 1)
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.display(f, 0)
    }
}

/// A fitted ID3 decision tree
///
/// ### Structure
/// Every internal node tests a single categorical attribute and has one branch for every value in
/// the attribute's value set, also for values which did not occur in the training examples
/// reaching that node. Leaf nodes predict a value of the target attribute.
///
/// ### Algorithm
///
/// The tree is grown recursively from the root, every node receives the training examples
/// matching the branches on its path and the attributes not tested yet:
///
/// * Without examples the node becomes a leaf predicting the most common target value of the
///   parent's examples;
/// * If all examples share one target value, the node becomes a leaf predicting it;
/// * Without attributes left the node becomes a leaf predicting the most common target value;
/// * Otherwise the attribute with maximal information gain is tested and a child is grown for
///   every value of it.
///
/// Ties, both between attributes and between target values, are broken uniformly at random.
///
/// ### Example
///
/// ```rust
/// use tabula_trees::DecisionTree;
/// use tabula::prelude::*;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let dataset = tabula_datasets::restaurant();
/// let tree = DecisionTree::params_with_rng(SmallRng::seed_from_u64(42))
///     .fit(&dataset)
///     .unwrap();
///
/// assert_eq!(tree.root_node().attr_name(), Some("Patrons"));
/// println!("{}", tree);
/// ```
///
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    root_node: TreeNode,
}

impl Predict for DecisionTree {
    fn predict(&self, example: ArrayView1<Value>) -> Value {
        self.root_node.predict(example)
    }
}

impl<R: Rng + Clone> Fit for DecisionTreeParams<R> {
    type Object = DecisionTree;

    /// Grow a decision tree for the target of `dataset` from its input attributes
    fn fit(&self, dataset: &Dataset) -> Result<Self::Object> {
        if dataset.nexamples() == 0 {
            return Err(Error::NotEnoughSamples);
        }

        let mut learner = Id3 {
            dataset,
            examples: dataset.examples(),
            domains: (0..dataset.width())
                .map(|attr| dataset.domain(attr))
                .collect(),
            rng: self.rng().clone(),
        };

        let rows = (0..dataset.nexamples()).collect::<Vec<_>>();
        let root_node = learner.learn(&rows, dataset.inputs(), &rows);
        let tree = DecisionTree { root_node };

        debug!(
            "fitted decision tree on {} with depth {} and {} leaves",
            dataset,
            tree.depth(),
            tree.num_leaves()
        );

        Ok(tree)
    }
}

impl DecisionTree {
    /// Create a node iterator in level-order (BFT)
    pub fn iter_nodes(&self) -> NodeIter {
        // queue of nodes yet to explore
        let mut queue = VecDeque::new();
        queue.push_back(&self.root_node);

        NodeIter::new(queue)
    }

    /// Return the attributes tested anywhere in the tree, in ascending order
    pub fn features(&self) -> Vec<usize> {
        self.iter_nodes()
            .filter_map(TreeNode::attr)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Return root node of the tree
    pub fn root_node(&self) -> &TreeNode {
        &self.root_node
    }

    /// Return the number of forks on the longest path from the root to a leaf
    pub fn depth(&self) -> usize {
        self.root_node.depth()
    }

    /// Return the number of leaves in this tree
    pub fn num_leaves(&self) -> usize {
        self.iter_nodes().filter(|node| node.is_leaf()).count()
    }
}

impl fmt::Display for DecisionTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root_node.display(f, 0)
    }
}

/// State of a single fit
struct Id3<'a, R> {
    dataset: &'a Dataset,
    examples: ArrayView2<'a, Value>,
    domains: Vec<Vec<Value>>,
    rng: R,
}

impl<'a, R: Rng> Id3<'a, R> {
    fn learn(&mut self, rows: &[usize], attrs: &[usize], parent_rows: &[usize]) -> TreeNode {
        if rows.is_empty() {
            return self.plurality(parent_rows);
        }

        let target = self.dataset.target();
        let first = &self.examples[[rows[0], target]];
        if rows.iter().all(|row| &self.examples[[*row, target]] == first) {
            return TreeNode::Leaf {
                prediction: first.clone(),
            };
        }

        if attrs.is_empty() {
            return self.plurality(rows);
        }

        let gains = attrs
            .iter()
            .map(|attr| (*attr, self.information_gain(*attr, rows)))
            .collect::<Vec<_>>();
        let attr = match argmax_random_tie(gains, |(_, gain)| *gain, &mut self.rng) {
            Some((attr, gain)) => {
                trace!("testing attribute {} with gain {:.4}", attr, gain);
                attr
            }
            None => return self.plurality(rows),
        };

        let remaining = attrs
            .iter()
            .copied()
            .filter(|other| *other != attr)
            .collect::<Vec<_>>();

        let mut branches = BTreeMap::new();
        for (value, subset) in self.split_by(attr, rows) {
            let subtree = self.learn(&subset, &remaining, rows);
            branches.insert(value, subtree);
        }

        TreeNode::Fork {
            attr,
            attr_name: self.dataset.attr_name(attr).unwrap_or_default().to_string(),
            branches,
        }
    }

    fn plurality(&mut self, rows: &[usize]) -> TreeNode {
        TreeNode::Leaf {
            prediction: plurality_value(self.dataset, rows, &mut self.rng),
        }
    }

    /// Pairs of every value of `attr` with the rows taking it
    fn split_by(&self, attr: usize, rows: &[usize]) -> Vec<(Value, Vec<usize>)> {
        split_by(self.examples, attr, &self.domains[attr], rows)
    }

    fn information_gain(&self, attr: usize, rows: &[usize]) -> f64 {
        gain(
            self.examples,
            self.dataset.target(),
            attr,
            &self.domains[attr],
            rows,
        )
    }
}

fn split_by(
    examples: ArrayView2<Value>,
    attr: usize,
    domain: &[Value],
    rows: &[usize],
) -> Vec<(Value, Vec<usize>)> {
    domain
        .iter()
        .map(|value| {
            let subset = rows
                .iter()
                .copied()
                .filter(|row| &examples[[*row, attr]] == value)
                .collect();

            (value.clone(), subset)
        })
        .collect()
}

fn target_entropy(examples: ArrayView2<Value>, target: usize, rows: &[usize]) -> f64 {
    let counts = value_counts(rows.iter().map(|row| &examples[[*row, target]]));

    entropy(&counts.values().copied().collect::<Vec<_>>())
}

fn gain(
    examples: ArrayView2<Value>,
    target: usize,
    attr: usize,
    domain: &[Value],
    rows: &[usize],
) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }

    let n = rows.len() as f64;
    let remainder = split_by(examples, attr, domain, rows)
        .into_iter()
        .map(|(_, subset)| subset.len() as f64 / n * target_entropy(examples, target, &subset))
        .sum::<f64>();

    target_entropy(examples, target, rows) - remainder
}

/// Given the class counts calculates the entropy in bits.
///
/// Classes with zero count do not contribute, for no samples at all the entropy is zero.
pub fn entropy(counts: &[usize]) -> f64 {
    let n_samples = counts.iter().sum::<usize>() as f64;
    if n_samples == 0.0 {
        return 0.0;
    }

    counts
        .iter()
        .map(|x| *x as f64 / n_samples)
        .map(|x| if x > 0.0 { -x * x.log2() } else { 0.0 })
        .sum()
}

/// Expected reduction in target entropy when the examples at `rows` are split by `attr`
///
/// The split creates one subset for every value of the attribute's value set.
pub fn information_gain(dataset: &Dataset, attr: usize, rows: &[usize]) -> f64 {
    gain(
        dataset.examples(),
        dataset.target(),
        attr,
        &dataset.domain(attr),
        rows,
    )
}
