use rand::rngs::ThreadRng;
use rand::Rng;

use crate::DecisionTree;

/// The set of hyperparameters that can be specified for fitting a
/// [decision tree](struct.DecisionTree.html).
///
/// ID3 has no tuning knobs, the only parameter is the random number generator used to break
/// ties, both between attributes with equal information gain and between equally frequent target
/// values at a leaf. The generator is cloned for every fit, so fitting twice with the same
/// parameters grows the same tree.
///
/// ### Example
///
/// ```rust
/// use tabula_trees::DecisionTree;
/// use tabula::prelude::*;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// // Load the data
/// let dataset = tabula_datasets::restaurant();
/// // Initialize the parameters with a seeded generator
/// let params = DecisionTree::params_with_rng(SmallRng::seed_from_u64(42));
/// // Fit the decision tree on the training data
/// let tree = params.fit(&dataset).unwrap();
/// // Predict on the training set
/// let accuracy = tabula::evaluation::score(&tree, &dataset);
/// assert_eq!(accuracy, 1.0);
/// ```
///
#[derive(Clone, Debug)]
pub struct DecisionTreeParams<R> {
    rng: R,
}

impl<R: Rng + Clone> DecisionTreeParams<R> {
    pub fn new(rng: R) -> Self {
        DecisionTreeParams { rng }
    }

    /// Sets the random number generator used to break ties
    pub fn with_rng<R2: Rng + Clone>(self, rng: R2) -> DecisionTreeParams<R2> {
        DecisionTreeParams { rng }
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

impl Default for DecisionTreeParams<ThreadRng> {
    fn default() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl DecisionTree {
    /// Parameters breaking ties with the thread local generator
    // Violates the convention that new should return a value of type `Self`
    #[allow(clippy::new_ret_no_self)]
    pub fn params() -> DecisionTreeParams<ThreadRng> {
        DecisionTreeParams::default()
    }

    /// Parameters breaking ties with the given generator
    pub fn params_with_rng<R: Rng + Clone>(rng: R) -> DecisionTreeParams<R> {
        DecisionTreeParams::new(rng)
    }
}
