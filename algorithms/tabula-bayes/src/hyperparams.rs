use crate::CategoricalNb;

/// Hyperparameters of categorical naive Bayes
///
/// The conditional probabilities are estimated with fixed add-one (Laplace) smoothing, there is
/// nothing to tune. The struct exists so that naive Bayes is fitted the same way as every other
/// learner.
///
/// # Example
///
/// ```rust
/// use tabula::prelude::*;
/// use tabula_bayes::CategoricalNb;
///
/// let dataset = Dataset::builder()
///     .attr_names_str("Sky Play")
///     .csv("Sunny, Yes\nSunny, Yes\nRainy, No")
///     .unwrap();
///
/// let model = CategoricalNb::params().fit(&dataset).unwrap();
/// assert_eq!(score(&model, &dataset), 1.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NaiveBayesParams;

impl NaiveBayesParams {
    pub fn new() -> Self {
        NaiveBayesParams
    }
}

impl CategoricalNb {
    /// Construct a new set of hyperparameters
    pub fn params() -> NaiveBayesParams {
        NaiveBayesParams::new()
    }
}
