use std::collections::BTreeMap;

use log::debug;
use ndarray::ArrayView1;

use crate::NaiveBayesParams;
use tabula::{
    dataset::{Dataset, Value},
    error::{Error, Result},
    traits::*,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

impl Fit for NaiveBayesParams {
    type Object = CategoricalNb;

    /// Counts the values of every input attribute per target value
    fn fit(&self, dataset: &Dataset) -> Result<CategoricalNb> {
        if dataset.nexamples() == 0 {
            return Err(Error::NotEnoughSamples);
        }

        let target = dataset.target();
        let inputs = dataset.inputs().to_vec();
        let domain_sizes = inputs
            .iter()
            .map(|attr| dataset.domain(*attr).len())
            .collect();

        let mut class_info = dataset
            .domain(target)
            .into_iter()
            .map(|class| ClassHistogram::new(class, inputs.len()))
            .collect::<Vec<_>>();

        for example in dataset.examples().rows() {
            if let Some(histogram) = class_info
                .iter_mut()
                .find(|histogram| histogram.class == example[target])
            {
                histogram.update(example, &inputs);
            }
        }

        for histogram in &class_info {
            debug!(
                "class {}: {} examples",
                histogram.class, histogram.class_count
            );
        }

        Ok(CategoricalNb {
            inputs,
            domain_sizes,
            class_info,
        })
    }
}

/// Counts of one target value
///
/// With the `serde` feature the histograms serialize as maps keyed by `Value`, which formats
/// restricted to string keys, such as JSON, reject.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
struct ClassHistogram {
    class: Value,
    class_count: usize,
    // one histogram per input attribute
    value_counts: Vec<BTreeMap<Value, usize>>,
}

impl ClassHistogram {
    fn new(class: Value, ninputs: usize) -> Self {
        ClassHistogram {
            class,
            class_count: 0,
            value_counts: vec![BTreeMap::new(); ninputs],
        }
    }

    fn update(&mut self, example: ArrayView1<Value>, inputs: &[usize]) {
        self.class_count += 1;
        for (counts, attr) in self.value_counts.iter_mut().zip(inputs) {
            *counts.entry(example[*attr].clone()).or_insert(0) += 1;
        }
    }

    fn count(&self, input: usize, value: &Value) -> usize {
        self.value_counts[input].get(value).copied().unwrap_or(0)
    }
}

/// Fitted categorical naive Bayes classifier
///
/// The input attributes are assumed to be independent given the target. For every target value
/// `c` and input attribute `a` the model keeps how often each value `v` occurred together with
/// `c`, and estimates
///
/// ```text
/// P(a = v | c) = (N(c, a, v) + 1) / (N(c) + |values(a)|)
/// ```
///
/// A prediction is the target value with the largest product of these probabilities over all
/// inputs. The product is evaluated as a sum of logarithms and no class prior is included.
/// Candidates are visited in the order of the target's value set and the first maximum wins, so
/// predictions are deterministic.
///
/// # Example
///
/// ```rust
/// use tabula::prelude::*;
/// use tabula_bayes::CategoricalNb;
///
/// let dataset = tabula_datasets::restaurant();
/// let model = CategoricalNb::params().fit(&dataset).unwrap();
///
/// let predictions = model.predict_dataset(&dataset);
/// assert_eq!(predictions.len(), 12);
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalNb {
    inputs: Vec<usize>,
    domain_sizes: Vec<usize>,
    class_info: Vec<ClassHistogram>,
}

impl CategoricalNb {
    /// Target values in the order they are considered
    pub fn classes(&self) -> Vec<&Value> {
        self.class_info
            .iter()
            .map(|histogram| &histogram.class)
            .collect()
    }

    /// Number of training examples of a target value
    pub fn class_count(&self, class: &Value) -> usize {
        self.class_info
            .iter()
            .find(|histogram| &histogram.class == class)
            .map(|histogram| histogram.class_count)
            .unwrap_or(0)
    }

    /// Log of the smoothed conditional probability `P(attr = value | class)`
    ///
    /// Returns `None` if `class` was not a target value or `attr` is not an input attribute.
    pub fn log_probability(&self, class: &Value, attr: usize, value: &Value) -> Option<f64> {
        let histogram = self
            .class_info
            .iter()
            .find(|histogram| &histogram.class == class)?;
        let input = self.inputs.iter().position(|input| *input == attr)?;

        Some(self.smoothed_log_probability(histogram, input, value))
    }

    /// Summed log probabilities of the example's input values for every target value
    pub fn joint_log_likelihood(&self, example: ArrayView1<Value>) -> Vec<(&Value, f64)> {
        self.class_info
            .iter()
            .map(|histogram| {
                let sum = self
                    .inputs
                    .iter()
                    .enumerate()
                    .map(|(input, attr)| {
                        self.smoothed_log_probability(histogram, input, &example[*attr])
                    })
                    .sum();

                (&histogram.class, sum)
            })
            .collect()
    }

    fn smoothed_log_probability(
        &self,
        histogram: &ClassHistogram,
        input: usize,
        value: &Value,
    ) -> f64 {
        let count = histogram.count(input, value) as f64;
        let total = (histogram.class_count + self.domain_sizes[input]) as f64;

        ((count + 1.) / total).ln()
    }
}

impl Predict for CategoricalNb {
    fn predict(&self, example: ArrayView1<Value>) -> Value {
        let mut best: Option<(&Value, f64)> = None;
        for (class, likelihood) in self.joint_log_likelihood(example) {
            if best.map_or(true, |(_, max)| likelihood > max) {
                best = Some((class, likelihood));
            }
        }

        best.map(|(class, _)| class.clone())
            .unwrap_or(Value::Unknown)
    }
}
