//! Evaluation of learners
//!
//! Every function here takes the dataset by shared reference. Held-out ranges, folds and
//! shuffles produce new datasets with [`Dataset::select`], the caller's dataset is never
//! reordered.
//!
//! ```rust
//! use tabula::{evaluation, Dataset};
//! use tabula::prelude::*;
//! use ndarray::ArrayView1;
//!
//! // a learner which always predicts the first target value it has seen
//! struct First;
//! struct Constant(Value);
//!
//! impl Predict for Constant {
//!     fn predict(&self, _: ArrayView1<Value>) -> Value {
//!         self.0.clone()
//!     }
//! }
//!
//! impl Fit for First {
//!     type Object = Constant;
//!
//!     fn fit(&self, dataset: &Dataset) -> Result<Constant> {
//!         if dataset.nexamples() == 0 {
//!             return Err(Error::NotEnoughSamples);
//!         }
//!         Ok(Constant(dataset.target_value(0).clone()))
//!     }
//! }
//!
//! let dataset = Dataset::builder()
//!     .rows(vec![vec![0, 1], vec![1, 1], vec![2, 0], vec![3, 1]])
//!     .unwrap();
//!
//! let accuracy = evaluation::train_and_test(&First, &dataset, 3, 4).unwrap();
//! assert_eq!(accuracy, 1.0);
//! ```

use rand::Rng;

use crate::dataset::{format_example, Dataset};
use crate::error::{Error, Result};
use crate::traits::{Learner, Predict};

/// Returns the fraction of `examples` which `predictor` classifies correctly
///
/// Every example is sanitized with the configuration of `dataset` before it is handed to the
/// predictor and the prediction is compared to the example's value at the target of `dataset`.
/// Returns `0.0` if there are no examples.
pub fn test<P: Predict + ?Sized>(predictor: &P, dataset: &Dataset, examples: &Dataset) -> f64 {
    let n = examples.nexamples();
    if n == 0 {
        return 0.0;
    }

    let target = dataset.target();
    let mut right = 0;
    for example in examples.examples().rows() {
        let desired = &example[target];
        let output = predictor.predict(dataset.sanitize(example).view());

        if &output == desired {
            right += 1;
            log::trace!("   OK: got {} for {}", desired, format_example(example));
        } else {
            log::debug!(
                "WRONG: got {}, expected {} for {}",
                output,
                desired,
                format_example(example)
            );
        }
    }

    right as f64 / n as f64
}

/// Returns the accuracy of `predictor` on the examples of `dataset`
pub fn score<P: Predict + ?Sized>(predictor: &P, dataset: &Dataset) -> f64 {
    test(predictor, dataset, dataset)
}

/// Trains on the examples outside of `[start, end)` and tests on the examples inside
pub fn train_and_test<L: Learner + ?Sized>(
    learner: &L,
    dataset: &Dataset,
    start: usize,
    end: usize,
) -> Result<f64> {
    let (train, held_out) = dataset.split_at_range(start, end);
    let predictor = learner.learn(&train)?;

    let accuracy = test(&predictor, dataset, &held_out);
    log::debug!(
        "trained on {} examples, {:.3} accuracy on {} held out",
        train.nexamples(),
        accuracy,
        held_out.nexamples()
    );

    Ok(accuracy)
}

/// Mean accuracy of k-fold cross validation
///
/// The examples are shuffled, then split into `k` folds of `n / k` contiguous examples. Every fold
/// is held out once while the learner trains on the other examples. For `trials > 1` the whole
/// procedure is repeated with fresh shuffles and the results are averaged.
///
/// Fails with `Error::Parameters` unless `1 <= k <= n` and `trials >= 1`.
pub fn cross_validation<L: Learner + ?Sized, R: Rng>(
    learner: &L,
    dataset: &Dataset,
    k: usize,
    trials: usize,
    rng: &mut R,
) -> Result<f64> {
    let n = dataset.nexamples();
    if k < 1 || k > n {
        return Err(Error::Parameters(format!(
            "number of folds should be between one and {}, but was {}",
            n, k
        )));
    }
    if trials < 1 {
        return Err(Error::Parameters(
            "number of trials should be at least one".to_string(),
        ));
    }

    let mut total = 0.0;
    for trial in 0..trials {
        let shuffled = dataset.shuffle(rng);
        let fold_size = n / k;

        let mut sum = 0.0;
        for i in 0..k {
            sum += train_and_test(learner, &shuffled, i * fold_size, (i + 1) * fold_size)?;
        }

        let mean = sum / k as f64;
        log::debug!("trial {}: {}-fold accuracy {:.3}", trial, k, mean);
        total += mean;
    }

    Ok(total / trials as f64)
}

/// Leave-one-out cross validation, every example is held out once
pub fn leave_one_out<L: Learner + ?Sized, R: Rng>(
    learner: &L,
    dataset: &Dataset,
    rng: &mut R,
) -> Result<f64> {
    cross_validation(learner, dataset, dataset.nexamples(), 1, rng)
}

/// Accuracy as a function of the number of training examples
///
/// For every size the examples are shuffled `trials` times, the learner trains on the first
/// `size` examples and is tested on the remaining ones. Without explicit sizes every even size
/// from two up to ten below the number of examples is used.
///
/// Unlike the classic formulation, which tests on the first `size` examples, `size` here is
/// the number of training examples.
///
/// Returns pairs of training size and mean accuracy.
pub fn learning_curve<L: Learner + ?Sized, R: Rng>(
    learner: &L,
    dataset: &Dataset,
    trials: usize,
    sizes: Option<&[usize]>,
    rng: &mut R,
) -> Result<Vec<(usize, f64)>> {
    let n = dataset.nexamples();
    if trials < 1 {
        return Err(Error::Parameters(
            "number of trials should be at least one".to_string(),
        ));
    }

    let sizes = match sizes {
        Some(sizes) => sizes.to_vec(),
        None => (2..n.saturating_sub(10)).step_by(2).collect(),
    };

    if let Some(size) = sizes.iter().find(|size| **size < 1 || **size >= n) {
        return Err(Error::Parameters(format!(
            "training size should be between one and {}, but was {}",
            n.saturating_sub(1),
            size
        )));
    }

    sizes
        .into_iter()
        .map(|size| {
            let mut sum = 0.0;
            for _ in 0..trials {
                let shuffled = dataset.shuffle(rng);
                sum += train_and_test(learner, &shuffled, size, n)?;
            }

            Ok((size, sum / trials as f64))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use crate::traits::Fit;
    use approx::assert_abs_diff_eq;
    use ndarray::ArrayView1;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::cell::Cell;

    /// Remembers the training examples and predicts by exact lookup
    struct Memorize;

    struct Lookup {
        dataset: Dataset,
    }

    impl Predict for Lookup {
        fn predict(&self, example: ArrayView1<Value>) -> Value {
            self.dataset
                .examples()
                .rows()
                .into_iter()
                .position(|row| self.dataset.sanitize(row) == example)
                .map(|idx| self.dataset.target_value(idx).clone())
                .unwrap_or(Value::Unknown)
        }
    }

    impl Fit for Memorize {
        type Object = Lookup;

        fn fit(&self, dataset: &Dataset) -> Result<Lookup> {
            Ok(Lookup {
                dataset: dataset.clone(),
            })
        }
    }

    /// Counts how often it was trained
    struct Counting<'a>(&'a Cell<usize>);

    impl<'a> Learner for Counting<'a> {
        fn learn(&self, dataset: &Dataset) -> Result<Box<dyn Predict>> {
            self.0.set(self.0.get() + 1);
            Memorize.learn(dataset)
        }
    }

    fn identity(n: usize) -> Dataset {
        Dataset::builder()
            .attr_names_str("x y")
            .rows((0..n).map(|i| vec![i, i % 3]))
            .unwrap()
    }

    #[test]
    fn test_compares_sanitized_predictions() {
        let dataset = identity(6);
        let model = Memorize.fit(&dataset).unwrap();

        assert_abs_diff_eq!(score(&model, &dataset), 1.0);

        let empty = dataset.select(&[]);
        assert_abs_diff_eq!(test(&model, &dataset, &empty), 0.0);
    }

    #[test]
    fn held_out_examples_are_unseen() {
        let dataset = identity(6);

        // memorizing cannot generalize to unseen inputs
        let accuracy = train_and_test(&Memorize, &dataset, 2, 4).unwrap();
        assert_abs_diff_eq!(accuracy, 0.0);

        let accuracy = train_and_test(&Memorize, &dataset, 6, 6).unwrap();
        assert_abs_diff_eq!(accuracy, 0.0);
    }

    #[test]
    fn cross_validation_trains_once_per_fold() {
        let dataset = identity(7);
        let mut rng = SmallRng::seed_from_u64(42);
        let calls = Cell::new(0);

        let accuracy = cross_validation(&Counting(&calls), &dataset, 3, 2, &mut rng).unwrap();
        assert_eq!(calls.get(), 6);
        assert_abs_diff_eq!(accuracy, 0.0);

        calls.set(0);
        leave_one_out(&Counting(&calls), &dataset, &mut rng).unwrap();
        assert_eq!(calls.get(), 7);
    }

    #[test]
    fn cross_validation_checks_parameters() {
        let dataset = identity(4);
        let mut rng = SmallRng::seed_from_u64(42);

        for (k, trials) in &[(0, 1), (5, 1), (2, 0)] {
            assert!(matches!(
                cross_validation(&Memorize, &dataset, *k, *trials, &mut rng),
                Err(Error::Parameters(_))
            ));
        }
    }

    #[test]
    fn dataset_is_left_in_order() {
        let dataset = identity(10);
        let before = dataset.clone();
        let mut rng = SmallRng::seed_from_u64(42);

        leave_one_out(&Memorize, &dataset, &mut rng).unwrap();
        learning_curve(&Memorize, &dataset, 2, Some(&[3, 5][..]), &mut rng).unwrap();

        assert_eq!(dataset, before);
    }

    #[test]
    fn learning_curve_sizes() {
        let dataset = identity(20);
        let mut rng = SmallRng::seed_from_u64(42);

        let curve = learning_curve(&Memorize, &dataset, 1, None, &mut rng).unwrap();
        let sizes = curve.iter().map(|(size, _)| *size).collect::<Vec<_>>();
        assert_eq!(sizes, vec![2, 4, 6, 8]);
        assert!(curve.iter().all(|(_, acc)| (0.0..=1.0).contains(acc)));

        assert!(learning_curve(&Memorize, &dataset, 1, Some(&[20][..]), &mut rng).is_err());
        assert!(learning_curve(&Memorize, &dataset, 0, None, &mut rng).is_err());
    }
}
