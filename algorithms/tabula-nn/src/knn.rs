use std::cell::RefCell;

use log::{debug, trace};
use ndarray::{Array1, Array2, ArrayView1};
use rand::Rng;

use tabula::{
    dataset::{Dataset, Value},
    error::{Error, Result},
    plurality::mode,
    traits::*,
};

use crate::{distance::Distance, hyperparams::KnnValidParams, linear::LinearSearch};

/// Fitted k-nearest neighbour classifier
///
/// The model keeps the input attributes of all training examples. A prediction looks up the `k`
/// training examples closest to the query and returns their most common target value. Examples
/// at equal distance are taken in training order, ties in the vote are broken at random by the
/// generator of the parameters.
///
/// # Example
///
/// ```rust
/// use tabula::prelude::*;
/// use tabula_nn::Knn;
/// use rand::{rngs::SmallRng, SeedableRng};
///
/// let dataset = tabula_datasets::restaurant();
/// let model = Knn::params_with_rng(SmallRng::seed_from_u64(42))
///     .k(1)
///     .fit(&dataset)
///     .unwrap();
///
/// // every example is its own nearest neighbour
/// assert_eq!(score(&model, &dataset), 1.0);
/// ```
#[derive(Debug)]
pub struct Knn<D, R> {
    k: usize,
    inputs: Vec<usize>,
    points: Array2<Value>,
    targets: Vec<Value>,
    distance: D,
    rng: RefCell<R>,
}

impl<D, R> Knn<D, R> {
    pub fn k(&self) -> usize {
        self.k
    }

    /// Attribute positions compared by the distance
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Number of stored training examples
    pub fn nexamples(&self) -> usize {
        self.targets.len()
    }
}

impl<D: Distance, R: Rng> Knn<D, R> {
    /// Positions and distances of the nearest training examples of an example
    pub fn neighbours(&self, example: ArrayView1<Value>) -> Vec<(usize, f64)> {
        let query = self
            .inputs
            .iter()
            .map(|attr| example[*attr].clone())
            .collect::<Array1<_>>();

        LinearSearch::new(self.points.view(), &self.distance).k_nearest(query.view(), self.k)
    }
}

impl<D: Distance, R: Rng> Predict for Knn<D, R> {
    fn predict(&self, example: ArrayView1<Value>) -> Value {
        let neighbours = self.neighbours(example);
        trace!("nearest neighbours {:?}", neighbours);

        let mut rng = self.rng.borrow_mut();
        mode(
            neighbours.iter().map(|(idx, _)| &self.targets[*idx]),
            &mut *rng,
        )
        .unwrap_or(Value::Unknown)
    }
}

impl<D: Distance + Clone, R: Rng + Clone> Fit for KnnValidParams<D, R> {
    type Object = Knn<D, R>;

    fn fit(&self, dataset: &Dataset) -> Result<Self::Object> {
        let n = dataset.nexamples();
        if n == 0 {
            return Err(Error::NotEnoughSamples);
        }

        let inputs = dataset.inputs().to_vec();
        let examples = dataset.examples();
        let points = Array2::from_shape_fn((n, inputs.len()), |(row, col)| {
            examples[(row, inputs[col])].clone()
        });
        let targets = (0..n)
            .map(|row| dataset.target_value(row).clone())
            .collect();

        debug!(
            "{}-nearest neighbours over {} examples with {} inputs",
            self.k(),
            n,
            inputs.len()
        );

        Ok(Knn {
            k: self.k(),
            inputs,
            points,
            targets,
            distance: self.distance().clone(),
            rng: RefCell::new(self.rng().clone()),
        })
    }
}
