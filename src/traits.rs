//! Provide traits for different classes of algorithms
//!

use ndarray::ArrayView1;

use crate::dataset::{Dataset, Value};
use crate::error::{Error, Result};

/// Fittable algorithms
///
/// A fittable algorithm takes a dataset and creates a concept of some kind about it. The
/// hyperparameter structs of every learner implement this trait and return the fitted model as
/// `Object`.
pub trait Fit<E: std::error::Error + From<Error> = Error> {
    type Object: Predict;

    fn fit(&self, dataset: &Dataset) -> std::result::Result<Self::Object, E>;
}

/// Predict with a fitted model
///
/// A predictor maps one example to a value of the target attribute. The example handed to a
/// predictor is sanitized beforehand, so all attributes except the inputs are
/// [`Value::Unknown`].
pub trait Predict {
    fn predict(&self, example: ArrayView1<Value>) -> Value;

    /// Predicts every example of a dataset after sanitizing it
    fn predict_dataset(&self, dataset: &Dataset) -> Vec<Value> {
        dataset
            .examples()
            .rows()
            .into_iter()
            .map(|example| self.predict(dataset.sanitize(example).view()))
            .collect()
    }
}

impl<P: Predict + ?Sized> Predict for &P {
    fn predict(&self, example: ArrayView1<Value>) -> Value {
        (**self).predict(example)
    }
}

impl<P: Predict + ?Sized> Predict for Box<P> {
    fn predict(&self, example: ArrayView1<Value>) -> Value {
        (**self).predict(example)
    }
}

/// Object safe learner
///
/// Every [`Fit`] implementation with a `'static` model is a learner. This allows to collect
/// learners of different kinds in a list, for example to compare them or to combine them in an
/// ensemble.
pub trait Learner {
    fn learn(&self, dataset: &Dataset) -> Result<Box<dyn Predict>>;
}

impl<P> Learner for P
where
    P: Fit,
    P::Object: 'static,
{
    fn learn(&self, dataset: &Dataset) -> Result<Box<dyn Predict>> {
        let model = self.fit(dataset)?;

        Ok(Box::new(model))
    }
}
