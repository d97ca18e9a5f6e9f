use std::cell::RefCell;
use std::fmt;

use log::debug;
use ndarray::ArrayView1;
use rand::Rng;

use crate::{EnsembleValidParams, PluralityParams};
use tabula::{
    dataset::{Dataset, Value},
    error::{Error, Result},
    plurality::{mode, plurality_value},
    traits::*,
};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Constant predictor returning the most common target value of its training set
///
/// This makes a baseline for comparison: a learner which does not beat it has learned nothing
/// about the inputs.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Plurality {
    prediction: Value,
}

impl Plurality {
    pub fn prediction(&self) -> &Value {
        &self.prediction
    }
}

impl Predict for Plurality {
    fn predict(&self, _example: ArrayView1<Value>) -> Value {
        self.prediction.clone()
    }
}

impl<R: Rng + Clone> Fit for PluralityParams<R> {
    type Object = Plurality;

    fn fit(&self, dataset: &Dataset) -> Result<Plurality> {
        if dataset.nexamples() == 0 {
            return Err(Error::NotEnoughSamples);
        }

        let rows = (0..dataset.nexamples()).collect::<Vec<_>>();
        let prediction = plurality_value(dataset, &rows, &mut self.rng().clone());
        debug!("plurality of {} examples is {}", rows.len(), prediction);

        Ok(Plurality { prediction })
    }
}

/// Fitted voting ensemble
///
/// Every member predicts the example, the most common prediction wins. Ties are broken at random
/// with the generator of the parameters.
pub struct Ensemble<R> {
    models: Vec<Box<dyn Predict>>,
    rng: RefCell<R>,
}

impl<R> Ensemble<R> {
    /// Number of members
    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Predictions of every member for an example
    pub fn member_predictions(&self, example: ArrayView1<Value>) -> Vec<Value> {
        self.models
            .iter()
            .map(|model| model.predict(example))
            .collect()
    }
}

impl<R> fmt::Debug for Ensemble<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ensemble")
            .field("members", &self.models.len())
            .finish()
    }
}

impl<R: Rng> Predict for Ensemble<R> {
    fn predict(&self, example: ArrayView1<Value>) -> Value {
        let predictions = self.member_predictions(example);

        let mut rng = self.rng.borrow_mut();
        mode(predictions.iter(), &mut *rng).unwrap_or(Value::Unknown)
    }
}

impl<R: Rng + Clone> Fit for EnsembleValidParams<R> {
    type Object = Ensemble<R>;

    fn fit(&self, dataset: &Dataset) -> Result<Ensemble<R>> {
        let models = self
            .learners()
            .iter()
            .map(|learner| learner.learn(dataset))
            .collect::<Result<Vec<_>>>()?;
        debug!("trained {} ensemble members", models.len());

        Ok(Ensemble {
            models,
            rng: RefCell::new(self.rng().clone()),
        })
    }
}
