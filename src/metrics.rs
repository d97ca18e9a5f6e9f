//! Common error metrics
//!
//! This module compares predictions to targets. The boolean error works on any attribute
//! values, the other metrics expect numeric predictions. All metrics fail with
//! `Error::NotEnoughSamples` for empty inputs and with `Error::NdShape` if the lengths differ.

use ndarray::{ArrayView1, ErrorKind, ShapeError};

use crate::dataset::Value;
use crate::error::{Error, Result};

fn check_lengths<A, B>(predictions: &ArrayView1<A>, targets: &ArrayView1<B>) -> Result<()> {
    if predictions.len() != targets.len() {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
    }
    if predictions.is_empty() {
        return Err(Error::NotEnoughSamples);
    }

    Ok(())
}

/// Fraction of predictions which differ from their target
pub fn mean_boolean_error(predictions: ArrayView1<Value>, targets: ArrayView1<Value>) -> Result<f64> {
    check_lengths(&predictions, &targets)?;

    let wrong = predictions
        .iter()
        .zip(targets.iter())
        .filter(|(prediction, target)| prediction != target)
        .count();

    Ok(wrong as f64 / predictions.len() as f64)
}

/// Mean absolute difference between predictions and targets
pub fn mean_error(predictions: ArrayView1<f64>, targets: ArrayView1<f64>) -> Result<f64> {
    check_lengths(&predictions, &targets)?;

    Ok((&predictions - &targets).mapv(f64::abs).sum() / predictions.len() as f64)
}

/// Mean squared difference between predictions and targets
pub fn ms_error(predictions: ArrayView1<f64>, targets: ArrayView1<f64>) -> Result<f64> {
    check_lengths(&predictions, &targets)?;

    Ok((&predictions - &targets).mapv(|x| x * x).sum() / predictions.len() as f64)
}

/// Square root of the mean squared error
pub fn rms_error(predictions: ArrayView1<f64>, targets: ArrayView1<f64>) -> Result<f64> {
    ms_error(predictions, targets).map(f64::sqrt)
}
