#![doc = include_str!("../README.md")]

mod categorical_nb;
mod hyperparams;

pub use categorical_nb::CategoricalNb;
pub use hyperparams::NaiveBayesParams;
pub use tabula::error::Result;
