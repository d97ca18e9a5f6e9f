//! Error types in Tabula
//!

use thiserror::Error;

use ndarray::ShapeError;

use crate::dataset::Value;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("invalid parameter {0}")]
    Parameters(String),
    #[error("invalid dataset configuration: {0}")]
    Configuration(String),
    #[error("unknown attribute {0}")]
    UnknownAttribute(String),
    #[error("bad value {value} for attribute {attr} in {example}")]
    BadValue {
        value: Value,
        attr: String,
        example: String,
    },
    #[error("could not parse delimited text: {0}")]
    Parse(String),
    #[error("invalid ndarray shape {0}")]
    NdShape(#[from] ShapeError),
    #[error("Not enough samples to fit a model")]
    NotEnoughSamples,
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Parse(err.to_string())
    }
}
