//! `tabula` is a toolkit for classic supervised learning on categorical tables.
//!
//! The core crate contains the building blocks shared by every learner:
//!
//! * [`Dataset`] with its attribute [`Value`]s, a configurable target and input attributes and
//! the parser for delimited text
//! * the [`Fit`](traits::Fit), [`Predict`](traits::Predict) and [`Learner`](traits::Learner)
//! traits and the [`ParamGuard`] for hyperparameter validation
//! * voting helpers in [`plurality`]
//! * the [`evaluation`] harness with held-out ranges, cross validation, leave-one-out and
//! learning curves
//!
//! The learners themselves live in their own crates: `tabula-trees` (ID3 decision trees),
//! `tabula-bayes` (categorical naive Bayes), `tabula-nn` (k-nearest neighbours) and
//! `tabula-ensemble` (plurality baseline and voting ensembles). `tabula-datasets` provides the
//! restaurant problem and synthetic generators.
//!
//! ```rust
//! use tabula::prelude::*;
//!
//! let dataset = Dataset::builder()
//!     .attr_names_str("Sky Wind Play")
//!     .csv("Sunny, Weak, Yes\nRainy, Strong, No")
//!     .unwrap();
//!
//! assert_eq!(dataset.to_string(), "<Dataset(): 2 examples, 3 attributes>");
//! assert_eq!(dataset.target_values().unwrap(), &[Value::from("Yes"), Value::from("No")]);
//! ```

pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod metrics;
mod param_guard;
pub mod plurality;
pub mod prelude;
pub mod traits;

pub use dataset::{Attr, Dataset, DatasetBuilder, Value};
pub use error::Error;
pub use param_guard::ParamGuard;
