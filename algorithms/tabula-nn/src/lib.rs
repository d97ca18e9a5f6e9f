//! `tabula-nn` provides k-nearest neighbour classification for `tabula` datasets.
//!
//! Examples are compared on their input attributes only. The distance functions in [`distance`]
//! work on categorical values ([`distance::Mismatch`], the default) as well as on numbers (the
//! Minkowski family), [`linear::LinearSearch`] finds the closest training examples by brute force
//! and [`Knn`] lets them vote.
//!
//! ```rust
//! use tabula::prelude::*;
//! use tabula_nn::{distance::CommonDistance, Knn};
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let mut rng = SmallRng::seed_from_u64(42);
//! let dataset = tabula_datasets::generate::continuous_xor(200, &mut rng);
//!
//! let params = Knn::params_with_rng(rng).k(3).distance(CommonDistance::L2Dist);
//! let accuracy = train_and_test(&params, &dataset, 150, 200).unwrap();
//! assert!(accuracy > 0.7);
//! ```
use ndarray::ArrayView1;
use tabula::Value;

pub mod distance;
mod hyperparams;
mod knn;
pub mod linear;

pub use hyperparams::{KnnParams, KnnValidParams};
pub use knn::Knn;
pub use tabula::error::Result;

pub type Point<'a> = ArrayView1<'a, Value>;
