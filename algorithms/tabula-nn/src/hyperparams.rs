use rand::rngs::ThreadRng;
use rand::Rng;
use tabula::{
    error::{Error, Result},
    ParamGuard,
};

use crate::{distance::CommonDistance, Knn};

/// A verified hyper-parameter set ready for fitting a k-nearest neighbour model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnnValidParams<D, R> {
    k: usize,
    distance: D,
    rng: R,
}

impl<D, R> KnnValidParams<D, R> {
    /// The number of neighbours which vote for a prediction
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn distance(&self) -> &D {
        &self.distance
    }

    /// The generator breaking ties in the vote, cloned into every fitted model
    pub fn rng(&self) -> &R {
        &self.rng
    }
}

/// A hyper-parameter set during construction
///
/// # Parameters
///
/// | Name | Default | Purpose | Range |
/// | :--- | :--- | :--- | :--- |
/// | [k](Self::k) | `1` | Number of neighbours voting for a prediction | `[1, inf)` |
/// | [distance](Self::distance) | `CommonDistance::Mismatch` | Distance between the inputs of two examples | |
/// | [with_rng](Self::with_rng) | `thread_rng()` | Breaks ties in the vote | |
///
/// # Errors
///
/// Fitting returns [`Error::Parameters`] if `k` is zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnnParams<D, R>(KnnValidParams<D, R>);

impl KnnParams<CommonDistance, ThreadRng> {
    pub fn new() -> Self {
        Self::new_fixed_rng(rand::thread_rng())
    }
}

impl Default for KnnParams<CommonDistance, ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Clone> KnnParams<CommonDistance, R> {
    pub fn new_fixed_rng(rng: R) -> Self {
        Self(KnnValidParams {
            k: 1,
            distance: CommonDistance::default(),
            rng,
        })
    }
}

impl<D, R: Rng + Clone> KnnParams<D, R> {
    /// Sets the number of neighbours
    pub fn k(mut self, k: usize) -> Self {
        self.0.k = k;
        self
    }

    /// Sets the distance between examples
    pub fn distance<D2>(self, distance: D2) -> KnnParams<D2, R> {
        KnnParams(KnnValidParams {
            k: self.0.k,
            distance,
            rng: self.0.rng,
        })
    }

    /// Sets the generator used to break ties in the vote
    pub fn with_rng<R2: Rng + Clone>(self, rng: R2) -> KnnParams<D, R2> {
        KnnParams(KnnValidParams {
            k: self.0.k,
            distance: self.0.distance,
            rng,
        })
    }
}

impl<D, R> ParamGuard for KnnParams<D, R> {
    type Checked = KnnValidParams<D, R>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.k < 1 {
            Err(Error::Parameters(format!(
                "Number of neighbours should be at least one, but was {}",
                self.0.k
            )))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl Knn<CommonDistance, ThreadRng> {
    /// Parameters with `k = 1`, the mismatch distance and the thread local generator
    pub fn params() -> KnnParams<CommonDistance, ThreadRng> {
        KnnParams::new()
    }
}

impl<R: Rng + Clone> Knn<CommonDistance, R> {
    pub fn params_with_rng(rng: R) -> KnnParams<CommonDistance, R> {
        KnnParams::new_fixed_rng(rng)
    }
}
