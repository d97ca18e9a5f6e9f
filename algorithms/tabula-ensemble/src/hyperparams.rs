use rand::rngs::ThreadRng;
use rand::Rng;
use tabula::{
    error::{Error, Result},
    traits::Learner,
    ParamGuard,
};

use crate::{Ensemble, Plurality};

/// Parameters of the plurality learner
///
/// The only parameter is the generator breaking ties between equally frequent target values.
#[derive(Clone, Debug, PartialEq)]
pub struct PluralityParams<R> {
    rng: R,
}

impl<R: Rng + Clone> PluralityParams<R> {
    pub fn new(rng: R) -> Self {
        PluralityParams { rng }
    }

    pub fn rng(&self) -> &R {
        &self.rng
    }
}

impl Plurality {
    pub fn params() -> PluralityParams<ThreadRng> {
        PluralityParams::new(rand::thread_rng())
    }

    pub fn params_with_rng<R: Rng + Clone>(rng: R) -> PluralityParams<R> {
        PluralityParams::new(rng)
    }
}

/// A verified set of ensemble members
pub struct EnsembleValidParams<R> {
    learners: Vec<Box<dyn Learner>>,
    rng: R,
}

impl<R> EnsembleValidParams<R> {
    /// The member learners, each is trained on the full dataset
    pub fn learners(&self) -> &[Box<dyn Learner>] {
        &self.learners
    }

    /// The generator breaking ties in the vote, cloned into every fitted ensemble
    pub fn rng(&self) -> &R {
        &self.rng
    }
}

/// An ensemble under construction
///
/// Members can be any learner, for example hyperparameters of different algorithms.
///
/// # Errors
///
/// Fitting returns [`Error::Parameters`] if the ensemble has no members.
pub struct EnsembleParams<R>(EnsembleValidParams<R>);

impl EnsembleParams<ThreadRng> {
    pub fn new() -> Self {
        Self::new_fixed_rng(rand::thread_rng())
    }
}

impl Default for EnsembleParams<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Clone> EnsembleParams<R> {
    pub fn new_fixed_rng(rng: R) -> Self {
        Self(EnsembleValidParams {
            learners: Vec::new(),
            rng,
        })
    }

    /// Adds a member to the ensemble
    pub fn learner<L: Learner + 'static>(mut self, learner: L) -> Self {
        self.0.learners.push(Box::new(learner));
        self
    }

    /// Adds several boxed members to the ensemble
    pub fn learners(mut self, learners: impl IntoIterator<Item = Box<dyn Learner>>) -> Self {
        self.0.learners.extend(learners);
        self
    }
}

impl<R> ParamGuard for EnsembleParams<R> {
    type Checked = EnsembleValidParams<R>;
    type Error = Error;

    fn check_ref(&self) -> Result<&Self::Checked> {
        if self.0.learners.is_empty() {
            Err(Error::Parameters(
                "Ensemble should have at least one learner".to_string(),
            ))
        } else {
            Ok(&self.0)
        }
    }

    fn check(self) -> Result<Self::Checked> {
        self.check_ref()?;
        Ok(self.0)
    }
}

impl Ensemble<ThreadRng> {
    pub fn params() -> EnsembleParams<ThreadRng> {
        EnsembleParams::new()
    }
}

impl<R: Rng + Clone> Ensemble<R> {
    pub fn params_with_rng(rng: R) -> EnsembleParams<R> {
        EnsembleParams::new_fixed_rng(rng)
    }
}
