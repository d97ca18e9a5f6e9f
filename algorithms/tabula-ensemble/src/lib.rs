//! # Ensemble Learning Algorithms
//!
//! Ensemble methods combine the predictions of several predictors in order to improve
//! robustness over a single one. This crate provides
//!
//! * [`Plurality`], the constant baseline predicting the most common target value
//! * [`Ensemble`], which trains a list of possibly different learners on the same dataset and
//! lets them vote
//!
//! ## Example
//!
//! This example combines a decision tree, naive Bayes and three nearest neighbours.
//!
//! ```rust
//! use tabula::prelude::*;
//! use tabula_bayes::CategoricalNb;
//! use tabula_ensemble::Ensemble;
//! use tabula_nn::Knn;
//! use tabula_trees::DecisionTree;
//! use rand::{rngs::SmallRng, SeedableRng};
//!
//! let rng = SmallRng::seed_from_u64(42);
//! let dataset = tabula_datasets::restaurant();
//!
//! let model = Ensemble::params_with_rng(rng.clone())
//!     .learner(DecisionTree::params_with_rng(rng.clone()))
//!     .learner(CategoricalNb::params())
//!     .learner(Knn::params_with_rng(rng).k(3))
//!     .fit(&dataset)
//!     .unwrap();
//!
//! assert_eq!(model.len(), 3);
//! let accuracy = score(&model, &dataset);
//! assert!((0.0..=1.0).contains(&accuracy));
//! ```
//!
mod algorithm;
mod hyperparams;

pub use algorithm::*;
pub use hyperparams::*;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{Array1, ArrayView1};
    use rand::{rngs::SmallRng, SeedableRng};
    use std::collections::HashSet;
    use tabula::prelude::*;
    use tabula_bayes::CategoricalNb;
    use tabula_nn::Knn;
    use tabula_trees::DecisionTree;

    /// Predicts a fixed value whatever the training set
    struct Always(&'static str);

    impl Fit for Always {
        type Object = Plurality;

        fn fit(&self, dataset: &Dataset) -> Result<Plurality> {
            let examples = dataset.examples();
            let rows = examples
                .rows()
                .into_iter()
                .map(|row| vec![row[0].clone(), Value::from(self.0)]);
            let constant = Dataset::builder().rows(rows)?;

            Plurality::params_with_rng(SmallRng::seed_from_u64(42)).fit(&constant)
        }
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    fn skewed() -> Dataset {
        let rows = std::iter::repeat(vec!["A", "yes"])
            .take(7)
            .chain(std::iter::repeat(vec!["B", "no"]).take(3));

        Dataset::builder()
            .attr_names_str("x label")
            .rows(rows)
            .unwrap()
    }

    fn example() -> Array1<Value> {
        Array1::from(vec![Value::from("B"), Value::Unknown])
    }

    #[test]
    fn plurality_predicts_most_common_target() {
        let dataset = skewed();
        let model = Plurality::params_with_rng(rng()).fit(&dataset).unwrap();

        assert_eq!(model.prediction(), &Value::from("yes"));
        assert_eq!(model.predict(example().view()), Value::from("yes"));
        assert_abs_diff_eq!(score(&model, &dataset), 0.7);
    }

    #[test]
    fn plurality_ties_are_random() {
        let dataset = Dataset::builder()
            .rows(vec![vec!["A", "yes"], vec!["B", "no"]])
            .unwrap();

        let predictions = (0..20)
            .map(|seed| {
                Plurality::params_with_rng(SmallRng::seed_from_u64(seed))
                    .fit(&dataset)
                    .unwrap()
                    .prediction()
                    .clone()
            })
            .collect::<HashSet<_>>();
        assert_eq!(predictions.len(), 2);
    }

    #[test]
    fn plurality_needs_examples() {
        let dataset = skewed().select(&[]);

        assert!(matches!(
            Plurality::params().fit(&dataset),
            Err(Error::NotEnoughSamples)
        ));
    }

    #[test]
    fn empty_ensemble_is_rejected() {
        let params = Ensemble::params_with_rng(rng());

        assert!(matches!(params.check_ref(), Err(Error::Parameters(_))));
        assert!(matches!(params.fit(&skewed()), Err(Error::Parameters(_))));
    }

    #[test]
    fn members_vote() {
        let dataset = skewed();
        let model = Ensemble::params_with_rng(rng())
            .learner(Always("no"))
            .learner(Always("yes"))
            .learner(Always("no"))
            .fit(&dataset)
            .unwrap();

        assert_eq!(model.len(), 3);
        assert_eq!(
            model.member_predictions(example().view()),
            vec![Value::from("no"), Value::from("yes"), Value::from("no")]
        );
        assert_eq!(model.predict(example().view()), Value::from("no"));
    }

    #[test]
    fn vote_ties_are_random() {
        let model = Ensemble::params_with_rng(rng())
            .learner(Always("no"))
            .learner(Always("yes"))
            .fit(&skewed())
            .unwrap();

        let predictions = (0..50)
            .map(|_| model.predict(example().view()))
            .collect::<HashSet<_>>();
        assert_eq!(predictions.len(), 2);
    }

    #[test]
    fn member_errors_are_forwarded() {
        let dataset = skewed().select(&[]);
        let result = Ensemble::params_with_rng(rng())
            .learner(CategoricalNb::params())
            .fit(&dataset);

        assert!(matches!(result, Err(Error::NotEnoughSamples)));
    }

    #[test]
    fn heterogeneous_members_on_restaurant() {
        let dataset = tabula_datasets::restaurant();
        let members: Vec<Box<dyn Learner>> = vec![
            Box::new(DecisionTree::params_with_rng(rng())),
            Box::new(CategoricalNb::params()),
            Box::new(Knn::params_with_rng(rng())),
        ];
        let model = Ensemble::params_with_rng(rng())
            .learners(members)
            .fit(&dataset)
            .unwrap();

        // the tree and 1-NN both reproduce the training set and outvote naive Bayes
        assert_abs_diff_eq!(score(&model, &dataset), 1.0);
    }

    #[test]
    fn ensembles_nest() {
        let dataset = skewed();
        let inner = Ensemble::params_with_rng(rng()).learner(Always("no"));
        let model = Ensemble::params_with_rng(rng())
            .learner(inner)
            .learner(Plurality::params_with_rng(rng()))
            .learner(Always("no"))
            .fit(&dataset)
            .unwrap();

        let example: ArrayView1<Value> = dataset.example(0);
        assert_eq!(model.predict(dataset.sanitize(example).view()), Value::from("no"));
    }
}
