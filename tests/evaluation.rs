use approx::assert_abs_diff_eq;
use ndarray::ArrayView1;
use rand::{rngs::SmallRng, SeedableRng};

use tabula::evaluation::learning_curve;
use tabula::prelude::*;

/// Predicts the same value for every example
struct Always(&'static str);

struct Constant(Value);

impl Predict for Constant {
    fn predict(&self, _example: ArrayView1<Value>) -> Value {
        self.0.clone()
    }
}

impl Fit for Always {
    type Object = Constant;

    fn fit(&self, dataset: &Dataset) -> Result<Constant> {
        if dataset.nexamples() == 0 {
            return Err(Error::NotEnoughSamples);
        }

        Ok(Constant(Value::from(self.0)))
    }
}

/// Remembers the training examples and predicts by exact lookup
struct Memorize;

struct Lookup(Dataset);

impl Predict for Lookup {
    fn predict(&self, example: ArrayView1<Value>) -> Value {
        self.0
            .examples()
            .rows()
            .into_iter()
            .position(|row| self.0.sanitize(row) == example)
            .map(|idx| self.0.target_value(idx).clone())
            .unwrap_or(Value::Unknown)
    }
}

impl Fit for Memorize {
    type Object = Lookup;

    fn fit(&self, dataset: &Dataset) -> Result<Lookup> {
        Ok(Lookup(dataset.clone()))
    }
}

#[test]
fn constant_learner_on_balanced_restaurant() -> Result<()> {
    let dataset = tabula_datasets::restaurant();
    let before = dataset.clone();
    let mut rng = SmallRng::seed_from_u64(42);

    // six of the twelve examples wait
    assert_abs_diff_eq!(score(&Always("Yes").fit(&dataset)?, &dataset), 0.5);
    assert_abs_diff_eq!(leave_one_out(&Always("Yes"), &dataset, &mut rng)?, 0.5);
    assert_abs_diff_eq!(
        cross_validation(&Always("No"), &dataset, 4, 3, &mut rng)?,
        0.5,
        epsilon = 1e-12
    );
    assert_eq!(dataset, before);

    Ok(())
}

#[test]
fn memorizing_does_not_generalize() -> Result<()> {
    let dataset = tabula_datasets::restaurant();
    let mut rng = SmallRng::seed_from_u64(42);

    assert_abs_diff_eq!(score(&Memorize.fit(&dataset)?, &dataset), 1.0);
    assert_abs_diff_eq!(leave_one_out(&Memorize, &dataset, &mut rng)?, 0.0);

    let curve = learning_curve(&Memorize, &dataset, 2, Some(&[2, 6, 10][..]), &mut rng)?;
    assert_eq!(
        curve.iter().map(|(size, _)| *size).collect::<Vec<_>>(),
        vec![2, 6, 10]
    );
    assert!(curve.iter().all(|(_, accuracy)| *accuracy == 0.0));

    Ok(())
}

#[test]
fn harness_rejects_bad_arguments() {
    let dataset = tabula_datasets::restaurant();
    let mut rng = SmallRng::seed_from_u64(42);

    assert!(matches!(
        cross_validation(&Memorize, &dataset, 13, 1, &mut rng),
        Err(Error::Parameters(_))
    ));
    assert!(matches!(
        learning_curve(&Memorize, &dataset, 1, Some(&[12][..]), &mut rng),
        Err(Error::Parameters(_))
    ));
}
