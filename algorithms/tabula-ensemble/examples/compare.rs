use rand::{rngs::SmallRng, SeedableRng};

use tabula::prelude::*;
use tabula_bayes::CategoricalNb;
use tabula_datasets::generate::{majority, parity, synthetic_restaurant, xor};
use tabula_ensemble::{Ensemble, Plurality};
use tabula_nn::Knn;
use tabula_trees::DecisionTree;

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SmallRng::seed_from_u64(42);

    let datasets = vec![
        tabula_datasets::restaurant(),
        synthetic_restaurant(20, &mut rng),
        majority(7, 100, &mut rng),
        parity(7, 100, &mut rng),
        xor(100, &mut rng),
    ];

    let names = [
        "Plurality",
        "NaiveBayes",
        "NearestNeighbor",
        "DecisionTree",
        "Ensemble",
    ];
    let learners: Vec<Box<dyn Learner>> = vec![
        Box::new(Plurality::params_with_rng(rng.clone())),
        Box::new(CategoricalNb::params()),
        Box::new(Knn::params_with_rng(rng.clone())),
        Box::new(DecisionTree::params_with_rng(rng.clone())),
        Box::new(
            Ensemble::params_with_rng(rng.clone())
                .learner(CategoricalNb::params())
                .learner(Knn::params_with_rng(rng.clone()).k(3))
                .learner(DecisionTree::params_with_rng(rng.clone())),
        ),
    ];

    print!("{:16}", "");
    for dataset in &datasets {
        let name = dataset.name().chars().take(7).collect::<String>();
        print!(" {:>8}", name);
    }
    println!();

    for (name, learner) in names.iter().zip(&learners) {
        print!("{:16}", name);
        for dataset in &datasets {
            let accuracy = cross_validation(learner.as_ref(), dataset, 10, 1, &mut rng)?;
            print!(" {:>8.2}", accuracy);
        }
        println!();
    }

    Ok(())
}
