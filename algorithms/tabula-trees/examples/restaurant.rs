use rand::rngs::SmallRng;
use rand::SeedableRng;

use tabula::evaluation::{cross_validation, score};
use tabula::prelude::*;
use tabula_trees::DecisionTree;

fn main() -> Result<()> {
    let dataset = tabula_datasets::restaurant();
    println!("{}", dataset);

    let params = DecisionTree::params_with_rng(SmallRng::seed_from_u64(437));
    let tree = params.fit(&dataset)?;

    println!("{}", tree);
    println!("depth {}, {} leaves", tree.depth(), tree.num_leaves());
    println!("training accuracy {:.2}", score(&tree, &dataset));

    let mut rng = SmallRng::seed_from_u64(42);
    let accuracy = cross_validation(&params, &dataset, 4, 10, &mut rng)?;
    println!("4-fold cross validation accuracy {:.2}", accuracy);

    Ok(())
}
