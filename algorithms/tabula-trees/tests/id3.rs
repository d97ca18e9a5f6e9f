use approx::assert_abs_diff_eq;
use ndarray::Array1;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use tabula::evaluation::{leave_one_out, score};
use tabula::prelude::*;
use tabula_datasets::generate::{majority, parity, synthetic_restaurant};
use tabula_trees::{entropy, information_gain, DecisionTree, TreeNode};

fn params(seed: u64) -> tabula_trees::DecisionTreeParams<SmallRng> {
    DecisionTree::params_with_rng(SmallRng::seed_from_u64(seed))
}

/// All 2^k rows of the k-bit majority problem
fn all_majority(k: usize) -> Dataset {
    let rows = (0..1usize << k).map(|bits| {
        let mut row = (0..k).map(|i| (bits >> i) & 1).collect::<Vec<_>>();
        let ones = row.iter().sum::<usize>();
        row.push((ones > k / 2) as usize);
        row
    });

    Dataset::builder().name("majority").rows(rows).unwrap()
}

#[test]
fn restaurant_tree_starts_with_patrons() -> Result<()> {
    let dataset = tabula_datasets::restaurant();

    for seed in 0..5 {
        let tree = params(seed).fit(&dataset)?;
        let root = tree.root_node();

        assert_eq!(root.attr_name(), Some("Patrons"));
        let branches = root.branches().unwrap();
        assert_eq!(
            branches[&Value::from("None")],
            TreeNode::Leaf {
                prediction: Value::from("No")
            }
        );
        assert_eq!(
            branches[&Value::from("Some")],
            TreeNode::Leaf {
                prediction: Value::from("Yes")
            }
        );
    }

    Ok(())
}

#[test]
fn consistent_datasets_are_learned_perfectly() -> Result<()> {
    let dataset = all_majority(3);
    assert_eq!(dataset.nexamples(), 8);

    let tree = params(42).fit(&dataset)?;
    assert_abs_diff_eq!(score(&tree, &dataset), 1.0);

    let mut rng = SmallRng::seed_from_u64(42);
    let dataset = synthetic_restaurant(30, &mut rng);
    let tree = params(42).fit(&dataset)?;
    assert_abs_diff_eq!(score(&tree, &dataset), 1.0);

    Ok(())
}

#[test]
fn sampled_majority_is_learned() -> Result<()> {
    let mut rng = SmallRng::seed_from_u64(42);
    let dataset = majority(7, 100, &mut rng);

    let tree = params(42).fit(&dataset)?;
    let predictions = Array1::from(tree.predict_dataset(&dataset));

    // majority of seven random bits is a function of the inputs
    let targets = dataset.examples().column(7).to_owned();
    assert_eq!(predictions, targets);

    Ok(())
}

#[test]
fn gain_is_bounded_by_entropy() {
    let mut rng = SmallRng::seed_from_u64(42);

    for dataset in vec![
        tabula_datasets::restaurant(),
        parity(4, 50, &mut rng),
        synthetic_restaurant(40, &mut rng),
    ] {
        let rows = (0..dataset.nexamples()).collect::<Vec<_>>();
        let counts = tabula::plurality::value_counts(
            rows.iter().map(|row| dataset.target_value(*row)),
        );
        let total = entropy(&counts.values().copied().collect::<Vec<_>>());

        for attr in dataset.inputs() {
            let gain = information_gain(&dataset, *attr, &rows);
            assert!(gain >= -1e-12, "negative gain {} for {}", gain, attr);
            assert!(gain <= total + 1e-12, "gain {} above entropy {}", gain, total);
        }
    }
}

#[test]
fn tree_shape_queries() -> Result<()> {
    let dataset = all_majority(3);
    let tree = params(3).fit(&dataset)?;

    // every bit matters for majority
    assert_eq!(tree.features(), vec![0, 1, 2]);
    assert!(tree.depth() >= 2 && tree.depth() <= 3);

    let leaves = tree.iter_nodes().filter(|node| node.is_leaf()).count();
    assert_eq!(tree.num_leaves(), leaves);
    let forks = tree.iter_nodes().filter(|node| !node.is_leaf()).count();
    assert_eq!(forks + leaves, tree.iter_nodes().count());

    // level order visits the root first
    assert_eq!(tree.iter_nodes().next(), Some(tree.root_node()));

    Ok(())
}

#[test]
fn leave_one_out_on_restaurant() -> Result<()> {
    let dataset = tabula_datasets::restaurant();
    let before = dataset.clone();
    let mut rng = SmallRng::seed_from_u64(42);

    let accuracy = leave_one_out(&params(42), &dataset, &mut rng)?;
    assert!((0.0..=1.0).contains(&accuracy));
    assert_eq!(dataset, before);

    Ok(())
}
