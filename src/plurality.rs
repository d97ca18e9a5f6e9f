//! Voting helpers
//!
//! Several learners end with a vote: the tree picks the most common target value at a leaf,
//! k-NN picks the most common value among the neighbours and the ensemble the most common
//! prediction. Ties are always broken uniformly at random, so all helpers take an `Rng`.
//!
//! Candidates are visited in a deterministic order (either the order given by the caller or the
//! ordering of [`Value`]), a seeded generator therefore reproduces the same choices.
use rand::Rng;
use std::collections::BTreeMap;

use crate::dataset::{Dataset, Value};

/// Returns an element with maximal key, ties are broken uniformly at random
///
/// Returns `None` for an empty sequence. Keys which are not comparable (for example `NaN`) never
/// replace the current maximum.
pub fn argmax_random_tie<T, K, F, R>(
    items: impl IntoIterator<Item = T>,
    key: F,
    rng: &mut R,
) -> Option<T>
where
    K: PartialOrd,
    F: Fn(&T) -> K,
    R: Rng,
{
    let mut best: Option<K> = None;
    let mut ties = Vec::new();

    for item in items {
        let k = key(&item);
        let ordering = best.as_ref().map(|b| k.partial_cmp(b));

        match ordering {
            None | Some(Some(std::cmp::Ordering::Greater)) => {
                best = Some(k);
                ties.clear();
                ties.push(item);
            }
            Some(Some(std::cmp::Ordering::Equal)) => ties.push(item),
            _ => {}
        }
    }

    if ties.len() > 1 {
        let idx = rng.gen_range(0..ties.len());
        Some(ties.swap_remove(idx))
    } else {
        ties.pop()
    }
}

/// Counts the occurrences of every value
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a Value>) -> BTreeMap<Value, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value.clone()).or_insert(0) += 1;
    }

    counts
}

/// Returns the most common value, ties are broken uniformly at random
pub fn mode<'a, R: Rng>(values: impl IntoIterator<Item = &'a Value>, rng: &mut R) -> Option<Value> {
    let counts = value_counts(values);

    argmax_random_tie(counts.into_iter(), |(_, count)| *count, rng).map(|(value, _)| value)
}

/// Returns the most common target value among the examples at `rows`
///
/// The candidates are the target's value set, so the result is always a legal target value even
/// when `rows` is empty. Without value sets the candidates are the target values of `rows`, for
/// no rows at all this is `Value::Unknown`.
pub fn plurality_value<R: Rng>(dataset: &Dataset, rows: &[usize], rng: &mut R) -> Value {
    let counts = value_counts(rows.iter().map(|row| dataset.target_value(*row)));

    let winner = match dataset.target_values() {
        Some(candidates) => argmax_random_tie(
            candidates.iter(),
            |value| counts.get(*value).copied().unwrap_or(0),
            rng,
        )
        .cloned(),
        None => argmax_random_tie(counts.into_iter(), |(_, count)| *count, rng).map(|(v, _)| v),
    };

    winner.unwrap_or(Value::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn argmax_prefers_unique_maximum() {
        let mut rng = SmallRng::seed_from_u64(42);

        let best = argmax_random_tie(vec![3, 7, 1, 5], |x| *x, &mut rng);
        assert_eq!(best, Some(7));

        let best = argmax_random_tie(Vec::<i32>::new(), |x| *x, &mut rng);
        assert_eq!(best, None);
    }

    #[test]
    fn argmax_breaks_ties_randomly() {
        let mut rng = SmallRng::seed_from_u64(42);
        let items = vec![("a", 2), ("b", 3), ("c", 3), ("d", 1), ("e", 3)];

        let winners = (0..200)
            .filter_map(|_| argmax_random_tie(items.iter(), |(_, k)| *k, &mut rng))
            .map(|(name, _)| *name)
            .collect::<HashSet<_>>();

        assert_eq!(winners, vec!["b", "c", "e"].into_iter().collect());
    }

    #[test]
    fn argmax_is_reproducible() {
        let items = (0..10).map(|i| i % 3).collect::<Vec<_>>();
        let run = |seed| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..20)
                .map(|_| argmax_random_tie(0..items.len(), |i| items[*i], &mut rng))
                .collect::<Vec<_>>()
        };

        assert_eq!(run(7), run(7));
    }

    #[test]
    fn mode_counts_values() {
        let mut rng = SmallRng::seed_from_u64(42);
        let values = vec![
            Value::from("No"),
            Value::from("Yes"),
            Value::from("Yes"),
            Value::from(1),
        ];

        assert_eq!(mode(&values, &mut rng), Some(Value::from("Yes")));
        assert_eq!(value_counts(&values).get(&Value::from(1)), Some(&1));
        assert_eq!(mode(&Vec::new(), &mut rng), None);
    }

    #[test]
    fn plurality_uses_target_value_set() {
        let mut rng = SmallRng::seed_from_u64(42);
        let dataset = Dataset::builder()
            .rows(vec![
                vec!["a", "yes"],
                vec!["b", "no"],
                vec!["a", "yes"],
                vec!["a", "maybe"],
            ])
            .unwrap();

        assert_eq!(
            plurality_value(&dataset, &[0, 1, 2, 3], &mut rng),
            Value::from("yes")
        );
        assert_eq!(plurality_value(&dataset, &[1], &mut rng), Value::from("no"));

        // no examples: every legal target value is a candidate
        let target_values = dataset.target_values().unwrap().to_vec();
        for _ in 0..10 {
            let value = plurality_value(&dataset, &[], &mut rng);
            assert!(target_values.contains(&value));
        }
    }
}
