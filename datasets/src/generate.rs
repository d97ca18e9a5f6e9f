//! Utility functions for randomly generating datasets

use ndarray::{Array2, Axis};
use ndarray_rand::{
    rand::{seq::SliceRandom, Rng},
    rand_distr::Uniform,
    RandomExt,
};
use tabula::{Dataset, Value};

use crate::{restaurant, restaurant_with, will_wait};

/// Generate `n` restaurant examples
///
/// Every input attribute takes a random value of its domain in the restaurant dataset and the
/// target is set by the reference tree [`will_wait`]. The value sets of the restaurant dataset
/// are kept, so the examples can be mixed with the original ones.
pub fn synthetic_restaurant(n: usize, rng: &mut impl Rng) -> Dataset {
    let original = restaurant();
    let values = original
        .values()
        .map(<[Vec<Value>]>::to_vec)
        .unwrap_or_default();
    let target = original.target();

    let rows = (0..n)
        .map(|_| {
            let mut example = values
                .iter()
                .map(|domain| domain.choose(rng).cloned().unwrap_or_default())
                .collect::<ndarray::Array1<Value>>();
            example[target] = will_wait(example.view());

            example.to_vec()
        })
        .collect();

    restaurant_with(rows, Some(values)).expect("reference tree predicts legal targets")
}

/// Draw `n` rows of `k` random bits
fn bits(k: usize, n: usize, rng: &mut impl Rng) -> Array2<u8> {
    Array2::random_using((n, k), Uniform::new_inclusive(0u8, 1u8), rng)
}

/// Appends a label column computed from the bits of every row
fn bits_dataset(name: &str, bits: Array2<u8>, label: impl Fn(usize) -> usize) -> Dataset {
    let rows = bits
        .axis_iter(Axis(0))
        .map(|row| {
            let ones = row.iter().map(|bit| *bit as usize).sum::<usize>();
            row.iter()
                .map(|bit| Value::from(*bit as usize))
                .chain(std::iter::once(Value::from(label(ones))))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();

    Dataset::builder()
        .name(name)
        .rows(rows)
        .expect("rows of equal width")
}

/// Generates `n` examples of the majority problem
///
/// Every example consists of `k` random bits followed by a 1 if more than half of the bits are
/// one, else 0.
pub fn majority(k: usize, n: usize, rng: &mut impl Rng) -> Dataset {
    bits_dataset("majority", bits(k, n, rng), |ones| (ones > k / 2) as usize)
}

/// Generates `n` examples of the parity problem
///
/// Every example consists of `k` random bits followed by a 1 if an odd number of bits is one,
/// else 0.
pub fn parity(k: usize, n: usize, rng: &mut impl Rng) -> Dataset {
    bits_dataset("parity", bits(k, n, rng), |ones| ones % 2)
}

/// Generates `n` examples of two-input xor
pub fn xor(n: usize, rng: &mut impl Rng) -> Dataset {
    bits_dataset("xor", bits(2, n, rng), |ones| ones % 2)
}

/// Generates `n` examples of continuous xor
///
/// Both inputs are drawn uniformly from `[0, 2)`, the label is 1 if their integer parts differ.
pub fn continuous_xor(n: usize, rng: &mut impl Rng) -> Dataset {
    let inputs = Array2::random_using((n, 2), Uniform::new(0.0, 2.0), rng);

    let rows = inputs
        .axis_iter(Axis(0))
        .map(|row| {
            let (x, y) = (row[0], row[1]);
            vec![
                Value::from(x),
                Value::from(y),
                Value::from(x.trunc() != y.trunc()),
            ]
        })
        .collect::<Vec<_>>();

    Dataset::builder()
        .name("continuous xor")
        .rows(rows)
        .expect("rows of equal width")
}
