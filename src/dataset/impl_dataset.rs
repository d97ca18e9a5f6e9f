use ndarray::Array2;
use rand::{seq::SliceRandom, Rng};

use super::Dataset;

impl Dataset {
    /// Creates a dataset holding the examples at `indices`
    ///
    /// The configuration (attributes, target, inputs and value sets) is carried over unchanged,
    /// indices may repeat.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            examples: Array2::from_shape_fn((indices.len(), self.width()), |(i, j)| {
                self.examples[(indices[i], j)].clone()
            }),
            attrs: self.attrs.clone(),
            attr_names: self.attr_names.clone(),
            target: self.target,
            inputs: self.inputs.clone(),
            values: self.values.clone(),
            name: self.name.clone(),
            source: self.source.clone(),
        }
    }

    /// Splits the examples into the ones outside and the ones inside `[start, end)`
    ///
    /// The bounds are clamped to the number of examples. Returns `(train, test)`.
    pub fn split_at_range(&self, start: usize, end: usize) -> (Dataset, Dataset) {
        let n = self.nexamples();
        let end = end.min(n);
        let start = start.min(end);

        let outside = (0..start).chain(end..n).collect::<Vec<_>>();
        let inside = (start..end).collect::<Vec<_>>();

        (self.select(&outside), self.select(&inside))
    }

    /// Returns a copy with the examples in random order
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> Dataset {
        let mut indices = (0..self.nexamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select(&indices)
    }

    /// Splits the dataset into `k` folds
    ///
    /// Every fold validates on `n / k` contiguous examples and trains on all others. When `k`
    /// does not divide `n` the remaining examples at the end are part of every training set,
    /// but of no validation set. Returns an empty list for `k == 0`.
    ///
    /// ```rust
    /// use tabula::Dataset;
    ///
    /// let dataset = Dataset::builder()
    ///     .rows((0..5).map(|i| vec![i, i % 2]))
    ///     .unwrap();
    ///
    /// let folds = dataset.fold(2);
    /// assert_eq!(folds.len(), 2);
    /// assert_eq!(folds[0].0.nexamples(), 3);
    /// assert_eq!(folds[0].1.nexamples(), 2);
    /// ```
    pub fn fold(&self, k: usize) -> Vec<(Dataset, Dataset)> {
        if k == 0 {
            return Vec::new();
        }

        let fold_size = self.nexamples() / k;

        (0..k)
            .map(|i| self.split_at_range(i * fold_size, (i + 1) * fold_size))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::super::Value;
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    fn counting(n: usize) -> Dataset {
        Dataset::builder()
            .attr_names_str("x parity")
            .rows((0..n).map(|i| vec![i, i % 2]))
            .unwrap()
    }

    fn column(dataset: &Dataset) -> Vec<usize> {
        dataset
            .examples()
            .column(0)
            .iter()
            .map(|value| value.as_number().unwrap() as usize)
            .collect()
    }

    #[test]
    fn select_keeps_configuration() {
        let dataset = counting(6);
        let subset = dataset.select(&[4, 1, 1]);

        assert_eq!(column(&subset), vec![4, 1, 1]);
        assert_eq!(subset.target(), dataset.target());
        assert_eq!(subset.inputs(), dataset.inputs());
        assert_eq!(subset.values(), dataset.values());

        let empty = dataset.select(&[]);
        assert_eq!(empty.nexamples(), 0);
        assert_eq!(empty.width(), 2);
    }

    #[test]
    fn split_at_range_partitions() {
        let dataset = counting(6);

        let (train, test) = dataset.split_at_range(1, 3);
        assert_eq!(column(&train), vec![0, 3, 4, 5]);
        assert_eq!(column(&test), vec![1, 2]);

        let (train, test) = dataset.split_at_range(4, 100);
        assert_eq!(column(&train), vec![0, 1, 2, 3]);
        assert_eq!(column(&test), vec![4, 5]);

        assert_eq!(dataset.nexamples(), 6);
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let dataset = counting(20);
        let mut rng = SmallRng::seed_from_u64(42);

        let shuffled = dataset.shuffle(&mut rng);
        let mut order = column(&shuffled);
        assert_eq!(order.len(), 20);

        order.sort_unstable();
        assert_eq!(order, (0..20).collect::<Vec<_>>());
        assert_eq!(column(&dataset), (0..20).collect::<Vec<_>>());
    }

    #[test]
    fn fold_leaves_remainder_in_training() {
        let dataset = counting(5);

        let folds = dataset.fold(3);
        assert_eq!(folds.len(), 3);
        for (i, (train, valid)) in folds.iter().enumerate() {
            assert_eq!(column(valid), vec![i]);
            assert_eq!(train.nexamples(), 4);
            assert!(column(train).contains(&3));
            assert!(column(train).contains(&4));
        }

        let folds = dataset.fold(5);
        for (i, (_, valid)) in folds.iter().enumerate() {
            assert_eq!(valid.target_value(0), &Value::from(i % 2));
        }

        assert!(dataset.fold(0).is_empty());
    }
}
