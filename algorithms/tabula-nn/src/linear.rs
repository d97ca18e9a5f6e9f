use std::collections::BinaryHeap;

use ndarray::ArrayView2;
use noisy_float::types::{n64, N64};

use crate::{distance::Distance, Point};

/// A candidate neighbour, ordered by distance and then by position
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct HeapElem {
    dist: N64,
    idx: usize,
}

impl HeapElem {
    fn new(dist: f64, idx: usize) -> Self {
        // NaN distances rank behind every other example
        let dist = if dist.is_nan() { f64::INFINITY } else { dist };

        HeapElem {
            dist: n64(dist),
            idx,
        }
    }
}

/// Brute force search over the rows of a matrix of examples
pub struct LinearSearch<'a, D> {
    points: ArrayView2<'a, tabula::Value>,
    distance: &'a D,
}

impl<'a, D: Distance> LinearSearch<'a, D> {
    pub fn new(points: ArrayView2<'a, tabula::Value>, distance: &'a D) -> Self {
        LinearSearch { points, distance }
    }

    /// Positions and distances of the `k` rows closest to `point`, closest first
    ///
    /// Rows with equal distance keep their order, so the earlier row wins when only one of them
    /// fits into the `k` nearest.
    pub fn k_nearest(&self, point: Point, k: usize) -> Vec<(usize, f64)> {
        // max heap holding the best k candidates seen so far
        let mut heap = BinaryHeap::with_capacity(k + 1);
        for (idx, row) in self.points.rows().into_iter().enumerate() {
            heap.push(HeapElem::new(self.distance.distance(row, point), idx));
            if heap.len() > k {
                heap.pop();
            }
        }

        heap.into_sorted_vec()
            .into_iter()
            .map(|elem| (elem.idx, elem.dist.raw()))
            .collect()
    }

    /// Positions and distances of all rows closer than `range`, in row order
    pub fn within_range(&self, point: Point, range: f64) -> Vec<(usize, f64)> {
        self.points
            .rows()
            .into_iter()
            .enumerate()
            .map(|(idx, row)| (idx, self.distance.distance(row, point)))
            .filter(|(_, dist)| *dist < range)
            .collect()
    }
}
