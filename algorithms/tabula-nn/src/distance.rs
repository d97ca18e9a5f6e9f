//! Distances between examples
//!
//! All distances compare two examples restricted to the same attributes position by position.
//! Numeric distances fall back to the overlap distance for a pair of values where one of them is
//! not a number: the pair contributes `0` when the values are equal and `1` otherwise.
use ndarray::Zip;
use tabula::Value;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::Point;

pub trait Distance {
    // Panics if a and b are not of equal dimension
    fn distance(&self, a: Point, b: Point) -> f64;
}

/// Difference of two attribute values
fn difference(a: &Value, b: &Value) -> f64 {
    match (a.as_number(), b.as_number()) {
        (Some(a), Some(b)) => (a - b).abs(),
        _ if a == b => 0.,
        _ => 1.,
    }
}

/// Fraction of attributes with different values
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mismatch;
impl Distance for Mismatch {
    fn distance(&self, a: Point, b: Point) -> f64 {
        if a.is_empty() {
            return 0.;
        }

        let differ = Zip::from(&a)
            .and(&b)
            .fold(0usize, |acc, a, b| acc + (a != b) as usize);

        differ as f64 / a.len() as f64
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct L1Dist;
impl Distance for L1Dist {
    fn distance(&self, a: Point, b: Point) -> f64 {
        Zip::from(&a)
            .and(&b)
            .fold(0., |acc, a, b| acc + difference(a, b))
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct L2Dist;
impl Distance for L2Dist {
    fn distance(&self, a: Point, b: Point) -> f64 {
        Zip::from(&a)
            .and(&b)
            .fold(0., |acc, a, b| acc + difference(a, b).powi(2))
            .sqrt()
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LInfDist;
impl Distance for LInfDist {
    fn distance(&self, a: Point, b: Point) -> f64 {
        Zip::from(&a)
            .and(&b)
            .fold(0., |acc: f64, a, b| acc.max(difference(a, b)))
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LpDist(pub f64);
impl Distance for LpDist {
    fn distance(&self, a: Point, b: Point) -> f64 {
        Zip::from(&a)
            .and(&b)
            .fold(0., |acc, a, b| acc + difference(a, b).powf(self.0))
            .powf(1. / self.0)
    }
}

/// Distance given by a closure
#[derive(Clone, Copy, Debug)]
pub struct FnDistance<F>(pub F);

impl<F: Fn(Point, Point) -> f64> FnDistance<F> {
    pub fn new(distance: F) -> Self {
        FnDistance(distance)
    }
}

impl<F: Fn(Point, Point) -> f64> Distance for FnDistance<F> {
    fn distance(&self, a: Point, b: Point) -> f64 {
        (self.0)(a, b)
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum CommonDistance {
    /// Fraction of mismatched attributes
    Mismatch,
    /// Manhattan distance
    L1Dist,
    /// Euclidean distance
    L2Dist,
    /// Chebyshev distance
    LInfDist,
    /// Minkowski distance
    LpDist(f64),
}

impl Default for CommonDistance {
    fn default() -> Self {
        CommonDistance::Mismatch
    }
}

impl Distance for CommonDistance {
    fn distance(&self, a: Point, b: Point) -> f64 {
        match self {
            Self::Mismatch => Mismatch.distance(a, b),
            Self::L1Dist => L1Dist.distance(a, b),
            Self::L2Dist => L2Dist.distance(a, b),
            Self::LInfDist => LInfDist.distance(a, b),
            Self::LpDist(p) => LpDist(*p).distance(a, b),
        }
    }
}

#[cfg(test)]
mod test {
    use approx::assert_abs_diff_eq;
    use ndarray::{arr1, Array1};

    use super::*;

    fn numbers(values: &[f64]) -> Array1<Value> {
        values.iter().map(|v| Value::from(*v)).collect()
    }

    fn dist_test(dist: CommonDistance, result: f64) {
        let a = numbers(&[0.5, 6.6]);
        let b = numbers(&[4.4, 3.0]);
        let ab = dist.distance(a.view(), b.view());
        assert_abs_diff_eq!(ab, result, epsilon = 1e-3);
        assert_abs_diff_eq!(dist.distance(b.view(), a.view()), ab);
        assert_abs_diff_eq!(dist.distance(a.view(), a.view()), 0.);

        // Triangle equality
        let c = numbers(&[-4.5, 3.3]);
        let bc = dist.distance(b.view(), c.view());
        let ac = dist.distance(a.view(), c.view());
        assert!(ab + bc > ac)
    }

    #[test]
    fn l1_dist() {
        dist_test(CommonDistance::L1Dist, 7.5);
    }

    #[test]
    fn l2_dist() {
        dist_test(CommonDistance::L2Dist, 5.3075);
    }

    #[test]
    fn linf_dist() {
        dist_test(CommonDistance::LInfDist, 3.9);
    }

    #[test]
    fn lp_dist() {
        dist_test(CommonDistance::LpDist(3.3), 4.635);
    }

    #[test]
    fn mismatch() {
        let a = arr1(&[Value::from("a"), Value::from("b"), Value::from(3)]);
        let b = arr1(&[Value::from("a"), Value::from("x"), Value::from(3)]);

        assert_abs_diff_eq!(Mismatch.distance(a.view(), b.view()), 1. / 3.);
        assert_abs_diff_eq!(CommonDistance::default().distance(a.view(), a.view()), 0.);

        let empty = Array1::<Value>::from(vec![]);
        assert_abs_diff_eq!(Mismatch.distance(empty.view(), empty.view()), 0.);
    }

    #[test]
    fn text_values_overlap() {
        let a = arr1(&[Value::from("a"), Value::from(1)]);
        let b = arr1(&[Value::from("b"), Value::from(3)]);
        let c = arr1(&[Value::from("a"), Value::from(4)]);

        assert_abs_diff_eq!(L1Dist.distance(a.view(), b.view()), 3.);
        assert_abs_diff_eq!(L1Dist.distance(a.view(), c.view()), 3.);
        assert_abs_diff_eq!(L2Dist.distance(a.view(), b.view()), 5f64.sqrt());
    }

    #[test]
    fn closure_distance() {
        let first_only = FnDistance::new(|a, b| difference(&a[0], &b[0]));
        let a = numbers(&[1., 100.]);
        let b = numbers(&[3., -100.]);

        assert_abs_diff_eq!(first_only.distance(a.view(), b.view()), 2.);
    }
}
