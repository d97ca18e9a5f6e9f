//! `tabula-datasets` provides a collection of small categorical datasets ready to be used in tests and examples.
//!
//! ## Current State
//!
//! Currently the following datasets are provided:
//!
//! * `["restaurant"]` : the restaurant waiting problem, twelve examples with eleven attributes
//! * `["generate"]` : synthetic restaurant examples and the majority, parity and xor problems
//!
//! along with the hand-written reference tree of the restaurant problem in [`will_wait`].
//!
//! ## Using a dataset
//!
//! To use one of the provided datasets in your project add the crate to your Cargo.toml with the corresponding feature enabled:
//! ```ignore
//! tabula-datasets = { version = "0.1.0", features = ["restaurant"] }
//! ```
//! and then use it in your example or tests as
//! ```ignore
//! let restaurant = tabula_datasets::restaurant();
//! let (train, valid) = restaurant.split_at_range(0, 3);
//! ```

#[cfg(feature = "generate")]
pub mod generate;

#[cfg(feature = "restaurant")]
pub use restaurant::*;

#[cfg(feature = "restaurant")]
mod restaurant {
    use ndarray::ArrayView1;
    use tabula::{Dataset, Value};

    /// Attribute names of the restaurant problem, the last one is the target
    pub const RESTAURANT_ATTRS: &str =
        "Alternate Bar Fri/Sat Hungry Patrons Price Raining Reservation Type WaitEstimate Wait";

    const ALTERNATE: usize = 0;
    const BAR: usize = 1;
    const FRI_SAT: usize = 2;
    const HUNGRY: usize = 3;
    const PATRONS: usize = 4;
    const RAINING: usize = 6;
    const RESERVATION: usize = 7;
    const WAIT_ESTIMATE: usize = 9;

    /// Builds a restaurant dataset from the given examples
    ///
    /// Without explicit value sets they are computed from the examples.
    pub fn restaurant_with(
        rows: Vec<Vec<Value>>,
        values: Option<Vec<Vec<Value>>>,
    ) -> tabula::error::Result<Dataset> {
        let builder = Dataset::builder()
            .name("restaurant")
            .attr_names_str(RESTAURANT_ATTRS)
            .target("Wait");

        match values {
            Some(values) => builder.values(values).rows(rows),
            None => builder.rows(rows),
        }
    }

    /// Read in the restaurant dataset
    ///
    /// Whether to wait for a table, twelve examples with ten input attributes and the target
    /// `Wait`.
    pub fn restaurant() -> Dataset {
        let data = include_str!("../data/restaurant.csv");

        Dataset::builder()
            .name("restaurant")
            .source("restaurant.csv")
            .attr_names_str(RESTAURANT_ATTRS)
            .target("Wait")
            .csv(data)
            .expect("embedded restaurant data is well-formed")
    }

    fn is(example: &ArrayView1<Value>, attr: usize, value: &str) -> bool {
        example[attr].as_str() == Some(value)
    }

    /// The hand-written decision tree for the restaurant problem
    ///
    /// Returns `Yes` or `No` for complete examples and `Value::Unknown` if a tested attribute
    /// holds a value outside of the restaurant domain.
    pub fn will_wait(example: ArrayView1<Value>) -> Value {
        let yes_no = |yes: bool| Value::from(if yes { "Yes" } else { "No" });

        let result = match example[PATRONS].as_str() {
            Some("None") => Some(false),
            Some("Some") => Some(true),
            Some("Full") => match example[WAIT_ESTIMATE].as_str() {
                Some(">60") => Some(false),
                Some("0-10") => Some(true),
                Some("30-60") => {
                    if is(&example, ALTERNATE, "No") {
                        if is(&example, RESERVATION, "Yes") {
                            Some(true)
                        } else {
                            Some(is(&example, BAR, "Yes"))
                        }
                    } else {
                        Some(is(&example, FRI_SAT, "Yes"))
                    }
                }
                Some("10-30") => {
                    if is(&example, HUNGRY, "No") || is(&example, ALTERNATE, "No") {
                        Some(true)
                    } else {
                        Some(is(&example, RAINING, "Yes"))
                    }
                }
                _ => None,
            },
            _ => None,
        };

        result.map(yes_no).unwrap_or(Value::Unknown)
    }
}
