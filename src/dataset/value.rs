use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A single attribute value
///
/// Attributes are categorical, but the categories may be spelled as numbers or as text. Fields
/// read from delimited text become a `Number` whenever they parse as a floating point number and
/// `Text` otherwise. `Unknown` is never produced by parsing, it marks positions hidden from a
/// predictor (see [`Dataset::sanitize`](crate::Dataset::sanitize)).
///
/// Values are hashable and totally ordered (`Unknown < Number < Text`), numbers are compared by
/// their IEEE total order after folding `-0.0` into `0.0` and all NaNs into one.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Text(String),
    Unknown,
}

impl Value {
    /// Coerce a raw field, numeric if possible and text otherwise
    ///
    /// Surrounding whitespace is removed in both cases.
    pub fn parse(field: &str) -> Value {
        let field = field.trim();
        match field.parse::<f64>() {
            Ok(x) => Value::Number(x),
            Err(_) => Value::Text(field.to_string()),
        }
    }

    /// Returns the number if this is a numeric value
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            _ => None,
        }
    }

    /// Returns the text if this is a textual value
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Value::Unknown)
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Unknown => 0,
            Value::Number(_) => 1,
            Value::Text(_) => 2,
        }
    }
}

/// Fold the float representations which should compare equal
fn canonical(x: f64) -> f64 {
    if x == 0.0 {
        0.0
    } else if x.is_nan() {
        f64::NAN
    } else {
        x
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => canonical(*a).to_bits() == canonical(*b).to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Unknown, Value::Unknown) => true,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Value::Number(x) => canonical(*x).to_bits().hash(state),
            Value::Text(s) => s.hash(state),
            Value::Unknown => {}
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => canonical(*a).total_cmp(&canonical(*b)),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Unknown => write!(f, "?"),
        }
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::Unknown
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Number(x)
    }
}

impl From<i32> for Value {
    fn from(x: i32) -> Self {
        Value::Number(x as f64)
    }
}

impl From<i64> for Value {
    fn from(x: i64) -> Self {
        Value::Number(x as f64)
    }
}

impl From<usize> for Value {
    fn from(x: usize) -> Self {
        Value::Number(x as f64)
    }
}

impl From<bool> for Value {
    fn from(x: bool) -> Self {
        Value::Number(if x { 1.0 } else { 0.0 })
    }
}
