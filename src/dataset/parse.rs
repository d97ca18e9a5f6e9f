use csv::{ReaderBuilder, Trim};

use super::Value;
use crate::error::{Error, Result};

/// Field separator of delimited text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// A single byte, for example `b','` or `b'\t'`
    Byte(u8),
    /// Any run of whitespace
    Whitespace,
}

impl Default for Delimiter {
    fn default() -> Self {
        Delimiter::Byte(b',')
    }
}

/// Parse delimited text into rows of values
///
/// Lines are separated by newlines and lines consisting only of whitespace are skipped. Every
/// field is trimmed and converted with [`Value::parse`], so it becomes a number whenever it
/// looks like one. Rows are not required to have the same number of fields here, the
/// [`Dataset`](crate::Dataset) builder rejects ragged rows.
///
/// ```rust
/// use tabula::dataset::{parse_csv, Delimiter, Value};
///
/// let rows = parse_csv("1, 2, 3 \n\n 0, 2, na", Delimiter::default()).unwrap();
/// assert_eq!(rows[1][2], Value::from("na"));
/// assert_eq!(rows[0][0], Value::from(1));
/// ```
pub fn parse_csv(input: &str, delimiter: Delimiter) -> Result<Vec<Vec<Value>>> {
    let lines = input.lines().filter(|line| !line.trim().is_empty());

    match delimiter {
        Delimiter::Whitespace => Ok(lines
            .map(|line| line.split_whitespace().map(Value::parse).collect())
            .collect()),
        Delimiter::Byte(delimiter) => {
            let text = lines.collect::<Vec<_>>().join("\n");
            let mut reader = ReaderBuilder::new()
                .has_headers(false)
                .delimiter(delimiter)
                .flexible(true)
                .trim(Trim::All)
                .from_reader(text.as_bytes());

            reader
                .records()
                .map(|record| {
                    record
                        .map(|record| record.iter().map(Value::parse).collect())
                        .map_err(Error::from)
                })
                .collect()
        }
    }
}
