//! Datasets
//!
//! This module implements the categorical dataset struct, the attribute value type and the
//! parser for delimited text. A dataset owns its examples as a matrix of [`Value`]s together
//! with the description of the learning problem: which attribute is the target, which ones are
//! inputs and which values every attribute may take.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};

mod impl_dataset;
mod parse;
mod value;

pub use parse::{parse_csv, Delimiter};
pub use value::Value;

/// Reference to an attribute
///
/// Attributes can be referenced by name, by a non-negative index or by a negative index which
/// counts from the end (`-1` is the last attribute). All of them are normalized by
/// [`Dataset::attr_index`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attr {
    Index(isize),
    Name(String),
}

impl From<&str> for Attr {
    fn from(name: &str) -> Self {
        Attr::Name(name.to_string())
    }
}

impl From<String> for Attr {
    fn from(name: String) -> Self {
        Attr::Name(name)
    }
}

impl From<isize> for Attr {
    fn from(idx: isize) -> Self {
        Attr::Index(idx)
    }
}

impl From<i32> for Attr {
    fn from(idx: i32) -> Self {
        Attr::Index(idx as isize)
    }
}

impl From<usize> for Attr {
    fn from(idx: usize) -> Self {
        Attr::Index(idx as isize)
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attr::Index(idx) => write!(f, "{}", idx),
            Attr::Name(name) => write!(f, "{}", name),
        }
    }
}

/// Dataset
///
/// A dataset for a classification problem over categorical attributes.
///
/// # Fields
///
/// * `examples`: a two-dimensional matrix with dimensionality (nexamples, width), every row is one
/// example and every column one attribute position
/// * `attrs`: the attribute indices, normally `0..width`
/// * `attr_names`: descriptive names, aligned with `attrs`
/// * `target`: the attribute a learner tries to predict
/// * `inputs`: the attributes a learner may look at, never containing the target
/// * `values`: the legal values of every attribute position. This is `None` until it is either
/// supplied or computed from a non-empty set of examples. While it is `None` examples are not
/// validated.
///
/// The fields are private because every mutation has to keep the invariants: the target belongs
/// to `attrs`, the inputs are a subset of `attrs` without the target and every example only takes
/// values from the value sets.
///
/// # Example
///
/// ```rust
/// use tabula::Dataset;
///
/// let mut dataset = Dataset::builder()
///     .name("weather")
///     .attr_names_str("Outlook Windy Play")
///     .target("Play")
///     .csv("Sunny, No, Yes\nRainy, Yes, No\nSunny, Yes, Yes")
///     .unwrap();
///
/// assert_eq!(dataset.nexamples(), 3);
/// assert_eq!(dataset.inputs(), &[0, 1]);
/// assert!(dataset.add_example(vec!["Foggy", "No", "No"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    examples: Array2<Value>,
    attrs: Vec<usize>,
    attr_names: Vec<String>,
    target: usize,
    inputs: Vec<usize>,
    values: Option<Vec<Vec<Value>>>,
    name: String,
    source: String,
}

/// Options for constructing a [`Dataset`]
///
/// Everything is optional: attributes are derived from the width of the examples, names default
/// to the attribute index, the target defaults to the last attribute and value sets are computed
/// from the examples.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    attrs: Option<Vec<usize>>,
    attr_names: Option<Vec<String>>,
    target: Attr,
    inputs: Option<Vec<Attr>>,
    values: Option<Vec<Vec<Value>>>,
    exclude: Vec<Attr>,
    name: String,
    source: String,
    delimiter: Delimiter,
}

impl Default for DatasetBuilder {
    fn default() -> Self {
        DatasetBuilder {
            attrs: None,
            attr_names: None,
            target: Attr::Index(-1),
            inputs: None,
            values: None,
            exclude: Vec::new(),
            name: String::new(),
            source: String::new(),
            delimiter: Delimiter::default(),
        }
    }
}

impl DatasetBuilder {
    /// Sets the attribute indices
    pub fn attrs(mut self, attrs: Vec<usize>) -> Self {
        self.attrs = Some(attrs);
        self
    }

    /// Sets the attribute names, one per attribute
    pub fn attr_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attr_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the attribute names from a whitespace separated list
    pub fn attr_names_str(self, names: &str) -> Self {
        self.attr_names(names.split_whitespace())
    }

    /// Sets the target attribute, defaults to the last one
    pub fn target(mut self, target: impl Into<Attr>) -> Self {
        self.target = target.into();
        self
    }

    /// Sets the input attributes explicitly
    ///
    /// The target is removed from this list and `exclude` is ignored.
    pub fn inputs<I, A>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Attr>,
    {
        self.inputs = Some(inputs.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the legal values of every attribute position
    pub fn values(mut self, values: Vec<Vec<Value>>) -> Self {
        self.values = Some(values);
        self
    }

    /// Excludes attributes from the inputs
    pub fn exclude<I, A>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Attr>,
    {
        self.exclude = exclude.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the field separator used by [`csv`](DatasetBuilder::csv)
    pub fn delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builds the dataset from delimited text
    pub fn csv(self, text: &str) -> Result<Dataset> {
        let rows = parse_csv(text, self.delimiter)?;
        self.rows(rows)
    }

    /// Builds the dataset from raw rows
    ///
    /// Fails with a configuration error if the rows do not all have the same width.
    pub fn rows<R, V>(self, rows: impl IntoIterator<Item = R>) -> Result<Dataset>
    where
        R: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect::<Vec<Value>>())
            .collect::<Vec<_>>();

        let width = rows.first().map(Vec::len).unwrap_or(0);
        if let Some((idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(Error::Configuration(format!(
                "example {} has {} values, but the first example has {}",
                idx,
                row.len(),
                width
            )));
        }

        let nexamples = rows.len();
        let examples = Array2::from_shape_vec((nexamples, width), rows.concat())?;

        self.records(examples)
    }

    /// Builds the dataset from a matrix of examples
    pub fn records(self, examples: Array2<Value>) -> Result<Dataset> {
        let DatasetBuilder {
            attrs,
            attr_names,
            target,
            inputs,
            values,
            exclude,
            name,
            source,
            ..
        } = self;

        let attrs = match attrs {
            Some(attrs) => attrs,
            None if examples.nrows() > 0 => (0..examples.ncols()).collect(),
            None => match (&attr_names, &values) {
                (Some(names), _) => (0..names.len()).collect(),
                (None, Some(values)) => (0..values.len()).collect(),
                (None, None) => Vec::new(),
            },
        };

        let attr_names =
            attr_names.unwrap_or_else(|| attrs.iter().map(|attr| attr.to_string()).collect());
        if attr_names.len() != attrs.len() {
            return Err(Error::Configuration(format!(
                "{} attribute names given for {} attributes",
                attr_names.len(),
                attrs.len()
            )));
        }

        // without examples the width is only known from the attributes
        let examples = if examples.nrows() == 0 {
            let width = attrs.iter().max().map(|attr| attr + 1).unwrap_or(0);
            Array2::from_shape_vec((0, width), Vec::new())?
        } else {
            examples
        };

        let mut dataset = Dataset {
            examples,
            attrs,
            attr_names,
            target: 0,
            inputs: Vec::new(),
            values,
            name,
            source,
        };

        dataset.configure(target, inputs.as_deref(), &exclude)?;

        Ok(dataset)
    }
}

impl Dataset {
    /// Returns a builder with the default options
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// Resolves an attribute reference to its attribute index
    ///
    /// Names are looked up in the attribute names, negative indices count from the end of the
    /// attribute list and non-negative indices have to be an attribute.
    pub fn attr_index(&self, attr: &Attr) -> Result<usize> {
        match attr {
            Attr::Name(name) => self
                .attr_names
                .iter()
                .position(|candidate| candidate == name)
                .map(|pos| self.attrs[pos])
                .ok_or_else(|| Error::UnknownAttribute(name.clone())),
            Attr::Index(idx) if *idx < 0 => {
                let nattrs = self.attrs.len() as isize;
                if -*idx <= nattrs {
                    Ok(self.attrs[(nattrs + *idx) as usize])
                } else {
                    Err(Error::UnknownAttribute(idx.to_string()))
                }
            }
            Attr::Index(idx) => {
                let idx = *idx as usize;
                if self.attrs.contains(&idx) {
                    Ok(idx)
                } else {
                    Err(Error::UnknownAttribute(idx.to_string()))
                }
            }
        }
    }

    /// Sets (or changes) the target and the inputs
    ///
    /// This way, one dataset can be used for several learning problems. If `inputs` is given the
    /// target is removed from it, otherwise the inputs are all attributes except the target and
    /// the excluded ones. Value sets are computed from the examples if they are still unknown.
    ///
    /// All invariants are checked before anything is changed, on error the dataset is left as
    /// it was.
    pub fn configure(
        &mut self,
        target: impl Into<Attr>,
        inputs: Option<&[Attr]>,
        exclude: &[Attr],
    ) -> Result<()> {
        let target = self.attr_index(&target.into())?;

        let inputs: Vec<usize> = match inputs {
            Some(inputs) => inputs
                .iter()
                .map(|attr| self.attr_index(attr))
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .filter(|attr| *attr != target)
                .collect(),
            None => {
                let exclude = exclude
                    .iter()
                    .map(|attr| self.attr_index(attr))
                    .collect::<Result<HashSet<_>>>()?;

                self.attrs
                    .iter()
                    .copied()
                    .filter(|attr| *attr != target && !exclude.contains(attr))
                    .collect()
            }
        };

        let computed = match self.values {
            Some(_) => None,
            None => self.distinct_values(),
        };

        self.check_config(target, &inputs, computed.as_deref().or(self.values.as_deref()))?;

        self.target = target;
        self.inputs = inputs;
        if computed.is_some() {
            self.values = computed;
        }

        log::debug!(
            "configured {}: target {}, {} inputs",
            self,
            self.attr_names[self.attr_position(self.target)],
            self.inputs.len()
        );

        Ok(())
    }

    /// Checks that an example has the dataset's width and only takes values from the value sets
    ///
    /// The values are not checked while the value sets are unknown.
    pub fn check_example(&self, example: ArrayView1<Value>) -> Result<()> {
        self.check_example_with(example, self.values.as_deref())
    }

    /// Validates an example and appends it
    pub fn add_example<V: Into<Value>>(&mut self, example: impl IntoIterator<Item = V>) -> Result<()> {
        let example = example.into_iter().map(Into::into).collect::<Array1<Value>>();
        self.check_example(example.view())?;
        self.examples.push_row(example.view())?;

        Ok(())
    }

    /// Returns a copy of the example with all non-input attributes set to `Value::Unknown`
    ///
    /// Predictors only ever see sanitized examples, so they cannot cheat by looking at the target
    /// or at excluded attributes.
    pub fn sanitize(&self, example: ArrayView1<Value>) -> Array1<Value> {
        example
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                if self.inputs.contains(&idx) {
                    value.clone()
                } else {
                    Value::Unknown
                }
            })
            .collect()
    }

    pub fn examples(&self) -> ArrayView2<Value> {
        self.examples.view()
    }

    pub fn example(&self, idx: usize) -> ArrayView1<Value> {
        self.examples.row(idx)
    }

    pub fn nexamples(&self) -> usize {
        self.examples.nrows()
    }

    /// Number of values in every example
    pub fn width(&self) -> usize {
        self.examples.ncols()
    }

    pub fn attrs(&self) -> &[usize] {
        &self.attrs
    }

    pub fn attr_names(&self) -> &[String] {
        &self.attr_names
    }

    /// Returns the name of an attribute index
    pub fn attr_name(&self, attr: usize) -> Option<&str> {
        self.attrs
            .iter()
            .position(|candidate| *candidate == attr)
            .map(|pos| self.attr_names[pos].as_str())
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Returns the value sets of all attribute positions, if known
    pub fn values(&self) -> Option<&[Vec<Value>]> {
        self.values.as_deref()
    }

    /// Returns the value set of a single attribute, if known
    pub fn values_of(&self, attr: usize) -> Option<&[Value]> {
        self.values
            .as_ref()
            .and_then(|values| values.get(attr))
            .map(Vec::as_slice)
    }

    /// Returns the value set of the target, if known
    pub fn target_values(&self) -> Option<&[Value]> {
        self.values_of(self.target)
    }

    /// Returns the legal values of an attribute
    ///
    /// This is the value set if known, otherwise the distinct values of the examples in the order
    /// they are first seen.
    pub fn domain(&self, attr: usize) -> Vec<Value> {
        match self.values_of(attr) {
            Some(values) => values.to_vec(),
            None => {
                let mut seen = HashSet::new();
                self.examples
                    .column(attr)
                    .iter()
                    .filter(|value| seen.insert(*value))
                    .cloned()
                    .collect()
            }
        }
    }

    /// Returns the target value of the example at `idx`
    pub fn target_value(&self, idx: usize) -> &Value {
        &self.examples[(idx, self.target)]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    fn attr_position(&self, attr: usize) -> usize {
        self.attrs
            .iter()
            .position(|candidate| *candidate == attr)
            .unwrap_or_default()
    }

    /// Distinct values of every column in the order they are first seen
    fn distinct_values(&self) -> Option<Vec<Vec<Value>>> {
        if self.examples.nrows() == 0 {
            return None;
        }

        let values = self
            .examples
            .columns()
            .into_iter()
            .map(|column| {
                let mut seen = HashSet::new();
                column
                    .iter()
                    .filter(|value| seen.insert(*value))
                    .cloned()
                    .collect()
            })
            .collect();

        Some(values)
    }

    fn check_config(
        &self,
        target: usize,
        inputs: &[usize],
        values: Option<&[Vec<Value>]>,
    ) -> Result<()> {
        if self.attr_names.len() != self.attrs.len() {
            return Err(Error::Configuration(format!(
                "{} attribute names for {} attributes",
                self.attr_names.len(),
                self.attrs.len()
            )));
        }
        if let Some(attr) = self.attrs.iter().find(|attr| **attr >= self.width()) {
            return Err(Error::Configuration(format!(
                "attribute {} is outside of examples with width {}",
                attr,
                self.width()
            )));
        }
        if !self.attrs.contains(&target) {
            return Err(Error::Configuration(format!(
                "target {} is not an attribute",
                target
            )));
        }
        if inputs.contains(&target) {
            return Err(Error::Configuration(format!(
                "target {} is also an input",
                target
            )));
        }
        if let Some(attr) = inputs.iter().find(|attr| !self.attrs.contains(attr)) {
            return Err(Error::Configuration(format!(
                "input {} is not an attribute",
                attr
            )));
        }
        if let Some(values) = values {
            if values.len() < self.width() {
                return Err(Error::Configuration(format!(
                    "{} value sets for examples with width {}",
                    values.len(),
                    self.width()
                )));
            }
        }

        self.examples
            .rows()
            .into_iter()
            .try_for_each(|example| self.check_example_with(example, values))
    }

    fn check_example_with(
        &self,
        example: ArrayView1<Value>,
        values: Option<&[Vec<Value>]>,
    ) -> Result<()> {
        if example.len() != self.width() {
            return Err(Error::Configuration(format!(
                "example {} has {} values, but the dataset has width {}",
                format_example(example),
                example.len(),
                self.width()
            )));
        }

        let values = match values {
            Some(values) => values,
            None => return Ok(()),
        };

        for (attr, name) in self.attrs.iter().zip(&self.attr_names) {
            let value = &example[*attr];
            let legal = values
                .get(*attr)
                .map(|legal| legal.contains(value))
                .unwrap_or(false);

            if !legal {
                return Err(Error::BadValue {
                    value: value.clone(),
                    attr: name.clone(),
                    example: format_example(example),
                });
            }
        }

        Ok(())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Dataset({}): {} examples, {} attributes>",
            self.name,
            self.nexamples(),
            self.attrs.len()
        )
    }
}

/// Renders an example as `[v1, v2, ...]`
pub fn format_example(example: ArrayView1<Value>) -> String {
    let values = example
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>();

    format!("[{}]", values.join(", "))
}
