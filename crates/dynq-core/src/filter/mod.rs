//! Caller-supplied filter graphs.
//!
//! A `FilterNode` is an ordered map from field name to `FilterValue`. It is
//! built by `#[derive(Filter)]`, by hand through the builder methods, or from
//! JSON. The predicate compiler is the only reader.

#[cfg(feature = "json")]
mod json;


use crate::{traits::FilterInput, value::Value};

/// Suffixes that let a filter field `xList` / `x_list` carry a membership
/// test against a target field `x`.
const LIST_SUFFIXES: [&str; 2] = ["_list", "List"];

///
/// FilterValue
///
/// Null        → no constraint on this field
/// Scalar      → field must equal the value
/// Set         → field must be one of the values
/// Node        → constraints on a nested record
///

#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Null,
    Scalar(Value),
    Set(Vec<Value>),
    Node(FilterNode),
}

impl FilterValue {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short label of the shape, used in diagnostics.
    #[must_use]
    pub const fn shape_label(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "a scalar value",
            Self::Set(_) => "a set of values",
            Self::Node(_) => "a nested filter",
        }
    }
}

///
/// FilterNode
///
/// One level of a filter graph. Entry order is insertion order; inserting an
/// existing name replaces its value in place.
///

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterNode {
    entries: Vec<(String, FilterValue)>,
}

impl FilterNode {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Set `name` to any filter input (scalar, `Option`, `Vec`, nested node).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, input: impl FilterInput) -> Self {
        self.insert(name, input.to_filter_value());
        self
    }

    /// Equality constraint.
    #[must_use]
    pub fn eq(self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        let filter = if value.is_null() {
            FilterValue::Null
        } else {
            FilterValue::Scalar(value)
        };

        self.with_value(name, filter)
    }

    /// Membership constraint.
    #[must_use]
    pub fn any_of<I>(self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let set = values.into_iter().map(Into::into).collect();
        self.with_value(name, FilterValue::Set(set))
    }

    /// Constraints on a nested record.
    #[must_use]
    pub fn node(self, name: impl Into<String>, node: Self) -> Self {
        self.with_value(name, FilterValue::Node(node))
    }

    /// Explicit "no constraint" entry.
    #[must_use]
    pub fn null(self, name: impl Into<String>) -> Self {
        self.with_value(name, FilterValue::Null)
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: FilterValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: FilterValue) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(key, _)| *key == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FilterValue> {
        self.entries
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value))
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Entries that carry a constraint (everything but `Null`).
    pub fn populated(&self) -> impl Iterator<Item = (&str, &FilterValue)> {
        self.entries().filter(|(_, value)| !value.is_null())
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FilterNode
where
    K: Into<String>,
    V: FilterInput,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut node = Self::new();
        for (key, value) in iter {
            node.insert(key, value.to_filter_value());
        }
        node
    }
}

/// Target name implied by a list-suffixed filter field, if any.
pub(crate) fn strip_list_suffix(name: &str) -> Option<&str> {
    LIST_SUFFIXES.iter().find_map(|suffix| {
        name.strip_suffix(suffix)
            .filter(|stem| !stem.is_empty())
    })
}
