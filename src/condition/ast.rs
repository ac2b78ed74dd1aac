//! Data types for a single filter condition

use std::borrow::Cow;
use std::fmt;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::escape::escape;

/// Property used when a condition is written without a name or operator
pub const DEFAULT_PROPERTY_NAME: &str = "FullyQualifiedName";

/// Comparison applied between a property value and the condition value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    /// Equal (=)
    Equal,
    /// Not equal (!=)
    NotEqual,
    /// Contains (~)
    Contains,
    /// Does not contain (!~)
    NotContains,
}

impl Operation {
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Equal => "=",
            Operation::NotEqual => "!=",
            Operation::Contains => "~",
            Operation::NotContains => "!~",
        }
    }
}

/// Single condition like `Category!=Slow`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    name: String,
    operation: Operation,
    value: String,
    // Case-folded copy of `value`, compared against folded property values
    folded_value: String,
}

impl Condition {
    pub fn new(name: impl Into<String>, operation: Operation, value: impl Into<String>) -> Self {
        let value = value.into();
        let folded_value = fold_case(&value);
        Self {
            name: name.into(),
            operation,
            value,
            folded_value,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn folded_value(&self) -> &str {
        &self.folded_value
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.name,
            self.operation.symbol(),
            escape(&self.value)
        )
    }
}

/// Value(s) a test case holds for one property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyValue<'a> {
    Single(Cow<'a, str>),
    Multi(Vec<Cow<'a, str>>),
}

impl<'a> PropertyValue<'a> {
    /// All values, a single value being a one-element slice
    pub fn values(&self) -> &[Cow<'a, str>] {
        match self {
            PropertyValue::Single(v) => std::slice::from_ref(v),
            PropertyValue::Multi(values) => values,
        }
    }
}

impl<'a> From<&'a str> for PropertyValue<'a> {
    fn from(value: &'a str) -> Self {
        PropertyValue::Single(Cow::Borrowed(value))
    }
}

impl From<String> for PropertyValue<'_> {
    fn from(value: String) -> Self {
        PropertyValue::Single(Cow::Owned(value))
    }
}

impl<'a> From<&'a [&'a str]> for PropertyValue<'a> {
    fn from(values: &'a [&'a str]) -> Self {
        PropertyValue::Multi(values.iter().map(|v| Cow::Borrowed(*v)).collect())
    }
}

impl<'a> From<Vec<&'a str>> for PropertyValue<'a> {
    fn from(values: Vec<&'a str>) -> Self {
        PropertyValue::Multi(values.into_iter().map(Cow::Borrowed).collect())
    }
}

impl From<Vec<String>> for PropertyValue<'_> {
    fn from(values: Vec<String>) -> Self {
        PropertyValue::Multi(values.into_iter().map(Cow::Owned).collect())
    }
}

/// Declared type of a test property
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    String,
    StringArray,
    Other(String),
}

impl PropertyType {
    /// Whether `~` and `!~` can be applied to this type
    pub fn supports_contains(&self) -> bool {
        matches!(self, PropertyType::String | PropertyType::StringArray)
    }
}

/// Maps a property name to its declared type, if known
pub type PropertyTypeProvider<'p> = &'p dyn Fn(&str) -> Option<PropertyType>;

/// Case-insensitive set of property names a caller can supply values for
#[derive(Debug, Clone, Default)]
pub struct SupportedProperties {
    names: AHashSet<String>,
}

impl SupportedProperties {
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&fold_case(name))
    }
}

impl<S: AsRef<str>> FromIterator<S> for SupportedProperties {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(|n| fold_case(n.as_ref())).collect(),
        }
    }
}

/// Simple case folding shared by every case-insensitive comparison
pub(crate) fn fold_case(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Compare `s` with an already folded string
#[inline]
pub(crate) fn eq_folded(s: &str, folded: &str) -> bool {
    s.chars().flat_map(char::to_lowercase).eq(folded.chars())
}
