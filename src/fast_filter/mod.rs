//! Flat evaluator for filters made only of `=` joined by `|`, or `!=` joined by `&`
//!
//! Such filters reduce to "does any property value fall in a set", so they are
//! evaluated with one hash lookup per value instead of a walk over every clause.

mod builder;


pub use builder::FastFilterBuilder;

use ahash::{AHashMap, AHashSet};
use regex::Regex;

use crate::condition::{fold_case, Operation, PropertyValue, SupportedProperties};
use crate::error::{FilterError, Result};
use crate::expression::Operator;

/// Values accepted for one property, compared case-insensitively
#[derive(Debug, Clone)]
pub struct FilterProperty {
    // Every distinct spelling of the name, first one first
    spellings: Vec<String>,
    values: AHashSet<String>,
}

impl FilterProperty {
    fn new(name: &str) -> Self {
        Self {
            spellings: vec![name.to_string()],
            values: AHashSet::new(),
        }
    }

    fn add(&mut self, name: &str, folded_value: &str) {
        if !self.spellings.iter().any(|s| s == name) {
            self.spellings.push(name.to_string());
        }
        self.values.insert(folded_value.to_string());
    }

    /// Property name as first written in the filter
    pub fn name(&self) -> &str {
        &self.spellings[0]
    }

    /// Each spelling of the name used in the filter; the provider is asked for all of them
    pub fn spellings(&self) -> &[String] {
        &self.spellings
    }

    /// Case-folded values
    pub fn values(&self) -> &AHashSet<String> {
        &self.values
    }

    #[inline]
    fn contains(&self, value: &str) -> bool {
        self.values.contains(&fold_case(value))
    }
}

/// Compiled flat filter
#[derive(Debug, Clone)]
pub struct FastFilter {
    // Keyed by case-folded property name
    properties: AHashMap<String, FilterProperty>,
    is_filtered_out_when_matched: bool,
    regex: Option<Regex>,
    regex_replacement: Option<String>,
}

impl FastFilter {
    pub(crate) fn new(
        properties: AHashMap<String, FilterProperty>,
        operation: Operation,
        operator: Operator,
    ) -> Result<Self> {
        let is_filtered_out_when_matched = match (operation, operator) {
            (Operation::Equal, Operator::Or | Operator::None) => false,
            (Operation::NotEqual, Operator::And | Operator::None) => true,
            _ => {
                return Err(FilterError::Internal(format!(
                    "fast filter cannot evaluate {:?} joined by {:?}",
                    operation, operator
                )))
            }
        };

        Ok(Self {
            properties,
            is_filtered_out_when_matched,
            regex: None,
            regex_replacement: None,
        })
    }

    /// Normalize every property value through `regex` before the lookup.
    ///
    /// Without a replacement only the matched part of a value is looked up and
    /// values that don't match are skipped; with one, every match is replaced.
    pub(crate) fn with_regex(mut self, regex: Regex, replacement: Option<String>) -> Self {
        self.regex = Some(regex);
        self.regex_replacement = replacement;
        self
    }

    /// True for `!=` filters: a test matching any value is excluded
    pub fn is_filtered_out_when_matched(&self) -> bool {
        self.is_filtered_out_when_matched
    }

    pub fn filter_properties(&self) -> impl Iterator<Item = &FilterProperty> {
        self.properties.values()
    }

    /// Look up accepted values for `name`, ignoring case
    pub fn property(&self, name: &str) -> Option<&FilterProperty> {
        self.properties.get(&fold_case(name))
    }

    pub fn evaluate<'v, F>(&self, provider: F) -> bool
    where
        F: Fn(&str) -> Option<PropertyValue<'v>>,
    {
        let matched = self.properties.values().any(|property| {
            property.spellings().iter().any(|name| {
                provider(name).map_or(false, |value| {
                    value
                        .values()
                        .iter()
                        .any(|v| self.value_matches(property, v))
                })
            })
        });

        matched != self.is_filtered_out_when_matched
    }

    /// Property names referenced by the filter that the caller cannot supply
    pub fn valid_for_properties(&self, supported: &SupportedProperties) -> Option<Vec<String>> {
        let invalid: Vec<String> = self
            .properties
            .values()
            .filter(|property| !supported.contains(property.name()))
            .map(|property| property.name().to_string())
            .collect();

        (!invalid.is_empty()).then_some(invalid)
    }

    fn value_matches(&self, property: &FilterProperty, value: &str) -> bool {
        match (&self.regex, &self.regex_replacement) {
            (Some(regex), Some(replacement)) => {
                property.contains(&regex.replace_all(value, replacement.as_str()))
            }
            (Some(regex), None) => regex
                .find(value)
                .map_or(false, |m| property.contains(m.as_str())),
            (None, _) => property.contains(value),
        }
    }
}
