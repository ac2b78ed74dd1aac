//! Options supplied alongside a filter string

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// Normalization applied to property values before fast-filter lookups
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterOptions {
    /// Pattern applied to every property value
    pub filter_regex: Option<String>,
    /// Replacement for every match of `filter_regex`; when unset only the
    /// matched part of a value is kept
    pub filter_regex_replacement: Option<String>,
}

impl FilterOptions {
    pub fn with_regex(regex: impl Into<String>) -> Self {
        Self {
            filter_regex: Some(regex.into()),
            filter_regex_replacement: None,
        }
    }

    pub fn with_replacement(regex: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            filter_regex: Some(regex.into()),
            filter_regex_replacement: Some(replacement.into()),
        }
    }

    pub(crate) fn compile_regex(&self) -> Result<Option<Regex>> {
        self.filter_regex
            .as_deref()
            .map(|pattern| Regex::new(pattern).map_err(|e| FilterError::InvalidRegex(e.to_string())))
            .transpose()
    }
}
