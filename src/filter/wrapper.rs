//! Owns the parse result of one filter string

use tracing::debug;

use crate::condition::{PropertyTypeProvider, PropertyValue, SupportedProperties};
use crate::error::Result;
use crate::expression::{self, ExpressionTree, ParsedExpression};
use crate::fast_filter::FastFilter;
use crate::filter::options::FilterOptions;

/// Parsed filter, or the reason it could not be parsed
#[derive(Debug, Clone)]
pub struct FilterExpressionWrapper {
    filter_string: String,
    options: Option<FilterOptions>,
    expression: Option<ExpressionTree>,
    fast_filter: Option<FastFilter>,
    parse_error: Option<String>,
}

impl FilterExpressionWrapper {
    pub fn new(filter: impl Into<String>) -> Self {
        Self::with_options(filter, None)
    }

    /// Parse `filter`; failures are kept as [`parse_error`](Self::parse_error)
    pub fn with_options(filter: impl Into<String>, options: Option<FilterOptions>) -> Self {
        let filter_string = filter.into();

        let (expression, fast_filter, parse_error) =
            match Self::parse(&filter_string, options.as_ref()) {
                Ok(ParsedExpression { tree, fast_filter }) => {
                    debug!(
                        conditions = tree.condition_count(),
                        fast_filter = fast_filter.is_some(),
                        "parsed test case filter"
                    );
                    (Some(tree), fast_filter, None)
                }
                Err(err) => {
                    debug!(filter = %filter_string, error = %err, "invalid test case filter");
                    (None, None, Some(err.to_parse_error()))
                }
            };

        Self {
            filter_string,
            options,
            expression,
            fast_filter,
            parse_error,
        }
    }

    fn parse(filter: &str, options: Option<&FilterOptions>) -> Result<ParsedExpression> {
        let mut parsed = expression::parse(filter)?;

        if let Some(options) = options {
            if let Some(regex) = options.compile_regex()? {
                let replacement = options.filter_regex_replacement.clone();
                parsed.fast_filter = parsed
                    .fast_filter
                    .map(|fast| fast.with_regex(regex, replacement));
            }
        }

        Ok(parsed)
    }

    /// The filter exactly as given
    pub fn filter_string(&self) -> &str {
        &self.filter_string
    }

    pub fn options(&self) -> Option<&FilterOptions> {
        self.options.as_ref()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.parse_error.as_deref()
    }

    pub fn expression(&self) -> Option<&ExpressionTree> {
        self.expression.as_ref()
    }

    pub fn fast_filter(&self) -> Option<&FastFilter> {
        self.fast_filter.as_ref()
    }

    /// Whether the test case described by `provider` is selected.
    /// An unparseable filter selects nothing.
    pub fn evaluate<'v, F>(&self, provider: F) -> bool
    where
        F: Fn(&str) -> Option<PropertyValue<'v>>,
    {
        if self.parse_error.is_some() {
            return false;
        }

        match (&self.fast_filter, &self.expression) {
            (Some(fast), _) => fast.evaluate(provider),
            (None, Some(tree)) => tree.evaluate(provider),
            (None, None) => false,
        }
    }

    /// Property names used by the filter that the caller can't supply.
    /// `None` when all are supported or the filter didn't parse.
    pub fn valid_for_properties<I, S>(
        &self,
        supported: I,
        type_provider: Option<PropertyTypeProvider<'_>>,
    ) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.parse_error.is_some() {
            return None;
        }

        let supported: SupportedProperties = supported.into_iter().collect();
        match (&self.fast_filter, &self.expression) {
            (Some(fast), _) => fast.valid_for_properties(&supported),
            (None, Some(tree)) => tree.valid_for_properties(&supported, type_provider),
            (None, None) => None,
        }
    }
}
