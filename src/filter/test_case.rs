//! Filter as seen by a test adapter

use std::sync::Arc;

use crate::condition::{PropertyTypeProvider, PropertyValue};
use crate::filter::wrapper::FilterExpressionWrapper;

/// Filter handed to an adapter: validated once against the properties the
/// adapter supports, then matched against each of its test cases
#[derive(Debug, Clone)]
pub struct TestCaseFilterExpression {
    wrapper: Arc<FilterExpressionWrapper>,
    valid_for_match: bool,
}

impl TestCaseFilterExpression {
    pub fn new(wrapper: impl Into<Arc<FilterExpressionWrapper>>) -> Self {
        let wrapper = wrapper.into();
        let valid_for_match = wrapper.parse_error().is_none();
        Self {
            wrapper,
            valid_for_match,
        }
    }

    /// The filter string as given by the user
    pub fn test_case_filter_value(&self) -> &str {
        self.wrapper.filter_string()
    }

    pub fn parse_error(&self) -> Option<&str> {
        self.wrapper.parse_error()
    }

    /// Report unsupported properties; once any is reported nothing matches
    pub fn valid_for_properties<I, S>(
        &mut self,
        supported: I,
        type_provider: Option<PropertyTypeProvider<'_>>,
    ) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let invalid = self.wrapper.valid_for_properties(supported, type_provider);
        if invalid.is_some() {
            self.valid_for_match = false;
        }
        invalid
    }

    /// Whether the test case described by `provider` is selected
    pub fn matches<'v, F>(&self, provider: F) -> bool
    where
        F: Fn(&str) -> Option<PropertyValue<'v>>,
    {
        self.valid_for_match && self.wrapper.evaluate(provider)
    }
}
