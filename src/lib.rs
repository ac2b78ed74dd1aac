//! Test Case Filter - test selection by filter expression
//!
//! This crate evaluates filter expressions such as
//! `FullyQualifiedName~Smoke&Category!=Slow` against the property values of
//! test cases. Conditions are joined with `&` and `|` (AND binds tighter) and
//! grouped with parentheses; `\` escapes any of `\ ( ) & | = ! ~`.
//!
//! Filters that are a flat `=`/`|` or `!=`/`&` chain are compiled into a
//! [`FastFilter`], whose cost depends on the number of distinct property
//! names rather than the number of clauses.
//!
//! # Example
//! ```
//! use test_case_filter::{FilterExpressionWrapper, PropertyValue};
//!
//! let filter = FilterExpressionWrapper::new("FullyQualifiedName~Smoke&Category!=Slow");
//! let selected = filter.evaluate(|name| match name {
//!     "FullyQualifiedName" => Some(PropertyValue::from("Tests.SmokeTests.Login")),
//!     "Category" => Some(PropertyValue::from(vec!["Fast", "UI"])),
//!     _ => None,
//! });
//! assert!(selected);
//! ```

pub mod condition;
pub mod error;
pub mod escape;
pub mod expression;
pub mod fast_filter;
pub mod filter;

pub use condition::{Condition, Operation, PropertyType, PropertyValue, DEFAULT_PROPERTY_NAME};
pub use error::{EscapeError, FilterError, Result};
pub use escape::{escape, unescape};
pub use expression::{ExpressionNode, ExpressionTree, Operator};
pub use fast_filter::FastFilter;
pub use filter::{FilterExpressionWrapper, FilterOptions, TestCaseFilterExpression};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_parsed_filters_are_thread_safe() {
        assert_send_sync::<FilterExpressionWrapper>();
        assert_send_sync::<TestCaseFilterExpression>();
        assert_send_sync::<ExpressionTree>();
        assert_send_sync::<FastFilter>();
    }

    #[test]
    fn test_concurrent_evaluation() {
        let tree_filter = FilterExpressionWrapper::new("FullyQualifiedName~Test&Category!=Slow");
        let fast_filter = FilterExpressionWrapper::new("FullyQualifiedName=T1|FullyQualifiedName=T3");

        std::thread::scope(|scope| {
            for i in 0..4 {
                let (tree_filter, fast_filter) = (&tree_filter, &fast_filter);
                scope.spawn(move || {
                    let name = format!("T{}", i);
                    let provider = |property: &str| match property {
                        "FullyQualifiedName" => Some(PropertyValue::from(name.as_str())),
                        _ => None,
                    };
                    assert!(!tree_filter.evaluate(provider));
                    assert_eq!(fast_filter.evaluate(provider), i % 2 == 1);
                });
            }
        });
    }

    #[test]
    fn test_example_from_docs() {
        let filter = FilterExpressionWrapper::new("FullyQualifiedName~Smoke&Category!=Slow");
        let test_case = |category: &'static str| {
            move |name: &str| match name {
                "FullyQualifiedName" => Some(PropertyValue::from("Tests.SmokeTests.Login")),
                "Category" => Some(PropertyValue::from(category)),
                _ => None,
            }
        };
        assert!(filter.evaluate(test_case("Fast")));
        assert!(!filter.evaluate(test_case("Slow")));
    }
}
