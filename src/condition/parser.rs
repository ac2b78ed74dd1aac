//! Condition string parser

use crate::condition::ast::{Condition, Operation, DEFAULT_PROPERTY_NAME};
use crate::condition::tokenizer::tokenize;
use crate::error::{FilterError, Result};
use crate::escape::unescape;

/// Parse one condition such as `Category=Smoke` or a bare `Smoke`
pub fn parse(condition: &str) -> Result<Condition> {
    let tokens = tokenize(condition);

    match tokens.as_slice() {
        [value] => {
            let value = value.trim();
            if value.is_empty() {
                return Err(invalid_condition(condition));
            }
            Ok(Condition::new(
                DEFAULT_PROPERTY_NAME,
                Operation::Contains,
                unescape(value)?,
            ))
        }
        [name, operator, value] => {
            if [name, operator, value].iter().any(|t| t.trim().is_empty()) {
                return Err(invalid_condition(condition));
            }
            let operation = parse_operation(operator)?;
            Ok(Condition::new(
                name.trim(),
                operation,
                unescape(value.trim())?,
            ))
        }
        _ => Err(invalid_condition(condition)),
    }
}

/// Map an operator token to its operation
pub fn parse_operation(operator: &str) -> Result<Operation> {
    match operator {
        "=" => Ok(Operation::Equal),
        "!=" => Ok(Operation::NotEqual),
        "~" => Ok(Operation::Contains),
        "!~" => Ok(Operation::NotContains),
        _ => Err(FilterError::InvalidOperator(operator.to_string())),
    }
}

fn invalid_condition(condition: &str) -> FilterError {
    FilterError::InvalidCondition(condition.to_string())
}
