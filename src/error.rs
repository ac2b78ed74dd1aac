//! Error types for the test case filter engine

use thiserror::Error;

/// Raised when a backslash escape sequence in filter text is malformed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid escape sequence at position {position} in '{input}'")]
pub struct EscapeError {
    pub input: String,
    pub position: usize,
}

/// Main error type for the filter engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid condition '{0}'")]
    InvalidCondition(String),

    #[error("Invalid operator '{0}'")]
    InvalidOperator(String),

    #[error("Missing operand")]
    MissingOperand,

    #[error("Missing operator")]
    MissingOperator,

    #[error("Missing '('")]
    MissingOpenParenthesis,

    #[error("Missing ')'")]
    MissingCloseParenthesis,

    #[error("Empty parenthesis ( )")]
    EmptyParenthesis,

    #[error(transparent)]
    InvalidEscape(#[from] EscapeError),

    #[error("Invalid filter regex: {0}")]
    InvalidRegex(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl FilterError {
    /// Message shown to the user when a filter string is rejected
    pub fn to_parse_error(&self) -> String {
        format!(
            "Incorrect format for TestCaseFilter {}. Specify the correct format and try again. \
             Note that the incorrect format can lead to no test getting executed.",
            self
        )
    }
}

/// Result type alias for the filter engine
pub type Result<T> = std::result::Result<T, FilterError>;
