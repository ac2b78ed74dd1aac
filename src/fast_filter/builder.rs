//! Compiles a [`FastFilter`] from the condition and operator stream of a parse

use ahash::AHashMap;

use crate::condition::{fold_case, Condition, Operation};
use crate::error::Result;
use crate::expression::Operator;
use crate::fast_filter::{FastFilter, FilterProperty};

/// Whether a fast filter can still be built from what has been seen so far
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuilderState {
    /// No condition yet
    Unseen,
    /// Every condition so far uses `operation`, every operator is `operator`
    /// (`Operator::None` until the first one)
    Valid {
        operation: Operation,
        operator: Operator,
    },
    /// Terminal
    Invalid,
}

impl BuilderState {
    fn valid(operation: Operation, operator: Operator) -> Self {
        match (operation, operator) {
            (Operation::Equal, Operator::Or | Operator::None)
            | (Operation::NotEqual, Operator::And | Operator::None) => {
                BuilderState::Valid {
                    operation,
                    operator,
                }
            }
            _ => BuilderState::Invalid,
        }
    }

    pub fn on_condition(self, operation: Operation) -> Self {
        match self {
            BuilderState::Unseen => Self::valid(operation, Operator::None),
            BuilderState::Valid {
                operation: accepted,
                ..
            } if accepted == operation => self,
            _ => BuilderState::Invalid,
        }
    }

    pub fn on_operator(self, operator: Operator) -> Self {
        if !matches!(operator, Operator::And | Operator::Or) {
            return self;
        }

        match self {
            BuilderState::Valid {
                operation,
                operator: Operator::None,
            } => Self::valid(operation, operator),
            BuilderState::Valid {
                operator: accepted, ..
            } if accepted == operator => self,
            _ => BuilderState::Invalid,
        }
    }
}

/// Accumulates property values while the parser runs
#[derive(Debug)]
pub struct FastFilterBuilder {
    state: BuilderState,
    properties: AHashMap<String, FilterProperty>,
}

impl Default for FastFilterBuilder {
    fn default() -> Self {
        Self {
            state: BuilderState::Unseen,
            properties: AHashMap::new(),
        }
    }
}

impl FastFilterBuilder {
    pub fn state(&self) -> BuilderState {
        self.state
    }

    pub fn add_condition(&mut self, condition: &Condition) {
        self.state = self.state.on_condition(condition.operation());
        if self.state == BuilderState::Invalid {
            return;
        }

        self.properties
            .entry(fold_case(condition.name()))
            .or_insert_with(|| FilterProperty::new(condition.name()))
            .add(condition.name(), condition.folded_value());
    }

    pub fn add_operator(&mut self, operator: Operator) {
        self.state = self.state.on_operator(operator);
    }

    /// `None` unless every condition and operator seen fits a fast filter
    pub fn build(self) -> Result<Option<FastFilter>> {
        match self.state {
            BuilderState::Valid {
                operation,
                operator,
            } => FastFilter::new(self.properties, operation, operator).map(Some),
            BuilderState::Unseen | BuilderState::Invalid => Ok(None),
        }
    }
}
