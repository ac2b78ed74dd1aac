//! Condition parsing and evaluation module
//!
//! This module handles single conditions like `Category!=Slow` and
//! evaluates them against the property values of one test case.

mod ast;
mod evaluator;
pub mod parser;
pub mod tokenizer;


pub use ast::*;
pub(crate) use ast::fold_case;
pub use parser::{parse, parse_operation};
