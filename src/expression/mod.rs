//! Filter expression parsing and evaluation module
//!
//! This module handles full filter strings like
//! `FullyQualifiedName~Smoke&(Category=Fast|Priority=1)`.

mod ast;
mod evaluator;
pub mod parser;
pub mod tokenizer;


pub use ast::{ExpressionNode, ExpressionTree, NodeId, Operator};
pub use parser::{parse, ParsedExpression};
