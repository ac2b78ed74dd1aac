//! Filter expression parser
//!
//! Operands and operators are kept on two stacks; an operator is applied as
//! soon as one of lower or equal precedence follows it, which gives AND
//! precedence over OR and left associativity. The same stream of conditions
//! and operators drives a [`FastFilterBuilder`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::condition;
use crate::error::{FilterError, Result};
use crate::expression::ast::{ExpressionNode, ExpressionTree, NodeId, Operator, TreeBuilder};
use crate::expression::tokenizer::{tokenize, Token};
use crate::fast_filter::{FastFilter, FastFilterBuilder};

/// `(` followed by nothing but whitespace and `)`
static EMPTY_PARENTHESIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(\s*\)").expect("empty parenthesis pattern is valid"));

/// Result of a successful parse
#[derive(Debug, Clone)]
pub struct ParsedExpression {
    pub tree: ExpressionTree,
    /// Present when the whole filter fits the flat fast-filter shape
    pub fast_filter: Option<FastFilter>,
}

/// Parse a filter string into an expression tree and, when possible, a fast filter
pub fn parse(filter: &str) -> Result<ParsedExpression> {
    if EMPTY_PARENTHESIS.is_match(filter) {
        return Err(FilterError::EmptyParenthesis);
    }

    let mut parser = Parser::default();
    for token in tokenize(filter) {
        parser.push(token)?;
    }
    parser.finish()
}

#[derive(Debug, Default)]
struct Parser {
    nodes: TreeBuilder,
    operands: Vec<NodeId>,
    operators: Vec<Operator>,
    fast_filter: FastFilterBuilder,
}

impl Parser {
    fn push(&mut self, token: Token) -> Result<()> {
        match token {
            Token::Condition(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Ok(());
                }
                let condition = condition::parse(text)?;
                self.fast_filter.add_condition(&condition);
                let id = self.nodes.push(ExpressionNode::Condition(condition));
                self.operands.push(id);
            }
            Token::And => self.push_operator(Operator::And)?,
            Token::Or => self.push_operator(Operator::Or)?,
            Token::OpenParen => {
                self.fast_filter.add_operator(Operator::OpenBrace);
                self.operators.push(Operator::OpenBrace);
            }
            Token::CloseParen => {
                self.fast_filter.add_operator(Operator::CloseBrace);
                loop {
                    match self.operators.pop() {
                        None => return Err(FilterError::MissingOpenParenthesis),
                        Some(Operator::OpenBrace) => break,
                        Some(operator) => self.apply(operator)?,
                    }
                }
            }
        }
        Ok(())
    }

    fn push_operator(&mut self, operator: Operator) -> Result<()> {
        self.fast_filter.add_operator(operator);

        while let Some(&top) = self.operators.last() {
            if top == Operator::OpenBrace || top.precedence() < operator.precedence() {
                break;
            }
            self.operators.pop();
            self.apply(top)?;
        }
        self.operators.push(operator);
        Ok(())
    }

    /// Pop two operands, combine them with `operator` and push the result
    fn apply(&mut self, operator: Operator) -> Result<()> {
        let combine: fn(NodeId, NodeId) -> ExpressionNode = match operator {
            Operator::And => ExpressionNode::And,
            Operator::Or => ExpressionNode::Or,
            Operator::OpenBrace => return Err(FilterError::MissingCloseParenthesis),
            Operator::None | Operator::CloseBrace => {
                return Err(FilterError::Internal(format!(
                    "operator {:?} on the operator stack",
                    operator
                )))
            }
        };

        let (Some(right), Some(left)) = (self.operands.pop(), self.operands.pop()) else {
            return Err(FilterError::MissingOperand);
        };
        let id = self.nodes.push(combine(left, right));
        self.operands.push(id);
        Ok(())
    }

    fn finish(mut self) -> Result<ParsedExpression> {
        while let Some(operator) = self.operators.pop() {
            self.apply(operator)?;
        }

        let root = match self.operands.as_slice() {
            [root] => *root,
            _ => return Err(FilterError::MissingOperator),
        };

        Ok(ParsedExpression {
            tree: self.nodes.finish(root),
            fast_filter: self.fast_filter.build()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Operation;

    fn condition_at(tree: &ExpressionTree, id: NodeId) -> String {
        match tree.node(id) {
            ExpressionNode::Condition(c) => c.to_string(),
            other => panic!("Expected condition, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_single_condition() {
        let parsed = parse("FullyQualifiedName=Test1").unwrap();
        match parsed.tree.root() {
            ExpressionNode::Condition(c) => {
                assert_eq!(c.name(), "FullyQualifiedName");
                assert_eq!(c.operation(), Operation::Equal);
                assert_eq!(c.value(), "Test1");
            }
            _ => panic!("Expected single condition"),
        }
        let fast = parsed.fast_filter.expect("fast filter");
        assert!(!fast.is_filtered_out_when_matched());
    }

    #[test]
    fn test_parse_operator_precedence() {
        // A | B & C parses as A | (B & C)
        let parsed = parse("A=1|B=2&C=3").unwrap();
        let tree = &parsed.tree;
        match tree.root() {
            ExpressionNode::Or(left, right) => {
                assert_eq!(condition_at(tree, *left), "A=1");
                match tree.node(*right) {
                    ExpressionNode::And(l, r) => {
                        assert_eq!(condition_at(tree, *l), "B=2");
                        assert_eq!(condition_at(tree, *r), "C=3");
                    }
                    _ => panic!("Expected AND on right side of OR"),
                }
            }
            _ => panic!("Expected OR condition"),
        }
    }

    #[test]
    fn test_parse_left_associative() {
        let parsed = parse("A=1|B=2|C=3").unwrap();
        let tree = &parsed.tree;
        match tree.root() {
            ExpressionNode::Or(left, right) => {
                assert!(matches!(tree.node(*left), ExpressionNode::Or(_, _)));
                assert_eq!(condition_at(tree, *right), "C=3");
            }
            _ => panic!("Expected OR condition"),
        }
    }

    #[test]
    fn test_parse_parentheses_override_precedence() {
        let parsed = parse("(A=1|B=2)&C=3").unwrap();
        let tree = &parsed.tree;
        match tree.root() {
            ExpressionNode::And(left, _) => {
                assert!(matches!(tree.node(*left), ExpressionNode::Or(_, _)));
            }
            _ => panic!("Expected AND condition"),
        }
        assert_eq!(tree.condition_count(), 3);
    }

    #[test]
    fn test_parse_whitespace_around_tokens() {
        let parsed = parse(" ( A = 1 ) | ( B != 2 & Smoke ) ").unwrap();
        assert_eq!(parsed.tree.condition_count(), 3);
        assert!(parsed.fast_filter.is_none());
    }

    #[test]
    fn test_parse_operator_only_clause() {
        let parsed = parse("A=1|=").unwrap();
        let conditions: Vec<_> = parsed.tree.conditions().collect();
        assert_eq!(conditions.len(), 2);
        assert_eq!(conditions[1].name(), condition::DEFAULT_PROPERTY_NAME);
        assert_eq!(conditions[1].operation(), Operation::Contains);
        assert_eq!(conditions[1].value(), "=");
        // Contains never takes the fast path
        assert!(parsed.fast_filter.is_none());
    }

    #[test]
    fn test_fast_filter_shapes() {
        assert!(parse("A=1&B=2").unwrap().fast_filter.is_none());
        assert!(parse("A=1|B=2").unwrap().fast_filter.is_some());
        assert!(parse("A!=1&B!=2").unwrap().fast_filter.is_some());
        assert!(parse("A!=1|B!=2").unwrap().fast_filter.is_none());
        assert!(parse("A=1|B~2").unwrap().fast_filter.is_none());
        assert!(parse("(A=1|(B=2))|C=3").unwrap().fast_filter.is_some());
        assert!(parse("A!=1").unwrap().fast_filter.is_some());
        assert!(parse("Smoke").unwrap().fast_filter.is_none());
    }

    #[test]
    fn test_parse_errors() {
        let cases = [
            ("()", FilterError::EmptyParenthesis),
            ("A=1|( )", FilterError::EmptyParenthesis),
            ("(a", FilterError::MissingCloseParenthesis),
            ("((A=1)", FilterError::MissingCloseParenthesis),
            ("a)", FilterError::MissingOpenParenthesis),
            ("A=1|", FilterError::MissingOperand),
            ("&A=1", FilterError::MissingOperand),
            ("A=1||B=2", FilterError::MissingOperand),
            ("(A=1)(B=2)", FilterError::MissingOperator),
            ("", FilterError::MissingOperator),
            ("   ", FilterError::MissingOperator),
            ("A!B", FilterError::InvalidOperator("!".to_string())),
            ("A==1", FilterError::InvalidCondition("A==1".to_string())),
        ];

        for (filter, expected) in cases {
            assert_eq!(parse(filter).unwrap_err(), expected, "Filter: {:?}", filter);
        }
    }

    #[test]
    fn test_parse_escape_error() {
        assert!(matches!(
            parse(r"A=1|B=x\y"),
            Err(FilterError::InvalidEscape(_))
        ));
    }

    #[test]
    fn test_parse_escaped_delimiters_in_value() {
        let parsed = parse(r"FullyQualifiedName=Ns.Method\(a\&b\|c\)").unwrap();
        match parsed.tree.root() {
            ExpressionNode::Condition(c) => assert_eq!(c.value(), "Ns.Method(a&b|c)"),
            _ => panic!("Expected single condition"),
        }
    }
}
