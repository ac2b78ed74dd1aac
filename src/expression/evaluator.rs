//! Expression tree evaluator
//!
//! Traversals use an explicit work stack, so tree depth is bounded by heap
//! memory rather than the thread's call stack.

use crate::condition::{Condition, PropertyTypeProvider, PropertyValue, SupportedProperties};
use crate::expression::ast::{ExpressionNode, ExpressionTree, NodeId};

impl ExpressionTree {
    /// Post-order fold: `leaf` maps every condition, `combine` merges the
    /// results of a binary node's left and right subtrees.
    ///
    /// Both subtrees are always computed before `combine` runs.
    pub fn fold<T, L, C>(&self, mut leaf: L, mut combine: C) -> T
    where
        L: FnMut(&Condition) -> T,
        C: FnMut(&ExpressionNode, T, T) -> T,
    {
        // (node, children already scheduled)
        let mut work: Vec<(NodeId, bool)> = vec![(self.root_id(), false)];
        let mut results: Vec<T> = Vec::new();

        while let Some((id, expanded)) = work.pop() {
            let node = self.node(id);
            match node {
                ExpressionNode::Condition(condition) => results.push(leaf(condition)),
                ExpressionNode::And(left, right) | ExpressionNode::Or(left, right) => {
                    if expanded {
                        let (Some(right), Some(left)) = (results.pop(), results.pop()) else {
                            unreachable!("binary node combined before its operands");
                        };
                        results.push(combine(node, left, right));
                    } else {
                        work.push((id, true));
                        work.push((*right, false));
                        work.push((*left, false));
                    }
                }
            }
        }

        match results.pop() {
            Some(result) if results.is_empty() => result,
            _ => unreachable!("fold must leave exactly one result"),
        }
    }

    /// Evaluate the whole expression for one test case
    pub fn evaluate<'v, F>(&self, provider: F) -> bool
    where
        F: Fn(&str) -> Option<PropertyValue<'v>>,
    {
        self.fold(
            |condition| condition.evaluate(&provider),
            |node, left, right| match node {
                ExpressionNode::And(..) => left && right,
                _ => left || right,
            },
        )
    }

    /// Names of properties the caller can't supply, or `None` when every
    /// condition is valid. Duplicates are kept.
    pub fn valid_for_properties(
        &self,
        supported: &SupportedProperties,
        type_provider: Option<PropertyTypeProvider<'_>>,
    ) -> Option<Vec<String>> {
        self.fold(
            |condition| {
                if condition.valid_for_properties(supported, type_provider) {
                    None
                } else {
                    Some(vec![condition.name().to_string()])
                }
            },
            |_, left, right| match (left, right) {
                (Some(mut left), Some(right)) => {
                    left.extend(right);
                    Some(left)
                }
                (left, right) => left.or(right),
            },
        )
    }
}
