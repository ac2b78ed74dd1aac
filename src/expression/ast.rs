//! Expression tree for filter expressions
//!
//! Nodes live in one arena and refer to their children by index, so a
//! filter with hundreds of thousands of clauses is built, traversed and
//! dropped without recursion.

use crate::condition::Condition;

/// Index of a node inside its [`ExpressionTree`]
pub type NodeId = usize;

/// Operators seen while parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    None,
    /// OR (|)
    Or,
    /// AND (&)
    And,
    /// Open parenthesis, only on the parser's stack
    OpenBrace,
    /// Close parenthesis, only on the parser's stack
    CloseBrace,
}

impl Operator {
    /// Binding strength; AND binds tighter than OR
    pub fn precedence(self) -> u8 {
        match self {
            Operator::And => 2,
            Operator::Or => 1,
            _ => 0,
        }
    }
}

/// AST node for filter expressions
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    /// Single condition like "Category=Smoke"
    Condition(Condition),
    /// AND operation
    And(NodeId, NodeId),
    /// OR operation
    Or(NodeId, NodeId),
}

/// Immutable, strictly binary expression tree
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTree {
    nodes: Vec<ExpressionNode>,
    root: NodeId,
}

impl ExpressionTree {
    pub(crate) fn new(nodes: Vec<ExpressionNode>, root: NodeId) -> Self {
        debug_assert!(root < nodes.len());
        Self { nodes, root }
    }

    pub fn root_id(&self) -> NodeId {
        self.root
    }

    pub fn root(&self) -> &ExpressionNode {
        &self.nodes[self.root]
    }

    pub fn node(&self, id: NodeId) -> &ExpressionNode {
        &self.nodes[id]
    }

    /// All conditions of the tree, in the order they were written
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.nodes.iter().filter_map(|node| match node {
            ExpressionNode::Condition(condition) => Some(condition),
            _ => None,
        })
    }

    pub fn condition_count(&self) -> usize {
        self.conditions().count()
    }
}

/// Collects nodes while the parser combines operands
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    nodes: Vec<ExpressionNode>,
}

impl TreeBuilder {
    pub fn push(&mut self, node: ExpressionNode) -> NodeId {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn finish(self, root: NodeId) -> ExpressionTree {
        ExpressionTree::new(self.nodes, root)
    }
}
