//! The expression tree.

use crate::grammar::{Grammar, OpId};
use crate::payload::Payload;
use crate::render::Rendered;

/// One node of an expression tree.
///
/// Children are exclusively owned by their parent: no sharing, no cycles.
/// Replacing a subtree drops the displaced subtree when the parent slot is
/// overwritten.
#[derive(Debug, Clone)]
pub enum Node<P> {
    Operator { op: OpId, children: Vec<Node<P>> },
    Constant { value: P },
    Variable { name: String, match_id: Option<usize> },
}

impl<P> Node<P> {
    pub fn operator(op: OpId, children: Vec<Node<P>>) -> Self {
        Node::Operator { op, children }
    }

    pub fn constant(value: P) -> Self {
        Node::Constant { value }
    }

    /// A variable leaf. `match_id` starts unset; pattern preprocessing
    /// assigns it.
    pub fn variable(name: impl Into<String>) -> Self {
        Node::Variable {
            name: name.into(),
            match_id: None,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Node::Operator { .. })
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Node::Constant { .. })
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Node::Variable { .. })
    }

    /// Children of an operator node, or the empty slice for leaves.
    pub fn children(&self) -> &[Node<P>] {
        match self {
            Node::Operator { children, .. } => children,
            _ => &[],
        }
    }

    /// The node reached by following `path` (child indices from this
    /// node). Panics if the path leads through a leaf or out of range;
    /// paths come from `find_matching` over the same tree.
    pub fn node_at(&self, path: &[usize]) -> &Node<P> {
        let mut cur = self;
        for &idx in path {
            match cur {
                Node::Operator { children, .. } => cur = &children[idx],
                _ => panic!("path descends through a leaf node"),
            }
        }
        cur
    }

    /// Mutable variant of [`node_at`](Self::node_at); assigning through it
    /// replaces the subtree in place, dropping the old one.
    pub fn node_at_mut(&mut self, path: &[usize]) -> &mut Node<P> {
        let mut cur = self;
        for &idx in path {
            match cur {
                Node::Operator { children, .. } => cur = &mut children[idx],
                _ => panic!("path descends through a leaf node"),
            }
        }
        cur
    }
}

impl<P: Payload> Node<P> {
    /// Structural tree equality: identical operator identity and child
    /// lists, payload equality on constants, name equality on variables.
    /// `match_id` is a matching artifact and does not participate.
    pub fn tree_eq(&self, other: &Node<P>) -> bool {
        match (self, other) {
            (
                Node::Operator { op: a, children: ca },
                Node::Operator { op: b, children: cb },
            ) => a == b && ca.len() == cb.len() && ca.iter().zip(cb).all(|(x, y)| x.tree_eq(y)),
            (Node::Constant { value: a }, Node::Constant { value: b }) => a.equals(b),
            (Node::Variable { name: a, .. }, Node::Variable { name: b, .. }) => a == b,
            _ => false,
        }
    }

    /// Display wrapper; rendering needs the grammar for operator names and
    /// precedence.
    pub fn render<'a>(&'a self, grammar: &'a Grammar) -> Rendered<'a, P> {
        Rendered::new(self, grammar)
    }
}
