//! Precedence-aware expression rendering.

use std::fmt;

use crate::grammar::Grammar;
use crate::node::Node;
use crate::operator::{Arity, Assoc, Placement};
use crate::payload::Payload;

/// Displays a node with the minimum parentheses needed to reparse to the
/// same tree under the same grammar.
pub struct Rendered<'a, P> {
    node: &'a Node<P>,
    grammar: &'a Grammar,
}

impl<'a, P> Rendered<'a, P> {
    pub(crate) fn new(node: &'a Node<P>, grammar: &'a Grammar) -> Self {
        Self { node, grammar }
    }
}

impl<P: Payload> fmt::Display for Rendered<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.node, self.grammar)
    }
}

/// Leaves bind tighter than any operator.
fn precedence_of<P>(node: &Node<P>, grammar: &Grammar) -> u32 {
    match node {
        Node::Operator { op, .. } => grammar.op(*op).precedence(),
        _ => u32::MAX,
    }
}

fn write_child<P: Payload>(
    f: &mut fmt::Formatter<'_>,
    child: &Node<P>,
    grammar: &Grammar,
    parens: bool,
) -> fmt::Result {
    if parens {
        write!(f, "(")?;
        write_node(f, child, grammar)?;
        write!(f, ")")
    } else {
        write_node(f, child, grammar)
    }
}

fn write_node<P: Payload>(f: &mut fmt::Formatter<'_>, node: &Node<P>, g: &Grammar) -> fmt::Result {
    match node {
        Node::Constant { value } => write!(f, "{}", value.format()),
        Node::Variable { name, .. } => write!(f, "{name}"),
        Node::Operator { op, children } => {
            let opr = g.op(*op);
            match opr.placement() {
                Placement::Function => {
                    write!(f, "{}", opr.name())?;
                    if opr.arity() != Arity::Fixed(0) {
                        write!(f, "(")?;
                        for (i, child) in children.iter().enumerate() {
                            if i > 0 {
                                write!(f, ", ")?;
                            }
                            write_node(f, child, g)?;
                        }
                        write!(f, ")")?;
                    }
                    Ok(())
                }
                Placement::Prefix => {
                    write!(f, "{}", opr.name())?;
                    let child = &children[0];
                    write_child(f, child, g, precedence_of(child, g) < opr.precedence())
                }
                Placement::Postfix => {
                    let child = &children[0];
                    write_child(f, child, g, precedence_of(child, g) < opr.precedence())?;
                    write!(f, "{}", opr.name())
                }
                Placement::Infix => {
                    let prec = opr.precedence();
                    let (lhs, rhs) = (&children[0], &children[1]);
                    let lp = precedence_of(lhs, g);
                    let rp = precedence_of(rhs, g);
                    let lhs_parens = lp < prec || (lp == prec && opr.assoc() == Assoc::Right);
                    let rhs_parens = rp < prec || (rp == prec && opr.assoc() != Assoc::Right);
                    write_child(f, lhs, g, lhs_parens)?;
                    write!(f, " {} ", opr.name())?;
                    write_child(f, rhs, g, rhs_parens)
                }
            }
        }
    }
}
