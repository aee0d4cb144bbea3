//! The operator table of a parsing context.

use crate::operator::{Arity, Assoc, Operator, Placement};

/// Identity of an operator within its grammar.
///
/// Two operator nodes refer to the same operator iff their `OpId`s are
/// equal; trees and patterns must be built against the same grammar for
/// matching to be meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OpId(u32);

impl OpId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A grammar: the operator table plus the optional glue operator used to
/// parse juxtaposed atoms (`2x`). There is no process-wide grammar; every
/// parser, matcher, and rule constructor takes one by reference.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    ops: Vec<Operator>,
    glue: Option<OpId>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install an operator and return its identity.
    pub fn define(&mut self, op: Operator) -> OpId {
        let id = OpId(self.ops.len() as u32);
        self.ops.push(op);
        id
    }

    pub fn op(&self, id: OpId) -> &Operator {
        &self.ops[id.index()]
    }

    /// Designate `id` as the glue operator. When unset, juxtaposition is a
    /// syntax error.
    pub fn set_glue(&mut self, id: OpId) {
        self.glue = Some(id);
    }

    pub fn glue(&self) -> Option<OpId> {
        self.glue
    }

    pub fn iter(&self) -> impl Iterator<Item = (OpId, &Operator)> {
        self.ops
            .iter()
            .enumerate()
            .map(|(i, op)| (OpId(i as u32), op))
    }

    fn find(&self, name: &str, placement: Placement) -> Option<OpId> {
        self.iter()
            .find(|(_, op)| op.placement() == placement && op.name() == name)
            .map(|(id, _)| id)
    }

    pub fn prefix_op(&self, name: &str) -> Option<OpId> {
        self.find(name, Placement::Prefix)
    }

    pub fn infix_op(&self, name: &str) -> Option<OpId> {
        self.find(name, Placement::Infix)
    }

    pub fn postfix_op(&self, name: &str) -> Option<OpId> {
        self.find(name, Placement::Postfix)
    }

    pub fn function_op(&self, name: &str) -> Option<OpId> {
        self.find(name, Placement::Function)
    }

    /// The stock algebra grammar used by the CLI and the built-in
    /// rulesets.
    pub fn algebra() -> Grammar {
        let mut g = Grammar::new();

        g.define(Operator::infix("+", 10, Assoc::Both));
        g.define(Operator::infix("-", 10, Assoc::Left));
        let mul = g.define(Operator::infix("*", 20, Assoc::Both));
        g.define(Operator::infix("/", 20, Assoc::Left));
        g.define(Operator::infix("^", 40, Assoc::Right));

        g.define(Operator::prefix("+", 15));
        g.define(Operator::prefix("-", 15));
        g.define(Operator::postfix("%%", 50));

        g.define(Operator::function("sum", Arity::Variadic));
        g.define(Operator::function("prod", Arity::Variadic));
        g.define(Operator::function("pow", Arity::Fixed(2)));
        g.define(Operator::function("neg", Arity::Fixed(1)));
        g.define(Operator::function("diff", Arity::Fixed(2)));
        g.define(Operator::function("sin", Arity::Fixed(1)));
        g.define(Operator::function("cos", Arity::Fixed(1)));
        g.define(Operator::function("tan", Arity::Fixed(1)));
        g.define(Operator::function("exp", Arity::Fixed(1)));
        g.define(Operator::function("ln", Arity::Fixed(1)));
        g.define(Operator::function("sqrt", Arity::Fixed(1)));
        g.define(Operator::constant("pi"));
        g.define(Operator::constant("e"));

        g.set_glue(mul);
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_distinguishes_placement() {
        let g = Grammar::algebra();
        let prefix_minus = g.prefix_op("-").unwrap();
        let infix_minus = g.infix_op("-").unwrap();
        assert_ne!(prefix_minus, infix_minus);
        assert_eq!(g.op(prefix_minus).placement(), Placement::Prefix);
        assert_eq!(g.op(infix_minus).placement(), Placement::Infix);
    }

    #[test]
    fn algebra_glue_is_multiplication() {
        let g = Grammar::algebra();
        assert_eq!(g.glue(), g.infix_op("*"));
    }

    #[test]
    fn unknown_names_resolve_to_none() {
        let g = Grammar::algebra();
        assert_eq!(g.function_op("gamma"), None);
        assert_eq!(g.postfix_op("!"), None);
    }
}
