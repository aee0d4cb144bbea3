//! Numeric evaluation of Talc expression trees.
//!
//! Evaluation is a consumer of finished trees, not part of the rewriting
//! core: operators resolve by name, variables through an environment of
//! bindings.

use std::collections::HashMap;

use talc_syntax::{Grammar, Node};
use thiserror::Error;

/// Evaluation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unbound variable `{0}`")]
    UnboundVariable(String),

    #[error("operator `{0}` has no numeric interpretation")]
    Unsupported(String),

    #[error("division by zero")]
    DivisionByZero,
}

/// Evaluates `f64` trees against a grammar.
pub struct Evaluator<'g> {
    grammar: &'g Grammar,
    vars: HashMap<String, f64>,
}

impl<'g> Evaluator<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self {
            grammar,
            vars: HashMap::new(),
        }
    }

    /// Assign a value to a variable name for subsequent evaluations.
    pub fn bind(&mut self, name: impl Into<String>, value: f64) {
        self.vars.insert(name.into(), value);
    }

    pub fn eval(&self, node: &Node<f64>) -> Result<f64, EvalError> {
        match node {
            Node::Constant { value } => Ok(*value),
            Node::Variable { name, .. } => self
                .vars
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::UnboundVariable(name.clone())),
            Node::Operator { op, children } => {
                let args = children
                    .iter()
                    .map(|child| self.eval(child))
                    .collect::<Result<Vec<f64>, EvalError>>()?;
                self.apply(self.grammar.op(*op).name(), &args)
            }
        }
    }

    fn apply(&self, name: &str, args: &[f64]) -> Result<f64, EvalError> {
        let value = match (name, args) {
            ("+", [a, b]) => a + b,
            ("+", [a]) => *a,
            ("-", [a, b]) => a - b,
            ("-", [a]) => -a,
            ("*", [a, b]) => a * b,
            ("/", [a, b]) => {
                if *b == 0.0 {
                    return Err(EvalError::DivisionByZero);
                }
                a / b
            }
            ("^", [a, b]) | ("pow", [a, b]) => a.powf(*b),
            ("%%", [a]) => a / 100.0,
            ("neg", [a]) => -a,
            ("sum", _) => args.iter().sum(),
            ("prod", _) => args.iter().product(),
            ("sin", [a]) => a.sin(),
            ("cos", [a]) => a.cos(),
            ("tan", [a]) => a.tan(),
            ("exp", [a]) => a.exp(),
            ("ln", [a]) => a.ln(),
            ("sqrt", [a]) => a.sqrt(),
            ("pi", []) => std::f64::consts::PI,
            ("e", []) => std::f64::consts::E,
            _ => return Err(EvalError::Unsupported(name.to_string())),
        };
        Ok(value)
    }
}

/// Replace every operator subtree whose children are all numeric with its
/// value. Zero-child operators are symbolic constants like `pi` and stay
/// symbolic; subtrees the evaluator cannot interpret stay untouched.
pub fn fold_constants(tree: &mut Node<f64>, grammar: &Grammar) {
    let evaluator = Evaluator::new(grammar);
    fold(tree, &evaluator);
}

fn fold(node: &mut Node<f64>, evaluator: &Evaluator<'_>) {
    let foldable = match node {
        Node::Operator { children, .. } => {
            for child in children.iter_mut() {
                fold(child, evaluator);
            }
            !children.is_empty() && children.iter().all(|c| c.is_constant())
        }
        _ => false,
    };
    if foldable {
        if let Ok(value) = evaluator.eval(node) {
            *node = Node::constant(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use talc_parser::parse;

    fn eval_str(text: &str) -> Result<f64, EvalError> {
        let grammar = Grammar::algebra();
        let tree = parse(text, &grammar).unwrap();
        Evaluator::new(&grammar).eval(&tree)
    }

    #[test]
    fn arithmetic_follows_the_grammar() {
        assert_eq!(eval_str("2 + 3 * 4"), Ok(14.0));
        assert_eq!(eval_str("2 ^ 3 ^ 2"), Ok(512.0));
        assert_eq!(eval_str("--5"), Ok(5.0));
        assert_eq!(eval_str("50%%"), Ok(0.5));
        assert_eq!(eval_str("prod(2, 3, 4)"), Ok(24.0));
        assert_eq!(eval_str("sum()"), Ok(0.0));
    }

    #[test]
    fn variables_resolve_through_bindings() {
        let grammar = Grammar::algebra();
        let tree = parse("2x + 1", &grammar).unwrap();
        let mut evaluator = Evaluator::new(&grammar);
        assert_eq!(
            evaluator.eval(&tree),
            Err(EvalError::UnboundVariable("x".into()))
        );
        evaluator.bind("x", 4.0);
        assert_eq!(evaluator.eval(&tree), Ok(9.0));
    }

    #[test]
    fn division_by_zero_is_reported() {
        assert_eq!(eval_str("1 / (2 - 2)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn symbolic_operators_are_unsupported() {
        let grammar = Grammar::algebra();
        let tree = parse("diff(x, x)", &grammar).unwrap();
        assert_eq!(
            Evaluator::new(&grammar).eval(&tree),
            Err(EvalError::Unsupported("diff".into()))
        );
    }

    #[test]
    fn folding_collapses_numeric_subtrees_only() {
        let grammar = Grammar::algebra();
        let mut tree = parse("sum(2, neg(1)) + x * (3 + 4)", &grammar).unwrap();
        fold_constants(&mut tree, &grammar);
        let expected = parse("1 + x * 7", &grammar).unwrap();
        assert!(tree.tree_eq(&expected));
    }

    #[test]
    fn folding_keeps_symbolic_constants() {
        let grammar = Grammar::algebra();
        let mut tree = parse("pi", &grammar).unwrap();
        fold_constants(&mut tree, &grammar);
        assert!(tree.is_operator());
    }
}
