//! Pattern preprocessing: match-id assignment.

use thiserror::Error;

use crate::filter::is_wildcard;
use crate::matching::MAX_MATCHING_VARS;
use talc_syntax::Node;

/// Configuration defects found while preparing a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern uses {count} distinct variables, at most {} are supported", MAX_MATCHING_VARS)]
    TooManyVariables { count: usize },
}

/// The dense variable numbering of one preprocessed pattern: index is the
/// `match_id`, in first-occurrence order.
#[derive(Debug, Clone, Default)]
pub struct PatternVars {
    names: Vec<String>,
}

impl PatternVars {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, id: usize) -> &str {
        &self.names[id]
    }

    /// Stamp this numbering onto a rule's template so substitution can use
    /// the same O(1) indexing. Template variables that never occur in the
    /// pattern keep an unset id and survive substitution verbatim.
    pub fn annotate<P>(&self, template: &mut Node<P>) {
        match template {
            Node::Variable { name, match_id } => {
                *match_id = self.names.iter().position(|n| n == name);
            }
            Node::Operator { children, .. } => {
                for child in children {
                    self.annotate(child);
                }
            }
            Node::Constant { .. } => {}
        }
    }
}

/// Assign a dense `match_id` to every distinct non-wildcard variable in
/// the pattern. Matching uses the ids for array indexing instead of name
/// comparison.
pub fn preprocess<P>(pattern: &mut Node<P>) -> Result<PatternVars, PatternError> {
    let mut vars = PatternVars::default();
    assign(pattern, &mut vars)?;
    Ok(vars)
}

fn assign<P>(node: &mut Node<P>, vars: &mut PatternVars) -> Result<(), PatternError> {
    match node {
        Node::Variable { name, match_id } => {
            if is_wildcard(name) {
                return Ok(());
            }
            let id = match vars.names.iter().position(|n| n == name) {
                Some(id) => id,
                None => {
                    vars.names.push(name.clone());
                    vars.names.len() - 1
                }
            };
            if id >= MAX_MATCHING_VARS {
                return Err(PatternError::TooManyVariables {
                    count: vars.names.len(),
                });
            }
            *match_id = Some(id);
        }
        Node::Operator { children, .. } => {
            for child in children {
                assign(child, vars)?;
            }
        }
        Node::Constant { .. } => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use talc_syntax::{Arity, Grammar, Operator};

    fn variadic_call(names: &[&str]) -> Node<f64> {
        let mut g = Grammar::new();
        let f = g.define(Operator::function("f", Arity::Variadic));
        Node::operator(f, names.iter().map(|n| Node::variable(*n)).collect())
    }

    #[test]
    fn ids_follow_first_occurrence_and_repeat() {
        let mut pattern = variadic_call(&["x", "y", "x", "[zs"]);
        let vars = preprocess(&mut pattern).unwrap();
        assert_eq!(vars.len(), 3);
        assert_eq!(vars.name(0), "x");
        assert_eq!(vars.name(1), "y");
        assert_eq!(vars.name(2), "[zs");

        let ids: Vec<_> = pattern
            .children()
            .iter()
            .map(|c| match c {
                Node::Variable { match_id, .. } => *match_id,
                _ => None,
            })
            .collect();
        assert_eq!(ids, vec![Some(0), Some(1), Some(0), Some(2)]);
    }

    #[test]
    fn wildcards_are_not_numbered() {
        let mut pattern = variadic_call(&["_", "[_", "x"]);
        let vars = preprocess(&mut pattern).unwrap();
        assert_eq!(vars.len(), 1);
        assert!(matches!(
            pattern.children()[0],
            Node::Variable { match_id: None, .. }
        ));
    }

    #[test]
    fn capacity_overflow_is_a_defect() {
        let names: Vec<String> = (0..MAX_MATCHING_VARS + 1).map(|i| format!("x{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut pattern = variadic_call(&refs);
        let err = preprocess(&mut pattern).unwrap_err();
        assert_eq!(
            err,
            PatternError::TooManyVariables {
                count: MAX_MATCHING_VARS + 1
            }
        );
    }
}
