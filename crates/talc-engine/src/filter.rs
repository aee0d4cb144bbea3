//! Pattern filters and variable-name classification.
//!
//! A variable's name encodes how it matches: a leading `[` makes it a
//! sequence variable, a leading `_` (after the `[`, if any) makes it a
//! wildcard, and the first character of the remaining name may impose a
//! binding constraint checked by [`PrefixFilter`].

use talc_syntax::{Node, Payload};

/// Sequence variables may bind a span of zero or more sibling nodes.
pub fn is_sequence(name: &str) -> bool {
    name.starts_with('[')
}

/// The name without its sequence marker.
pub fn base_name(name: &str) -> &str {
    name.strip_prefix('[').unwrap_or(name)
}

/// Wildcards match anything and are never bound or checked.
pub fn is_wildcard(name: &str) -> bool {
    base_name(name).starts_with('_')
}

/// Decides whether a variable may bind the given span of nodes.
///
/// Consulted exactly once per variable, at the moment a previously-unbound
/// variable is about to bind. Returning `false` aborts that binding
/// attempt and the matcher backtracks; it is not an error.
pub trait MatchFilter<P> {
    fn admits(&self, name: &str, nodes: &[Node<P>]) -> bool;
}

/// The stock filter: single-character semantic prefixes on variable names.
///
/// | prefix    | constraint on the bound span                      |
/// |-----------|---------------------------------------------------|
/// | (none)    | none                                              |
/// | `c`       | one node, a constant                              |
/// | `b`       | one node, a constant or variable                  |
/// | `o`       | one node, an operator                             |
/// | `d`       | one node, an operator or variable                 |
/// | `l<name>` | one node, a variable literally named `<name>`     |
pub struct PrefixFilter;

impl<P: Payload> MatchFilter<P> for PrefixFilter {
    fn admits(&self, name: &str, nodes: &[Node<P>]) -> bool {
        let base = base_name(name);
        let mut chars = base.chars();
        let Some(prefix) = chars.next() else {
            return true;
        };
        match prefix {
            'c' => nodes.len() == 1 && nodes[0].is_constant(),
            'b' => nodes.len() == 1 && !nodes[0].is_operator(),
            'o' => nodes.len() == 1 && nodes[0].is_operator(),
            'd' => nodes.len() == 1 && !nodes[0].is_constant(),
            'l' => {
                nodes.len() == 1
                    && matches!(&nodes[0], Node::Variable { name, .. } if name == chars.as_str())
            }
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_classification() {
        assert!(is_sequence("[xs"));
        assert!(!is_sequence("xs"));
        assert!(is_wildcard("_"));
        assert!(is_wildcard("[_"));
        assert!(is_wildcard("_tail"));
        assert!(!is_wildcard("xs"));
        assert_eq!(base_name("[xs"), "xs");
        assert_eq!(base_name("xs"), "xs");
    }

    #[test]
    fn constraint_prefixes_admit_by_node_kind() {
        let constant: Node<f64> = Node::constant(5.0);
        let variable: Node<f64> = Node::variable("foo");

        let one = |n: &Node<f64>| vec![n.clone()];
        let f = PrefixFilter;

        assert!(f.admits("cx", &one(&constant)));
        assert!(!f.admits("cx", &one(&variable)));
        assert!(f.admits("bx", &one(&constant)));
        assert!(f.admits("bx", &one(&variable)));
        assert!(!f.admits("ox", &one(&constant)));
        assert!(f.admits("dx", &one(&variable)));
        assert!(!f.admits("dx", &one(&constant)));
        assert!(f.admits("lfoo", &one(&variable)));
        assert!(!f.admits("lzed", &one(&variable)));
        // unconstrained names admit anything, including empty spans
        assert!(f.admits("x", &one(&constant)));
        assert!(f.admits("[xs", &[] as &[Node<f64>]));
        // constrained names require exactly one node
        assert!(!f.admits("cx", &[] as &[Node<f64>]));
        assert!(!f.admits("cx", &[constant.clone(), constant.clone()]));
    }
}
