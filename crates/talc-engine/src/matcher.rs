//! The matcher: all the ways a pattern's variables can bind.
//!
//! A pattern node is matched against a *span* of sibling tree nodes:
//! almost always a span of one, except when a sequence variable absorbs a
//! variable-length run of children. Matching an operator's child lists is
//! a search over partitions of the concrete children into contiguous
//! spans, one per pattern child; the search runs over a DAG of states
//! keyed by `(pattern position, children consumed)` so shared suffixes of
//! the partition space are explored once instead of exponentially often.

use crate::filter::{is_sequence, is_wildcard, MatchFilter};
use crate::matching::Matching;
use talc_syntax::{Node, Payload};

/// Child indices from the tree root down to a matched node.
pub type NodePath = Vec<usize>;

/// Every consistent matching of `pattern` against the single node `tree`.
///
/// The pattern must have been preprocessed. Output order is
/// implementation-defined; callers needing determinism should treat the
/// result as a set.
pub fn match_all<'p, 't, P: Payload>(
    tree: &'t Node<P>,
    pattern: &'p Node<P>,
    filter: Option<&dyn MatchFilter<P>>,
) -> Vec<Matching<'p, 't, P>> {
    match_node(pattern, std::slice::from_ref(tree), Matching::new(), filter)
}

/// The first matching of `pattern` at the root of `tree`, if any.
pub fn get_matching<'p, 't, P: Payload>(
    tree: &'t Node<P>,
    pattern: &'p Node<P>,
    filter: Option<&dyn MatchFilter<P>>,
) -> Option<Matching<'p, 't, P>> {
    match_all(tree, pattern, filter).into_iter().next()
}

/// Pre-order search for the first node where `pattern` matches: the root
/// first, then each child's subtree left to right. Returns the path to
/// that node and the matching found there.
pub fn find_matching<'p, 't, P: Payload>(
    tree: &'t Node<P>,
    pattern: &'p Node<P>,
    filter: Option<&dyn MatchFilter<P>>,
) -> Option<(NodePath, Matching<'p, 't, P>)> {
    if let Some(matching) = get_matching(tree, pattern, filter) {
        return Some((Vec::new(), matching));
    }
    if let Node::Operator { children, .. } = tree {
        for (index, child) in children.iter().enumerate() {
            if let Some((mut path, matching)) = find_matching(child, pattern, filter) {
                path.insert(0, index);
                return Some((path, matching));
            }
        }
    }
    None
}

/// Element-wise structural equality of two spans, the consistency rule for
/// variables that are already bound.
fn spans_equal<P: Payload>(a: &[Node<P>], b: &[Node<P>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.tree_eq(y))
}

/// Match one pattern node against a span, extending `m`. Returns every
/// surviving extension.
fn match_node<'p, 't, P: Payload>(
    pattern: &'p Node<P>,
    span: &'t [Node<P>],
    m: Matching<'p, 't, P>,
    filter: Option<&dyn MatchFilter<P>>,
) -> Vec<Matching<'p, 't, P>> {
    match pattern {
        Node::Variable { name, match_id } => {
            if is_wildcard(name) {
                return vec![m];
            }
            if !is_sequence(name) && span.len() != 1 {
                return vec![];
            }
            let id = match_id
                .expect("pattern variable has no match id; preprocess the pattern before matching");
            match m.get(id) {
                Some(bound) => {
                    if spans_equal(bound.nodes, span) {
                        vec![m]
                    } else {
                        vec![]
                    }
                }
                None => {
                    if let Some(filter) = filter {
                        if !filter.admits(name, span) {
                            return vec![];
                        }
                    }
                    let mut extended = m;
                    extended.bind(id, name, span);
                    vec![extended]
                }
            }
        }
        Node::Constant { value } => match span {
            [Node::Constant { value: other }] if value.equals(other) => vec![m],
            _ => vec![],
        },
        Node::Operator { op, children } => match span {
            [Node::Operator { op: tree_op, children: tree_children }] if tree_op == op => {
                match_params(children, tree_children, m, filter)
            }
            _ => vec![],
        },
    }
}

/// Legal span lengths for the next pattern child given one partial
/// matching: 1 for anything that is not a sequence variable, the
/// previously-bound length for a bound sequence variable, the exact
/// remainder for a sequence variable in final position, otherwise any
/// length up to the remainder.
fn candidate_lengths<P>(
    pattern_child: &Node<P>,
    m: &Matching<'_, '_, P>,
    consumed: usize,
    total: usize,
    last: bool,
) -> Vec<usize> {
    let remaining = total - consumed;
    match pattern_child {
        Node::Variable { name, match_id } if is_sequence(name) => {
            if let Some(bound) = match_id.and_then(|id| m.get(id)) {
                let len = bound.nodes.len();
                if len <= remaining { vec![len] } else { vec![] }
            } else if last {
                vec![remaining]
            } else {
                (0..=remaining).collect()
            }
        }
        _ => {
            if remaining >= 1 { vec![1] } else { vec![] }
        }
    }
}

fn push_unique<'p, 't, P>(bucket: &mut Vec<Matching<'p, 't, P>>, m: Matching<'p, 't, P>) {
    if !bucket.iter().any(|seen| seen.same_bindings(&m)) {
        bucket.push(m);
    }
}

/// Partition `trees` into contiguous, order-preserving spans, one per
/// pattern child, collecting every partition under which all children
/// match consistently.
///
/// `states[i][c]` holds the partial matchings that cover `pats[..i]`
/// against `trees[..c]`. Layers are processed in pattern order, so every
/// state is computed exactly once no matter how many partitions reach it;
/// identical partial matchings arriving along different routes collapse
/// via `push_unique`. Work is bounded by the number of distinct states
/// times the matchings alive at each, not by the raw partition count.
fn match_params<'p, 't, P: Payload>(
    pats: &'p [Node<P>],
    trees: &'t [Node<P>],
    seed: Matching<'p, 't, P>,
    filter: Option<&dyn MatchFilter<P>>,
) -> Vec<Matching<'p, 't, P>> {
    let m = pats.len();
    let n = trees.len();

    let mut states: Vec<Vec<Vec<Matching<'p, 't, P>>>> = vec![vec![Vec::new(); n + 1]; m + 1];
    states[0][0].push(seed);

    for i in 0..m {
        let pattern_child = &pats[i];
        let last = i + 1 == m;
        for c in 0..=n {
            if states[i][c].is_empty() {
                continue;
            }
            let current = std::mem::take(&mut states[i][c]);
            for pm in current {
                for len in candidate_lengths(pattern_child, &pm, c, n, last) {
                    let span = &trees[c..c + len];
                    for extended in match_node(pattern_child, span, pm, filter) {
                        push_unique(&mut states[i + 1][c + len], extended);
                    }
                }
            }
        }
    }

    std::mem::take(&mut states[m][n])
}
