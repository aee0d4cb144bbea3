//! Variable bindings produced by matching.

use std::fmt;

use talc_syntax::Node;

/// Fixed capacity for distinct bindable variables per pattern.
pub const MAX_MATCHING_VARS: usize = 16;

/// One variable's binding: a non-owning view of the span of sibling tree
/// nodes it bound. Ordinary variables always bind exactly one node;
/// sequence variables bind zero or more.
pub struct Binding<'p, 't, P> {
    pub name: &'p str,
    pub nodes: &'t [Node<P>],
}

impl<P> Copy for Binding<'_, '_, P> {}

impl<P> Clone for Binding<'_, '_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

/// A consistent assignment of tree spans to a pattern's variables,
/// indexed by the `match_id`s that preprocessing assigned.
///
/// Matchings alias the matched tree: they are transient, and the borrow
/// checker keeps them from surviving any mutation of that tree.
pub struct Matching<'p, 't, P> {
    slots: [Option<Binding<'p, 't, P>>; MAX_MATCHING_VARS],
}

impl<P> Copy for Matching<'_, '_, P> {}

impl<P> Clone for Matching<'_, '_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P> Default for Matching<'_, '_, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p, 't, P> Matching<'p, 't, P> {
    pub fn new() -> Self {
        Self {
            slots: [None; MAX_MATCHING_VARS],
        }
    }

    pub fn get(&self, id: usize) -> Option<&Binding<'p, 't, P>> {
        self.slots[id].as_ref()
    }

    pub fn bind(&mut self, id: usize, name: &'p str, nodes: &'t [Node<P>]) {
        self.slots[id] = Some(Binding { name, nodes });
    }

    /// The bound variables, in `match_id` order.
    pub fn iter(&self) -> impl Iterator<Item = &Binding<'p, 't, P>> {
        self.slots.iter().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    pub fn get_named(&self, name: &str) -> Option<&Binding<'p, 't, P>> {
        self.iter().find(|b| b.name == name)
    }

    /// Whether both matchings bind the same variables to the same spans of
    /// the same tree (span identity, not structural equality). Used to
    /// deduplicate partial matchings that reach one search state along
    /// different routes.
    pub fn same_bindings(&self, other: &Self) -> bool {
        self.slots
            .iter()
            .zip(&other.slots)
            .all(|(a, b)| match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => {
                    a.nodes.as_ptr() == b.nodes.as_ptr() && a.nodes.len() == b.nodes.len()
                }
                _ => false,
            })
    }
}

impl<P> fmt::Debug for Matching<'_, '_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|b| (b.name, b.nodes.len())))
            .finish()
    }
}
