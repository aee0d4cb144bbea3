//! The Talc term-rewriting engine.
//!
//! Patterns are ordinary expression trees whose variables may bind
//! subtrees: a variable binds exactly one node, a `[`-prefixed sequence
//! variable binds a span of zero or more sibling nodes, and `_` wildcards
//! match without binding. `match_all` enumerates every consistent way a
//! pattern's variables can bind; `Rule`/`Ruleset` pair patterns with
//! templates and rewrite trees greedily to fixpoint.
//!
//! Matching failure is not an error: an empty result, `None`, or `false`
//! is the ordinary "no" answer of a search. The only errors here are
//! configuration defects in rule text.

mod filter;
mod library;
mod matcher;
mod matching;
mod pattern;
mod rule;

pub use filter::{base_name, is_sequence, is_wildcard, MatchFilter, PrefixFilter};
pub use library::Library;
pub use matcher::{find_matching, get_matching, match_all, NodePath};
pub use matching::{Binding, Matching, MAX_MATCHING_VARS};
pub use pattern::{preprocess, PatternError, PatternVars};
pub use rule::{apply_rule, Rule, RuleError, Ruleset, RulesetError};
