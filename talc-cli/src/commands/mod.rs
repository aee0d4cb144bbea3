//! CLI subcommands.

pub mod eval;
pub mod matches;
pub mod repl;
pub mod simplify;
