//! The `talc simplify` command.

use talc_diagnostic::emit;
use talc_engine::{Library, Ruleset};
use talc_eval::fold_constants;
use talc_parser::parse;
use talc_syntax::{Grammar, Node};

/// Drive one ruleset against a shared step budget. The engine's own
/// fixpoint loop is unbounded; the cap lives out here.
fn apply_capped(rules: &Ruleset<f64>, tree: &mut Node<f64>, budget: &mut usize) -> bool {
    while *budget > 0 {
        if !rules.step(tree) {
            return true;
        }
        *budget -= 1;
    }
    false
}

/// The full normalization pipeline with constant folding interleaved:
/// once after desugaring, so `cn`-constrained derivative rules see plain
/// constant exponents, and once after core simplification, so symbolic
/// exponent arithmetic collapses before refolding. Returns `false` if the
/// step budget ran out before a fixpoint.
pub fn normalize_capped(
    library: &Library<f64>,
    grammar: &Grammar,
    tree: &mut Node<f64>,
    max_steps: usize,
) -> bool {
    let mut budget = max_steps;
    let mut converged = true;
    converged &= apply_capped(&library.desugar, tree, &mut budget);
    fold_constants(tree, grammar);
    converged &= apply_capped(&library.derivative, tree, &mut budget);
    converged &= apply_capped(&library.flatten, tree, &mut budget);
    converged &= apply_capped(&library.simplify, tree, &mut budget);
    fold_constants(tree, grammar);
    converged &= apply_capped(&library.simplify, tree, &mut budget);
    converged &= apply_capped(&library.refold, tree, &mut budget);
    converged &= apply_capped(&library.resugar, tree, &mut budget);
    converged &= apply_capped(&library.order, tree, &mut budget);
    converged
}

pub fn run(expr: &str, max_steps: usize) -> Result<(), String> {
    let grammar = Grammar::algebra();

    let mut tree = match parse::<f64>(expr, &grammar) {
        Ok(tree) => tree,
        Err(err) => {
            emit(expr, "<expr>", &err.to_diagnostic());
            return Err("could not parse expression".into());
        }
    };

    let library = Library::standard(&grammar);
    if !normalize_capped(&library, &grammar, &mut tree, max_steps) {
        eprintln!("warning: stopped after {max_steps} rewrites without reaching a fixpoint");
    }

    println!("{}", tree.render(&grammar));
    Ok(())
}
