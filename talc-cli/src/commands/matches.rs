//! The `talc match` command: a pattern/expression matching explorer.

use talc_diagnostic::emit;
use talc_engine::{match_all, preprocess, MatchFilter, PrefixFilter};
use talc_parser::parse;
use talc_syntax::Grammar;

pub fn run(pattern_text: &str, expr_text: &str) -> Result<(), String> {
    let grammar = Grammar::algebra();

    let mut pattern = match parse::<f64>(pattern_text, &grammar) {
        Ok(tree) => tree,
        Err(err) => {
            emit(pattern_text, "<pattern>", &err.to_diagnostic());
            return Err("could not parse pattern".into());
        }
    };
    let tree = match parse::<f64>(expr_text, &grammar) {
        Ok(tree) => tree,
        Err(err) => {
            emit(expr_text, "<expr>", &err.to_diagnostic());
            return Err("could not parse expression".into());
        }
    };

    preprocess(&mut pattern).map_err(|err| err.to_string())?;

    let filter: &dyn MatchFilter<f64> = &PrefixFilter;
    let matchings = match_all(&tree, &pattern, Some(filter));

    if matchings.is_empty() {
        println!("no match");
        return Ok(());
    }

    for (index, matching) in matchings.iter().enumerate() {
        println!("matching {}:", index + 1);
        if matching.is_empty() {
            println!("  (no variables)");
            continue;
        }
        for binding in matching.iter() {
            let nodes: Vec<String> = binding
                .nodes
                .iter()
                .map(|node| node.render(&grammar).to_string())
                .collect();
            println!("  {} -> ({})", binding.name, nodes.join(", "));
        }
    }
    Ok(())
}
