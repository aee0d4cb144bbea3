//! The `talc eval` command.

use talc_diagnostic::emit;
use talc_eval::Evaluator;
use talc_parser::parse;
use talc_syntax::Grammar;

pub fn run(expr: &str, vars: &[String]) -> Result<(), String> {
    let grammar = Grammar::algebra();

    let tree = match parse::<f64>(expr, &grammar) {
        Ok(tree) => tree,
        Err(err) => {
            emit(expr, "<expr>", &err.to_diagnostic());
            return Err("could not parse expression".into());
        }
    };

    let mut evaluator = Evaluator::new(&grammar);
    for assignment in vars {
        let Some((name, value)) = assignment.split_once('=') else {
            return Err(format!(
                "bad variable assignment `{assignment}`, expected name=value"
            ));
        };
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| format!("bad numeric value in `{assignment}`"))?;
        evaluator.bind(name.trim(), value);
    }

    let value = evaluator.eval(&tree).map_err(|err| err.to_string())?;
    println!("{value}");
    Ok(())
}
