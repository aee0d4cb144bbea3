//! The `talc repl` command.

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use talc_diagnostic::emit;
use talc_engine::Library;
use talc_eval::Evaluator;
use talc_parser::parse;
use talc_syntax::Grammar;

use super::simplify::normalize_capped;

const STEP_BUDGET: usize = 10_000;

pub fn run() -> Result<(), String> {
    println!("Talc REPL v{}", env!("CARGO_PKG_VERSION"));
    println!("Type an expression to simplify it, :help for help, :quit to exit");
    println!();

    let mut rl = DefaultEditor::new().map_err(|e| e.to_string())?;
    let grammar = Grammar::algebra();
    let library = Library::standard(&grammar);

    loop {
        let readline = rl.readline("talc> ");
        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line);

                if line.starts_with(':') {
                    match line {
                        ":quit" | ":q" => break,
                        ":help" | ":h" => {
                            println!("Commands:");
                            println!("  :help, :h    Show this help");
                            println!("  :quit, :q    Exit the REPL");
                            println!("  :rules       List the built-in rulesets");
                            continue;
                        }
                        ":rules" => {
                            for (name, rules) in library.stages() {
                                println!("  {:<12} {} rules", name, rules.len());
                            }
                            continue;
                        }
                        _ => {
                            println!("Unknown command: {line}");
                            continue;
                        }
                    }
                }

                let mut tree = match parse::<f64>(line, &grammar) {
                    Ok(tree) => tree,
                    Err(err) => {
                        emit(line, "<repl>", &err.to_diagnostic());
                        continue;
                    }
                };

                if !normalize_capped(&library, &grammar, &mut tree, STEP_BUDGET) {
                    eprintln!("warning: no fixpoint after {STEP_BUDGET} rewrites");
                }
                println!("{}", tree.render(&grammar));

                // show the numeric value when the tree is closed
                let evaluator = Evaluator::new(&grammar);
                if let Ok(value) = evaluator.eval(&tree) {
                    println!("= {value}");
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {err:?}");
                break;
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
