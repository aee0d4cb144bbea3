//! Talc CLI - the symbolic expression engine command line.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "talc")]
#[command(author, version, about = "Talc - a symbolic expression engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate an expression numerically.
    Eval {
        /// The expression to evaluate.
        expr: String,

        /// Variable assignments, `name=value`. May be repeated.
        #[arg(short, long = "var")]
        vars: Vec<String>,
    },

    /// Rewrite an expression to its simplified normal form.
    Simplify {
        /// The expression to simplify.
        expr: String,

        /// Upper bound on rewrite steps across all stages.
        #[arg(long, default_value_t = 10_000)]
        max_steps: usize,
    },

    /// Show every way a pattern matches an expression.
    Match {
        /// The pattern, e.g. `prod([xs], 1, [ys])`.
        pattern: String,

        /// The expression to match against.
        expr: String,
    },

    /// Start an interactive session.
    Repl,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval { expr, vars } => commands::eval::run(&expr, &vars),
        Commands::Simplify { expr, max_steps } => commands::simplify::run(&expr, max_steps),
        Commands::Match { pattern, expr } => commands::matches::run(&pattern, &expr),
        Commands::Repl => commands::repl::run(),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
