//! Veritable CLI - verification reports for tabular datasets.

mod cli;
mod commands;
mod plan;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { plan, out, csv } => {
            match commands::check::run(plan, out, csv, cli.verbose) {
                // A run with failed verdicts writes its report, then exits 1
                Ok(clean) => {
                    if !clean {
                        std::process::exit(1);
                    }
                    Ok(())
                }
                Err(e) => Err(e),
            }
        }

        Commands::Inspect { file, rows } => commands::inspect::run(file, rows, cli.verbose),

        Commands::Export { report, csv } => commands::export::run(report, csv, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
