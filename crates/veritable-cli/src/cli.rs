//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Veritable: verification reports for tabular datasets
#[derive(Parser)]
#[command(name = "veritable")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a JSON verification plan against its CSV datasets
    Check {
        /// Path to the plan file (JSON)
        #[arg(value_name = "PLAN")]
        plan: PathBuf,

        /// Output path for the report (default: <plan>.report.json)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Also export the ledger as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Preview a dataset's structure
    Inspect {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of data rows to print
        #[arg(short, long, default_value = "10")]
        rows: usize,
    },

    /// Re-export a saved report's ledger as CSV
    Export {
        /// Path to the report file (JSON)
        #[arg(value_name = "REPORT")]
        report: PathBuf,

        /// Output path for the CSV
        #[arg(long)]
        csv: PathBuf,
    },
}
