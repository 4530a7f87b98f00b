//! Export command - re-export a saved report's ledger as CSV.

use std::path::PathBuf;

use colored::Colorize;
use veritable::VerificationReport;

pub fn run(
    report_path: PathBuf,
    csv: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let report = VerificationReport::load(&report_path)?;

    if verbose {
        println!(
            "Loaded report with {} verdicts across {} datasets",
            report.summary.total,
            report.datasets.len()
        );
    }

    report.export_csv(&csv)?;
    println!(
        "{} {} verdicts to {}",
        "Exported".green().bold(),
        report.summary.total,
        csv.display()
    );

    Ok(())
}
