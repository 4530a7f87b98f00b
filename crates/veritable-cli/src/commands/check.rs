//! Check command - run a verification plan and write the report.

use std::collections::HashMap;
use std::path::PathBuf;

use colored::Colorize;
use veritable::{report_path, DatasetId, Predicates, Session, SourceRef};

use crate::plan::{Check, Plan};

/// Run a plan. Returns `true` if every verdict passed.
pub fn run(
    plan_path: PathBuf,
    out: Option<PathBuf>,
    csv: Option<PathBuf>,
    verbose: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let plan = Plan::load(&plan_path)?;

    let mut session = Session::new();
    let mut by_name: HashMap<String, DatasetId> = HashMap::new();

    for dataset in &plan.datasets {
        let path = plan.resolve(&plan_path, dataset);
        let id = session.load_csv(&path)?;
        let name = session.dataset(id)?.name().to_string();
        if verbose {
            println!(
                "Loaded {} ({} rows, {} columns)",
                name.white().bold(),
                session.row_count(id)?,
                session.column_count(id)?
            );
        }
        by_name.insert(name, id);
    }

    session.begin_ledger()?;

    for check in &plan.checks {
        run_check(&mut session, &by_name, check, verbose)?;
    }

    let report = session.report();

    let report_out = out.unwrap_or_else(|| report_path(&plan_path));
    report.save(&report_out)?;
    if let Some(csv_out) = &csv {
        report.export_csv(csv_out)?;
    }

    print_summary(&report, &report_out);
    Ok(report.is_clean())
}

fn run_check(
    session: &mut Session,
    by_name: &HashMap<String, DatasetId>,
    check: &Check,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let &id = by_name.get(&check.dataset).ok_or_else(|| {
        format!(
            "Check '{}': unknown dataset '{}'",
            check.label, check.dataset
        )
    })?;

    let mut predicates = Predicates::new();
    for (column_name, value) in &check.predicates {
        let column = session.find_column(id, column_name)?.ok_or_else(|| {
            format!(
                "Check '{}': no column named '{}' in '{}'",
                check.label, column_name, check.dataset
            )
        })?;
        predicates.insert(column, value.clone());
    }

    let target = session.find_column(id, &check.column)?.ok_or_else(|| {
        format!(
            "Check '{}': no column named '{}' in '{}'",
            check.label, check.column, check.dataset
        )
    })?;

    let rows = session.find_rows_intersect(id, &predicates)?;
    if rows.is_empty() {
        return Err(format!(
            "Check '{}': no row in '{}' matches its predicates",
            check.label, check.dataset
        )
        .into());
    }

    // One verdict per matched row, in ascending row order
    for row in rows {
        let actual = session
            .cell_value(id, row, target)?
            .unwrap_or_default()
            .to_string();
        let source = SourceRef::new(id, row, target);

        let written = match &check.note {
            Some(note) => session.append_verdict_with_note(
                check.label.as_str(),
                source,
                &check.expect,
                &actual,
                note.as_str(),
            )?,
            None => session.append_verdict(check.label.as_str(), source, &check.expect, &actual)?,
        };

        if verbose {
            if let Some(verdict) = session.ledger().and_then(|l| l.get(written)) {
                let status = if verdict.verdict.is_pass() {
                    "PASS".green()
                } else {
                    "FAIL".red()
                };
                let locator = session.locator(source)?;
                println!("  {} {} [{}]", status, check.label, locator);
            }
        }
    }

    Ok(())
}

fn print_summary(report: &veritable::VerificationReport, report_out: &std::path::Path) {
    println!();
    println!(
        "{} {} passed, {} failed ({} total)",
        "Verdicts:".cyan().bold(),
        report.summary.passed.to_string().green(),
        report.summary.failed.to_string().red(),
        report.summary.total
    );

    if !report.is_clean() {
        println!();
        println!("{}", "Failures:".yellow().bold());
        for verdict in report.verdicts.iter().filter(|v| !v.verdict.is_pass()) {
            println!(
                "  {} expected {} {}, got {}",
                verdict.label.white().bold(),
                verdict.operation,
                verdict.expected,
                verdict.actual.red()
            );
        }
    }

    println!();
    println!("Report written to {}", report_out.display());
}
