//! Inspect command - preview a dataset's structure.

use std::path::PathBuf;

use colored::Colorize;
use veritable::Session;

pub fn run(
    file: PathBuf,
    rows: usize,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = Session::new();
    let id = session.load_csv(&file)?;

    let dataset = session.dataset(id)?;
    if let Some(source) = session.source(id) {
        println!(
            "{} {} ({}, {} bytes)",
            "Dataset".cyan().bold(),
            dataset.name().white().bold(),
            source.format,
            source.size_bytes
        );
        println!("  {}", source.hash.dimmed());
    }
    println!(
        "  {} data rows, {} columns",
        dataset.row_count(),
        dataset.column_count()
    );
    println!();

    println!("{} {}", "Columns:".yellow().bold(), dataset.header().join(", "));
    println!();

    let end = dataset.end_row().min(2 + rows);
    for row in 2..end {
        let cells: Vec<&str> = (1..=dataset.column_count())
            .map(|col| dataset.cell_value(row, col).unwrap_or(""))
            .collect();
        println!("  R{}: {}", row, cells.join(" | "));
    }

    let remaining = dataset.end_row().saturating_sub(end);
    if remaining > 0 {
        println!("  ... {} more rows", remaining);
    }

    Ok(())
}
