//! Serializable verification reports: JSON save/load and CSV export.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetId;
use crate::error::{Result, VeritableError};
use crate::expect::Verdict;
use crate::input::SourceMetadata;
use crate::ledger::LedgerRow;
use crate::session::Session;

/// Report format version.
pub const FORMAT_VERSION: &str = "1.0";

/// Per-dataset summary carried in a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Registry-assigned id.
    pub id: DatasetId,
    /// Dataset name.
    pub name: String,
    /// Data-row count (header excluded).
    pub row_count: usize,
    /// Column count.
    pub column_count: usize,
    /// Source fingerprint for file-loaded datasets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
}

/// Pass/fail tallies over a report's verdicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    /// Total verdicts recorded.
    pub total: usize,
    /// Verdicts that passed.
    pub passed: usize,
    /// Verdicts that failed.
    pub failed: usize,
    /// `passed / total`, or 0.0 for an empty ledger.
    pub pass_rate: f64,
}

/// Snapshot of a verification session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Report format version.
    pub version: String,
    /// When the snapshot was taken.
    pub created_at: DateTime<Utc>,
    /// Summaries of every registered dataset.
    pub datasets: Vec<DatasetSummary>,
    /// Verdict rows in ledger order.
    pub verdicts: Vec<LedgerRow>,
    /// Pass/fail summary.
    pub summary: ReportSummary,
}

impl VerificationReport {
    /// Snapshot a session. A session whose ledger was never opened yields a
    /// report with no verdicts.
    pub fn from_session(session: &Session) -> Self {
        let datasets = session
            .datasets()
            .map(|ds| DatasetSummary {
                id: ds.id(),
                name: ds.name().to_string(),
                row_count: ds.row_count(),
                column_count: ds.column_count(),
                source: session.source(ds.id()).cloned(),
            })
            .collect();

        let verdicts: Vec<LedgerRow> = session
            .ledger()
            .map(|l| l.rows().to_vec())
            .unwrap_or_default();

        let passed = verdicts
            .iter()
            .filter(|r| r.verdict == Verdict::Pass)
            .count();
        let total = verdicts.len();
        let summary = ReportSummary {
            total,
            passed,
            failed: total - passed,
            pass_rate: if total == 0 {
                0.0
            } else {
                passed as f64 / total as f64
            },
        };

        Self {
            version: FORMAT_VERSION.to_string(),
            created_at: Utc::now(),
            datasets,
            verdicts,
            summary,
        }
    }

    /// Whether every verdict in the report passed.
    pub fn is_clean(&self) -> bool {
        self.summary.failed == 0
    }

    /// Save the report as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    VeritableError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            VeritableError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| VeritableError::Persistence(format!("Failed to serialize report: {}", e)))
    }

    /// Load a report from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            VeritableError::Persistence(format!("Failed to open file '{}': {}", path.display(), e))
        })?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| {
            VeritableError::Persistence(format!(
                "Failed to parse report '{}': {}",
                path.display(),
                e
            ))
        })
    }

    /// Export the ledger as CSV in results-sheet column order:
    /// `Row, Name, Expected Value, Operation, Actual Value, Check, Note`.
    ///
    /// The `Row` column carries the `<dataset>!R<row>C<col>` locator so a
    /// consumer can navigate back to the originating cell.
    pub fn export_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let names: BTreeMap<DatasetId, &str> = self
            .datasets
            .iter()
            .map(|d| (d.id, d.name.as_str()))
            .collect();

        let mut writer = csv::Writer::from_path(path.as_ref()).map_err(|e| {
            VeritableError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;

        writer.write_record([
            "Row",
            "Name",
            "Expected Value",
            "Operation",
            "Actual Value",
            "Check",
            "Note",
        ])?;

        for verdict in &self.verdicts {
            let fallback = format!("dataset-{}", verdict.source.dataset.value());
            let name = names
                .get(&verdict.source.dataset)
                .copied()
                .unwrap_or(fallback.as_str());
            let locator = verdict.source.locator(name);
            let check = verdict.verdict.to_string();
            writer.write_record([
                locator.as_str(),
                verdict.label.as_str(),
                verdict.expected.as_str(),
                verdict.operation.as_str(),
                verdict.actual.as_str(),
                check.as_str(),
                verdict.note.as_deref().unwrap_or(""),
            ])?;
        }

        writer.flush().map_err(|e| {
            VeritableError::Persistence(format!("Failed to write CSV: {}", e))
        })
    }
}

/// Generate a report file path for a plan or data file.
///
/// # Example
///
/// ```
/// use veritable::report::report_path;
///
/// let path = report_path("runs/plan.json");
/// assert_eq!(path.to_string_lossy(), "runs/plan.report.json");
/// ```
pub fn report_path(data_path: impl AsRef<Path>) -> PathBuf {
    let data_path = data_path.as_ref();
    let stem = data_path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = data_path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.report.json", stem))
}
