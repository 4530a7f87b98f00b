//! Verification plan files: which datasets to load, which checks to run.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;

/// A JSON-authored verification plan.
#[derive(Debug, Deserialize)]
pub struct Plan {
    /// CSV/TSV files to register, resolved relative to the plan file.
    pub datasets: Vec<PathBuf>,
    /// Checks to evaluate, in order.
    pub checks: Vec<Check>,
}

/// One check: locate rows by predicates, compare one column's value.
#[derive(Debug, Deserialize)]
pub struct Check {
    /// Name recorded with the verdict.
    pub label: String,
    /// Dataset name (the source file's stem).
    pub dataset: String,
    /// Row predicates: column name → required value. All must match.
    #[serde(rename = "where")]
    pub predicates: IndexMap<String, String>,
    /// Column whose value the expectation is checked against.
    pub column: String,
    /// Expectation string, e.g. `GE,40` or `TL,100,5`.
    pub expect: String,
    /// Optional annotation carried into the ledger.
    #[serde(default)]
    pub note: Option<String>,
}

impl Plan {
    /// Load a plan from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| format!("Failed to open plan '{}': {}", path.display(), e))?;
        let plan: Plan = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| format!("Failed to parse plan '{}': {}", path.display(), e))?;

        if plan.datasets.is_empty() {
            return Err("Plan lists no datasets".into());
        }
        if plan.checks.is_empty() {
            return Err("Plan lists no checks".into());
        }

        Ok(plan)
    }

    /// Resolve a dataset path relative to the plan file's directory.
    pub fn resolve(&self, plan_path: &Path, dataset: &Path) -> PathBuf {
        if dataset.is_absolute() {
            dataset.to_path_buf()
        } else {
            plan_path
                .parent()
                .unwrap_or(Path::new("."))
                .join(dataset)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_plan() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "datasets": ["people.csv"],
                "checks": [
                    {
                        "label": "David's age",
                        "dataset": "people",
                        "where": {"Name": "David"},
                        "column": "Age",
                        "expect": "GE,40",
                        "note": "sanity"
                    }
                ]
            }"#,
        )
        .unwrap();

        let plan = Plan::load(file.path()).unwrap();
        assert_eq!(plan.datasets.len(), 1);
        assert_eq!(plan.checks[0].predicates.get("Name").unwrap(), "David");
        assert_eq!(plan.checks[0].note.as_deref(), Some("sanity"));
    }

    #[test]
    fn test_empty_plan_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"{"datasets": [], "checks": []}"#).unwrap();
        assert!(Plan::load(file.path()).is_err());
    }

    #[test]
    fn test_resolve_relative_to_plan() {
        let plan = Plan {
            datasets: vec![],
            checks: vec![],
        };
        assert_eq!(
            plan.resolve(Path::new("runs/plan.json"), Path::new("people.csv")),
            Path::new("runs/people.csv")
        );
        assert_eq!(
            plan.resolve(Path::new("runs/plan.json"), Path::new("/data/people.csv")),
            Path::new("/data/people.csv")
        );
    }
}
