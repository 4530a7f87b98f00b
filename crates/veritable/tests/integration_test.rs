//! Integration tests for Veritable.

use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use veritable::{
    Predicates, Session, SourceRef, Verdict, VerificationReport, VeritableError,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|s| s.to_string()).collect())
        .collect()
}

fn people_grid() -> Vec<Vec<String>> {
    grid(&[&["Name", "Age"], &["Ruth", "30"], &["David", "45"]])
}

// =============================================================================
// Search Scenarios
// =============================================================================

#[test]
fn test_find_column_and_first_row() {
    let mut session = Session::new();
    let id = session.register(people_grid()).unwrap();

    assert_eq!(session.find_column(id, "Age").unwrap(), Some(2));
    assert_eq!(session.find_first_row(id, 1, "David").unwrap(), Some(3));
}

#[test]
fn test_intersect_scenarios() {
    let mut session = Session::new();
    let id = session.register(people_grid()).unwrap();

    let mut predicates = Predicates::new();
    predicates.insert(1, "David".to_string());
    predicates.insert(2, "45".to_string());
    let rows = session.find_rows_intersect(id, &predicates).unwrap();
    assert_eq!(rows.into_iter().collect::<Vec<_>>(), vec![3]);

    let mut predicates = Predicates::new();
    predicates.insert(1, "Ruth".to_string());
    predicates.insert(2, "45".to_string());
    let rows = session.find_rows_intersect(id, &predicates).unwrap();
    assert!(rows.is_empty());
}

// =============================================================================
// Evaluation Scenarios
// =============================================================================

#[test]
fn test_equality_verdict_description() {
    let eval = veritable::evaluate("EQ,30", "30").unwrap();
    assert_eq!(eval.verdict, Verdict::Pass);
    assert_eq!(eval.description, "Equals");
}

#[test]
fn test_tolerance_band_scenarios() {
    assert_eq!(veritable::evaluate("TL,100,5", "102").unwrap().verdict, Verdict::Pass);
    assert_eq!(veritable::evaluate("TL,100,5", "110").unwrap().verdict, Verdict::Fail);
    assert_eq!(veritable::evaluate("NTL,100,5", "110").unwrap().verdict, Verdict::Pass);
    assert_eq!(veritable::evaluate("NTL,100,5", "102").unwrap().verdict, Verdict::Fail);
}

// =============================================================================
// Ledger Scenarios
// =============================================================================

#[test]
fn test_three_appends_land_at_consecutive_cursors() {
    let mut session = Session::new();
    let id = session.register(people_grid()).unwrap();
    session.begin_ledger().unwrap();

    let start = session.ledger().unwrap().cursor();
    let source = SourceRef::new(id, 2, 2);

    let first = session.append_verdict("first", source, "EQ,30", "30").unwrap();
    let second = session.append_verdict("second", source, "NE,30", "30").unwrap();
    let third = session.append_verdict("third", source, "GT,20", "30").unwrap();

    assert_eq!(first, start);
    assert_eq!(second, start + 1);
    assert_eq!(third, start + 2);

    let ledger = session.ledger().unwrap();
    assert_eq!(ledger.get(second).unwrap().label, "second");
    assert_eq!(ledger.get(second).unwrap().verdict, Verdict::Fail);
    assert_eq!(ledger.get(third).unwrap().verdict, Verdict::Pass);
}

#[test]
fn test_unsupported_operator_leaves_ledger_unchanged() {
    let mut session = Session::new();
    let id = session.register(people_grid()).unwrap();
    session.begin_ledger().unwrap();

    let err = session
        .append_verdict("bad", SourceRef::new(id, 2, 2), "BOGUS,1", "1")
        .unwrap_err();
    assert!(matches!(err, VeritableError::UnsupportedOperator(_)));
    assert!(session.ledger().unwrap().is_empty());
}

// =============================================================================
// File-backed Flows
// =============================================================================

#[test]
fn test_load_csv_and_verify() {
    let file = create_test_file("Name,Age\nRuth,30\nDavid,45\n");

    let mut session = Session::new();
    let id = session.load_csv(file.path()).unwrap();

    assert_eq!(session.row_count(id).unwrap(), 2);
    assert_eq!(session.column_count(id).unwrap(), 2);
    let source = session.source(id).expect("file-loaded dataset has metadata");
    assert_eq!(source.format, "csv");
    assert!(source.hash.starts_with("sha256:"));

    session.begin_ledger().unwrap();
    let row = session.find_first_row(id, 1, "Ruth").unwrap().unwrap();
    let actual = session.cell_value(id, row, 2).unwrap().unwrap().to_string();
    session
        .append_verdict("ruth age", SourceRef::new(id, row, 2), "TL,32,3", &actual)
        .unwrap();

    assert!(session.ledger().unwrap().is_clean());
}

#[test]
fn test_load_tsv_auto_detect() {
    let file = create_test_file("sample\tvalue\nS001\t12\nS002\t19\n");

    let mut session = Session::new();
    let id = session.load_csv(file.path()).unwrap();

    assert_eq!(session.source(id).unwrap().format, "tsv");
    assert_eq!(session.find_column(id, "value").unwrap(), Some(2));
}

#[test]
fn test_ragged_file_is_a_shape_error() {
    let file = create_test_file("a,b\n1,2\nonly-one\n");

    let mut session = Session::new();
    assert!(matches!(
        session.load_csv(file.path()),
        Err(VeritableError::Shape { row: 3, .. })
    ));
}

// =============================================================================
// Report Round-trips
// =============================================================================

#[test]
fn test_report_save_load_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("run.report.json");

    let mut session = Session::new();
    let id = session.register_named("people", people_grid()).unwrap();
    session.begin_ledger().unwrap();
    session
        .append_verdict("ruth", SourceRef::new(id, 2, 2), "EQ,30", "30")
        .unwrap();
    session
        .append_verdict_with_note("david", SourceRef::new(id, 3, 2), "LT,40", "45", "age cap")
        .unwrap();

    let report = session.report();
    report.save(&path).unwrap();
    let loaded = VerificationReport::load(&path).unwrap();

    assert_eq!(loaded.summary.total, 2);
    assert_eq!(loaded.summary.passed, 1);
    assert_eq!(loaded.verdicts.len(), 2);
    assert_eq!(loaded.verdicts[1].note.as_deref(), Some("age cap"));
    assert_eq!(loaded.datasets[0].name, "people");
}

#[test]
fn test_csv_export_order_and_locator() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.csv");

    let mut session = Session::new();
    let id = session.register_named("people", people_grid()).unwrap();
    session.begin_ledger().unwrap();
    session
        .append_verdict("ruth", SourceRef::new(id, 2, 2), "EQ,30", "30")
        .unwrap();
    session
        .append_verdict("david", SourceRef::new(id, 3, 2), "GT,50", "45")
        .unwrap();

    session.report().export_csv(&path).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines[0],
        "Row,Name,Expected Value,Operation,Actual Value,Check,Note"
    );
    assert!(lines[1].starts_with("people!R2C2,ruth,30,Equals,30,PASS"));
    assert!(lines[2].contains("FAIL"));
}
