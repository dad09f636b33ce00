//! FILENAME: persistence/tests/test_xlsx_writer.rs
//! PURPOSE: End-to-end tests for XLSX report serialization: generate an
//! artifact, re-open it with calamine and assert on the written grid.

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use chrono::NaiveDate;
use engine::{RecordInput, ReportConfig, Theme};
use persistence::{generate, GenerateError, PersistenceError};
use std::path::Path;

const SHEET: &str = "Feature Analysis";

fn record(category: &str, feature: &str, status: &str, test_status: &str) -> RecordInput {
    RecordInput {
        category: category.to_string(),
        feature: feature.to_string(),
        detail: format!("{feature} detail"),
        status: status.to_string(),
        test_status: test_status.to_string(),
        notes: format!("{feature} notes"),
    }
}

fn sample_records() -> Vec<RecordInput> {
    vec![
        record("A", "Login", "Working", "Done"),
        record("A", "Sessions", "Issue", "Testing"),
        record("B", "Snapshots", "Partial", "Not Started"),
    ]
}

fn sample_config() -> ReportConfig {
    ReportConfig::new("Acme – Full Feature Analysis Report", "acme/widgets", SHEET)
        .with_generated_on(NaiveDate::from_ymd_opt(2026, 2, 11).unwrap())
}

fn read_sheet(path: &Path) -> Range<Data> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.worksheet_range(SHEET).unwrap()
}

fn cell_str(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected string at ({row}, {col}), got {other:?}"),
    }
}

fn cell_num(range: &Range<Data>, row: u32, col: u32) -> f64 {
    match range.get_value((row, col)) {
        Some(Data::Float(f)) => *f,
        other => panic!("expected number at ({row}, {col}), got {other:?}"),
    }
}

// ============================================================================
// ARTIFACT CONTENT
// ============================================================================

#[test]
fn test_generate_writes_expected_grid() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    let report = generate(&sample_records(), sample_config(), Theme::default(), &path).unwrap();
    assert_eq!(report.counters.total, 3);

    let range = read_sheet(&path);

    // Preamble.
    assert_eq!(cell_str(&range, 0, 0), "Acme – Full Feature Analysis Report");
    assert_eq!(
        cell_str(&range, 1, 0),
        "Generated: 2026-02-11  |  Project: acme/widgets  |  Total Features: 3"
    );
    assert_eq!(cell_str(&range, 3, 0), "#");
    assert_eq!(cell_str(&range, 3, 1), "Feature");
    assert_eq!(cell_str(&range, 3, 2), "Sub-Feature / Detail");
    assert_eq!(cell_str(&range, 3, 3), "Status");
    assert_eq!(cell_str(&range, 3, 4), "Test Status");
    assert_eq!(cell_str(&range, 3, 5), "Notes / Implementation");

    // Section banners around the data rows, ordinals continuous across them.
    assert_eq!(cell_str(&range, 4, 0), "▶  A");
    assert_eq!(cell_num(&range, 5, 0), 1.0);
    assert_eq!(cell_str(&range, 5, 1), "Login");
    assert_eq!(cell_str(&range, 5, 3), "Working");
    assert_eq!(cell_str(&range, 5, 4), "Done");
    assert_eq!(cell_num(&range, 6, 0), 2.0);
    assert_eq!(cell_str(&range, 6, 3), "Issue");
    assert_eq!(cell_str(&range, 7, 0), "▶  B");
    assert_eq!(cell_num(&range, 8, 0), 3.0);
    assert_eq!(cell_str(&range, 8, 3), "Partial");
    assert_eq!(cell_str(&range, 8, 4), "Not Started");

    // Summary block: banner, totals, then alphabetical breakdowns.
    assert_eq!(cell_str(&range, 10, 0), "📊  Summary Statistics");
    assert_eq!(cell_str(&range, 11, 0), "Total Features");
    assert_eq!(cell_str(&range, 11, 4), "3");
    assert_eq!(cell_str(&range, 12, 0), "Total Categories");
    assert_eq!(cell_str(&range, 12, 4), "2");

    assert_eq!(cell_str(&range, 14, 0), "Status Breakdown:");
    assert_eq!(cell_str(&range, 15, 0), "  Issue");
    assert_eq!(cell_str(&range, 16, 0), "  Partial");
    assert_eq!(cell_str(&range, 17, 0), "  Working");

    assert_eq!(cell_str(&range, 19, 0), "Test Status Breakdown:");
    assert_eq!(cell_str(&range, 20, 0), "  Done");
    assert_eq!(cell_str(&range, 21, 0), "  Not Started");
    assert_eq!(cell_str(&range, 22, 0), "  Testing");

    assert_eq!(cell_str(&range, 24, 0), "Category Breakdown:");
    assert_eq!(cell_str(&range, 25, 0), "  A");
    assert_eq!(cell_str(&range, 25, 4), "2");
    assert_eq!(cell_str(&range, 26, 0), "  B");
    assert_eq!(cell_str(&range, 26, 4), "1");
}

#[test]
fn test_empty_inventory_writes_zero_valued_summary() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    let report = generate(&[], sample_config(), Theme::default(), &path).unwrap();
    assert!(report.grid.data_rows.is_empty());

    let range = read_sheet(&path);
    assert_eq!(cell_str(&range, 0, 0), "Acme – Full Feature Analysis Report");
    // No banner or data rows: the summary starts right after the header gap.
    assert_eq!(cell_str(&range, 5, 0), "📊  Summary Statistics");
    assert_eq!(cell_str(&range, 6, 0), "Total Features");
    assert_eq!(cell_str(&range, 6, 4), "0");
    assert_eq!(cell_str(&range, 7, 4), "0");
}

#[test]
fn test_regenerated_artifact_is_structurally_identical() {
    let dir = tempfile::tempdir().unwrap();
    let first_path = dir.path().join("first.xlsx");
    let second_path = dir.path().join("second.xlsx");

    generate(&sample_records(), sample_config(), Theme::default(), &first_path).unwrap();
    generate(&sample_records(), sample_config(), Theme::default(), &second_path).unwrap();

    let first = read_sheet(&first_path);
    let second = read_sheet(&second_path);
    assert_eq!(first.get_size(), second.get_size());
    assert_eq!(
        first.cells().collect::<Vec<_>>(),
        second.cells().collect::<Vec<_>>()
    );
}

// ============================================================================
// FAILURE MODES
// ============================================================================

#[test]
fn test_invalid_inventory_produces_no_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rejected.xlsx");

    let records = vec![record("A", "Login", "Working", "Passed")];
    let err = generate(&records, sample_config(), Theme::default(), &path).unwrap_err();

    match err {
        GenerateError::Model(model) => {
            assert_eq!(model.to_string(), "record 0: invalid test_status value \"Passed\"");
        }
        other => panic!("expected model error, got {other:?}"),
    }
    assert!(!path.exists());
}

#[test]
fn test_write_failure_names_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("report.xlsx");

    let err = generate(&sample_records(), sample_config(), Theme::default(), &path).unwrap_err();
    match err {
        GenerateError::Persistence(PersistenceError::WriteFailure { path: failed, .. }) => {
            assert_eq!(failed, path);
        }
        other => panic!("expected write failure, got {other:?}"),
    }
}

#[test]
fn test_failed_run_leaves_prior_artifact_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    generate(&sample_records(), sample_config(), Theme::default(), &path).unwrap();
    let before = std::fs::read(&path).unwrap();

    let bad = vec![record("A", "Login", "Shipped", "Done")];
    generate(&bad, sample_config(), Theme::default(), &path).unwrap_err();

    assert_eq!(std::fs::read(&path).unwrap(), before);
}
