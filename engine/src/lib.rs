//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the feature report engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod constraint;
pub mod error;
pub mod layout;
pub mod record;
pub mod report;
pub mod style;
pub mod summary;

// Re-export commonly used types at the crate root
pub use constraint::{status_constraint, test_status_constraint, ListConstraint};
pub use error::ReportError;
pub use layout::{compose, Grid, ReportConfig, Row, COLUMNS, COLUMN_WIDTHS};
pub use record::{validate, FeatureRecord, RecordInput, Status, TestStatus};
pub use report::Report;
pub use style::{CellTheme, Color, Palette, Theme};
pub use summary::{summarize, SummaryCounters};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn input(category: &str, status: &str, test_status: &str) -> RecordInput {
        RecordInput {
            category: category.to_string(),
            feature: format!("{category} feature"),
            detail: String::new(),
            status: status.to_string(),
            test_status: test_status.to_string(),
            notes: String::new(),
        }
    }

    #[test]
    fn integration_test_full_report_workflow() {
        let records = vec![
            input("A", "Working", "Done"),
            input("A", "Issue", "Testing"),
            input("B", "Partial", "Not Started"),
        ];
        let config = ReportConfig::new("Report", "proj", "Sheet")
            .with_generated_on(NaiveDate::from_ymd_opt(2026, 2, 11).unwrap());
        let report = Report::build(&records, config, Theme::default()).unwrap();

        // Two contiguous category runs, three continuously numbered rows.
        let banners = report
            .grid
            .rows
            .iter()
            .filter(|r| matches!(r, Row::SectionBanner(_)))
            .count();
        assert_eq!(banners, 2);

        let ordinals: Vec<u32> = report
            .grid
            .rows
            .iter()
            .filter_map(|r| match r {
                Row::Data { ordinal, .. } => Some(*ordinal),
                _ => None,
            })
            .collect();
        assert_eq!(ordinals, vec![1, 2, 3]);

        assert_eq!(report.counters.by_category["A"], 2);
        assert_eq!(report.counters.by_category["B"], 1);
        assert_eq!(report.counters.by_status["Working"], 1);
        assert_eq!(report.counters.by_status["Issue"], 1);
        assert_eq!(report.counters.by_status["Partial"], 1);
        assert_eq!(report.counters.by_test_status["Done"], 1);
        assert_eq!(report.counters.by_test_status["Testing"], 1);
        assert_eq!(report.counters.by_test_status["Not Started"], 1);
    }

    #[test]
    fn integration_test_count_identities() {
        let records = vec![
            input("Auth", "Working", "Done"),
            input("Auth", "Working", "Done"),
            input("Streaming", "Needs Review", "Needs Review"),
            input("Zones", "Not Working", "Testing"),
            input("Auth", "Partial", "Not Started"),
        ];
        let report = Report::build(
            &records,
            ReportConfig::new("Report", "proj", "Sheet"),
            Theme::default(),
        )
        .unwrap();

        let c = &report.counters;
        assert_eq!(c.total, records.len());
        assert_eq!(c.by_category.values().sum::<usize>(), c.total);
        assert_eq!(c.by_status.values().sum::<usize>(), c.total);
        assert_eq!(c.by_test_status.values().sum::<usize>(), c.total);
    }
}
