//! FILENAME: engine/src/report.rs
//! PURPOSE: Assembles a complete report model from a raw inventory:
//! validate, aggregate, compose, attach constraints.

use crate::constraint::{status_constraint, test_status_constraint, ListConstraint};
use crate::error::ReportError;
use crate::layout::{compose, Grid, ReportConfig};
use crate::record::{validate, RecordInput};
use crate::style::Theme;
use crate::summary::{summarize, SummaryCounters};

/// A fully composed report, ready for serialization.
#[derive(Debug, Clone)]
pub struct Report {
    pub config: ReportConfig,
    pub theme: Theme,
    pub grid: Grid,
    pub counters: SummaryCounters,
    pub status_constraint: ListConstraint,
    pub test_status_constraint: ListConstraint,
}

impl Report {
    /// Runs the in-memory half of the pipeline: validation first (fail fast,
    /// nothing is composed for an invalid inventory), then aggregation and
    /// layout composition.
    pub fn build(
        records: &[RecordInput],
        config: ReportConfig,
        theme: Theme,
    ) -> Result<Report, ReportError> {
        let records = validate(records)?;
        let counters = summarize(&records);
        let grid = compose(&records, &counters, &config);

        Ok(Report {
            config,
            theme,
            grid,
            counters,
            status_constraint: status_constraint(),
            test_status_constraint: test_status_constraint(),
        })
    }
}
