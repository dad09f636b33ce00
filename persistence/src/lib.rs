//! FILENAME: persistence/src/lib.rs
//! Feature Report Persistence Module
//!
//! Serializes a composed feature status report into a single-sheet XLSX
//! artifact, and exposes the one-shot generation pipeline.

mod error;
mod xlsx_writer;

pub use error::{GenerateError, PersistenceError};
pub use xlsx_writer::save_xlsx;

use engine::layout::ReportConfig;
use engine::record::RecordInput;
use engine::report::Report;
use engine::style::Theme;
use std::path::Path;

/// One-shot batch transform: validate the raw inventory, compose the report
/// model, and serialize the artifact to `path`.
///
/// Either the run completes and exactly one artifact exists at `path`, or it
/// fails and the destination is left as it was.
pub fn generate(
    records: &[RecordInput],
    config: ReportConfig,
    theme: Theme,
    path: &Path,
) -> Result<Report, GenerateError> {
    let report = Report::build(records, config, theme)?;
    save_xlsx(&report, path)?;
    Ok(report)
}
