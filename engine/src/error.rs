//! FILENAME: engine/src/error.rs

use thiserror::Error;

/// Errors produced while building the in-memory report model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    /// A record carried a value outside its column's closed vocabulary.
    /// `row` is the 0-based index of the record in the supplied inventory.
    #[error("record {row}: invalid {field} value \"{value}\"")]
    InvalidEnumValue {
        row: usize,
        field: &'static str,
        value: String,
    },
}
