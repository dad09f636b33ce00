//! FILENAME: persistence/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Workbook construction failed before anything touched the destination.
    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    /// The destination could not be written (missing directory, permissions,
    /// disk full). The prior artifact, if any, is left untouched.
    #[error("failed to write report to {path}: {cause}")]
    WriteFailure {
        path: PathBuf,
        #[source]
        cause: std::io::Error,
    },
}

/// Union error for the one-shot generation pipeline.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Model(#[from] engine::ReportError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
