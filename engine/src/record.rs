//! FILENAME: engine/src/record.rs
//! PURPOSE: Defines the feature inventory record model and the two closed
//! status vocabularies (implementation status and test status).
//! CONTEXT: Records arrive from a collaborator as raw strings and are
//! validated into typed form before any layout or serialization work happens.

use crate::error::ReportError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// STATUS VOCABULARIES
// ============================================================================

/// Implementation status of a feature.
///
/// This vocabulary is closed: a value that is not one of these variants is
/// rejected during validation. "Needs Review" also appears in the test-status
/// vocabulary, but each column enforces its own allowed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Working,
    #[serde(rename = "Not Working")]
    NotWorking,
    Issue,
    Partial,
    #[serde(rename = "Needs Review")]
    NeedsReview,
}

impl Status {
    /// All values, in vocabulary order.
    pub const ALL: [Status; 5] = [
        Status::Working,
        Status::NotWorking,
        Status::Issue,
        Status::Partial,
        Status::NeedsReview,
    ];

    /// Human label, as rendered in the report and offered in dropdowns.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Working => "Working",
            Status::NotWorking => "Not Working",
            Status::Issue => "Issue",
            Status::Partial => "Partial",
            Status::NeedsReview => "Needs Review",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL.iter().copied().find(|v| v.label() == s).ok_or(())
    }
}

/// Test status of a feature, independent of its implementation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestStatus {
    Done,
    Testing,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Not Started")]
    NotStarted,
}

impl TestStatus {
    /// All values, in vocabulary order.
    pub const ALL: [TestStatus; 4] = [
        TestStatus::Done,
        TestStatus::Testing,
        TestStatus::NeedsReview,
        TestStatus::NotStarted,
    ];

    /// Human label, as rendered in the report and offered in dropdowns.
    pub fn label(&self) -> &'static str {
        match self {
            TestStatus::Done => "Done",
            TestStatus::Testing => "Testing",
            TestStatus::NeedsReview => "Needs Review",
            TestStatus::NotStarted => "Not Started",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TestStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestStatus::ALL.iter().copied().find(|v| v.label() == s).ok_or(())
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// One raw inventory entry as supplied by a collaborator.
///
/// Status fields are plain strings here; `validate` turns them into the
/// typed vocabularies or rejects the whole run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordInput {
    pub category: String,
    pub feature: String,
    pub detail: String,
    pub status: String,
    pub test_status: String,
    pub notes: String,
}

/// A validated inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub category: String,
    pub feature: String,
    pub detail: String,
    pub status: Status,
    pub test_status: TestStatus,
    pub notes: String,
}

/// Validates every record's status fields against their closed vocabularies.
///
/// Fails on the first violation with the 0-based record index, the offending
/// field name and the rejected value. Runs before any layout work so an
/// invalid inventory never produces a partial artifact.
pub fn validate(records: &[RecordInput]) -> Result<Vec<FeatureRecord>, ReportError> {
    records
        .iter()
        .enumerate()
        .map(|(row, input)| {
            let status = input.status.parse().map_err(|_| ReportError::InvalidEnumValue {
                row,
                field: "status",
                value: input.status.clone(),
            })?;
            let test_status =
                input.test_status.parse().map_err(|_| ReportError::InvalidEnumValue {
                    row,
                    field: "test_status",
                    value: input.test_status.clone(),
                })?;
            Ok(FeatureRecord {
                category: input.category.clone(),
                feature: input.feature.clone(),
                detail: input.detail.clone(),
                status,
                test_status,
                notes: input.notes.clone(),
            })
        })
        .collect()
}
