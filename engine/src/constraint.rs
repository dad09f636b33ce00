//! FILENAME: engine/src/constraint.rs
//! PURPOSE: Declares the enumerated-choice edit constraints for the two
//! status columns.
//! CONTEXT: This module only declares the constraints; the consuming
//! viewer/editor enforces them after the artifact leaves this system.

use crate::record::{Status, TestStatus};
use serde::{Deserialize, Serialize};

/// A per-cell rule restricting future edits to a closed vocabulary, shown as
/// an in-cell dropdown with a prompt and a rejection message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListConstraint {
    pub choices: Vec<&'static str>,
    pub prompt_title: &'static str,
    pub prompt: &'static str,
    pub error_title: &'static str,
    pub error_message: &'static str,
}

/// Constraint for the Status column, built from its closed vocabulary.
pub fn status_constraint() -> ListConstraint {
    ListConstraint {
        choices: Status::ALL.iter().map(|s| s.label()).collect(),
        prompt_title: "Status",
        prompt: "Select feature status",
        error_title: "Invalid Status",
        error_message: "Please select a valid status",
    }
}

/// Constraint for the Test Status column. Independent of the Status
/// constraint even where label spellings overlap.
pub fn test_status_constraint() -> ListConstraint {
    ListConstraint {
        choices: TestStatus::ALL.iter().map(|s| s.label()).collect(),
        prompt_title: "Test Status",
        prompt: "Select test status",
        error_title: "Invalid Test Status",
        error_message: "Please select a valid test status",
    }
}
