//! FILENAME: engine/src/summary.rs
//! PURPOSE: Aggregate counters for the summary block at the foot of the
//! report.
//! CONTEXT: Breakdown maps are keyed by human label in `BTreeMap`s so
//! iteration is alphabetical by key name. This is deliberately independent
//! of the positional ordering used for the main grid: the table reads in
//! narrative order, the summary in lookup order.

use crate::record::FeatureRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Derived aggregate counts for one inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryCounters {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub by_status: BTreeMap<String, usize>,
    pub by_test_status: BTreeMap<String, usize>,
}

/// Counts total records plus per-category and per-status breakdowns.
///
/// Empty input yields a zero total and empty maps; that is a valid boundary,
/// not an error.
pub fn summarize(records: &[FeatureRecord]) -> SummaryCounters {
    let mut counters = SummaryCounters {
        total: records.len(),
        ..SummaryCounters::default()
    };

    for record in records {
        *counters.by_category.entry(record.category.clone()).or_insert(0) += 1;
        *counters
            .by_status
            .entry(record.status.label().to_string())
            .or_insert(0) += 1;
        *counters
            .by_test_status
            .entry(record.test_status.label().to_string())
            .or_insert(0) += 1;
    }

    counters
}
