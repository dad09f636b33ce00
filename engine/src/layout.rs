//! FILENAME: engine/src/layout.rs
//! PURPOSE: Composes the ordered record sequence into the typed row/column
//! layout of the report grid.
//! CONTEXT: The composer walks records in input order, opens a section
//! banner whenever the category changes, and numbers data rows continuously
//! across sections. It also tracks the row positions later stages need
//! (header row, every data row, the end of the filterable range).

use crate::record::FeatureRecord;
use crate::summary::SummaryCounters;
use chrono::{Local, NaiveDate};

// ============================================================================
// COLUMN SCHEMA
// ============================================================================

/// Column header labels for the six-column schema.
pub const COLUMNS: [&str; 6] = [
    "#",
    "Feature",
    "Sub-Feature / Detail",
    "Status",
    "Test Status",
    "Notes / Implementation",
];

/// Fixed column widths, in Excel character units.
pub const COLUMN_WIDTHS: [f64; 6] = [8.0, 28.0, 50.0, 16.0, 16.0, 50.0];

const LEGEND_TEXT: &str = "🟢 Working/Done = Green  |  🔴 Not Working/Issue = Red  |  \
                           🟡 Testing/Partial = Yellow  |  🔵 Needs Review = Blue  |  \
                           ⚪ Not Started = Gray";

// ============================================================================
// REPORT CONFIGURATION
// ============================================================================

/// Run configuration for one report: titles and the generation stamp.
///
/// `generated_on` is injected (defaulting to today) so composition stays
/// deterministic under test.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub title: String,
    pub project: String,
    pub sheet_name: String,
    pub generated_on: NaiveDate,
}

impl ReportConfig {
    pub fn new(
        title: impl Into<String>,
        project: impl Into<String>,
        sheet_name: impl Into<String>,
    ) -> Self {
        ReportConfig {
            title: title.into(),
            project: project.into(),
            sheet_name: sheet_name.into(),
            generated_on: Local::now().date_naive(),
        }
    }

    /// Pin the generation stamp to a fixed date.
    pub fn with_generated_on(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }
}

// ============================================================================
// GRID
// ============================================================================

/// One typed row of the composed grid.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Report title, merged across all columns.
    Title(String),
    /// Generation stamp, project and total count, merged across all columns.
    Subtitle(String),
    /// Color legend, merged across all columns.
    Legend(String),
    /// The six column headers.
    Header,
    /// Category section banner, merged across all columns.
    SectionBanner(String),
    /// One feature record. `ordinal` is 1-based and continuous across the
    /// whole table; it never resets at a section boundary.
    Data { ordinal: u32, record: FeatureRecord },
    /// Visual gap. Nothing is written for this row.
    Spacer,
    /// Banner opening the summary block, merged across all columns.
    SummaryBanner(String),
    /// One summary line: label merged over the left columns, value over the
    /// right. `emphasis` marks headings and top-level totals.
    Summary {
        label: String,
        value: String,
        emphasis: bool,
    },
}

/// The composed grid plus the row positions later stages need.
/// Row indices are 0-based worksheet rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub rows: Vec<Row>,
    /// Position of the column header row.
    pub header_row: u32,
    /// Position of every data row, in order. Dropdown constraints and the
    /// conditional re-styling rules attach to these.
    pub data_rows: Vec<u32>,
    /// Position of the last summary row; the filterable range runs from the
    /// header row down to here.
    pub filter_last_row: u32,
}

impl Grid {
    /// Worksheet span of the data rows, if any records were composed.
    pub fn data_span(&self) -> Option<(u32, u32)> {
        match (self.data_rows.first(), self.data_rows.last()) {
            (Some(&first), Some(&last)) => Some((first, last)),
            _ => None,
        }
    }
}

// ============================================================================
// COMPOSITION
// ============================================================================

/// Composes the full report grid: preamble, banner-grouped data rows and the
/// summary block.
///
/// Grouping is positional: a banner opens whenever the category differs from
/// the previous record's, so a category repeated non-adjacently opens a new
/// section rather than merging with the earlier one.
pub fn compose(
    records: &[FeatureRecord],
    counters: &SummaryCounters,
    config: &ReportConfig,
) -> Grid {
    let mut rows = Vec::with_capacity(records.len() + 16);

    rows.push(Row::Title(config.title.clone()));
    rows.push(Row::Subtitle(format!(
        "Generated: {}  |  Project: {}  |  Total Features: {}",
        config.generated_on.format("%Y-%m-%d"),
        config.project,
        records.len(),
    )));
    rows.push(Row::Legend(LEGEND_TEXT.to_string()));
    let header_row = rows.len() as u32;
    rows.push(Row::Header);

    let mut data_rows = Vec::with_capacity(records.len());
    let mut current_category: Option<&str> = None;
    let mut ordinal = 0u32;

    for record in records {
        if current_category != Some(record.category.as_str()) {
            current_category = Some(record.category.as_str());
            rows.push(Row::SectionBanner(format!("▶  {}", record.category)));
        }
        ordinal += 1;
        data_rows.push(rows.len() as u32);
        rows.push(Row::Data {
            ordinal,
            record: record.clone(),
        });
    }

    rows.push(Row::Spacer);
    rows.push(Row::SummaryBanner("📊  Summary Statistics".to_string()));
    push_summary_rows(&mut rows, counters);

    let filter_last_row = (rows.len() - 1) as u32;

    Grid {
        rows,
        header_row,
        data_rows,
        filter_last_row,
    }
}

fn push_summary_rows(rows: &mut Vec<Row>, counters: &SummaryCounters) {
    let total = |label: &str, value: String| Row::Summary {
        label: label.to_string(),
        value,
        emphasis: true,
    };
    let entry = |label: &String, count: &usize| Row::Summary {
        label: format!("  {label}"),
        value: count.to_string(),
        emphasis: false,
    };

    rows.push(total("Total Features", counters.total.to_string()));
    rows.push(total("Total Categories", counters.by_category.len().to_string()));

    rows.push(Row::Spacer);
    rows.push(total("Status Breakdown:", String::new()));
    rows.extend(counters.by_status.iter().map(|(label, count)| entry(label, count)));

    rows.push(Row::Spacer);
    rows.push(total("Test Status Breakdown:", String::new()));
    rows.extend(
        counters
            .by_test_status
            .iter()
            .map(|(label, count)| entry(label, count)),
    );

    rows.push(Row::Spacer);
    rows.push(total("Category Breakdown:", String::new()));
    rows.extend(
        counters
            .by_category
            .iter()
            .map(|(label, count)| entry(label, count)),
    );
}
