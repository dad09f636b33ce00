//! FILENAME: persistence/src/xlsx_writer.rs
//! PURPOSE: Serializes a composed report into a single-sheet XLSX artifact.
//! CONTEXT: Writes the grid row by row, derives merged regions from the row
//! kinds, then attaches dropdown constraints, conditional re-styling rules,
//! the frozen-pane boundary and the autofilter range. The artifact is
//! written atomically: rendered to a buffer, persisted over the destination
//! by rename, so a failed run never leaves a partial file.

use crate::PersistenceError;
use engine::constraint::ListConstraint;
use engine::layout::{Grid, Row, COLUMNS, COLUMN_WIDTHS};
use engine::record::FeatureRecord;
use engine::report::Report;
use engine::style::{CellTheme, Color, Theme};
use log::{debug, info};
use rust_xlsxwriter::{
    ConditionalFormatCell, ConditionalFormatCellRule, DataValidation,
    DataValidationErrorStyle, Format, FormatAlign, FormatBorder, Workbook, Worksheet,
};
use std::io::Write;
use std::path::Path;

/// Worksheet column indexes of the two constrained status columns.
const STATUS_COL: u16 = 3;
const TEST_STATUS_COL: u16 = 4;
const LAST_COL: u16 = 5;
/// Column where the merged summary label ends and the value begins.
const SUMMARY_SPLIT_COL: u16 = 3;

// Row heights in points, per row kind.
const TITLE_HEIGHT: f64 = 40.0;
const PREAMBLE_HEIGHT: f64 = 25.0;
const HEADER_HEIGHT: f64 = 30.0;
const SECTION_HEIGHT: f64 = 28.0;
const DATA_HEIGHT: f64 = 22.0;
const SUMMARY_BANNER_HEIGHT: f64 = 32.0;

/// Writes the report to `path` as a single-sheet XLSX document.
pub fn save_xlsx(report: &Report, path: &Path) -> Result<(), PersistenceError> {
    let mut workbook = build_workbook(report)?;
    let buffer = workbook.save_to_buffer()?;

    // Write-then-rename keeps the previous artifact intact on failure.
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|cause| write_failure(path, cause))?;
    tmp.write_all(&buffer)
        .map_err(|cause| write_failure(path, cause))?;
    tmp.persist(path)
        .map_err(|err| write_failure(path, err.error))?;

    info!("feature report written to {}", path.display());
    Ok(())
}

fn write_failure(path: &Path, cause: std::io::Error) -> PersistenceError {
    PersistenceError::WriteFailure {
        path: path.to_path_buf(),
        cause,
    }
}

fn build_workbook(report: &Report) -> Result<Workbook, PersistenceError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&report.config.sheet_name)?;

    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let grid = &report.grid;
    let theme = &report.theme;

    for (idx, row) in grid.rows.iter().enumerate() {
        let r = idx as u32;
        match row {
            Row::Title(text) => {
                worksheet.merge_range(r, 0, r, LAST_COL, text, &title_format(theme))?;
                worksheet.set_row_height(r, TITLE_HEIGHT)?;
            }
            Row::Subtitle(text) => {
                worksheet.merge_range(r, 0, r, LAST_COL, text, &subtitle_format(theme))?;
                worksheet.set_row_height(r, PREAMBLE_HEIGHT)?;
            }
            Row::Legend(text) => {
                worksheet.merge_range(r, 0, r, LAST_COL, text, &legend_format(theme))?;
                worksheet.set_row_height(r, PREAMBLE_HEIGHT)?;
            }
            Row::Header => {
                let format = header_format(theme);
                for (col, label) in COLUMNS.iter().enumerate() {
                    worksheet.write_string_with_format(r, col as u16, *label, &format)?;
                }
                worksheet.set_row_height(r, HEADER_HEIGHT)?;
            }
            Row::SectionBanner(text) => {
                worksheet.merge_range(r, 0, r, LAST_COL, text, &section_format(theme))?;
                worksheet.set_row_height(r, SECTION_HEIGHT)?;
            }
            Row::Data { ordinal, record } => {
                write_data_row(worksheet, r, *ordinal, record, theme)?;
                worksheet.set_row_height(r, DATA_HEIGHT)?;
            }
            Row::Spacer => {}
            Row::SummaryBanner(text) => {
                worksheet.merge_range(r, 0, r, LAST_COL, text, &summary_banner_format(theme))?;
                worksheet.set_row_height(r, SUMMARY_BANNER_HEIGHT)?;
            }
            Row::Summary {
                label,
                value,
                emphasis,
            } => {
                worksheet.merge_range(
                    r,
                    0,
                    r,
                    SUMMARY_SPLIT_COL,
                    label,
                    &summary_label_format(theme, *emphasis),
                )?;
                worksheet.merge_range(
                    r,
                    SUMMARY_SPLIT_COL + 1,
                    r,
                    LAST_COL,
                    value,
                    &summary_value_format(theme),
                )?;
            }
        }
    }

    attach_validations(worksheet, grid, report)?;
    attach_conditional_styles(worksheet, grid, theme)?;

    // Header and preamble stay visible while the table scrolls.
    worksheet.set_freeze_panes(grid.header_row + 1, 0)?;
    worksheet.autofilter(grid.header_row, 0, grid.filter_last_row, LAST_COL)?;

    debug!(
        "composed worksheet: {} rows, {} data rows",
        grid.rows.len(),
        grid.data_rows.len()
    );
    Ok(workbook)
}

fn write_data_row(
    worksheet: &mut Worksheet,
    r: u32,
    ordinal: u32,
    record: &FeatureRecord,
    theme: &Theme,
) -> Result<(), PersistenceError> {
    let band = theme.band_fill(ordinal);
    let centered = data_format(theme, band).set_align(FormatAlign::Center);
    let text = data_format(theme, band).set_align(FormatAlign::Left);
    let feature = data_format(theme, band)
        .set_align(FormatAlign::Left)
        .set_bold();

    worksheet.write_number_with_format(r, 0, ordinal as f64, &centered)?;
    worksheet.write_string_with_format(r, 1, &record.feature, &feature)?;
    worksheet.write_string_with_format(r, 2, &record.detail, &text)?;

    // Status cells are styled eagerly from the same lookup tables that back
    // the conditional rules, so the artifact is consistent before and after
    // manual edits.
    let status = themed_format(theme, &theme.status_theme(record.status));
    worksheet.write_string_with_format(r, STATUS_COL, record.status.label(), &status)?;
    let test_status = themed_format(theme, &theme.test_status_theme(record.test_status));
    worksheet.write_string_with_format(
        r,
        TEST_STATUS_COL,
        record.test_status.label(),
        &test_status,
    )?;

    worksheet.write_string_with_format(r, LAST_COL, &record.notes, &text)?;
    Ok(())
}

// ============================================================================
// EDIT-TIME CONSTRAINTS AND RE-STYLING RULES
// ============================================================================

fn attach_validations(
    worksheet: &mut Worksheet,
    grid: &Grid,
    report: &Report,
) -> Result<(), PersistenceError> {
    if grid.data_rows.is_empty() {
        return Ok(());
    }

    let status = list_validation(&report.status_constraint)?;
    let test_status = list_validation(&report.test_status_constraint)?;
    for &r in &grid.data_rows {
        worksheet.add_data_validation(r, STATUS_COL, r, STATUS_COL, &status)?;
        worksheet.add_data_validation(r, TEST_STATUS_COL, r, TEST_STATUS_COL, &test_status)?;
    }
    Ok(())
}

fn list_validation(constraint: &ListConstraint) -> Result<DataValidation, PersistenceError> {
    Ok(DataValidation::new()
        .allow_list_strings(&constraint.choices)?
        .ignore_blank(false)
        .set_error_style(DataValidationErrorStyle::Stop)
        .set_input_title(constraint.prompt_title)?
        .set_input_message(constraint.prompt)?
        .set_error_title(constraint.error_title)?
        .set_error_message(constraint.error_message)?)
}

fn attach_conditional_styles(
    worksheet: &mut Worksheet,
    grid: &Grid,
    theme: &Theme,
) -> Result<(), PersistenceError> {
    let Some((first, last)) = grid.data_span() else {
        return Ok(());
    };

    for (label, cell_theme) in theme.status_rules() {
        let rule = equal_to_rule(theme, label, &cell_theme);
        worksheet.add_conditional_format(first, STATUS_COL, last, STATUS_COL, &rule)?;
    }
    for (label, cell_theme) in theme.test_status_rules() {
        let rule = equal_to_rule(theme, label, &cell_theme);
        worksheet.add_conditional_format(first, TEST_STATUS_COL, last, TEST_STATUS_COL, &rule)?;
    }
    Ok(())
}

fn equal_to_rule(theme: &Theme, label: &str, cell_theme: &CellTheme) -> ConditionalFormatCell {
    ConditionalFormatCell::new()
        .set_rule(ConditionalFormatCellRule::EqualTo(label.to_string()))
        .set_format(themed_format(theme, cell_theme))
}

// ============================================================================
// FORMATS
// ============================================================================

fn xlsx_color(color: Color) -> rust_xlsxwriter::Color {
    rust_xlsxwriter::Color::RGB(color.to_rgb())
}

/// Base format shared by all table cells: report font, thin border,
/// vertically centered, wrapped.
fn table_base(theme: &Theme) -> Format {
    Format::new()
        .set_font_name(&theme.font_family)
        .set_font_size(theme.base_size)
        .set_font_color(xlsx_color(theme.palette.body_font))
        .set_border(FormatBorder::Thin)
        .set_border_color(xlsx_color(theme.palette.border))
        .set_align(FormatAlign::VerticalCenter)
        .set_text_wrap()
}

fn title_format(theme: &Theme) -> Format {
    Format::new()
        .set_font_name(&theme.font_family)
        .set_font_size(theme.title_size)
        .set_bold()
        .set_font_color(xlsx_color(theme.palette.heading_font))
        .set_background_color(xlsx_color(theme.palette.title_fill))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn subtitle_format(theme: &Theme) -> Format {
    Format::new()
        .set_font_name(&theme.font_family)
        .set_font_size(theme.base_size)
        .set_italic()
        .set_font_color(xlsx_color(theme.palette.subtitle_font))
        .set_background_color(xlsx_color(theme.palette.title_fill))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn legend_format(theme: &Theme) -> Format {
    Format::new()
        .set_font_name(&theme.font_family)
        .set_font_size(theme.base_size)
        .set_font_color(xlsx_color(theme.palette.legend_font))
        .set_background_color(xlsx_color(theme.palette.legend_fill))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn header_format(theme: &Theme) -> Format {
    table_base(theme)
        .set_font_size(theme.header_size)
        .set_bold()
        .set_font_color(xlsx_color(theme.palette.heading_font))
        .set_background_color(xlsx_color(theme.palette.header_fill))
        .set_align(FormatAlign::Center)
}

fn section_format(theme: &Theme) -> Format {
    table_base(theme)
        .set_font_size(theme.section_size)
        .set_bold()
        .set_font_color(xlsx_color(theme.palette.heading_font))
        .set_background_color(xlsx_color(theme.palette.section_fill))
        .set_align(FormatAlign::Left)
}

fn summary_banner_format(theme: &Theme) -> Format {
    Format::new()
        .set_font_name(&theme.font_family)
        .set_font_size(theme.summary_size)
        .set_bold()
        .set_font_color(xlsx_color(theme.palette.heading_font))
        .set_background_color(xlsx_color(theme.palette.title_fill))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
}

fn summary_label_format(theme: &Theme, emphasis: bool) -> Format {
    let format = table_base(theme)
        .set_background_color(xlsx_color(theme.palette.plain_fill))
        .set_align(FormatAlign::Left);
    if emphasis {
        format.set_bold()
    } else {
        format
    }
}

fn summary_value_format(theme: &Theme) -> Format {
    table_base(theme)
        .set_bold()
        .set_background_color(xlsx_color(theme.palette.plain_fill))
        .set_align(FormatAlign::Center)
}

fn data_format(theme: &Theme, fill: Color) -> Format {
    table_base(theme).set_background_color(xlsx_color(fill))
}

fn themed_format(theme: &Theme, cell: &CellTheme) -> Format {
    let format = table_base(theme)
        .set_font_color(xlsx_color(cell.font_color))
        .set_background_color(xlsx_color(cell.fill))
        .set_align(FormatAlign::Center);
    if cell.bold {
        format.set_bold()
    } else {
        format
    }
}
