//! FILENAME: engine/src/style.rs
//! PURPOSE: Defines the report styling policy: colors, fonts and the
//! status-to-style lookup tables.
//! CONTEXT: All styling lives in an immutable `Theme` value that is passed
//! explicitly into composition and serialization. There is no module-level
//! style state, so a caller can swap the whole policy per run.

use crate::record::{Status, TestStatus};
use serde::{Deserialize, Serialize};

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    pub const fn black() -> Self {
        Color::new(0, 0, 0)
    }

    pub const fn white() -> Self {
        Color::new(255, 255, 255)
    }

    /// Parse from hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::new(r, g, b))
    }

    /// Packed 0xRRGGBB value, as XLSX format builders expect.
    pub const fn to_rgb(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Convert to CSS hex string.
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

/// The resolved visual encoding for one status value: fill, font color and
/// weight. Backs both the eager cell styling and the live re-styling rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTheme {
    pub fill: Color,
    pub font_color: Color,
    pub bold: bool,
}

impl CellTheme {
    pub const fn new(fill: Color, font_color: Color) -> Self {
        CellTheme { fill, font_color, bold: true }
    }
}

// ============================================================================
// PALETTE
// ============================================================================

/// Every fill and font color the report uses.
///
/// Semantic fills pair with their font colors: green = positive/complete,
/// red = negative/blocking, yellow = in progress/partial, blue = needs
/// attention, gray = not started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub title_fill: Color,
    pub header_fill: Color,
    pub section_fill: Color,
    pub legend_fill: Color,
    pub band_fill: Color,
    pub plain_fill: Color,
    pub border: Color,
    pub heading_font: Color,
    pub subtitle_font: Color,
    pub legend_font: Color,
    pub body_font: Color,
    pub green_fill: Color,
    pub green_font: Color,
    pub red_fill: Color,
    pub red_font: Color,
    pub yellow_fill: Color,
    pub yellow_font: Color,
    pub blue_fill: Color,
    pub blue_font: Color,
    pub gray_fill: Color,
    pub gray_font: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            title_fill: Color::new(0x11, 0x18, 0x27),
            header_fill: Color::new(0x1F, 0x29, 0x37),
            section_fill: Color::new(0x37, 0x41, 0x51),
            legend_fill: Color::new(0xF9, 0xFA, 0xFB),
            band_fill: Color::new(0xF3, 0xF4, 0xF6),
            plain_fill: Color::white(),
            border: Color::new(0xD1, 0xD5, 0xDB),
            heading_font: Color::white(),
            subtitle_font: Color::new(0x9C, 0xA3, 0xAF),
            legend_font: Color::new(0x4B, 0x56, 0x63),
            body_font: Color::black(),
            green_fill: Color::new(0xD1, 0xFA, 0xE5),
            green_font: Color::new(0x06, 0x5F, 0x46),
            red_fill: Color::new(0xFE, 0xE2, 0xE2),
            red_font: Color::new(0x99, 0x1B, 0x1B),
            yellow_fill: Color::new(0xFE, 0xF3, 0xC7),
            yellow_font: Color::new(0x92, 0x40, 0x0E),
            blue_fill: Color::new(0xDB, 0xEA, 0xFE),
            blue_font: Color::new(0x1E, 0x40, 0xAF),
            gray_fill: Color::new(0xF3, 0xF4, 0xF6),
            gray_font: Color::new(0x6B, 0x72, 0x80),
        }
    }
}

// ============================================================================
// THEME
// ============================================================================

/// Complete styling configuration for one report run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    /// Font sizes in points.
    pub base_size: f64,
    pub title_size: f64,
    pub header_size: f64,
    pub section_size: f64,
    pub summary_size: f64,
    pub palette: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            font_family: "Calibri".to_string(),
            base_size: 10.0,
            title_size: 16.0,
            header_size: 12.0,
            section_size: 11.0,
            summary_size: 13.0,
            palette: Palette::default(),
        }
    }
}

impl Theme {
    /// Resolve the visual encoding for an implementation status value.
    ///
    /// The match is exhaustive over the closed vocabulary, so an unmapped
    /// value cannot exist past validation.
    pub fn status_theme(&self, status: Status) -> CellTheme {
        let p = &self.palette;
        match status {
            Status::Working => CellTheme::new(p.green_fill, p.green_font),
            Status::NotWorking | Status::Issue => CellTheme::new(p.red_fill, p.red_font),
            Status::Partial => CellTheme::new(p.yellow_fill, p.yellow_font),
            Status::NeedsReview => CellTheme::new(p.blue_fill, p.blue_font),
        }
    }

    /// Resolve the visual encoding for a test status value. Independent of
    /// `status_theme` even where labels overlap.
    pub fn test_status_theme(&self, test_status: TestStatus) -> CellTheme {
        let p = &self.palette;
        match test_status {
            TestStatus::Done => CellTheme::new(p.green_fill, p.green_font),
            TestStatus::Testing => CellTheme::new(p.yellow_fill, p.yellow_font),
            TestStatus::NeedsReview => CellTheme::new(p.blue_fill, p.blue_font),
            TestStatus::NotStarted => CellTheme::new(p.gray_fill, p.gray_font),
        }
    }

    /// The declarative re-styling rule set for the Status column: one
    /// (label, encoding) pair per vocabulary value. The serializer turns
    /// these into conditional-format rules so manual edits after generation
    /// stay visually consistent.
    pub fn status_rules(&self) -> Vec<(&'static str, CellTheme)> {
        Status::ALL.iter().map(|s| (s.label(), self.status_theme(*s))).collect()
    }

    /// The declarative re-styling rule set for the Test Status column.
    pub fn test_status_rules(&self) -> Vec<(&'static str, CellTheme)> {
        TestStatus::ALL
            .iter()
            .map(|s| (s.label(), self.test_status_theme(*s)))
            .collect()
    }

    /// Alternating data-row background, keyed off the global ordinal parity.
    /// A new category section does not reset the alternation.
    pub fn band_fill(&self, ordinal: u32) -> Color {
        if ordinal % 2 == 0 {
            self.palette.band_fill
        } else {
            self.palette.plain_fill
        }
    }
}
