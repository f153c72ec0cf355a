//! Minimal SpreadsheetML (.xlsx) writer.
//!
//! Covers what a generated list needs: string and number cells, a
//! de-duplicated shared strings table, fonts/fills/alignment styles and
//! column widths. Parts are packaged with the `zip` crate.

mod sheet;
mod strings;
mod styles;
mod workbook;

pub use sheet::{CellData, Worksheet};
pub use strings::SharedStrings;
pub use styles::{CellFont, CellFormat, HorizontalAlignment, StylesBuilder, VerticalAlignment};
pub use workbook::Workbook;

/// Main SpreadsheetML namespace
pub(crate) const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
/// Office document relationships namespace
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
