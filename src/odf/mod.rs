//! OpenDocument Spreadsheet writing.
//!
//! This module builds `.ods` packages from an in-memory sheet model: cells
//! with typed values and OpenFormula expressions, automatic cell styles and
//! the zip package with its manifest.

/// Cell coordinates and OpenFormula references
pub mod coordinates;
/// ODF package writing
pub mod core;
/// ODF spreadsheet (.ods) model and builder
pub mod ods;

/// Re-export the main APIs
pub use core::{OdfStructure, PackageWriter};
pub use ods::{Cell, CellStyle, CellValue, NumberStyle, Row, Sheet, SpreadsheetBuilder};

/// MIME type of OpenDocument spreadsheets
pub const ODS_MIME_TYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";
