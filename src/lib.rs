//! Sheetsmith - generators for static office documents and assets
//!
//! This library bundles a handful of one-shot generators that assemble known
//! output formats from literal data and write them to disk:
//!
//! - **ODS builder**: OpenDocument spreadsheets with styles and OpenFormula cells
//! - **XLSX writer**: minimal SpreadsheetML workbooks with shared strings and styles
//! - **PNG assets**: placeholder icons and splash screens, with a hand-rolled encoder fallback
//! - **Salary code generator**: key/value templates turned into Java map initialisers
//!
//! # Example - Building a spreadsheet
//!
//! ```no_run
//! use sheetsmith::odf::{Cell, Row, Sheet, SpreadsheetBuilder};
//!
//! # fn main() -> sheetsmith::Result<()> {
//! let mut sheet = Sheet::new("Tabelle1");
//! sheet.push_row(Row::from_cells(vec![Cell::text("Jahr"), Cell::number(2026.0)]));
//!
//! let mut builder = SpreadsheetBuilder::new();
//! builder.add_sheet(sheet);
//! builder.save("tabelle.ods")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Generating salary code
//!
//! ```no_run
//! use sheetsmith::salary::{generate_salary_code, parse_template_file};
//!
//! # fn main() -> sheetsmith::Result<()> {
//! let data = parse_template_file("gehaltsdaten_template.txt")?;
//! println!("{}", generate_salary_code(&data));
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod config;
pub mod generators;
pub mod image;
pub mod logging;
pub mod odf;
pub mod salary;
pub mod xlsx;

pub use common::{Error, Metadata, Result};
pub use config::Config;
