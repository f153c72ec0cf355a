//! OpenDocument Spreadsheet (.ods) model and builder.
//!
//! Sheets are assembled from rows of typed cells, optionally carrying
//! OpenFormula expressions and automatic cell styles, and serialized into a
//! complete `.ods` package by [`SpreadsheetBuilder`].

mod builder;
mod cell;
mod row;
mod sheet;
mod style;

pub use builder::SpreadsheetBuilder;
pub use cell::{Cell, CellValue};
pub use row::Row;
pub use sheet::Sheet;
pub use style::{CellStyle, NumberStyle};
