//! Sheet structures for ODS spreadsheets.

use super::Row;

/// A sheet (table) in an ODS spreadsheet.
#[derive(Clone, Debug)]
pub struct Sheet {
    /// Sheet name
    pub name: String,
    /// Rows in this sheet
    pub rows: Vec<Row>,
}

impl Sheet {
    /// Create an empty sheet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rows: Vec::new(),
        }
    }

    /// Append a row.
    pub fn push_row(&mut self, row: Row) -> &mut Self {
        self.rows.push(row);
        self
    }

    /// Get the number of rows in the sheet.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns in the sheet.
    ///
    /// Returns the maximum span across all rows.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Row::span).max().unwrap_or(0)
    }
}
