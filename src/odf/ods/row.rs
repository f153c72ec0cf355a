//! Row structures for ODS spreadsheets.

use super::Cell;

/// A row in an ODS spreadsheet.
#[derive(Clone, Debug, Default)]
pub struct Row {
    /// Cells in this row
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a row from cells.
    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// A spacer row holding a single empty cell.
    pub fn spacer() -> Self {
        Self::from_cells(vec![Cell::empty()])
    }

    /// Append a cell.
    pub fn push(&mut self, cell: Cell) -> &mut Self {
        self.cells.push(cell);
        self
    }

    /// Append `count` empty cells as one repeated cell.
    pub fn push_empty(&mut self, count: usize) -> &mut Self {
        if count > 0 {
            self.cells.push(Cell::empty().repeated(count));
        }
        self
    }

    /// Number of columns covered by this row, counting repeated cells.
    pub fn span(&self) -> usize {
        self.cells.iter().map(|c| c.repeat).sum()
    }

    /// Get the cell covering a column index (0-based), resolving repeats.
    pub fn cell_at(&self, col: usize) -> Option<&Cell> {
        let mut start = 0;
        for cell in &self.cells {
            if col < start + cell.repeat {
                return Some(cell);
            }
            start += cell.repeat;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_counts_repeats() {
        let mut row = Row::new();
        row.push(Cell::text("ÜBERTRAG")).push_empty(10).push(Cell::number(0.0));
        assert_eq!(row.cells.len(), 3);
        assert_eq!(row.span(), 12);
        assert!(row.cell_at(5).is_some_and(|c| c.is_empty()));
        assert_eq!(row.cell_at(11).and_then(|c| c.numeric_value()), Some(0.0));
        assert!(row.cell_at(12).is_none());
    }

    #[test]
    fn test_push_empty_zero_is_noop() {
        let mut row = Row::new();
        row.push_empty(0);
        assert!(row.cells.is_empty());
    }
}
