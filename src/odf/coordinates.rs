//! Cell coordinates and OpenFormula references.
//!
//! Spreadsheet formulas in ODF use the OpenFormula reference syntax:
//! - a cell on the same sheet: `[.C4]`
//! - a range on the same sheet: `[.C4:.C368]`
//! - a cell on another sheet: `[$'3C-OA'.L3]`
//! - absolute parts are prefixed with `$`: `[$Inflationsraten.$B$1]`
//!
//! Sheet names are always quoted so registrations such as `3C-OA` or names
//! with spaces such as `WE KW` need no special casing.

use std::fmt;

/// Convert numeric column to alphabetic notation (0-indexed)
///
/// # Examples
///
/// ```
/// use sheetsmith::odf::coordinates::digit_to_alpha;
///
/// assert_eq!(digit_to_alpha(0), "A");
/// assert_eq!(digit_to_alpha(25), "Z");
/// assert_eq!(digit_to_alpha(26), "AA");
/// assert_eq!(digit_to_alpha(71), "BT");
/// ```
pub fn digit_to_alpha(mut digit: usize) -> String {
    let mut column = String::new();
    digit += 1; // Convert from 0-indexed to 1-indexed for calculation

    while digit > 0 {
        let c = ((digit - 1) % 26) as u8;
        column.insert(0, (b'A' + c) as char);
        digit = (digit - 1) / 26;
    }

    column
}

/// Cell coordinates (column, row) both 0-indexed
///
/// # Examples
///
/// ```
/// use sheetsmith::odf::coordinates::CellCoord;
///
/// let coord = CellCoord::new(2, 3);
/// assert_eq!(coord.to_a1(), "C4");
/// assert_eq!(coord.absolute().to_a1(), "$C$4");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoord {
    column: usize,
    row: usize,
    absolute_column: bool,
    absolute_row: bool,
}

impl CellCoord {
    /// Create a new relative cell coordinate
    #[inline]
    pub const fn new(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            absolute_column: false,
            absolute_row: false,
        }
    }

    /// Make both column and row absolute (`$B$1`)
    #[inline]
    pub const fn absolute(mut self) -> Self {
        self.absolute_column = true;
        self.absolute_row = true;
        self
    }

    /// Make only the row absolute (`C$4`), used for running totals
    #[inline]
    pub const fn absolute_row(mut self) -> Self {
        self.absolute_row = true;
        self
    }

    /// Get column index (0-indexed)
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Get row index (0-indexed)
    #[inline]
    pub const fn row(&self) -> usize {
        self.row
    }

    /// Convert to A1 notation string
    pub fn to_a1(&self) -> String {
        format!(
            "{}{}{}{}",
            if self.absolute_column { "$" } else { "" },
            digit_to_alpha(self.column),
            if self.absolute_row { "$" } else { "" },
            self.row + 1
        )
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1())
    }
}

/// Quote a sheet name for use inside a reference.
fn quote_sheet(sheet: &str) -> String {
    format!("'{}'", sheet.replace('\'', "''"))
}

/// Reference to a cell on the formula's own sheet: `[.C4]`
pub fn local(coord: CellCoord) -> String {
    format!("[.{}]", coord)
}

/// Reference to a range on the formula's own sheet: `[.C4:.C368]`
pub fn local_range(start: CellCoord, end: CellCoord) -> String {
    format!("[.{}:.{}]", start, end)
}

/// Reference to a cell on a named sheet: `[$'3C-OA'.L3]`
///
/// # Examples
///
/// ```
/// use sheetsmith::odf::coordinates::{CellCoord, sheet_cell};
///
/// assert_eq!(sheet_cell("3C-OA", CellCoord::new(11, 2)), "[$'3C-OA'.L3]");
/// ```
pub fn sheet_cell(sheet: &str, coord: CellCoord) -> String {
    format!("[${}.{}]", quote_sheet(sheet), coord)
}

/// Reference to a range on a named sheet: `[$'3C-OA'.C4:.C368]`
pub fn sheet_range(sheet: &str, start: CellCoord, end: CellCoord) -> String {
    format!("[${}.{}:.{}]", quote_sheet(sheet), start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_digit_to_alpha() {
        assert_eq!(digit_to_alpha(0), "A");
        assert_eq!(digit_to_alpha(1), "B");
        assert_eq!(digit_to_alpha(16), "Q");
        assert_eq!(digit_to_alpha(25), "Z");
        assert_eq!(digit_to_alpha(26), "AA");
        assert_eq!(digit_to_alpha(51), "AZ");
        assert_eq!(digit_to_alpha(52), "BA");
    }

    #[test]
    fn test_absolute_variants() {
        assert_eq!(CellCoord::new(1, 0).absolute().to_a1(), "$B$1");
        assert_eq!(CellCoord::new(2, 3).absolute_row().to_a1(), "C$4");
    }

    #[test]
    fn test_references() {
        assert_eq!(local(CellCoord::new(1, 3)), "[.B4]");
        assert_eq!(
            local_range(CellCoord::new(2, 3), CellCoord::new(2, 367)),
            "[.C4:.C368]"
        );
        assert_eq!(
            sheet_range("3C-OA", CellCoord::new(2, 3), CellCoord::new(2, 367)),
            "[$'3C-OA'.C4:.C368]"
        );
        assert_eq!(
            sheet_cell("Inflationsraten", CellCoord::new(1, 0).absolute()),
            "[$'Inflationsraten'.$B$1]"
        );
    }

    #[test]
    fn test_sheet_quote_escaping() {
        assert_eq!(sheet_cell("O'Brien", CellCoord::new(0, 0)), "[$'O''Brien'.A1]");
    }

    proptest! {
        #[test]
        fn prop_column_letters_are_uppercase_and_grow(col in 0usize..20_000) {
            let alpha = digit_to_alpha(col);
            prop_assert!(alpha.chars().all(|c| c.is_ascii_uppercase()));
            prop_assert!(digit_to_alpha(col + 1).len() >= alpha.len());
        }
    }
}
