//! Cell data structures for ODS spreadsheets.

use crate::common::xml::escape_xml;

/// Cell data types written to ODF spreadsheets.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Empty cell
    Empty,
    /// Text string
    Text(String),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Percentage value (0.05 = 5%)
    Percentage(f64),
}

impl CellValue {
    /// Default display text for the value.
    fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(t) => t.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Boolean(b) => b.to_string().to_uppercase(),
            CellValue::Percentage(p) => format!("{}%", p * 100.0),
        }
    }
}

/// A cell in an ODS spreadsheet.
///
/// Cells carry a typed value, an optional OpenFormula expression (stored
/// without the `of:=` prefix) whose last known result is the value, an
/// optional automatic style and a repeat count for runs of identical cells.
#[derive(Clone, Debug)]
pub struct Cell {
    /// The cell value (cached result for formula cells)
    pub value: CellValue,
    /// Display text overriding the default rendering of `value`
    pub text: Option<String>,
    /// The formula in the cell (if any), without the `of:=` namespace prefix
    pub formula: Option<String>,
    /// Automatic style name
    pub style: Option<String>,
    /// Number of consecutive identical cells this entry stands for
    pub repeat: usize,
}

impl Cell {
    fn with_value(value: CellValue) -> Self {
        Self {
            value,
            text: None,
            formula: None,
            style: None,
            repeat: 1,
        }
    }

    /// An empty cell.
    pub fn empty() -> Self {
        Self::with_value(CellValue::Empty)
    }

    /// A text cell.
    pub fn text(text: &str) -> Self {
        Self::with_value(CellValue::Text(text.to_string()))
    }

    /// A numeric cell.
    pub fn number(value: f64) -> Self {
        Self::with_value(CellValue::Number(value))
    }

    /// A formula cell with its cached result.
    ///
    /// ```
    /// use sheetsmith::odf::{Cell, CellValue};
    ///
    /// let cell = Cell::formula("SUM([.C4:.C368])", CellValue::Number(0.0));
    /// assert_eq!(cell.formula.as_deref(), Some("SUM([.C4:.C368])"));
    /// ```
    pub fn formula(formula: &str, cached: CellValue) -> Self {
        let mut cell = Self::with_value(cached);
        cell.formula = Some(formula.to_string());
        cell
    }

    /// Set the automatic style.
    pub fn styled(mut self, style: &str) -> Self {
        self.style = Some(style.to_string());
        self
    }

    /// Override the display text.
    pub fn display(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Repeat the cell `count` times (at least once).
    pub fn repeated(mut self, count: usize) -> Self {
        self.repeat = count.max(1);
        self
    }

    /// Get the numeric value of the cell (if applicable).
    pub fn numeric_value(&self) -> Option<f64> {
        match &self.value {
            CellValue::Number(n) | CellValue::Percentage(n) => Some(*n),
            _ => None,
        }
    }

    /// Check if the cell is empty (no value and no formula).
    pub fn is_empty(&self) -> bool {
        matches!(self.value, CellValue::Empty) && self.formula.is_none()
    }

    /// Serialize the cell as a `table:table-cell` element.
    pub(crate) fn write_xml(&self, out: &mut String) {
        out.push_str("<table:table-cell");
        if let Some(ref style) = self.style {
            out.push_str(&format!(r#" table:style-name="{}""#, escape_xml(style)));
        }
        if self.repeat > 1 {
            out.push_str(&format!(
                r#" table:number-columns-repeated="{}""#,
                self.repeat
            ));
        }
        if let Some(ref formula) = self.formula {
            out.push_str(&format!(r#" table:formula="of:={}""#, escape_xml(formula)));
        }

        match &self.value {
            CellValue::Empty => {
                if self.formula.is_none() && self.text.is_none() {
                    out.push_str("/>");
                    return;
                }
                // Formulas yielding "" are typed as strings
                out.push_str(r#" office:value-type="string""#);
            },
            CellValue::Text(_) => out.push_str(r#" office:value-type="string""#),
            CellValue::Number(n) => {
                out.push_str(&format!(r#" office:value-type="float" office:value="{}""#, n))
            },
            CellValue::Percentage(p) => out.push_str(&format!(
                r#" office:value-type="percentage" office:value="{}""#,
                p
            )),
            CellValue::Boolean(b) => out.push_str(&format!(
                r#" office:value-type="boolean" office:boolean-value="{}""#,
                b
            )),
        }

        let text = self.text.clone().unwrap_or_else(|| self.value.display());
        out.push_str(&format!(
            "><text:p>{}</text:p></table:table-cell>",
            escape_xml(&text)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xml(cell: &Cell) -> String {
        let mut out = String::new();
        cell.write_xml(&mut out);
        out
    }

    #[test]
    fn test_empty_cell() {
        assert_eq!(xml(&Cell::empty()), "<table:table-cell/>");
        assert_eq!(
            xml(&Cell::empty().styled("input").repeated(6)),
            r#"<table:table-cell table:style-name="input" table:number-columns-repeated="6"/>"#
        );
    }

    #[test]
    fn test_number_cell() {
        assert_eq!(
            xml(&Cell::number(17.75)),
            r#"<table:table-cell office:value-type="float" office:value="17.75"><text:p>17.75</text:p></table:table-cell>"#
        );
        assert_eq!(
            xml(&Cell::number(2014.0)),
            r#"<table:table-cell office:value-type="float" office:value="2014"><text:p>2014</text:p></table:table-cell>"#
        );
    }

    #[test]
    fn test_display_override() {
        let out = xml(&Cell::number(7.0).display("KW 7"));
        assert!(out.contains(r#"office:value="7""#));
        assert!(out.contains("<text:p>KW 7</text:p>"));
    }

    #[test]
    fn test_formula_escaping() {
        let cell = Cell::formula(r#"IF([.C4]="";"";1)"#, CellValue::Empty).styled("calculated");
        let out = xml(&cell);
        assert!(out.contains(r#"table:formula="of:=IF([.C4]=&quot;&quot;;&quot;&quot;;1)""#));
        assert!(out.contains(r#"office:value-type="string""#));
        assert!(out.ends_with("<text:p></text:p></table:table-cell>"));
    }

    #[test]
    fn test_text_escaping() {
        let out = xml(&Cell::text("Fuel <INL> & AUSL"));
        assert!(out.contains("<text:p>Fuel &lt;INL&gt; &amp; AUSL</text:p>"));
    }

    #[test]
    fn test_repeat_never_zero() {
        assert_eq!(Cell::empty().repeated(0).repeat, 1);
    }
}
