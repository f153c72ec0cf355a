//! Worksheet model for the XLSX writer.

use super::{CellFormat, SharedStrings, StylesBuilder};
use crate::common::Result;
use crate::odf::coordinates::{CellCoord, digit_to_alpha};
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

/// Value stored in a worksheet cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellData {
    String(String),
    Number(f64),
}

#[derive(Debug, Clone)]
struct XlsxCell {
    data: CellData,
    format: Option<CellFormat>,
}

/// A worksheet with sparse cells, keyed by 0-based `(row, col)`.
#[derive(Debug, Clone)]
pub struct Worksheet {
    name: String,
    cells: BTreeMap<(u32, u16), XlsxCell>,
    column_widths: BTreeMap<u16, f64>,
}

impl Worksheet {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            cells: BTreeMap::new(),
            column_widths: BTreeMap::new(),
        }
    }

    /// Sheet name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Write a string cell.
    pub fn write_string(&mut self, row: u32, col: u16, value: &str, format: Option<&CellFormat>) {
        self.insert(row, col, CellData::String(value.to_string()), format);
    }

    /// Write a numeric cell.
    pub fn write_number(&mut self, row: u32, col: u16, value: f64, format: Option<&CellFormat>) {
        self.insert(row, col, CellData::Number(value), format);
    }

    fn insert(&mut self, row: u32, col: u16, data: CellData, format: Option<&CellFormat>) {
        self.cells.insert(
            (row, col),
            XlsxCell {
                data,
                format: format.cloned(),
            },
        );
    }

    /// Apply a format to an existing cell, creating an empty string cell if needed.
    pub fn set_cell_format(&mut self, row: u32, col: u16, format: &CellFormat) {
        self.cells
            .entry((row, col))
            .or_insert_with(|| XlsxCell {
                data: CellData::String(String::new()),
                format: None,
            })
            .format = Some(format.clone());
    }

    /// Set the width of a column in characters.
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    /// Read back a cell value.
    pub fn cell(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(&(row, col)).map(|c| &c.data)
    }

    /// Number of rows in use (highest row index + 1).
    pub fn row_count(&self) -> u32 {
        self.cells.keys().map(|&(r, _)| r + 1).max().unwrap_or(0)
    }

    fn column_count(&self) -> u16 {
        self.cells.keys().map(|&(_, c)| c + 1).max().unwrap_or(0)
    }

    /// Render `xl/worksheets/sheetN.xml`, registering strings and formats.
    pub(crate) fn to_xml(
        &self,
        strings: &mut SharedStrings,
        styles: &mut StylesBuilder,
    ) -> Result<String> {
        let mut xml = String::with_capacity(512 + self.cells.len() * 48);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<worksheet xmlns="{}" xmlns:r="{}">"#,
            super::NS_MAIN,
            super::NS_RELATIONSHIPS
        )?;

        if self.cells.is_empty() {
            xml.push_str(r#"<dimension ref="A1"/>"#);
        } else {
            let last = CellCoord::new(
                self.column_count() as usize - 1,
                self.row_count() as usize - 1,
            );
            write!(xml, r#"<dimension ref="A1:{}"/>"#, last)?;
        }

        if !self.column_widths.is_empty() {
            xml.push_str("<cols>");
            for (&col, &width) in &self.column_widths {
                write!(
                    xml,
                    r#"<col min="{0}" max="{0}" width="{1}" customWidth="1"/>"#,
                    col + 1,
                    width
                )?;
            }
            xml.push_str("</cols>");
        }

        xml.push_str("<sheetData>");
        let mut current_row: Option<u32> = None;
        for (&(row, col), cell) in &self.cells {
            if current_row != Some(row) {
                if current_row.is_some() {
                    xml.push_str("</row>");
                }
                write!(xml, r#"<row r="{}">"#, row + 1)?;
                current_row = Some(row);
            }

            let reference = format!("{}{}", digit_to_alpha(col as usize), row + 1);
            write!(xml, r#"<c r="{}""#, reference)?;
            if let Some(ref format) = cell.format {
                let style = styles.add_cell_format(format);
                if style != 0 {
                    write!(xml, r#" s="{}""#, style)?;
                }
            }
            match cell.data {
                CellData::String(ref s) => {
                    let idx = strings.add_string(s);
                    write!(xml, r#" t="s"><v>{}</v></c>"#, idx)?;
                },
                CellData::Number(n) => {
                    write!(xml, "><v>{}</v></c>", n)?;
                },
            }
        }
        if current_row.is_some() {
            xml.push_str("</row>");
        }
        xml.push_str("</sheetData></worksheet>");
        Ok(xml)
    }
}
