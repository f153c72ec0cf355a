//! OpenDocument Spreadsheet builder.
//!
//! This module provides a builder for creating new ODS spreadsheets from scratch.

use crate::common::{Error, Metadata, Result, xml::escape_xml};
use crate::odf::ODS_MIME_TYPE;
use crate::odf::core::{OdfStructure, PackageWriter};
use crate::odf::ods::{CellStyle, NumberStyle, Sheet};
use std::collections::HashSet;
use std::path::Path;

/// Builder for creating new ODS spreadsheets.
///
/// Sheets, automatic styles and metadata are collected first and serialized
/// into a package containing `mimetype`, `META-INF/manifest.xml`,
/// `content.xml`, `styles.xml`, `meta.xml` and `settings.xml`.
///
/// # Examples
///
/// ```no_run
/// use sheetsmith::odf::{Cell, CellStyle, Row, Sheet, SpreadsheetBuilder};
///
/// # fn main() -> sheetsmith::Result<()> {
/// let mut sheet = Sheet::new("Inflationsraten");
/// sheet.push_row(Row::from_cells(vec![
///     Cell::text("Jahr").styled("ce2"),
///     Cell::text("Rate (%)").styled("ce2"),
/// ]));
/// sheet.push_row(Row::from_cells(vec![Cell::number(2011.0), Cell::number(2.6)]));
///
/// let mut builder = SpreadsheetBuilder::new();
/// builder.add_style(CellStyle::new("ce2").background("#667eea").bold());
/// builder.add_sheet(sheet);
/// builder.save("rates.ods")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SpreadsheetBuilder {
    sheets: Vec<Sheet>,
    styles: Vec<CellStyle>,
    number_styles: Vec<NumberStyle>,
    metadata: Metadata,
}

impl SpreadsheetBuilder {
    /// Create a new spreadsheet builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set document metadata
    pub fn set_metadata(&mut self, metadata: Metadata) -> &mut Self {
        self.metadata = metadata;
        self
    }

    /// Register an automatic cell style
    pub fn add_style(&mut self, style: CellStyle) -> &mut Self {
        self.styles.push(style);
        self
    }

    /// Register a number style
    pub fn add_number_style(&mut self, style: NumberStyle) -> &mut Self {
        self.number_styles.push(style);
        self
    }

    /// Add a sheet; sheets keep their insertion order
    pub fn add_sheet(&mut self, sheet: Sheet) -> &mut Self {
        self.sheets.push(sheet);
        self
    }

    /// Sheets added so far
    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    /// Check sheet names and style references before serializing.
    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for sheet in &self.sheets {
            if sheet.name.is_empty() {
                return Err(Error::InvalidInput("sheet name must not be empty".to_string()));
            }
            // Calc rejects []*?:/\ and a leading or trailing apostrophe
            if sheet.name.contains(['[', ']', '*', '?', ':', '/', '\\'])
                || sheet.name.starts_with('\'')
                || sheet.name.ends_with('\'')
            {
                return Err(Error::InvalidInput(format!(
                    "invalid sheet name '{}'",
                    sheet.name
                )));
            }
            if !names.insert(sheet.name.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "duplicate sheet name '{}'",
                    sheet.name
                )));
            }
        }

        let mut known: HashSet<&str> = self.styles.iter().map(|s| s.name.as_str()).collect();
        known.insert("Default");
        for sheet in &self.sheets {
            let unknown = sheet
                .rows
                .iter()
                .flat_map(|r| r.cells.iter())
                .filter_map(|c| c.style.as_deref())
                .find(|style| !known.contains(style));
            if let Some(style) = unknown {
                return Err(Error::InvalidInput(format!(
                    "sheet '{}' references undefined style '{}'",
                    sheet.name, style
                )));
            }
        }

        let data_styles: HashSet<&str> =
            self.number_styles.iter().map(|s| s.name.as_str()).collect();
        if let Some(style) = self
            .styles
            .iter()
            .find(|s| s.data_style.as_deref().is_some_and(|d| !data_styles.contains(d)))
        {
            return Err(Error::InvalidInput(format!(
                "style '{}' references undefined number style",
                style.name
            )));
        }

        Ok(())
    }

    fn push_table(out: &mut String, sheet: &Sheet) {
        out.push_str(&format!(
            r#"<table:table table:name="{}">"#,
            escape_xml(&sheet.name)
        ));

        let max_cols = sheet.column_count();
        if max_cols <= 1 {
            out.push_str("<table:table-column/>");
        } else {
            out.push_str(&format!(
                r#"<table:table-column table:number-columns-repeated="{}"/>"#,
                max_cols
            ));
        }

        for row in &sheet.rows {
            out.push_str("<table:table-row>");
            if row.cells.is_empty() {
                // A row needs at least one cell to be valid
                out.push_str("<table:table-cell/>");
            }
            for cell in &row.cells {
                cell.write_xml(out);
            }
            out.push_str("</table:table-row>\n");
        }

        out.push_str("</table:table>\n");
    }

    /// Generate the complete content.xml for the spreadsheet
    pub fn content_xml(&self) -> String {
        let cell_count: usize = self
            .sheets
            .iter()
            .flat_map(|s| s.rows.iter())
            .map(|r| r.cells.len())
            .sum();
        let mut out = String::with_capacity(1024 + cell_count * 96);

        out.push_str(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0" xmlns:table="urn:oasis:names:tc:opendocument:xmlns:table:1.0" xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0" xmlns:number="urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0" xmlns:of="urn:oasis:names:tc:opendocument:xmlns:of:1.2" office:version="1.2">
<office:automatic-styles>"#,
        );
        for style in &self.number_styles {
            style.write_xml(&mut out);
        }
        for style in &self.styles {
            style.write_xml(&mut out);
        }
        out.push_str("</office:automatic-styles>\n<office:body><office:spreadsheet>\n");

        for sheet in &self.sheets {
            Self::push_table(&mut out, sheet);
        }

        out.push_str("</office:spreadsheet></office:body></office:document-content>\n");
        out
    }

    /// Build the spreadsheet and return as bytes
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate or empty sheet names, undefined style
    /// references, or when writing the archive fails.
    pub fn build(&self) -> Result<Vec<u8>> {
        self.validate()?;

        let mut writer = PackageWriter::new();
        writer.set_mimetype(ODS_MIME_TYPE)?;
        writer.add_file("content.xml", self.content_xml().as_bytes())?;
        writer.add_file("styles.xml", OdfStructure::default_styles_xml().as_bytes())?;
        writer.add_file("meta.xml", self.metadata.to_odf_meta_xml().as_bytes())?;
        writer.add_file(
            "settings.xml",
            OdfStructure::default_settings_xml().as_bytes(),
        )?;

        writer.finish_to_bytes()
    }

    /// Build and save the spreadsheet to a file
    ///
    /// Returns the number of bytes written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let bytes = self.build()?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::odf::{Cell, CellValue, Row};
    use std::io::{Cursor, Read};

    fn sample() -> SpreadsheetBuilder {
        let mut sheet = Sheet::new("Rechner");
        sheet.push_row(Row::from_cells(vec![
            Cell::text("Basisjahr:").styled("ce1"),
            Cell::number(2014.0),
        ]));
        sheet.push_row(Row::spacer());
        sheet.push_row(Row::from_cells(vec![
            Cell::text("Faktor"),
            Cell::formula("[.B1]*2", CellValue::Number(4028.0)).styled("ce4"),
        ]));

        let mut builder = SpreadsheetBuilder::new();
        builder
            .add_number_style(NumberStyle::new("N0", 2))
            .add_style(CellStyle::new("ce1").bold())
            .add_style(CellStyle::new("ce4").data_style("N0"))
            .add_sheet(sheet);
        builder
    }

    #[test]
    fn test_required_entries() {
        let bytes = sample().build().unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        for name in [
            "mimetype",
            "META-INF/manifest.xml",
            "content.xml",
            "styles.xml",
            "meta.xml",
            "settings.xml",
        ] {
            assert!(zip.by_name(name).is_ok(), "missing {}", name);
        }
        assert_eq!(zip.by_index(0).unwrap().name(), "mimetype");

        let mut content = String::new();
        zip.by_name("content.xml")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert!(content.contains(r#"<table:table table:name="Rechner">"#));
        assert!(content.contains(r#"table:formula="of:=[.B1]*2""#));
    }

    #[test]
    fn test_content_is_well_formed() {
        let content = sample().content_xml();
        let mut reader = quick_xml::Reader::from_str(&content);
        let mut rows = 0;
        loop {
            match reader.read_event().unwrap() {
                quick_xml::events::Event::Start(e) if e.name().as_ref() == b"table:table-row" => {
                    rows += 1
                },
                quick_xml::events::Event::Eof => break,
                _ => {},
            }
        }
        assert_eq!(rows, 3);
    }

    #[test]
    fn test_duplicate_sheet_rejected() {
        let mut builder = SpreadsheetBuilder::new();
        builder.add_sheet(Sheet::new("A")).add_sheet(Sheet::new("A"));
        assert!(matches!(builder.build(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_invalid_sheet_name_rejected() {
        for name in ["3C/OA", "RES[1]", "A:B", "Was?", "'RES1", "a\\b"] {
            let mut builder = SpreadsheetBuilder::new();
            builder.add_sheet(Sheet::new(name));
            assert!(
                matches!(builder.build(), Err(Error::InvalidInput(_))),
                "{} accepted",
                name
            );
        }

        let mut builder = SpreadsheetBuilder::new();
        builder.add_sheet(Sheet::new("3C-OA")).add_sheet(Sheet::new("WE KW"));
        assert!(builder.build().is_ok());
    }

    #[test]
    fn test_undefined_style_rejected() {
        let mut sheet = Sheet::new("A");
        sheet.push_row(Row::from_cells(vec![Cell::text("x").styled("missing")]));
        let mut builder = SpreadsheetBuilder::new();
        builder.add_sheet(sheet);
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_undefined_number_style_rejected() {
        let mut builder = SpreadsheetBuilder::new();
        builder.add_style(CellStyle::new("ce4").data_style("N9"));
        assert!(builder.build().is_err());
    }

    #[test]
    fn test_save_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.ods");
        let written = sample().save(&path).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, written);
    }
}
