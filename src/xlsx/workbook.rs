//! XLSX workbook and package assembly.

use super::{SharedStrings, StylesBuilder, Worksheet};
use crate::common::xml::escape_xml;
use crate::common::{Error, Metadata, Result};
use std::collections::HashSet;
use std::fmt::Write as FmtWrite;
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::{SimpleFileOptions, ZipWriter};

/// A workbook holding one or more worksheets.
///
/// # Examples
///
/// ```no_run
/// use sheetsmith::xlsx::Workbook;
///
/// # fn main() -> sheetsmith::Result<()> {
/// let mut wb = Workbook::new();
/// let ws = wb.add_worksheet("Namensliste");
/// ws.write_string(0, 0, "Nr.", None);
/// ws.write_number(1, 0, 1.0, None);
/// wb.save("Namensliste.xlsx")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    metadata: Metadata,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set document metadata written to `docProps/core.xml`.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = metadata;
    }

    /// Add a new worksheet and return it for writing.
    pub fn add_worksheet(&mut self, name: &str) -> &mut Worksheet {
        self.worksheets.push(Worksheet::new(name));
        let last = self.worksheets.len() - 1;
        &mut self.worksheets[last]
    }

    /// Get a worksheet by index.
    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    fn validate(&self) -> Result<()> {
        if self.worksheets.is_empty() {
            return Err(Error::InvalidInput(
                "workbook needs at least one worksheet".to_string(),
            ));
        }
        let mut names = HashSet::new();
        for ws in &self.worksheets {
            let name = ws.name();
            // Excel limits sheet names to 31 characters and forbids []:*?/\
            if name.is_empty()
                || name.chars().count() > 31
                || name.contains(['[', ']', ':', '*', '?', '/', '\\'])
            {
                return Err(Error::InvalidInput(format!("invalid sheet name '{}'", name)));
            }
            if !names.insert(name.to_lowercase()) {
                return Err(Error::InvalidInput(format!("duplicate sheet name '{}'", name)));
            }
        }
        Ok(())
    }

    fn content_types_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        xml.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        xml.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        xml.push_str(r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#);
        for i in 1..=self.worksheets.len() {
            write!(
                xml,
                r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i
            )?;
        }
        xml.push_str(r#"<Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#);
        xml.push_str(r#"<Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#);
        xml.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
        xml.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
        xml.push_str("</Types>");
        Ok(xml)
    }

    fn root_rels_xml() -> &'static str {
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
            r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
            "</Relationships>"
        )
    }

    /// Generate workbook.xml content.
    fn workbook_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<workbook xmlns="{}" xmlns:r="{}"><sheets>"#,
            super::NS_MAIN,
            super::NS_RELATIONSHIPS
        )?;
        for (i, ws) in self.worksheets.iter().enumerate() {
            write!(
                xml,
                r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(ws.name()),
                i + 1,
                i + 1
            )?;
        }
        xml.push_str("</sheets></workbook>");
        Ok(xml)
    }

    /// Relationships of the workbook part: sheets first, then styles and shared strings.
    fn workbook_rels_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
        let count = self.worksheets.len();
        for i in 1..=count {
            write!(
                xml,
                r#"<Relationship Id="rId{0}" Type="{1}/worksheet" Target="worksheets/sheet{0}.xml"/>"#,
                i,
                super::NS_RELATIONSHIPS
            )?;
        }
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}/styles" Target="styles.xml"/>"#,
            count + 1,
            super::NS_RELATIONSHIPS
        )?;
        write!(
            xml,
            r#"<Relationship Id="rId{}" Type="{}/sharedStrings" Target="sharedStrings.xml"/>"#,
            count + 2,
            super::NS_RELATIONSHIPS
        )?;
        xml.push_str("</Relationships>");
        Ok(xml)
    }

    fn core_xml(&self) -> Result<String> {
        let created = self
            .metadata
            .created_or_now()
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        let mut xml = String::with_capacity(512);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#);
        if let Some(ref title) = self.metadata.title {
            write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
        }
        if let Some(ref description) = self.metadata.description {
            write!(xml, "<dc:description>{}</dc:description>", escape_xml(description))?;
        }
        if let Some(ref author) = self.metadata.author {
            write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(author))?;
        }
        write!(
            xml,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{0}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{0}</dcterms:modified>"#,
            created
        )?;
        xml.push_str("</cp:coreProperties>");
        Ok(xml)
    }

    fn app_xml(&self) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>{}</Application></Properties>"#,
            escape_xml(self.metadata.generator_or_default())
        )
    }

    /// Build the workbook and return the package bytes.
    pub fn build(&self) -> Result<Vec<u8>> {
        self.validate()?;

        // Sheets register their strings and formats while rendering, so they
        // go first and the shared parts are serialized afterwards.
        let mut strings = SharedStrings::new();
        let mut styles = StylesBuilder::new();
        let mut sheet_parts = Vec::with_capacity(self.worksheets.len());
        for ws in &self.worksheets {
            sheet_parts.push(ws.to_xml(&mut strings, &mut styles)?);
        }

        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);

        let put = |zip: &mut ZipWriter<Cursor<Vec<u8>>>, path: &str, data: &str| -> Result<()> {
            zip.start_file(path, options)?;
            zip.write_all(data.as_bytes())?;
            Ok(())
        };

        put(&mut zip, "[Content_Types].xml", &self.content_types_xml()?)?;
        put(&mut zip, "_rels/.rels", Self::root_rels_xml())?;
        put(&mut zip, "docProps/core.xml", &self.core_xml()?)?;
        put(&mut zip, "docProps/app.xml", &self.app_xml())?;
        put(&mut zip, "xl/workbook.xml", &self.workbook_xml()?)?;
        put(&mut zip, "xl/_rels/workbook.xml.rels", &self.workbook_rels_xml()?)?;
        put(&mut zip, "xl/styles.xml", &styles.to_xml()?)?;
        put(&mut zip, "xl/sharedStrings.xml", &strings.to_xml()?)?;
        for (i, part) in sheet_parts.iter().enumerate() {
            put(&mut zip, &format!("xl/worksheets/sheet{}.xml", i + 1), part)?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    /// Build and save the workbook to a file
    ///
    /// Returns the number of bytes written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let bytes = self.build()?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len())
    }
}
