//! Styles.xml generator for XLSX files.
//!
//! Collects the unique fonts, fills and cell formats used by the worksheets,
//! assigns indices to them and renders `xl/styles.xml`.

use crate::common::Result;
use crate::common::xml::escape_xml;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// Font properties of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CellFont {
    /// Bold text
    pub bold: bool,
    /// Size in points
    pub size: u32,
    /// Text colour as `RRGGBB`
    pub color: Option<String>,
    /// Font family name
    pub name: String,
}

impl Default for CellFont {
    fn default() -> Self {
        Self {
            bold: false,
            size: 11,
            color: None,
            name: "Calibri".to_string(),
        }
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
}

impl HorizontalAlignment {
    fn as_str(self) -> &'static str {
        match self {
            HorizontalAlignment::Left => "left",
            HorizontalAlignment::Center => "center",
            HorizontalAlignment::Right => "right",
        }
    }
}

/// Vertical alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

impl VerticalAlignment {
    fn as_str(self) -> &'static str {
        match self {
            VerticalAlignment::Top => "top",
            VerticalAlignment::Center => "center",
            VerticalAlignment::Bottom => "bottom",
        }
    }
}

/// Formatting of a single cell.
///
/// # Examples
///
/// ```
/// use sheetsmith::xlsx::{CellFont, CellFormat, HorizontalAlignment, VerticalAlignment};
///
/// let header = CellFormat::default()
///     .font(CellFont { bold: true, size: 12, color: Some("FFFFFF".into()), ..CellFont::default() })
///     .solid_fill("4472C4")
///     .align(HorizontalAlignment::Center, VerticalAlignment::Center);
/// assert_eq!(header.fill.as_deref(), Some("4472C4"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CellFormat {
    /// Font, `None` for the workbook default
    pub font: Option<CellFont>,
    /// Solid fill colour as `RRGGBB`
    pub fill: Option<String>,
    /// Horizontal alignment
    pub horizontal: Option<HorizontalAlignment>,
    /// Vertical alignment
    pub vertical: Option<VerticalAlignment>,
}

impl CellFormat {
    pub fn font(mut self, font: CellFont) -> Self {
        self.font = Some(font);
        self
    }

    pub fn solid_fill(mut self, rgb: &str) -> Self {
        self.fill = Some(rgb.to_string());
        self
    }

    pub fn align(mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        self.horizontal = Some(horizontal);
        self.vertical = Some(vertical);
        self
    }
}

/// Cell format record: font index, fill index and the alignment.
type Xf = (usize, usize, Option<HorizontalAlignment>, Option<VerticalAlignment>);

/// Builder for generating styles.xml content.
#[derive(Debug)]
pub struct StylesBuilder {
    fonts: Vec<CellFont>,
    font_map: HashMap<CellFont, usize>,
    /// Solid fill colours; indices 0 and 1 are the mandatory `none`/`gray125` fills
    fills: Vec<String>,
    fill_map: HashMap<String, usize>,
    cell_formats: Vec<Xf>,
    cell_format_map: HashMap<CellFormat, usize>,
}

impl Default for StylesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StylesBuilder {
    /// Offset of the first custom fill
    const FIRST_CUSTOM_FILL: usize = 2;

    /// Create a StylesBuilder with the default font and format.
    pub fn new() -> Self {
        let default_font = CellFont::default();
        let mut font_map = HashMap::new();
        font_map.insert(default_font.clone(), 0);

        let mut cell_format_map = HashMap::new();
        cell_format_map.insert(CellFormat::default(), 0);

        Self {
            fonts: vec![default_font],
            font_map,
            fills: Vec::new(),
            fill_map: HashMap::new(),
            cell_formats: vec![(0, 0, None, None)],
            cell_format_map,
        }
    }

    /// Add a cell format and return its style index.
    ///
    /// If the format has already been added, returns the existing index.
    pub fn add_cell_format(&mut self, format: &CellFormat) -> usize {
        if let Some(&idx) = self.cell_format_map.get(format) {
            return idx;
        }

        let font_id = match format.font {
            Some(ref font) => self.add_font(font),
            None => 0,
        };
        let fill_id = match format.fill {
            Some(ref rgb) => self.add_fill(rgb),
            None => 0,
        };

        let idx = self.cell_formats.len();
        self.cell_formats
            .push((font_id, fill_id, format.horizontal, format.vertical));
        self.cell_format_map.insert(format.clone(), idx);
        idx
    }

    fn add_font(&mut self, font: &CellFont) -> usize {
        if let Some(&idx) = self.font_map.get(font) {
            return idx;
        }
        let idx = self.fonts.len();
        self.fonts.push(font.clone());
        self.font_map.insert(font.clone(), idx);
        idx
    }

    fn add_fill(&mut self, rgb: &str) -> usize {
        let rgb = rgb.trim_start_matches('#').to_uppercase();
        if let Some(&idx) = self.fill_map.get(&rgb) {
            return idx;
        }
        let idx = Self::FIRST_CUSTOM_FILL + self.fills.len();
        self.fills.push(rgb.clone());
        self.fill_map.insert(rgb, idx);
        idx
    }

    /// Number of cell formats (XF records).
    pub fn format_count(&self) -> usize {
        self.cell_formats.len()
    }

    /// Generate `xl/styles.xml`.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(2048);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(xml, r#"<styleSheet xmlns="{}">"#, super::NS_MAIN)?;

        write!(xml, r#"<fonts count="{}">"#, self.fonts.len())?;
        for font in &self.fonts {
            xml.push_str("<font>");
            if font.bold {
                xml.push_str("<b/>");
            }
            write!(xml, r#"<sz val="{}"/>"#, font.size)?;
            if let Some(ref color) = font.color {
                write!(xml, r#"<color rgb="FF{}"/>"#, color.trim_start_matches('#'))?;
            }
            write!(xml, r#"<name val="{}"/><family val="2"/>"#, escape_xml(&font.name))?;
            xml.push_str("</font>");
        }
        xml.push_str("</fonts>");

        write!(
            xml,
            r#"<fills count="{}"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill>"#,
            Self::FIRST_CUSTOM_FILL + self.fills.len()
        )?;
        for rgb in &self.fills {
            write!(
                xml,
                r#"<fill><patternFill patternType="solid"><fgColor rgb="FF{0}"/><bgColor rgb="FF{0}"/></patternFill></fill>"#,
                rgb
            )?;
        }
        xml.push_str("</fills>");

        xml.push_str(r#"<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>"#);
        xml.push_str(r#"<cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>"#);

        write!(xml, r#"<cellXfs count="{}">"#, self.cell_formats.len())?;
        for &(font_id, fill_id, horizontal, vertical) in &self.cell_formats {
            write!(
                xml,
                r#"<xf numFmtId="0" fontId="{}" fillId="{}" borderId="0" xfId="0""#,
                font_id, fill_id
            )?;
            if font_id != 0 {
                xml.push_str(r#" applyFont="1""#);
            }
            if fill_id != 0 {
                xml.push_str(r#" applyFill="1""#);
            }
            if horizontal.is_some() || vertical.is_some() {
                xml.push_str(r#" applyAlignment="1"><alignment"#);
                if let Some(h) = horizontal {
                    write!(xml, r#" horizontal="{}""#, h.as_str())?;
                }
                if let Some(v) = vertical {
                    write!(xml, r#" vertical="{}""#, v.as_str())?;
                }
                xml.push_str("/></xf>");
            } else {
                xml.push_str("/>");
            }
        }
        xml.push_str("</cellXfs>");

        xml.push_str(r#"<cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>"#);
        xml.push_str("</styleSheet>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> CellFormat {
        CellFormat::default()
            .font(CellFont {
                bold: true,
                size: 12,
                color: Some("FFFFFF".to_string()),
                ..CellFont::default()
            })
            .solid_fill("4472C4")
            .align(HorizontalAlignment::Center, VerticalAlignment::Center)
    }

    #[test]
    fn test_format_dedup() {
        let mut builder = StylesBuilder::new();
        assert_eq!(builder.add_cell_format(&CellFormat::default()), 0);
        let a = builder.add_cell_format(&header());
        let b = builder.add_cell_format(&header());
        assert_eq!(a, 1);
        assert_eq!(a, b);
        assert_eq!(builder.format_count(), 2);
    }

    #[test]
    fn test_styles_xml() {
        let mut builder = StylesBuilder::new();
        builder.add_cell_format(&header());
        builder.add_cell_format(
            &CellFormat::default().align(HorizontalAlignment::Center, VerticalAlignment::Center),
        );

        let xml = builder.to_xml().unwrap();
        assert!(xml.contains(r#"<fonts count="2">"#));
        assert!(xml.contains(r#"<b/><sz val="12"/><color rgb="FFFFFFFF"/>"#));
        assert!(xml.contains(r#"<fills count="3">"#));
        assert!(xml.contains(r#"<fgColor rgb="FF4472C4"/>"#));
        assert!(xml.contains(r#"<cellXfs count="3">"#));
        assert!(xml.contains(
            r#"<xf numFmtId="0" fontId="1" fillId="2" borderId="0" xfId="0" applyFont="1" applyFill="1" applyAlignment="1"><alignment horizontal="center" vertical="center"/></xf>"#
        ));
        assert!(xml.contains(
            r#"<xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0" applyAlignment="1">"#
        ));
    }
}
