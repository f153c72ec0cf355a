//! Automatic styles for ODS content.
//!
//! Only the handful of table-cell properties the generators use are modelled:
//! background colour, text colour, weight and size, plus a link to a number
//! style for fixed decimal places.

use crate::common::xml::escape_xml;

/// An automatic `table-cell` style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CellStyle {
    /// Style name referenced by `table:style-name`
    pub name: String,
    /// Parent style, usually `Default`
    pub parent: Option<String>,
    /// Background colour (`#rrggbb`)
    pub background: Option<String>,
    /// Text colour (`#rrggbb`)
    pub color: Option<String>,
    /// Bold text
    pub bold: bool,
    /// Font size, e.g. `14pt`
    pub font_size: Option<String>,
    /// Name of a [`NumberStyle`] applied to the cell
    pub data_style: Option<String>,
}

impl CellStyle {
    /// Create a style with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Inherit from the `Default` cell style.
    pub fn with_default_parent(mut self) -> Self {
        self.parent = Some("Default".to_string());
        self
    }

    pub fn background(mut self, color: &str) -> Self {
        self.background = Some(color.to_string());
        self
    }

    pub fn color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn font_size(mut self, size: &str) -> Self {
        self.font_size = Some(size.to_string());
        self
    }

    pub fn data_style(mut self, name: &str) -> Self {
        self.data_style = Some(name.to_string());
        self
    }

    /// Serialize as a `style:style` element.
    pub(crate) fn write_xml(&self, out: &mut String) {
        out.push_str(&format!(
            r#"<style:style style:name="{}" style:family="table-cell""#,
            escape_xml(&self.name)
        ));
        if let Some(ref parent) = self.parent {
            out.push_str(&format!(
                r#" style:parent-style-name="{}""#,
                escape_xml(parent)
            ));
        }
        if let Some(ref data_style) = self.data_style {
            out.push_str(&format!(
                r#" style:data-style-name="{}""#,
                escape_xml(data_style)
            ));
        }
        out.push('>');

        if let Some(ref background) = self.background {
            out.push_str(&format!(
                r#"<style:table-cell-properties fo:background-color="{}"/>"#,
                escape_xml(background)
            ));
        }

        let mut text_props = String::new();
        if let Some(ref color) = self.color {
            text_props.push_str(&format!(r#" fo:color="{}""#, escape_xml(color)));
        }
        if self.bold {
            text_props.push_str(r#" fo:font-weight="bold""#);
        }
        if let Some(ref size) = self.font_size {
            text_props.push_str(&format!(r#" fo:font-size="{}""#, escape_xml(size)));
        }
        if !text_props.is_empty() {
            out.push_str(&format!("<style:text-properties{}/>", text_props));
        }

        out.push_str("</style:style>");
    }
}

/// A `number:number-style` with fixed decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberStyle {
    /// Style name referenced by `style:data-style-name`
    pub name: String,
    /// Number of decimal places
    pub decimal_places: u8,
    /// Minimum number of integer digits
    pub min_integer_digits: u8,
}

impl NumberStyle {
    pub fn new(name: &str, decimal_places: u8) -> Self {
        Self {
            name: name.to_string(),
            decimal_places,
            min_integer_digits: 1,
        }
    }

    pub(crate) fn write_xml(&self, out: &mut String) {
        out.push_str(&format!(
            r#"<number:number-style style:name="{}"><number:number number:decimal-places="{}" number:min-integer-digits="{}"/></number:number-style>"#,
            escape_xml(&self.name),
            self.decimal_places,
            self.min_integer_digits
        ));
    }
}
