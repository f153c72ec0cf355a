//! Shared strings table for XLSX workbooks.

use crate::common::Result;
use crate::common::xml::escape_xml;
use std::collections::HashMap;
use std::fmt::Write as FmtWrite;

/// Shared strings table.
///
/// Excel stores cell strings in a workbook-wide table and cells refer to
/// them by index. Each unique string is stored once.
#[derive(Debug, Default)]
pub struct SharedStrings {
    /// Unique strings in insertion order
    strings: Vec<String>,
    /// Map from string to index for fast lookup
    index: HashMap<String, usize>,
    /// Number of references, including duplicates
    references: usize,
}

impl SharedStrings {
    /// Create a new empty shared strings table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string and return its index.
    ///
    /// If the string already exists, returns the existing index.
    pub fn add_string(&mut self, s: &str) -> usize {
        self.references += 1;
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }
        let idx = self.strings.len();
        self.strings.push(s.to_string());
        self.index.insert(s.to_string(), idx);
        idx
    }

    /// Number of unique strings.
    pub fn unique_count(&self) -> usize {
        self.strings.len()
    }

    /// Serialize the table to `xl/sharedStrings.xml`.
    pub fn to_xml(&self) -> Result<String> {
        let mut xml = String::with_capacity(256 + self.strings.len() * 32);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<sst xmlns="{}" count="{}" uniqueCount="{}">"#,
            super::NS_MAIN,
            self.references,
            self.strings.len()
        )?;
        for s in &self.strings {
            // Keep leading/trailing blanks intact
            if s.starts_with(' ') || s.ends_with(' ') {
                write!(xml, r#"<si><t xml:space="preserve">{}</t></si>"#, escape_xml(s))?;
            } else {
                write!(xml, "<si><t>{}</t></si>", escape_xml(s))?;
            }
        }
        xml.push_str("</sst>");
        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_strings_dedup() {
        let mut ss = SharedStrings::new();
        assert_eq!(ss.add_string("Michael"), 0);
        assert_eq!(ss.add_string("GMOSER"), 1);
        assert_eq!(ss.add_string("Michael"), 0);
        assert_eq!(ss.unique_count(), 2);

        let xml = ss.to_xml().unwrap();
        assert!(xml.contains(r#"count="3" uniqueCount="2""#));
        assert!(xml.contains("<si><t>GMOSER</t></si>"));
    }

    #[test]
    fn test_preserve_space() {
        let mut ss = SharedStrings::new();
        ss.add_string(" Nr.");
        assert!(ss.to_xml().unwrap().contains(r#"<t xml:space="preserve"> Nr.</t>"#));
    }
}
