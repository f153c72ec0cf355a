//! Document metadata shared by the ODS and XLSX writers.
//!
//! Both formats carry a small property set (title, description, generator,
//! timestamps); this module keeps it in one place and renders the ODF
//! `meta.xml` part.

use chrono::{DateTime, Utc};

use crate::common::xml::escape_xml;

/// Document metadata structure.
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,
    /// Document description/comments
    pub description: Option<String>,
    /// Document author/creator
    pub author: Option<String>,
    /// Application that generated the document
    pub generator: Option<String>,
    /// Creation date; `None` means "now" at build time
    pub created: Option<DateTime<Utc>>,
}

impl Metadata {
    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Creation timestamp, falling back to the current time.
    pub fn created_or_now(&self) -> DateTime<Utc> {
        self.created.unwrap_or_else(Utc::now)
    }

    /// Generator string written to the documents.
    pub fn generator_or_default(&self) -> &str {
        self.generator
            .as_deref()
            .unwrap_or(concat!("Sheetsmith/", env!("CARGO_PKG_VERSION")))
    }

    /// Render the ODF `meta.xml` part.
    pub fn to_odf_meta_xml(&self) -> String {
        let now = self.created_or_now().to_rfc3339();

        let mut meta = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-meta xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:meta="urn:oasis:names:tc:opendocument:xmlns:meta:1.0" xmlns:dc="http://purl.org/dc/elements/1.1/" office:version="1.2"><office:meta><meta:generator>{}</meta:generator><meta:creation-date>{}</meta:creation-date><dc:date>{}</dc:date>"#,
            escape_xml(self.generator_or_default()),
            now,
            now
        );

        if let Some(ref title) = self.title {
            meta.push_str(&format!("<dc:title>{}</dc:title>", escape_xml(title)));
        }
        if let Some(ref description) = self.description {
            meta.push_str(&format!(
                "<dc:description>{}</dc:description>",
                escape_xml(description)
            ));
        }
        if let Some(ref author) = self.author {
            meta.push_str(&format!("<dc:creator>{}</dc:creator>", escape_xml(author)));
        }

        meta.push_str("</office:meta></office:document-meta>");
        meta
    }
}
