//! ODF package writing functionality.
//!
//! This module provides utilities for creating and writing ODF files as ZIP archives,
//! including generating manifests and proper file structure.

use crate::common::xml::escape_xml;
use crate::common::{Error, Result};
use std::io::{Cursor, Seek, Write};
use zip::write::{SimpleFileOptions, ZipWriter};

/// Builder for creating ODF packages (ZIP archives)
///
/// This struct helps create valid ODF files by managing the ZIP archive structure,
/// manifest, and required files. The `mimetype` entry is written as soon as it is
/// set, so it always ends up as the first, uncompressed entry of the archive.
///
/// # Examples
///
/// ```no_run
/// # use sheetsmith::odf::PackageWriter;
/// # use sheetsmith::Result;
/// # fn example() -> Result<()> {
/// let mut writer = PackageWriter::new();
/// writer.set_mimetype("application/vnd.oasis.opendocument.spreadsheet")?;
/// writer.add_file("content.xml", b"<office:document-content/>")?;
/// writer.add_file("styles.xml", b"<office:document-styles/>")?;
///
/// let bytes = writer.finish_to_bytes()?;
/// std::fs::write("document.ods", bytes)?;
/// # Ok(())
/// # }
/// ```
pub struct PackageWriter<W: Write + Seek> {
    zip_writer: ZipWriter<W>,
    mimetype: Option<String>,
    manifest_entries: Vec<ManifestEntry>,
}

/// Entry in the ODF manifest
#[derive(Debug, Clone)]
struct ManifestEntry {
    full_path: String,
    media_type: String,
}

impl PackageWriter<Cursor<Vec<u8>>> {
    /// Create a new package writer that writes to memory
    pub fn new() -> Self {
        Self::with_writer(Cursor::new(Vec::new()))
    }

    /// Finish writing and return the bytes
    pub fn finish_to_bytes(self) -> Result<Vec<u8>> {
        let cursor = self.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for PackageWriter<Cursor<Vec<u8>>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Seek> PackageWriter<W> {
    /// Create a new package writer with a custom writer
    pub fn with_writer(writer: W) -> Self {
        Self {
            zip_writer: ZipWriter::new(writer),
            mimetype: None,
            manifest_entries: Vec::new(),
        }
    }

    /// Set the MIME type for the document
    ///
    /// Writes the `mimetype` entry (stored, not deflated) and registers the
    /// root manifest entry. Must be called before any other file is added.
    pub fn set_mimetype(&mut self, mimetype: &str) -> Result<()> {
        if self.mimetype.is_some() {
            return Err(Error::InvalidFormat("MIME type already set".to_string()));
        }
        if !self.manifest_entries.is_empty() {
            return Err(Error::InvalidFormat(
                "mimetype must be the first entry of the package".to_string(),
            ));
        }

        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        self.zip_writer.start_file("mimetype", options)?;
        self.zip_writer.write_all(mimetype.as_bytes())?;

        self.mimetype = Some(mimetype.to_string());
        self.manifest_entries.push(ManifestEntry {
            full_path: "/".to_string(),
            media_type: mimetype.to_string(),
        });

        Ok(())
    }

    /// Add a file to the package
    ///
    /// The file is deflated and registered in the manifest with a media type
    /// guessed from its extension.
    pub fn add_file(&mut self, path: &str, content: &[u8]) -> Result<()> {
        let media_type = Self::guess_media_type(path);
        self.add_file_with_media_type(path, content, media_type)
    }

    /// Add a file to the package with a specific media type
    pub fn add_file_with_media_type(
        &mut self,
        path: &str,
        content: &[u8],
        media_type: &str,
    ) -> Result<()> {
        if path == "mimetype" || path == "META-INF/manifest.xml" {
            return Err(Error::InvalidFormat(format!(
                "'{}' is written by the package writer itself",
                path
            )));
        }

        self.manifest_entries.push(ManifestEntry {
            full_path: path.to_string(),
            media_type: media_type.to_string(),
        });

        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer.start_file(path, options)?;
        self.zip_writer.write_all(content)?;

        Ok(())
    }

    /// Generate the manifest.xml content
    fn generate_manifest(&self) -> String {
        let mut manifest = String::from(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest:manifest xmlns:manifest="urn:oasis:names:tc:opendocument:xmlns:manifest:1.0" manifest:version="1.2">
"#,
        );

        for entry in &self.manifest_entries {
            // The root entry carries the package version as well
            let version = if entry.full_path == "/" {
                r#" manifest:version="1.2""#
            } else {
                ""
            };
            manifest.push_str(&format!(
                r#"  <manifest:file-entry manifest:full-path="{}"{} manifest:media-type="{}"/>
"#,
                escape_xml(&entry.full_path),
                version,
                escape_xml(&entry.media_type)
            ));
        }

        manifest.push_str("</manifest:manifest>\n");
        manifest
    }

    /// Guess media type from file path
    fn guess_media_type(path: &str) -> &'static str {
        if path.ends_with(".xml") {
            "text/xml"
        } else if path.ends_with(".png") {
            "image/png"
        } else if path.ends_with(".jpg") || path.ends_with(".jpeg") {
            "image/jpeg"
        } else if path.ends_with('/') {
            ""
        } else {
            "application/octet-stream"
        }
    }

    /// Finish writing the package and return the underlying writer
    ///
    /// # Errors
    ///
    /// Returns an error if no MIME type has been set or writing to the ZIP
    /// archive fails.
    pub fn finish(mut self) -> Result<W> {
        if self.mimetype.is_none() {
            return Err(Error::InvalidFormat("MIME type not set".to_string()));
        }

        let manifest_content = self.generate_manifest();
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
        self.zip_writer.start_file("META-INF/manifest.xml", options)?;
        self.zip_writer.write_all(manifest_content.as_bytes())?;

        let writer = self.zip_writer.finish()?;
        Ok(writer)
    }
}

/// Helper to create standard ODF parts
pub struct OdfStructure;

impl OdfStructure {
    /// Generate a default styles.xml with the `Default` table-cell style
    pub fn default_styles_xml() -> String {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-styles xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
                        xmlns:style="urn:oasis:names:tc:opendocument:xmlns:style:1.0"
                        xmlns:fo="urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0"
                        office:version="1.2">
  <office:styles>
    <style:style style:name="Default" style:family="table-cell"/>
  </office:styles>
  <office:automatic-styles/>
  <office:master-styles/>
</office:document-styles>
"#
        .to_string()
    }

    /// Generate a default settings.xml skeleton
    pub fn default_settings_xml() -> String {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<office:document-settings xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0"
                          xmlns:config="urn:oasis:names:tc:opendocument:xmlns:config:1.0"
                          office:version="1.2">
  <office:settings>
    <config:config-item-set config:name="ooo:view-settings">
      <config:config-item config:name="VisibleAreaTop" config:type="int">0</config:config-item>
      <config:config-item config:name="VisibleAreaLeft" config:type="int">0</config:config-item>
    </config:config-item-set>
  </office:settings>
</office:document-settings>
"#
        .to_string()
    }
}
