//! Core ODF packaging functionality.
//!
//! An ODF document is a ZIP archive whose first entry is an uncompressed
//! `mimetype` file, followed by the XML parts and `META-INF/manifest.xml`
//! listing every part with its media type.

/// ODF package writing
mod writer;

pub use writer::{OdfStructure, PackageWriter};
