//! Unified error types for Sheetsmith.
use thiserror::Error;

/// Main error type for Sheetsmith operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML generation error
    #[error("XML error: {0}")]
    XmlError(String),

    /// Image encoding error
    #[error("Image error: {0}")]
    ImageError(String),

    /// Invalid file format or package structure
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    /// Input outside of the supported range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Template file could not be processed
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration file could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Sheetsmith operations.
pub type Result<T> = std::result::Result<T, Error>;
