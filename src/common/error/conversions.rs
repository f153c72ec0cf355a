//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert errors of the
//! underlying crates to the unified Error type.

use super::types::Error;

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipError(err.to_string())
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Error::XmlError(format!("XML write error: {}", err))
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(feature = "imgconv")]
impl From<::image::ImageError> for Error {
    fn from(err: ::image::ImageError) -> Self {
        Error::ImageError(err.to_string())
    }
}
