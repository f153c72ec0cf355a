//! Common types and utilities shared across the document writers.
//!
//! This module provides the unified error type, XML helpers and document
//! metadata used by both the OpenDocument and the SpreadsheetML writers.

// Submodule declarations
pub mod error;
pub mod metadata;
pub mod xml;

// Re-exports for convenience
pub use error::{Error, Result};
pub use metadata::Metadata;
