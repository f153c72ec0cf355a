//! Unified error types for Sheetsmith.
//!
//! This module provides a single error type covering packaging, image
//! encoding, template parsing and configuration failures.

// Submodule declarations
pub mod conversions;
pub mod types;

// Re-exports
pub use types::{Error, Result};
