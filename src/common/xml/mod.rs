//! XML helpers shared by the ODF and SpreadsheetML writers.

mod escape;

pub use escape::escape_xml;
