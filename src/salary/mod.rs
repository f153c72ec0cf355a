//! Salary table code generation.
//!
//! Reads a plain-text template of bracketed section headers and `key=value`
//! lines and renders the tables as Java `HashMap` initialisation code.
//!
//! ```text
//! [M1 Berufsoffiziere]
//! 1=2845.10
//! daz=4120.00
//!
//! [MBO1]
//! 1.1=120.50
//! ```
//!
//! Basic salary sections (`M1`, `M2`, `M3`) map a step to an amount; the
//! keys `daz` and `DAZ` stand for steps 20 and 21. Allowance sections
//! (`MBO1`, `MBO2`, `MUO1`) map `group.step` keys to amounts.

mod codegen;
mod parser;

pub use codegen::{generate_salary_code, statistics_lines};
pub use parser::{parse_template, parse_template_file};

use crate::common::Error;
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

/// Exit status of a successful [`run`].
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status of a failed [`run`].
pub const EXIT_FAILURE: u8 = 1;

/// A table section of the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    M1,
    M2,
    M3,
    Mbo1,
    Mbo2,
    Muo1,
}

impl Section {
    /// All sections in header matching and output order.
    pub const ALL: [Section; 6] = [
        Section::M1,
        Section::M2,
        Section::M3,
        Section::Mbo1,
        Section::Mbo2,
        Section::Muo1,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Section::M1 => "M1",
            Section::M2 => "M2",
            Section::M3 => "M3",
            Section::Mbo1 => "MBO1",
            Section::Mbo2 => "MBO2",
            Section::Muo1 => "MUO1",
        }
    }

    /// Basic salary sections hold `step -> amount`.
    pub fn is_basic(self) -> bool {
        matches!(self, Section::M1 | Section::M2 | Section::M3)
    }

    /// The first section whose name occurs in the header text.
    ///
    /// ```
    /// use sheetsmith::salary::Section;
    ///
    /// assert_eq!(Section::from_header("M2 - Unteroffiziere"), Some(Section::M2));
    /// assert_eq!(Section::from_header("MUO1"), Some(Section::Muo1));
    /// assert_eq!(Section::from_header("Sonstiges"), None);
    /// ```
    pub fn from_header(text: &str) -> Option<Section> {
        Self::ALL.into_iter().find(|s| text.contains(s.name()))
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Step key of `daz` in basic salary sections.
pub const DAZ_LOWER_STEP: i32 = 20;
/// Step key of `DAZ` in basic salary sections.
pub const DAZ_UPPER_STEP: i32 = 21;

/// Parsed template content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalaryData {
    basic: BTreeMap<Section, BTreeMap<i32, f64>>,
    allowances: BTreeMap<Section, BTreeMap<i32, BTreeMap<i32, f64>>>,
    /// 1-based numbers of the lines that were skipped as malformed
    pub skipped: Vec<usize>,
}

impl SalaryData {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_basic(&mut self, section: Section, step: i32, amount: f64) {
        self.basic.entry(section).or_default().insert(step, amount);
    }

    pub(crate) fn insert_allowance(
        &mut self,
        section: Section,
        group: i32,
        step: i32,
        amount: f64,
    ) {
        self.allowances
            .entry(section)
            .or_default()
            .entry(group)
            .or_default()
            .insert(step, amount);
    }

    /// Steps and amounts of a basic salary section, sorted by step.
    pub fn basic(&self, section: Section) -> Option<&BTreeMap<i32, f64>> {
        self.basic.get(&section)
    }

    /// Groups with their steps and amounts of an allowance section, sorted.
    pub fn allowances(&self, section: Section) -> Option<&BTreeMap<i32, BTreeMap<i32, f64>>> {
        self.allowances.get(&section)
    }

    /// Entries of a basic section, or groups of an allowance section.
    pub fn count(&self, section: Section) -> usize {
        if section.is_basic() {
            self.basic(section).map_or(0, BTreeMap::len)
        } else {
            self.allowances(section).map_or(0, BTreeMap::len)
        }
    }
}

/// Parse `template` and write the Java code to `out` and the statistics to
/// `err`.
///
/// A missing template or any other failure is reported on `err` and yields
/// [`EXIT_FAILURE`]. Only write errors on the sinks are returned as `Err`.
pub fn run<O: Write, E: Write>(template: &Path, out: &mut O, err: &mut E) -> io::Result<u8> {
    let data = match parse_template_file(template) {
        Ok(data) => data,
        Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
            writeln!(err, "Error: File '{}' not found", template.display())?;
            return Ok(EXIT_FAILURE);
        },
        Err(e) => {
            writeln!(err, "Error: {}", e)?;
            return Ok(EXIT_FAILURE);
        },
    };

    writeln!(out, "{}", generate_salary_code(&data))?;
    for line in statistics_lines(&data) {
        writeln!(err, "{}", line)?;
    }
    Ok(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_on(path: &Path) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(path, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_run_writes_code_and_statistics() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gehaltsdaten_template.txt");
        std::fs::write(&path, "[M1]\n1=2845.10\n[MBO1]\n1.1=120.50\n").unwrap();

        let (code, out, err) = run_on(&path);
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.contains("m1Salaries.put(1, 2845.10);"));
        assert!(out.contains("mbo1_fg1.put(1, 120.50);"));
        assert!(!out.contains("STATISTIK"));
        assert!(err.contains("// ===== STATISTIK ====="));
        assert!(err.contains("// M1 Einträge: 1"));
        assert!(err.contains("// MBO1 Funktionsgruppen: 1"));
    }

    #[test]
    fn test_run_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fehlt.txt");

        let (code, out, err) = run_on(&path);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, format!("Error: File '{}' not found\n", path.display()));
    }

    #[test]
    fn test_run_other_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("binary.txt");
        std::fs::write(&path, [0x5b, 0x4d, 0x31, 0x5d, 0x0a, 0xff, 0xfe]).unwrap();

        let (code, out, err) = run_on(&path);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(err.starts_with("Error: Template error: "), "{}", err);
    }
}
