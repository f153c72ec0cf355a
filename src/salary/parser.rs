//! Template parsing.

use super::{DAZ_LOWER_STEP, DAZ_UPPER_STEP, SalaryData, Section};
use crate::common::{Error, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Why a data line was rejected.
#[derive(Debug, PartialEq)]
enum LineError {
    MissingSeparator,
    BadKey,
    BadValue,
}

type LineResult<T> = std::result::Result<T, LineError>;

fn parse_amount(value: &str) -> LineResult<f64> {
    value.parse().map_err(|_| LineError::BadValue)
}

fn parse_step(key: &str) -> LineResult<i32> {
    match key {
        "daz" => Ok(DAZ_LOWER_STEP),
        "DAZ" => Ok(DAZ_UPPER_STEP),
        _ => key.parse().map_err(|_| LineError::BadKey),
    }
}

fn parse_group_step(key: &str) -> LineResult<(i32, i32)> {
    let (group, step) = key.split_once('.').ok_or(LineError::BadKey)?;
    let group = group.parse().map_err(|_| LineError::BadKey)?;
    let step = step.parse().map_err(|_| LineError::BadKey)?;
    Ok((group, step))
}

fn parse_line(data: &mut SalaryData, section: Section, line: &str) -> LineResult<()> {
    let (key, value) = line.split_once('=').ok_or(LineError::MissingSeparator)?;
    let key = key.trim();
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    let amount = parse_amount(value)?;
    if section.is_basic() {
        data.insert_basic(section, parse_step(key)?, amount);
    } else {
        let (group, step) = parse_group_step(key)?;
        data.insert_allowance(section, group, step, amount);
    }
    Ok(())
}

/// Parse template text.
///
/// A header that names no known section leaves the current section in
/// place. Malformed lines are logged and recorded in [`SalaryData::skipped`]; they
/// never abort the parse.
///
/// ```
/// use sheetsmith::salary::{Section, parse_template};
///
/// let data = parse_template("[M1]\n1=2845.10\ndaz=4120\n");
/// assert_eq!(data.basic(Section::M1).unwrap()[&20], 4120.0);
/// ```
pub fn parse_template(text: &str) -> SalaryData {
    let mut data = SalaryData::new();
    let mut section: Option<Section> = None;

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let line_no = index + 1;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            match Section::from_header(header) {
                Some(found) => section = Some(found),
                None => warn!(
                    line = line_no,
                    "unknown section [{}], keeping the current section", header
                ),
            }
            continue;
        }

        let Some(current) = section else {
            debug!(line = line_no, "line outside a section");
            continue;
        };
        if let Err(e) = parse_line(&mut data, current, line) {
            warn!(line = line_no, reason = ?e, "Could not parse line: {}", line);
            data.skipped.push(line_no);
        }
    }
    data
}

/// Read and parse a template file.
///
/// Returns [`Error::Io`] when the file cannot be read and
/// [`Error::Template`] when it is not UTF-8 text.
pub fn parse_template_file<P: AsRef<Path>>(path: P) -> Result<SalaryData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8(bytes)
        .map_err(|e| Error::Template(format!("'{}' is not UTF-8: {}", path.display(), e)))?;
    Ok(parse_template(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "\
# Gehaltsdaten
[M1 - Berufsoffiziere]
1 = 2845.10
2=2950.5
daz=4120.00
DAZ=4300
3=

[MBO1 Funktionszulagen]
1.1=120.50
1.2=130
2.1=200
";

    #[test]
    fn test_sections_and_values() {
        let data = parse_template(TEMPLATE);
        let m1 = data.basic(Section::M1).unwrap();
        assert_eq!(m1.len(), 4);
        assert_eq!(m1[&1], 2845.10);
        assert_eq!(m1[&2], 2950.5);
        assert_eq!(m1[&DAZ_LOWER_STEP], 4120.0);
        assert_eq!(m1[&DAZ_UPPER_STEP], 4300.0);
        assert!(!m1.contains_key(&3));

        let mbo1 = data.allowances(Section::Mbo1).unwrap();
        assert_eq!(mbo1.len(), 2);
        assert_eq!(mbo1[&1][&2], 130.0);
        assert_eq!(data.count(Section::Mbo1), 2);
        assert_eq!(data.count(Section::M2), 0);
        assert!(data.skipped.is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let data =
            parse_template("[M2]\n1=abc\nx=5\nnoequals\n2=10\n[MUO1]\n7=5\n1.2.3=4\n3.1=9\n");
        assert_eq!(data.skipped, [2, 3, 4, 7, 8]);
        assert_eq!(data.basic(Section::M2).unwrap()[&2], 10.0);
        assert_eq!(data.allowances(Section::Muo1).unwrap()[&3][&1], 9.0);
    }

    #[test]
    fn test_unknown_header_keeps_section() {
        let data = parse_template("[M1]\n1=100\n[Notizen]\n2=200\n");
        let m1 = data.basic(Section::M1).unwrap();
        assert_eq!(data.count(Section::M1), 2);
        assert_eq!(m1[&2], 200.0);
        assert!(data.skipped.is_empty());
    }

    #[test]
    fn test_unknown_header_before_any_section() {
        let data = parse_template("[Notizen]\n1=1\n[M2]\n1=2\n");
        assert_eq!(data.count(Section::M2), 1);
        assert!(data.skipped.is_empty());
    }

    #[test]
    fn test_negative_keys() {
        let data = parse_template("[M1]\n-1=5\n[MBO2]\n-2.-1=7\n");
        assert!(data.skipped.is_empty());
        assert_eq!(data.basic(Section::M1).unwrap()[&-1], 5.0);
        assert_eq!(data.allowances(Section::Mbo2).unwrap()[&-2][&-1], 7.0);
    }

    #[test]
    fn test_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[M1]\n1=\xff\n").unwrap();
        let err = parse_template_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::Template(_)));
    }

    #[test]
    fn test_header_order() {
        // The first matching name in section order wins
        let data = parse_template("[M1 und MBO2]\n1=1\n");
        assert_eq!(data.count(Section::M1), 1);
    }

    #[test]
    fn test_lines_before_any_section() {
        let data = parse_template("1=100\n[M1]\n1=200\n");
        assert_eq!(data.basic(Section::M1).unwrap()[&1], 200.0);
    }

    #[test]
    fn test_missing_file() {
        let err = parse_template_file("/nonexistent/gehaltsdaten_template.txt").unwrap_err();
        assert!(matches!(err, crate::Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn test_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, TEMPLATE.as_bytes()).unwrap();
        let data = parse_template_file(file.path()).unwrap();
        assert_eq!(data.count(Section::M1), 4);
    }
}
