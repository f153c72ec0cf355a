//! One-shot document generators.
//!
//! Each generator expands its literal data set into a document model and
//! writes a single artifact. Status output is left to the caller; the
//! generators only report what they wrote and log progress via `tracing`.

pub mod assets;
pub mod fleet;
pub mod inflation;
pub mod names;

/// Format an integer with `,` as thousands separator.
///
/// ```
/// use sheetsmith::generators::format_thousands;
///
/// assert_eq!(format_thousands(1_234_567), "1,234,567");
/// assert_eq!(format_thousands(999), "999");
/// ```
pub fn format_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(100_000), "100,000");
        assert_eq!(format_thousands(12_345_678), "12,345,678");
    }
}
