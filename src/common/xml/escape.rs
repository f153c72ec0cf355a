use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

/// Escape XML special characters.
///
/// Used for both element text and attribute values, so quotes are escaped too.
///
/// # Examples
///
/// ```
/// use sheetsmith::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("IF(A1=\"\";1)"), "IF(A1=&quot;&quot;;1)");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_formula_operators() {
        assert_eq!(escape_xml("A1<2026"), "A1&lt;2026");
        assert_eq!(escape_xml("\"BDL\"&\":\""), "&quot;BDL&quot;&amp;&quot;:&quot;");
        assert_eq!(escape_xml("O'Neil"), "O&apos;Neil");
    }

    #[test]
    fn test_escape_leaves_umlauts() {
        assert_eq!(escape_xml("ÜBERTRAG März"), "ÜBERTRAG März");
    }
}
