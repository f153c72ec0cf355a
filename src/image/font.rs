//! 5x7 block font for labels on generated assets.
//!
//! Each glyph is seven rows; bit 4 of a row is the leftmost pixel. Only
//! uppercase Latin letters and the space are covered, lowercase input is
//! folded to uppercase.

/// Glyph width in font cells
pub const GLYPH_WIDTH: u32 = 5;
/// Glyph height in font cells
pub const GLYPH_HEIGHT: u32 = 7;
/// Blank cells between glyphs
pub const GLYPH_SPACING: u32 = 1;

const LETTERS: [[u8; 7]; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

/// Rows of the glyph for `c`. Space and unknown characters are blank.
pub fn glyph(c: char) -> [u8; 7] {
    let upper = c.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        LETTERS[(upper as u8 - b'A') as usize]
    } else {
        [0; 7]
    }
}

/// Whether the cell at (`col`, `row`) of a glyph is set.
#[inline]
pub fn is_set(rows: &[u8; 7], col: u32, row: u32) -> bool {
    col < GLYPH_WIDTH
        && row < GLYPH_HEIGHT
        && rows[row as usize] & (1 << (GLYPH_WIDTH - 1 - col)) != 0
}

/// Cell size in pixels for a nominal font size.
pub fn scale_for_size(font_size: u32) -> u32 {
    (font_size / 10).max(1)
}

/// Rendered size of `text` in pixels at `scale`.
pub fn text_extent(text: &str, scale: u32) -> (u32, u32) {
    let count = text.chars().count() as u32;
    if count == 0 {
        return (0, 0);
    }
    let width = count * (GLYPH_WIDTH + GLYPH_SPACING) - GLYPH_SPACING;
    (width * scale, GLYPH_HEIGHT * scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_lookup() {
        assert_eq!(glyph('s'), glyph('S'));
        assert_eq!(glyph(' '), [0; 7]);
        assert_eq!(glyph('ß'), [0; 7]);
        // Top row of "S" starts blank, then four set cells
        let s = glyph('S');
        assert!(!is_set(&s, 0, 0));
        assert!((1..5).all(|c| is_set(&s, c, 0)));
        assert!(!is_set(&s, 5, 0));
    }

    #[test]
    fn test_text_extent() {
        assert_eq!(text_extent("", 10), (0, 0));
        assert_eq!(text_extent("S", 40), (200, 280));
        assert_eq!(text_extent("SPEISEPLAN", 10), (590, 70));
        assert_eq!(scale_for_size(400), 40);
        assert_eq!(scale_for_size(5), 1);
    }
}
