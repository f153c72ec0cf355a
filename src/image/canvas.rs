//! Drawing surface backed by `image::RgbImage`.
//!
//! Shape coordinates are inclusive bounding boxes, and outlines grow inwards
//! from the box edge.

use super::font::{self, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};
use super::Rgb;
use crate::common::Result;
use ::image::{ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// An RGB drawing surface.
#[derive(Debug, Clone)]
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, ::image::Rgb(background.to_array())),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Colour at (`x`, `y`), or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        self.img
            .get_pixel_checked(x, y)
            .map(|p| Rgb(p.0[0], p.0[1], p.0[2]))
    }

    #[inline]
    fn put(&mut self, x: i64, y: i64, color: Rgb) {
        if (0..self.img.width() as i64).contains(&x) && (0..self.img.height() as i64).contains(&y) {
            self.img.put_pixel(x as u32, y as u32, ::image::Rgb(color.to_array()));
        }
    }

    /// Fill the inclusive box `(x0, y0)..=(x1, y1)`, clipped to the canvas.
    pub fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb) {
        let x1 = x1.min(self.width().saturating_sub(1));
        let y1 = y1.min(self.height().saturating_sub(1));
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.img.put_pixel(x, y, ::image::Rgb(color.to_array()));
            }
        }
    }

    /// Draw a filled rectangle with an outline of `width` pixels.
    pub fn rectangle(
        &mut self,
        (x0, y0, x1, y1): (u32, u32, u32, u32),
        fill: Rgb,
        outline: Rgb,
        width: u32,
    ) {
        if x1 < x0 || y1 < y0 {
            return;
        }
        self.fill_rect(x0, y0, x1, y1, outline);
        if x1 >= x0 + 2 * width && y1 >= y0 + 2 * width {
            self.fill_rect(x0 + width, y0 + width, x1 - width, y1 - width, fill);
        }
    }

    /// Draw a filled ellipse inscribed in the box, with an outline of `width` pixels.
    pub fn ellipse(
        &mut self,
        (x0, y0, x1, y1): (u32, u32, u32, u32),
        fill: Rgb,
        outline: Rgb,
        width: u32,
    ) {
        if x1 < x0 || y1 < y0 {
            return;
        }
        let cx = (x0 as f64 + x1 as f64) / 2.0;
        let cy = (y0 as f64 + y1 as f64) / 2.0;
        let rx = (x1 - x0) as f64 / 2.0 + 0.5;
        let ry = (y1 - y0) as f64 / 2.0 + 0.5;
        let inner_rx = rx - width as f64;
        let inner_ry = ry - width as f64;

        for y in y0..=y1.min(self.height().saturating_sub(1)) {
            for x in x0..=x1.min(self.width().saturating_sub(1)) {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                if (dx / rx).powi(2) + (dy / ry).powi(2) > 1.0 {
                    continue;
                }
                let inside = inner_rx > 0.0
                    && inner_ry > 0.0
                    && (dx / inner_rx).powi(2) + (dy / inner_ry).powi(2) <= 1.0;
                let color = if inside { fill } else { outline };
                self.img.put_pixel(x, y, ::image::Rgb(color.to_array()));
            }
        }
    }

    /// Draw `text` in the block font, centred on (`cx`, `cy`).
    pub fn text_centered(&mut self, cx: u32, cy: u32, text: &str, font_size: u32, color: Rgb) {
        let scale = font::scale_for_size(font_size);
        let (w, h) = font::text_extent(text, scale);
        let left = cx as i64 - (w / 2) as i64;
        let top = cy as i64 - (h / 2) as i64;

        for (i, c) in text.chars().enumerate() {
            let rows = font::glyph(c);
            let origin = left + (i as u32 * (GLYPH_WIDTH + GLYPH_SPACING) * scale) as i64;
            for row in 0..GLYPH_HEIGHT {
                for col in 0..GLYPH_WIDTH {
                    if !font::is_set(&rows, col, row) {
                        continue;
                    }
                    let px = origin + (col * scale) as i64;
                    let py = top + (row * scale) as i64;
                    for dy in 0..scale as i64 {
                        for dx in 0..scale as i64 {
                            self.put(px + dx, py + dy, color);
                        }
                    }
                }
            }
        }
    }

    /// Encode the canvas as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        self.img.write_to(&mut cursor, ImageFormat::Png)?;
        Ok(cursor.into_inner())
    }

    /// Save the canvas as PNG and return the file size.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<u64> {
        let bytes = self.to_png()?;
        std::fs::write(path, &bytes)?;
        Ok(bytes.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgb = Rgb(44, 62, 47);
    const FG: Rgb = Rgb(139, 115, 85);
    const TEXT: Rgb = Rgb(232, 232, 232);

    #[test]
    fn test_rectangle_outline_and_fill() {
        let mut canvas = Canvas::new(48, 48, BG);
        canvas.rectangle((4, 4, 44, 44), FG, TEXT, 1);
        assert_eq!(canvas.pixel(0, 0), Some(BG));
        assert_eq!(canvas.pixel(4, 4), Some(TEXT));
        assert_eq!(canvas.pixel(44, 20), Some(TEXT));
        assert_eq!(canvas.pixel(5, 5), Some(FG));
        assert_eq!(canvas.pixel(45, 45), Some(BG));
    }

    #[test]
    fn test_ellipse() {
        let mut canvas = Canvas::new(100, 100, BG);
        canvas.ellipse((10, 10, 89, 89), FG, TEXT, 3);
        assert_eq!(canvas.pixel(50, 50), Some(FG));
        assert_eq!(canvas.pixel(10, 50), Some(TEXT));
        // Corners of the bounding box stay untouched
        assert_eq!(canvas.pixel(10, 10), Some(BG));
    }

    #[test]
    fn test_text_is_clipped_not_panicking() {
        let mut canvas = Canvas::new(20, 20, BG);
        canvas.text_centered(10, 10, "SPEISEPLAN", 100, TEXT);
        canvas.text_centered(0, 0, "S", 400, TEXT);
    }

    #[test]
    fn test_text_draws_pixels() {
        let mut canvas = Canvas::new(100, 100, BG);
        canvas.text_centered(50, 50, "L", 100, TEXT);
        // "L" is 50x70 at scale 10, so its left column starts at x = 25
        assert_eq!(canvas.pixel(25, 20), Some(TEXT));
        assert_eq!(canvas.pixel(74, 20), Some(BG));
        assert_eq!(canvas.pixel(74, 80), Some(TEXT));
    }

    #[test]
    fn test_png_roundtrip_dimensions() {
        let canvas = Canvas::new(16, 9, BG);
        let img = ::image::load_from_memory(&canvas.to_png().unwrap()).unwrap();
        assert_eq!((img.width(), img.height()), (16, 9));
    }
}
