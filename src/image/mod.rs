//! Raster output for placeholder assets.
//!
//! [`png`] is a dependency-free PNG encoder for solid images. With the
//! `imgconv` feature, [`Canvas`] draws rectangles, ellipses and block-letter
//! text onto an `image::RgbImage` and encodes it through the `image` crate.

#[cfg(feature = "imgconv")]
mod canvas;
pub mod font;
pub mod png;

#[cfg(feature = "imgconv")]
pub use canvas::Canvas;

use crate::common::{Error, Result};

/// An 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Parse `#RRGGBB` or `RRGGBB`.
    ///
    /// ```
    /// use sheetsmith::image::Rgb;
    ///
    /// assert_eq!(Rgb::from_hex("#2C3E2F").unwrap(), Rgb(44, 62, 47));
    /// ```
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(Error::InvalidInput(format!("invalid colour '{}'", hex)));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidInput(format!("invalid colour '{}'", hex)))
        };
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.0, self.1, self.2]
    }
}
