//! Minimal PNG encoder.
//!
//! Writes 8-bit truecolour images (colour type 2) with no interlacing. Every
//! scanline uses filter type 0 and the whole image goes into a single zlib
//! compressed `IDAT` chunk.

use super::Rgb;
use crate::common::{Error, Result};
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::path::Path;

/// The eight-byte PNG file signature.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Append a chunk: length, type, data, CRC over type and data.
fn write_chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) -> Result<()> {
    let len = u32::try_from(data.len())
        .map_err(|_| Error::ImageError("PNG chunk exceeds 4 GiB".to_string()))?;
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(kind);
    hasher.update(data);
    out.extend_from_slice(&hasher.finalize().to_be_bytes());
    Ok(())
}

/// Encode packed RGB pixels (`width * height * 3` bytes, row-major).
pub fn encode_rgb(width: u32, height: u32, pixels: &[u8]) -> Result<Vec<u8>> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidInput(format!(
            "image dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    let stride = width as usize * 3;
    if pixels.len() != stride * height as usize {
        return Err(Error::InvalidInput(format!(
            "expected {} pixel bytes for {}x{}, got {}",
            stride * height as usize,
            width,
            height,
            pixels.len()
        )));
    }

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    // bit depth 8, colour type 2 (RGB), deflate, adaptive filtering, no interlace
    ihdr.extend_from_slice(&[8, 2, 0, 0, 0]);

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    for row in pixels.chunks_exact(stride) {
        encoder.write_all(&[0])?;
        encoder.write_all(row)?;
    }
    let idat = encoder.finish()?;

    let mut out = Vec::with_capacity(PNG_SIGNATURE.len() + 12 * 3 + ihdr.len() + idat.len());
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, b"IHDR", &ihdr)?;
    write_chunk(&mut out, b"IDAT", &idat)?;
    write_chunk(&mut out, b"IEND", &[])?;
    Ok(out)
}

/// Encode an image filled with a single colour.
pub fn solid_png(width: u32, height: u32, color: Rgb) -> Result<Vec<u8>> {
    let count = width as usize * height as usize;
    let pixels: Vec<u8> = color.to_array().repeat(count);
    encode_rgb(width, height, &pixels)
}

/// Write a solid-colour PNG to `path` and return its size in bytes.
pub fn write_solid_png<P: AsRef<Path>>(
    path: P,
    width: u32,
    height: u32,
    color: Rgb,
) -> Result<u64> {
    let bytes = solid_png(width, height, color)?;
    std::fs::write(path, &bytes)?;
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    /// Split a PNG into (type, data) chunks, checking every CRC.
    fn chunks(png: &[u8]) -> Vec<([u8; 4], Vec<u8>)> {
        assert_eq!(&png[..8], &PNG_SIGNATURE);
        let mut pos = 8;
        let mut out = Vec::new();
        while pos < png.len() {
            let len = u32::from_be_bytes(png[pos..pos + 4].try_into().unwrap()) as usize;
            let kind: [u8; 4] = png[pos + 4..pos + 8].try_into().unwrap();
            let data = png[pos + 8..pos + 8 + len].to_vec();
            let crc = u32::from_be_bytes(png[pos + 8 + len..pos + 12 + len].try_into().unwrap());
            let mut hasher = crc32fast::Hasher::new();
            hasher.update(&kind);
            hasher.update(&data);
            assert_eq!(hasher.finalize(), crc, "bad CRC in chunk {:?}", kind);
            out.push((kind, data));
            pos += 12 + len;
        }
        out
    }

    #[test]
    fn test_solid_png_structure() {
        let png = solid_png(48, 48, Rgb(44, 62, 47)).unwrap();
        let chunks = chunks(&png);
        let kinds: Vec<&[u8; 4]> = chunks.iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![b"IHDR", b"IDAT", b"IEND"]);

        let ihdr = &chunks[0].1;
        assert_eq!(&ihdr[0..4], &48u32.to_be_bytes());
        assert_eq!(&ihdr[4..8], &48u32.to_be_bytes());
        assert_eq!(&ihdr[8..], &[8, 2, 0, 0, 0]);

        let mut raw = Vec::new();
        ZlibDecoder::new(&chunks[1].1[..]).read_to_end(&mut raw).unwrap();
        assert_eq!(raw.len(), 48 * (1 + 48 * 3));
        assert_eq!(&raw[..4], &[0, 44, 62, 47]);
        assert!(chunks[2].1.is_empty());
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(encode_rgb(0, 10, &[]).is_err());
        assert!(encode_rgb(2, 2, &[0; 11]).is_err());
    }

    #[test]
    fn test_write_solid_png_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favicon.png");
        let size = write_solid_png(&path, 48, 48, Rgb(1, 2, 3)).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), size);
    }

    #[cfg(feature = "imgconv")]
    #[test]
    fn test_decodes_with_image_crate() {
        let png = solid_png(5, 3, Rgb(139, 115, 85)).unwrap();
        let img = ::image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (5, 3));
        assert_eq!(img.get_pixel(4, 2).0, [139, 115, 85]);
    }
}
