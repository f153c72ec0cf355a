//! Placeholder app assets: icon, splash screen, adaptive icon and favicon.

use crate::common::Result;
use crate::image::{Rgb, png};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Background colour (olive green)
pub const BG_COLOR: Rgb = Rgb(0x2C, 0x3E, 0x2F);
/// Shape fill colour (sand brown)
pub const FG_COLOR: Rgb = Rgb(0x8B, 0x73, 0x55);
/// Outline and text colour (light grey)
pub const TEXT_COLOR: Rgb = Rgb(0xE8, 0xE8, 0xE8);

/// Centre shape of an asset, as an inclusive bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Rectangle(u32, u32, u32, u32),
    Ellipse(u32, u32, u32, u32),
}

/// Description of one generated asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetSpec {
    pub file_name: &'static str,
    pub width: u32,
    pub height: u32,
    pub shape: Shape,
    pub outline: u32,
    /// Centred label and its nominal font size
    pub label: Option<(&'static str, u32)>,
}

/// The four stock assets, in creation order.
pub const ASSETS: [AssetSpec; 4] = [
    AssetSpec {
        file_name: "icon.png",
        width: 1024,
        height: 1024,
        shape: Shape::Rectangle(256, 256, 768, 768),
        outline: 10,
        label: Some(("S", 400)),
    },
    AssetSpec {
        file_name: "splash.png",
        width: 1284,
        height: 2778,
        shape: Shape::Rectangle(342, 889, 942, 1889),
        outline: 8,
        label: Some(("Speiseplan", 100)),
    },
    AssetSpec {
        file_name: "adaptive-icon.png",
        width: 1024,
        height: 1024,
        shape: Shape::Ellipse(112, 112, 912, 912),
        outline: 10,
        label: Some(("S", 400)),
    },
    AssetSpec {
        file_name: "favicon.png",
        width: 48,
        height: 48,
        shape: Shape::Rectangle(4, 4, 44, 44),
        outline: 1,
        label: None,
    },
];

/// How the assets are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Shapes and labels drawn on a canvas
    #[default]
    Rendered,
    /// Solid background images from the built-in encoder
    Minimal,
}

/// One written asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReport {
    pub file_name: &'static str,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub size: u64,
    pub mode: RenderMode,
}

/// Whether this build can draw shapes and text.
pub const fn rendering_available() -> bool {
    cfg!(feature = "imgconv")
}

#[cfg(feature = "imgconv")]
fn render(spec: &AssetSpec, path: &Path) -> Result<u64> {
    use crate::image::Canvas;

    let mut canvas = Canvas::new(spec.width, spec.height, BG_COLOR);
    match spec.shape {
        Shape::Rectangle(x0, y0, x1, y1) => {
            canvas.rectangle((x0, y0, x1, y1), FG_COLOR, TEXT_COLOR, spec.outline)
        },
        Shape::Ellipse(x0, y0, x1, y1) => {
            canvas.ellipse((x0, y0, x1, y1), FG_COLOR, TEXT_COLOR, spec.outline)
        },
    }
    if let Some((text, size)) = spec.label {
        let (cx, cy) = match spec.shape {
            Shape::Rectangle(x0, y0, x1, y1) | Shape::Ellipse(x0, y0, x1, y1) => {
                ((x0 + x1) / 2, (y0 + y1) / 2)
            },
        };
        canvas.text_centered(cx, cy, text, size, TEXT_COLOR);
    }
    canvas.save(path)
}

#[cfg(not(feature = "imgconv"))]
fn render(spec: &AssetSpec, path: &Path) -> Result<u64> {
    png::write_solid_png(path, spec.width, spec.height, BG_COLOR)
}

/// Write all assets into `directory`, creating it if needed.
///
/// Without the `imgconv` feature a [`RenderMode::Rendered`] request falls
/// back to minimal images.
pub fn generate_assets(directory: &Path, mode: RenderMode) -> Result<Vec<AssetReport>> {
    std::fs::create_dir_all(directory)?;

    let mode = if mode == RenderMode::Rendered && !rendering_available() {
        warn!("built without image rendering, writing minimal placeholders");
        RenderMode::Minimal
    } else {
        mode
    };

    let mut reports = Vec::with_capacity(ASSETS.len());
    for spec in &ASSETS {
        let path = directory.join(spec.file_name);
        debug!(file = spec.file_name, width = spec.width, height = spec.height, "creating asset");
        let size = match mode {
            RenderMode::Rendered => render(spec, &path)?,
            RenderMode::Minimal => png::write_solid_png(&path, spec.width, spec.height, BG_COLOR)?,
        };
        info!(path = %path.display(), size, "asset written");
        reports.push(AssetReport {
            file_name: spec.file_name,
            path,
            width: spec.width,
            height: spec.height,
            size,
            mode,
        });
    }
    Ok(reports)
}
