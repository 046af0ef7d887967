use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    document::{color::Color, model::LayoutDocument},
    foundation::error::{BrandpostError, BrandpostResult},
};

/// A captured post as straight (non-premultiplied) RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Wrap an `image` buffer.
    pub fn from_rgba(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }

    /// Pixel at `(x, y)`, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data
            .get(i..i + 4)
            .map(|px| [px[0], px[1], px[2], px[3]])
    }

    /// Encode as PNG.
    pub fn encode_png(&self) -> BrandpostResult<Vec<u8>> {
        let img = image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| BrandpostError::export("raster buffer does not match its dimensions"))?;
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .map_err(|e| BrandpostError::export(format!("encode png: {e}")))?;
        Ok(buf)
    }

    /// Write a PNG file, creating parent directories as needed.
    pub fn save_png(&self, path: impl AsRef<Path>) -> BrandpostResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let png = self.encode_png()?;
        std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// Capture settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptureOpts {
    /// Output pixels per preview pixel.
    pub scale: u32,
    /// Color behind every layer.
    pub background: Color,
}

impl Default for CaptureOpts {
    fn default() -> Self {
        Self {
            scale: 3,
            background: Color::BLACK,
        }
    }
}

/// Turns the visual state of a document into pixels.
///
/// Implementations must be callable from any thread; the exporter makes sure only one capture
/// runs at a time.
pub trait Rasterizer: Send + Sync {
    /// Block until every font the capture needs is loaded.
    fn fonts_ready(&self) -> BrandpostResult<()> {
        Ok(())
    }

    /// Render `doc` at `opts.scale` times its preview size.
    fn capture(&self, doc: &LayoutDocument, opts: &CaptureOpts) -> BrandpostResult<RasterImage>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
