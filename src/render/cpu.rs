use std::path::Path;

use ab_glyph::FontArc;
use anyhow::Context as _;
use image::{Rgba, RgbaImage, imageops};

use crate::{
    assets::image_ref::ImageRef,
    document::{
        color::Color,
        derive::{LINE_HEIGHT, PostLayout, cover_rect, segment_headline},
        model::LayoutDocument,
    },
    foundation::{
        core::{Rect, Size},
        error::{BrandpostError, BrandpostResult},
    },
    render::{
        raster::{CaptureOpts, RasterImage, Rasterizer},
        text::TextBlock,
    },
};

const GRADIENT_MAX_ALPHA: f32 = 0.9;
const MAX_CANVAS_SIDE_PX: u32 = 16_384;

/// Software rasterizer built on `image` and `ab_glyph`.
///
/// Text layers need a font; without one they are skipped and a warning is logged.
#[derive(Clone, Default)]
pub struct CpuRasterizer {
    font: Option<FontArc>,
}

impl std::fmt::Debug for CpuRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRasterizer")
            .field("has_font", &self.font.is_some())
            .finish()
    }
}

impl CpuRasterizer {
    /// Rasterizer without a font.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterizer drawing text with `font`.
    pub fn with_font(font: FontArc) -> Self {
        Self { font: Some(font) }
    }

    /// Parse a TrueType/OpenType font from memory.
    pub fn from_font_bytes(bytes: Vec<u8>) -> BrandpostResult<Self> {
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| BrandpostError::asset(format!("invalid font data: {e}")))?;
        Ok(Self::with_font(font))
    }

    /// Load a font file.
    pub fn from_font_path(path: impl AsRef<Path>) -> BrandpostResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_font_bytes(bytes)
    }

    /// Whether text layers will be drawn.
    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }
}

impl Rasterizer for CpuRasterizer {
    #[tracing::instrument(skip(self, doc), fields(format = doc.format.name()))]
    fn capture(&self, doc: &LayoutDocument, opts: &CaptureOpts) -> BrandpostResult<RasterImage> {
        let layout = PostLayout::compute(doc, f64::from(opts.scale.max(1)));
        let (Some(width), Some(height)) = (
            canvas_side(layout.canvas.width),
            canvas_side(layout.canvas.height),
        ) else {
            return Err(BrandpostError::export(format!(
                "capture size {}x{} outside 1..={MAX_CANVAS_SIDE_PX} px",
                layout.canvas.width, layout.canvas.height
            )));
        };

        let mut canvas = RgbaImage::from_pixel(width, height, Rgba(opts.background.to_rgba8()));
        let full = Rect::new(0.0, 0.0, f64::from(width), f64::from(height));

        if let Some(img) = doc.main_image_ref.as_ref().and_then(|r| decode_layer(r, "background")) {
            draw_cover(&mut canvas, &img, full, 50.0, doc.main_image_y, 1.0, false);
        }

        draw_gradient(&mut canvas, layout.gradient_top);

        if let Some(img) = doc.circle_image_ref.as_ref().and_then(|r| decode_layer(r, "circle")) {
            draw_cover(
                &mut canvas,
                &img,
                layout.circle,
                50.0,
                doc.circle_image_y,
                doc.circle_image_scale,
                true,
            );
            draw_ring(&mut canvas, layout.circle, layout.circle_ring, doc.brand_color);
        }

        match &self.font {
            Some(font) => draw_text(&mut canvas, font, doc, &layout),
            None => tracing::warn!("no font loaded, text layers skipped"),
        }

        tracing::debug!(width, height, "post captured");
        Ok(RasterImage::from_rgba(canvas))
    }
}

fn canvas_side(v: f64) -> Option<u32> {
    let v = v.round();
    (1.0..=f64::from(MAX_CANVAS_SIDE_PX))
        .contains(&v)
        .then_some(v as u32)
}

fn decode_layer(image: &ImageRef, layer: &str) -> Option<RgbaImage> {
    match image.decode() {
        Ok(img) => Some(img),
        Err(e) => {
            tracing::warn!(layer, error = %e, "image layer skipped");
            None
        }
    }
}

/// Blend `color` over the canvas pixel with straight alpha; out-of-bounds writes are dropped.
pub(crate) fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let src_a = f32::from(color.a) / 255.0 * coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x, y);
    let dst_a = f32::from(dst.0[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    let src = [color.r, color.g, color.b];
    for (i, s) in src.into_iter().enumerate() {
        let s = f32::from(s);
        let d = f32::from(dst.0[i]);
        let v = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        dst.0[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

// Cover-fit `img` into `target`, clipped to it, optionally masked to the inscribed circle.
fn draw_cover(
    canvas: &mut RgbaImage,
    img: &RgbaImage,
    target: Rect,
    pos_x: f64,
    pos_y: f64,
    zoom: f64,
    circular: bool,
) {
    if target.width() <= 0.0 || target.height() <= 0.0 {
        return;
    }
    let placed = cover_rect(
        target.size(),
        Size::new(f64::from(img.width()), f64::from(img.height())),
        pos_x,
        pos_y,
        zoom,
    );
    let sw = placed.width().round().max(1.0) as u32;
    let sh = placed.height().round().max(1.0) as u32;
    let scaled = imageops::resize(img, sw, sh, imageops::FilterType::Triangle);
    let ox = target.x0 + placed.x0;
    let oy = target.y0 + placed.y0;

    let center = target.center();
    let radius = target.width().min(target.height()) * 0.5;
    let x_start = target.x0.floor().max(0.0) as i64;
    let y_start = target.y0.floor().max(0.0) as i64;
    let x_end = target.x1.ceil().min(f64::from(canvas.width())) as i64;
    let y_end = target.y1.ceil().min(f64::from(canvas.height())) as i64;

    for y in y_start..y_end {
        for x in x_start..x_end {
            let (cx, cy) = (x as f64 + 0.5, y as f64 + 0.5);
            let coverage = if circular {
                let dist = ((cx - center.x).powi(2) + (cy - center.y).powi(2)).sqrt();
                (radius - dist + 0.5).clamp(0.0, 1.0) as f32
            } else {
                rect_coverage(target, cx, cy)
            };
            if coverage <= 0.0 {
                continue;
            }
            let sx = (cx - ox).floor();
            let sy = (cy - oy).floor();
            if sx < 0.0 || sy < 0.0 || sx >= f64::from(sw) || sy >= f64::from(sh) {
                continue;
            }
            let p = scaled.get_pixel(sx as u32, sy as u32).0;
            blend_pixel(canvas, x, y, Color::rgba(p[0], p[1], p[2], p[3]), coverage);
        }
    }
}

fn rect_coverage(r: Rect, cx: f64, cy: f64) -> f32 {
    let h = (cx - r.x0 + 0.5).min(r.x1 - cx + 0.5).clamp(0.0, 1.0);
    let v = (cy - r.y0 + 0.5).min(r.y1 - cy + 0.5).clamp(0.0, 1.0);
    (h * v) as f32
}

// Transparent at `top`, darkening linearly towards the bottom edge.
fn draw_gradient(canvas: &mut RgbaImage, top: f64) {
    let h = f64::from(canvas.height());
    let band = h - top;
    if band <= 0.0 {
        return;
    }
    let y_start = top.floor().max(0.0) as u32;
    for y in y_start..canvas.height() {
        let t = ((f64::from(y) + 0.5 - top) / band).clamp(0.0, 1.0) as f32;
        let alpha = GRADIENT_MAX_ALPHA * t;
        for x in 0..canvas.width() {
            blend_pixel(canvas, i64::from(x), i64::from(y), Color::BLACK, alpha);
        }
    }
}

fn draw_ring(canvas: &mut RgbaImage, circle: Rect, ring: f64, color: Color) {
    if ring <= 0.0 {
        return;
    }
    let center = circle.center();
    let outer = circle.width().min(circle.height()) * 0.5;
    let inner = outer - ring;
    let x_start = circle.x0.floor().max(0.0) as i64;
    let y_start = circle.y0.floor().max(0.0) as i64;
    let x_end = circle.x1.ceil().min(f64::from(canvas.width())) as i64;
    let y_end = circle.y1.ceil().min(f64::from(canvas.height())) as i64;
    for y in y_start..y_end {
        for x in x_start..x_end {
            let d = ((x as f64 + 0.5 - center.x).powi(2) + (y as f64 + 0.5 - center.y).powi(2))
                .sqrt();
            let coverage = (outer - d + 0.5).clamp(0.0, 1.0).min((d - inner + 0.5).clamp(0.0, 1.0));
            if coverage > 0.0 {
                blend_pixel(canvas, x, y, color, coverage as f32);
            }
        }
    }
}

fn draw_text(canvas: &mut RgbaImage, font: &FontArc, doc: &LayoutDocument, layout: &PostLayout) {
    let brand = TextBlock::layout(
        font,
        &[(doc.brand_name.as_str(), doc.brand_color)],
        layout.brand_font_px as f32,
        1.0,
        layout.headline_max_width as f32,
    );
    brand.draw(
        font,
        canvas,
        layout.brand_origin.x as f32,
        layout.brand_origin.y as f32,
    );

    let segments = segment_headline(&doc.headline_text);
    let runs: Vec<(&str, Color)> = segments
        .iter()
        .map(|s| {
            let color = if s.highlighted {
                doc.highlight_color
            } else {
                Color::WHITE
            };
            (s.text.as_str(), color)
        })
        .collect();
    let headline = TextBlock::layout(
        font,
        &runs,
        layout.headline_font_px as f32,
        LINE_HEIGHT as f32,
        layout.headline_max_width as f32,
    );
    let top = layout.headline_bottom as f32 - headline.height();
    tracing::trace!(
        lines = headline.line_count(),
        width = headline.width(),
        "headline laid out"
    );
    headline.draw(font, canvas, layout.headline_left as f32, top);
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
