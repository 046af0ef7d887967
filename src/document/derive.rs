//! Pure derivations recomputed on every render: font size, headline segmentation, placement.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    document::model::LayoutDocument,
    foundation::core::{Point, Rect, Size},
};

/// Pixels per root-em.
pub const ROOT_EM_PX: f64 = 16.0;
/// Headline line height as a multiple of the font size.
pub const LINE_HEIGHT: f64 = 1.15;

const CONTENT_PADDING_PX: f64 = 24.0;
const BRAND_FONT_PX: f64 = 14.0;
const CIRCLE_RING_PX: f64 = 3.0;

// Shortest run between a `{` and the next `}` on the same line; first match wins, so nesting
// is not recognized.
static HIGHLIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{(.*?)\}").unwrap_or_else(|e| unreachable!("static regex: {e}"))
});

/// One run of headline text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct HeadlineSegment {
    /// Text with delimiters stripped.
    pub text: String,
    /// Rendered in the highlight color when set.
    pub highlighted: bool,
}

impl HeadlineSegment {
    /// A run in the default text color.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: false,
        }
    }

    /// A run in the highlight color.
    pub fn highlighted(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            highlighted: true,
        }
    }
}

/// Headline font size in root-em: the format base scaled by `headlineSize` percent.
pub fn font_size_rem(doc: &LayoutDocument) -> f64 {
    doc.format.font_base_rem() * (f64::from(doc.headline_size) / 100.0)
}

/// Split a headline into plain and highlighted runs.
///
/// `{...}` pairs are matched non-greedily left to right and never span a line break; the braces
/// are dropped and the inner text kept. Unmatched braces stay as plain text and empty runs are
/// omitted.
pub fn segment_headline(text: &str) -> Vec<HeadlineSegment> {
    let mut out = Vec::new();
    let mut last = 0usize;
    for caps in HIGHLIGHT.captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            out.push(HeadlineSegment::plain(&text[last..whole.start()]));
        }
        if !inner.as_str().is_empty() {
            out.push(HeadlineSegment::highlighted(inner.as_str()));
        }
        last = whole.end();
    }
    if last < text.len() {
        out.push(HeadlineSegment::plain(&text[last..]));
    }
    out
}

/// Resolved placement of every layer for one output size.
///
/// All values are output pixels: the preview size of the format times `scale`.
#[derive(Clone, Debug, PartialEq)]
pub struct PostLayout {
    /// Output canvas size.
    pub canvas: Size,
    /// Capture scale relative to the preview.
    pub scale: f64,
    /// Top of the bottom gradient band (it runs to the bottom edge).
    pub gradient_top: f64,
    /// Bounding square of the circular inset.
    pub circle: Rect,
    /// Width of the ring drawn around the inset.
    pub circle_ring: f64,
    /// Top-left of the brand name text box.
    pub brand_origin: Point,
    /// Brand name font size.
    pub brand_font_px: f64,
    /// Left edge of the headline block.
    pub headline_left: f64,
    /// Maximum line width of the headline block.
    pub headline_max_width: f64,
    /// Bottom edge of the headline block.
    pub headline_bottom: f64,
    /// Headline font size.
    pub headline_font_px: f64,
}

impl PostLayout {
    /// Place every layer of `doc` on a canvas of `format.preview_size() * scale`.
    pub fn compute(doc: &LayoutDocument, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        let preview = doc.format.preview_size();
        let canvas = Size::new(preview.width * scale, preview.height * scale);
        let (w, h) = (canvas.width, canvas.height);

        let d = doc.circle_size / 100.0 * w;
        let right_gap = doc.circle_x / 100.0 * w;
        let left = w - right_gap - d;
        let top = doc.circle_y / 100.0 * h;

        let pad = CONTENT_PADDING_PX * scale;
        Self {
            canvas,
            scale,
            gradient_top: h * (1.0 - doc.format.gradient_fraction()),
            circle: Rect::new(left, top, left + d, top + d),
            circle_ring: CIRCLE_RING_PX * scale,
            brand_origin: Point::new(pad, doc.format.brand_top_px() * scale),
            brand_font_px: BRAND_FONT_PX * scale,
            headline_left: pad,
            headline_max_width: (w - 2.0 * pad).max(0.0),
            headline_bottom: h - (doc.format.headline_baseline_px() + doc.headline_y) * scale,
            headline_font_px: font_size_rem(doc) * ROOT_EM_PX * scale,
        }
    }
}

/// Where an image lands when it covers `container` (CSS `object-fit: cover`).
///
/// `pos_x`/`pos_y` are object-position percentages; `zoom >= 1` enlarges around that anchor.
pub fn cover_rect(container: Size, image: Size, pos_x: f64, pos_y: f64, zoom: f64) -> Rect {
    if image.width <= 0.0 || image.height <= 0.0 {
        return Rect::from_origin_size(Point::ZERO, container);
    }
    let fit = (container.width / image.width).max(container.height / image.height);
    let k = fit * zoom.max(1.0);
    let (sw, sh) = (image.width * k, image.height * k);
    let x = (container.width - sw) * (pos_x.clamp(0.0, 100.0) / 100.0);
    let y = (container.height - sh) * (pos_y.clamp(0.0, 100.0) / 100.0);
    Rect::new(x, y, x + sw, y + sh)
}

#[cfg(test)]
#[path = "../../tests/unit/document/derive.rs"]
mod tests;
