pub use kurbo::{Point, Rect, Size};

/// Bounding box of the live preview, in device-independent pixels of the pointer event space.
///
/// Mirrors what a layout engine reports for the preview element: left/top/width/height plus the
/// derived right/bottom edges. Negative extents are normalized away on construction.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PreviewRect(Rect);

impl PreviewRect {
    /// Build a rect from its top-left corner and extent.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self(Rect::new(
            left,
            top,
            left + width.max(0.0),
            top + height.max(0.0),
        ))
    }

    /// Build a rect anchored at the origin.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Wrap an arbitrary `kurbo` rect, normalizing swapped edges.
    pub fn from_rect(rect: Rect) -> Self {
        Self(rect.abs())
    }

    /// Left edge.
    pub fn left(self) -> f64 {
        self.0.x0
    }

    /// Top edge.
    pub fn top(self) -> f64 {
        self.0.y0
    }

    /// Right edge.
    pub fn right(self) -> f64 {
        self.0.x1
    }

    /// Bottom edge.
    pub fn bottom(self) -> f64 {
        self.0.y1
    }

    /// Horizontal extent.
    pub fn width(self) -> f64 {
        self.0.width()
    }

    /// Vertical extent.
    pub fn height(self) -> f64 {
        self.0.height()
    }

    /// Extent as a `kurbo` size.
    pub fn size(self) -> Size {
        self.0.size()
    }

    /// True when either extent is zero (or not finite) and percentages cannot be derived.
    pub fn is_degenerate(self) -> bool {
        let (w, h) = (self.width(), self.height());
        !(w.is_finite() && h.is_finite()) || w <= 0.0 || h <= 0.0
    }

    /// The underlying `kurbo` rect.
    pub fn as_rect(self) -> Rect {
        self.0
    }
}

impl From<Rect> for PreviewRect {
    fn from(value: Rect) -> Self {
        Self::from_rect(value)
    }
}

/// Clamp that also maps NaN to `lo`, so derived percentages are total.
pub(crate) fn clamp_total(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_nan() {
        return lo;
    }
    v.clamp(lo, hi.max(lo))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
