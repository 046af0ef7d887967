//! Drag-to-parameter mappers.
//!
//! Each mapper is a pure function of (pointer, preview rect, document) returning the next
//! document. Results are clamped at the point of computation; a degenerate rect leaves the
//! document unchanged.

use crate::{
    document::model::LayoutDocument,
    foundation::core::{Point, PreviewRect, clamp_total},
    interaction::gesture::DragTarget,
};

/// Pan the background vertically: the pointer's height in the preview becomes `mainImageY`.
pub fn map_background(point: Point, rect: PreviewRect, doc: LayoutDocument) -> LayoutDocument {
    if rect.is_degenerate() {
        return doc;
    }
    let y_pct = clamp_total((point.y - rect.top()) / rect.height() * 100.0, 0.0, 100.0);
    doc.with_main_image_y(y_pct)
}

/// Move the inset so its center follows the pointer; X is measured from the right edge.
pub fn map_circle(point: Point, rect: PreviewRect, doc: LayoutDocument) -> LayoutDocument {
    if rect.is_degenerate() {
        return doc;
    }
    let x_pct = (rect.right() - point.x) / rect.width() * 100.0;
    let y_pct = (point.y - rect.top()) / rect.height() * 100.0;
    let half = doc.circle_size / 2.0;
    doc.with_circle_position(x_pct - half, y_pct - half)
}

/// Offset the headline from its format baseline; positive moves the block up.
pub fn map_headline(point: Point, rect: PreviewRect, doc: LayoutDocument) -> LayoutDocument {
    if rect.is_degenerate() {
        return doc;
    }
    let from_bottom = rect.bottom() - point.y;
    let baseline = doc.format.headline_baseline_px();
    doc.with_headline_y(from_bottom - baseline)
}

/// Route a drag to the mapper for `target`.
pub fn map_drag(
    target: DragTarget,
    point: Point,
    rect: PreviewRect,
    doc: LayoutDocument,
) -> LayoutDocument {
    match target {
        DragTarget::Background => map_background(point, rect, doc),
        DragTarget::Circle => map_circle(point, rect, doc),
        DragTarget::Headline => map_headline(point, rect, doc),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/mappers.rs"]
mod tests;
