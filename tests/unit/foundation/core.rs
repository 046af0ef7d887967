use super::*;

#[test]
fn preview_rect_edges_follow_extent() {
    let r = PreviewRect::new(10.0, 20.0, 600.0, 400.0);
    assert_eq!(r.left(), 10.0);
    assert_eq!(r.top(), 20.0);
    assert_eq!(r.right(), 610.0);
    assert_eq!(r.bottom(), 420.0);
    assert_eq!(r.size(), Size::new(600.0, 400.0));
}

#[test]
fn from_rect_normalizes_swapped_edges() {
    let r = PreviewRect::from_rect(Rect::new(100.0, 50.0, 0.0, 0.0));
    assert_eq!(r.left(), 0.0);
    assert_eq!(r.bottom(), 50.0);
}

#[test]
fn degenerate_rects_are_detected() {
    assert!(PreviewRect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
    assert!(PreviewRect::new(0.0, 0.0, -5.0, 10.0).is_degenerate());
    assert!(!PreviewRect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
}

#[test]
fn clamp_total_maps_nan_to_lower_bound() {
    assert_eq!(clamp_total(f64::NAN, 0.0, 100.0), 0.0);
    assert_eq!(clamp_total(150.0, 0.0, 100.0), 100.0);
    assert_eq!(clamp_total(-3.0, 0.0, 100.0), 0.0);
    // An inverted range collapses onto the lower bound instead of panicking.
    assert_eq!(clamp_total(5.0, 10.0, 0.0), 10.0);
}
