use super::*;
use crate::{EditAction, PostFormat};

#[test]
fn font_size_scales_format_base() {
    let d = LayoutDocument::default();
    assert_eq!(font_size_rem(&d), 3.0);

    let d = d
        .apply(EditAction::SetFormat(PostFormat::Portrait))
        .apply(EditAction::SetHeadlineSize(50));
    assert_eq!(font_size_rem(&d), 1.75);

    let d = d.apply(EditAction::SetFormat(PostFormat::Landscape));
    assert!((font_size_rem(&d) - 1.6).abs() < 1e-12);
}

#[test]
fn segments_the_reference_headline() {
    let segs = segment_headline(
        "EZEN NEWS revelado: Novo gerador de posts {revoluciona} design digital",
    );
    assert_eq!(
        segs,
        vec![
            HeadlineSegment::plain("EZEN NEWS revelado: Novo gerador de posts "),
            HeadlineSegment::highlighted("revoluciona"),
            HeadlineSegment::plain(" design digital"),
        ]
    );
}

#[test]
fn segmentation_handles_multiple_and_edge_pairs() {
    assert_eq!(
        segment_headline("{a} b {c}"),
        vec![
            HeadlineSegment::highlighted("a"),
            HeadlineSegment::plain(" b "),
            HeadlineSegment::highlighted("c"),
        ]
    );
    assert_eq!(segment_headline(""), vec![]);
    assert_eq!(segment_headline("x{}y"), vec![
        HeadlineSegment::plain("x"),
        HeadlineSegment::plain("y"),
    ]);
}

#[test]
fn unbalanced_and_nested_braces_follow_first_match() {
    assert_eq!(
        segment_headline("open { never closed"),
        vec![HeadlineSegment::plain("open { never closed")]
    );
    assert_eq!(
        segment_headline("stray } brace"),
        vec![HeadlineSegment::plain("stray } brace")]
    );
    assert_eq!(
        segment_headline("{a{b}c}"),
        vec![
            HeadlineSegment::highlighted("a{b"),
            HeadlineSegment::plain("c}"),
        ]
    );
}

#[test]
fn highlight_pairs_stay_on_one_line() {
    assert_eq!(
        segment_headline("{a\nb}"),
        vec![HeadlineSegment::plain("{a\nb}")]
    );
    assert_eq!(
        segment_headline("x {a}\n{b}"),
        vec![
            HeadlineSegment::plain("x "),
            HeadlineSegment::highlighted("a"),
            HeadlineSegment::plain("\n"),
            HeadlineSegment::highlighted("b"),
        ]
    );
}

#[test]
fn derivations_are_idempotent() {
    let d = LayoutDocument::default();
    assert_eq!(font_size_rem(&d), font_size_rem(&d));
    assert_eq!(
        segment_headline(&d.headline_text),
        segment_headline(&d.headline_text)
    );
    assert_eq!(PostLayout::compute(&d, 3.0), PostLayout::compute(&d, 3.0));
}

#[test]
fn layout_places_circle_from_the_right_edge() {
    let d = LayoutDocument::default().apply(EditAction::SetCirclePosition { x: 10.0, y: 35.0 });
    let l = PostLayout::compute(&d, 1.0);
    assert_eq!(l.canvas, Size::new(360.0, 360.0));
    // diameter 30% of 360 = 108, right gap 36
    assert!((l.circle.x1 - 324.0).abs() < 1e-9);
    assert!((l.circle.x0 - 216.0).abs() < 1e-9);
    assert!((l.circle.y0 - 126.0).abs() < 1e-9);
    assert!((l.circle.width() - 108.0).abs() < 1e-9);
}

#[test]
fn layout_scales_headline_and_baseline() {
    let d = LayoutDocument::default()
        .apply(EditAction::SetFormat(PostFormat::Portrait))
        .apply(EditAction::SetHeadlineY(20.0));
    let l = PostLayout::compute(&d, 3.0);
    assert_eq!(l.canvas, Size::new(1080.0, 1350.0));
    assert_eq!(l.headline_bottom, 1350.0 - 200.0 * 3.0);
    assert_eq!(l.headline_font_px, 3.5 * 16.0 * 3.0);
    assert!((l.gradient_top - 1350.0 * 0.2).abs() < 1e-9);
    assert_eq!(l.brand_origin, Point::new(72.0, 120.0));
}

#[test]
fn cover_rect_fills_and_pans() {
    let c = Size::new(100.0, 100.0);
    // Tall image: full width, vertical overflow 100px.
    let top = cover_rect(c, Size::new(50.0, 100.0), 50.0, 0.0, 1.0);
    assert_eq!(top, Rect::new(0.0, 0.0, 100.0, 200.0));
    let bottom = cover_rect(c, Size::new(50.0, 100.0), 50.0, 100.0, 1.0);
    assert_eq!(bottom, Rect::new(0.0, -100.0, 100.0, 100.0));

    let zoomed = cover_rect(c, Size::new(100.0, 100.0), 50.0, 50.0, 2.0);
    assert_eq!(zoomed, Rect::new(-50.0, -50.0, 150.0, 150.0));
}
