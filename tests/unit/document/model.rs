use super::*;

#[test]
fn defaults_satisfy_invariants() {
    let d = LayoutDocument::default();
    assert_eq!(d.format, PostFormat::Square);
    assert!(d.circle_x + d.circle_size <= 100.0);
    assert!(d.circle_y + d.circle_size <= 100.0);
    assert_eq!(d.clone().normalized(), d);
}

#[test]
fn json_uses_camel_case_and_roundtrips() {
    let d = LayoutDocument::default();
    let v = serde_json::to_value(&d).unwrap();
    assert_eq!(v["mainImageY"], 50.0);
    assert_eq!(v["circleSize"], 30.0);
    assert_eq!(v["format"], "square");
    assert_eq!(v["highlightColor"], "#facc15");
    assert!(v["mainImageRef"].is_null());

    let back = LayoutDocument::from_json_str(&v.to_string()).unwrap();
    assert_eq!(back, d);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let d = LayoutDocument::from_json_str(r#"{"format":"portrait","circleX":12}"#).unwrap();
    assert_eq!(d.format, PostFormat::Portrait);
    assert_eq!(d.circle_x, 12.0);
    assert_eq!(d.brand_name, "EZEN NEWS");
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = LayoutDocument::from_json_str("{not json").unwrap_err();
    assert!(matches!(err, BrandpostError::Serde(_)));
}

#[test]
fn loading_clamps_out_of_range_geometry() {
    let d = LayoutDocument::from_json_str(
        r#"{"circleSize":90,"circleX":50,"circleY":-4,"mainImageY":140,"headlineSize":500,"circleImageScale":0.2}"#,
    )
    .unwrap();
    assert_eq!(d.circle_size, 70.0);
    assert_eq!(d.circle_x, 30.0);
    assert_eq!(d.circle_y, 0.0);
    assert_eq!(d.main_image_y, 100.0);
    assert_eq!(d.headline_size, 160);
    assert_eq!(d.circle_image_scale, 1.0);
}

#[test]
fn growing_the_circle_pulls_it_back_inside() {
    let d = LayoutDocument::default()
        .apply(EditAction::SetCirclePosition { x: 65.0, y: 60.0 })
        .apply(EditAction::SetCircleSize(50.0));
    assert_eq!(d.circle_size, 50.0);
    assert_eq!(d.circle_x, 50.0);
    assert_eq!(d.circle_y, 50.0);
}

#[test]
fn setters_clamp_instead_of_failing() {
    let d = LayoutDocument::default()
        .apply(EditAction::SetMainImageY(-10.0))
        .apply(EditAction::SetCircleImageScale(9.0))
        .apply(EditAction::SetCircleImageY(f64::NAN))
        .apply(EditAction::SetHeadlineSize(10))
        .apply(EditAction::SetHeadlineY(f64::INFINITY));
    assert_eq!(d.main_image_y, 0.0);
    assert_eq!(d.circle_image_scale, 3.0);
    assert_eq!(d.circle_image_y, 0.0);
    assert_eq!(d.headline_size, 40);
    assert_eq!(d.headline_y, 0.0);
}

#[test]
fn reset_layout_keeps_content() {
    let d = LayoutDocument::default()
        .apply(EditAction::SetBrandName("ACME".to_owned()))
        .apply(EditAction::SetFormat(PostFormat::Landscape))
        .apply(EditAction::SetHeadlineY(42.0))
        .apply(EditAction::SetCircleSize(60.0))
        .apply(EditAction::ResetLayout);
    assert_eq!(d.brand_name, "ACME");
    assert_eq!(d.format, PostFormat::Landscape);
    assert_eq!(d.headline_y, 0.0);
    assert_eq!(d.circle_size, 30.0);
}

#[test]
fn apply_does_not_touch_the_previous_value() {
    let before = LayoutDocument::default();
    let after = before.clone().apply(EditAction::SetMainImageY(10.0));
    assert_eq!(before.main_image_y, 50.0);
    assert_eq!(after.main_image_y, 10.0);
}
