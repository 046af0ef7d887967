use super::*;

#[test]
fn preview_sizes_match_aspect_ratios() {
    for f in PostFormat::ALL {
        let (aw, ah) = f.aspect_ratio();
        let size = f.preview_size();
        let lhs = size.width * f64::from(ah);
        let rhs = size.height * f64::from(aw);
        assert!((lhs - rhs).abs() < 1e-9, "{f:?}");
    }
}

#[test]
fn portrait_has_its_own_baseline_and_gradient() {
    assert_eq!(PostFormat::Portrait.headline_baseline_px(), 180.0);
    assert_eq!(PostFormat::Square.headline_baseline_px(), 100.0);
    assert_eq!(PostFormat::Landscape.headline_baseline_px(), 100.0);
    assert_eq!(PostFormat::Portrait.gradient_fraction(), 0.80);
    assert_eq!(PostFormat::Square.gradient_fraction(), 0.85);
}

#[test]
fn parses_and_serializes_lowercase_names() {
    assert_eq!("Portrait".parse::<PostFormat>().unwrap(), PostFormat::Portrait);
    assert!("story".parse::<PostFormat>().is_err());
    assert_eq!(
        serde_json::to_string(&PostFormat::Landscape).unwrap(),
        "\"landscape\""
    );
}
