use super::*;

#[test]
fn canvas_rejects_non_positive_sides() {
    for (w, h) in [(0, 10), (10, 0), (-1, 400), (400, -5)] {
        assert!(matches!(
            Canvas::new(w, h),
            Err(StudioError::InvalidDimension { .. })
        ));
    }
}

#[test]
fn canvas_rejects_sides_beyond_rasterizer_limit() {
    let too_big = i64::from(MAX_SIDE) + 1;
    assert!(Canvas::new(too_big, 1).is_err());
    assert!(Canvas::new(i64::from(MAX_SIDE), 1).is_ok());
}

#[test]
fn lerp_endpoints_and_truncation() {
    let a = Rgb8::new(255, 179, 186);
    let b = Rgb8::new(186, 225, 255);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    // 0.5 * 255 + 0.5 * 186 = 220.5 -> 220
    assert_eq!(a.lerp(b, 0.5).r, 220);
}

#[test]
fn rgb_serializes_as_triplet() {
    let c = Rgb8::new(1, 2, 3);
    assert_eq!(serde_json::to_string(&c).unwrap(), "[1,2,3]");
    let back: Rgb8 = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(back, c);
}
