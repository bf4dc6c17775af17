use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StudioError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StudioError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        StudioError::UnknownPalette("sepia".to_string())
            .to_string()
            .contains("'sepia'")
    );
}

#[test]
fn invalid_dimension_reports_both_sides() {
    let err = StudioError::InvalidDimension {
        width: -1,
        height: 400,
        max: 65535,
    };
    let msg = err.to_string();
    assert!(msg.contains("-1x400"));
    assert!(msg.contains("65535"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StudioError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
