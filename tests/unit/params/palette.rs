use super::*;

#[test]
fn empty_palette_is_rejected() {
    assert!(matches!(Palette::new(vec![]), Err(StudioError::InvalidPalette)));
}

#[test]
fn named_lookup_is_case_insensitive() {
    let p = Palette::named(" Pastel ").unwrap();
    assert_eq!(p.len(), 5);
    assert_eq!(p.first(), Rgb8::new(255, 179, 186));
    assert_eq!(p.last(), Rgb8::new(186, 225, 255));
}

#[test]
fn unknown_name_is_a_typed_error() {
    let err = "sepia".parse::<Palette>().unwrap_err();
    assert!(matches!(err, StudioError::UnknownPalette(ref n) if n == "sepia"));
}

#[test]
fn every_listed_name_resolves() {
    let names: Vec<_> = Palette::names().collect();
    assert_eq!(names.len(), 6);
    for name in names {
        assert!(!Palette::named(name).unwrap().is_empty());
    }
}

#[test]
fn deserializes_from_name_or_colors() {
    let p: Palette = serde_json::from_str(r#""neon""#).unwrap();
    assert_eq!(p.first(), Rgb8::new(255, 0, 102));

    let p: Palette = serde_json::from_str("[[1,2,3],[4,5,6]]").unwrap();
    assert_eq!(p.colors(), &[Rgb8::new(1, 2, 3), Rgb8::new(4, 5, 6)]);

    assert!(serde_json::from_str::<Palette>("[]").is_err());
    assert!(serde_json::from_str::<Palette>(r#""nope""#).is_err());
}

#[test]
fn pick_wraps_around() {
    let p = Palette::named("warm").unwrap();
    assert_eq!(p.pick(p.len()), p.first());
}

#[test]
fn name_recovers_builtin_only() {
    assert_eq!(Palette::named("COOL").unwrap().name(), Some("cool"));
    let custom = Palette::new(vec![Rgb8::new(1, 2, 3)]).unwrap();
    assert_eq!(custom.name(), None);
}
