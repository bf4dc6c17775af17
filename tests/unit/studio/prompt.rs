use super::*;

#[test]
fn prompt_text_orders_fields() {
    let p = Prompt {
        subject: "a fox".to_string(),
        style: "watercolor".to_string(),
        mood: "calm".to_string(),
        palette: "warm".to_string(),
        composition: "rule of thirds".to_string(),
        details: "soft rim light".to_string(),
    };
    assert_eq!(
        p.text(),
        "a fox, watercolor, mood: calm, colors: warm, composition: rule of thirds, soft rim light"
    );
    assert_eq!(p.to_string(), p.text());
}

#[test]
fn aspect_dimensions_keep_the_long_edge() {
    assert_eq!(AspectRatio::Square.dimensions(1024), (1024, 1024));
    assert_eq!(AspectRatio::Portrait4x5.dimensions(1000), (800, 1000));
    assert_eq!(AspectRatio::Landscape16x9.dimensions(1024), (1024, 576));
    assert_eq!(AspectRatio::Landscape16x9.dimensions(1), (1, 1));
}

#[test]
fn aspect_parses_and_displays() {
    for s in ["4:5", "1:1", "16:9"] {
        assert_eq!(s.parse::<AspectRatio>().unwrap().to_string(), s);
    }
    assert!("3:2".parse::<AspectRatio>().is_err());
}
