use super::*;

fn offline_cfg() -> LabelConfig {
    LabelConfig {
        system_fonts: false,
        ..LabelConfig::default()
    }
}

#[test]
fn truncation_appends_ellipsis_only_when_cut() {
    assert_eq!(truncate_label("short", 10), "short");
    assert_eq!(truncate_label("abcdef", 3), "abc...");
    // Counts characters, not bytes.
    assert_eq!(truncate_label("ééééé", 2), "éé...");
}

#[test]
fn font_size_scales_with_canvas_and_has_a_floor() {
    let cfg = LabelConfig::default();
    assert_eq!(font_px(Canvas::new(1024, 2048).unwrap(), &cfg), 28.0);
    assert_eq!(font_px(Canvas::new(64, 64).unwrap(), &cfg), 10.0);
}

#[test]
fn offline_fontdb_is_empty() {
    assert!(load_fontdb(&offline_cfg()).is_empty());
}

#[test]
fn builtin_label_paints_panel_in_bottom_left() {
    let canvas = Canvas::new(200, 100).unwrap();
    let cfg = offline_cfg();
    let overlay = builtin_label(canvas, "HI", 16.0, &cfg).unwrap();
    assert_eq!(overlay.len(), canvas.rgba_len());

    let px = |x: usize, y: usize| {
        let i = (y * 200 + x) * 4;
        [overlay[i], overlay[i + 1], overlay[i + 2], overlay[i + 3]]
    };
    // Top-left area is untouched.
    assert_eq!(px(5, 5), [0, 0, 0, 0]);
    // Panel corner at (margin + 1, bottom - margin - 1) carries the panel alpha.
    assert_eq!(px(11, 88)[3], cfg.panel_alpha);
    // First lit cell of 'H' (column 0, row 0) is opaque text color.
    // scale = 2, text height = 14, panel top = 100 - 10 - 14 - 12 = 64, origin = (16, 70).
    assert_eq!(px(16, 70), [30, 30, 40, 255]);
}

#[test]
fn draw_label_falls_back_without_fonts() {
    let canvas = Canvas::new(120, 60).unwrap();
    let cfg = offline_cfg();
    let fonts = load_fontdb(&cfg);

    let mut pixels = [0u8, 0, 0, 255].repeat(canvas.width as usize * canvas.height as usize);
    draw_label(&mut pixels, canvas, "seed 42", &cfg, &fonts).unwrap();

    let mut expected = [0u8, 0, 0, 255].repeat(canvas.width as usize * canvas.height as usize);
    let overlay = builtin_label(canvas, "seed 42", font_px(canvas, &cfg), &cfg).unwrap();
    blend_in_place(&mut expected, &overlay, 1.0).unwrap();
    assert_eq!(pixels, expected);
    assert!(pixels.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn blank_label_draws_nothing() {
    let canvas = Canvas::new(32, 32).unwrap();
    let cfg = offline_cfg();
    let fonts = load_fontdb(&cfg);
    let mut pixels = vec![7u8; canvas.rgba_len()];
    draw_label(&mut pixels, canvas, "   ", &cfg, &fonts).unwrap();
    assert!(pixels.iter().all(|&b| b == 7));
}

#[test]
fn xml_special_chars_are_escaped() {
    assert_eq!(escape_xml(r#"a<b>&"c'"#), "a&lt;b&gt;&amp;&quot;c&apos;");
}

#[test]
fn system_font_caption_sits_bottom_left_and_repeats() {
    let cfg = LabelConfig {
        system_fonts: true,
        ..LabelConfig::default()
    };
    let fonts = load_fontdb(&cfg);
    if fonts.is_empty() {
        eprintln!("no system fonts installed; skipping");
        return;
    }

    let canvas = Canvas::new(320, 200).unwrap();
    let size = font_px(canvas, &cfg);
    let overlay = svg_label(canvas, "harbor", size, &cfg, &fonts).expect("caption via usvg");
    assert_eq!(overlay.len(), canvas.rgba_len());
    assert_eq!(
        svg_label(canvas, "harbor", size, &cfg, &fonts).as_deref(),
        Some(overlay.as_slice())
    );

    let alpha = |x: usize, y: usize| overlay[(y * 320 + x) * 4 + 3];
    // Nothing above the panel or right of the short caption.
    assert!(overlay[..320 * 100 * 4].iter().all(|&b| b == 0));
    assert_eq!(alpha(315, 185), 0);
    // Panel corner just inside the margin.
    assert!(alpha(11, 188) > 150);
    // Text is darker than the bare panel somewhere on the panel.
    let dark = (12..120)
        .flat_map(|x| (170..188).map(move |y| (x, y)))
        .any(|(x, y)| {
            let i = (y * 320 + x) * 4;
            overlay[i + 3] > 200 && overlay[i] < 150
        });
    assert!(dark);
}

#[test]
fn system_font_label_composites_onto_canvas() {
    let cfg = LabelConfig {
        system_fonts: true,
        ..LabelConfig::default()
    };
    let fonts = load_fontdb(&cfg);
    if fonts.is_empty() {
        eprintln!("no system fonts installed; skipping");
        return;
    }

    let canvas = Canvas::new(160, 90).unwrap();
    let blank = [40u8, 80, 120, 255].repeat(160 * 90);
    let mut a = blank.clone();
    let mut b = blank.clone();
    draw_label(&mut a, canvas, "dusk", &cfg, &fonts).unwrap();
    draw_label(&mut b, canvas, "dusk", &cfg, &fonts).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, blank);
    assert!(a.chunks_exact(4).all(|px| px[3] == 255));
    assert_eq!(a[..160 * 40 * 4], blank[..160 * 40 * 4]);
}
