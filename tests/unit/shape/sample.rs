use super::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

fn canvas() -> Canvas {
    Canvas::new(400, 300).unwrap()
}

fn flags(shadow: bool, soften: bool) -> SampleFlags {
    SampleFlags { shadow, soften }
}

#[test]
fn centers_and_radii_respect_configured_ranges() {
    let cfg = CompositorConfig::default();
    let palette = Palette::named("pastel").unwrap();
    let mut rng = Pcg32::seed_from_u64(11);
    for _ in 0..200 {
        let s = sample_shape(
            &mut rng,
            canvas(),
            &palette,
            ShapeMode::Blob,
            flags(false, false),
            &cfg,
        );
        assert!((20.0..=380.0).contains(&s.center.x));
        assert!((15.0..=285.0).contains(&s.center.y));
        assert!((18.0..=66.0).contains(&s.radius));
        assert!((0.35..=0.95).contains(&s.main.alpha));
        assert!(palette.colors().contains(&s.main.color));
        assert_eq!(s.main.points.len(), cfg.blob.points as usize);
        assert!(s.shadow.is_none());
        assert!(s.main.blur_sigma.is_none());
    }
}

#[test]
fn same_seed_same_shapes() {
    let cfg = CompositorConfig::default();
    let palette = Palette::named("neon").unwrap();
    let draw = |seed| {
        let mut rng = Pcg32::seed_from_u64(seed);
        (0..5)
            .map(|_| {
                sample_shape(
                    &mut rng,
                    canvas(),
                    &palette,
                    ShapeMode::Spiky,
                    flags(true, true),
                    &cfg,
                )
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(42), draw(42));
    assert_ne!(draw(42), draw(43));
}

#[test]
fn forced_shadow_sits_beneath_and_offset() {
    let cfg = CompositorConfig {
        shadow_probability: 1.0,
        ..CompositorConfig::default()
    };
    let palette = Palette::named("warm").unwrap();
    let mut rng = Pcg32::seed_from_u64(3);
    let s = sample_shape(
        &mut rng,
        canvas(),
        &palette,
        ShapeMode::Blob,
        flags(true, false),
        &cfg,
    );

    let shadow = s.shadow.as_ref().expect("shadow forced on");
    let layers: Vec<_> = s.layers().collect();
    assert_eq!(layers[0], shadow);
    assert_eq!(layers[1], &s.main);
    assert!(shadow.alpha < s.main.alpha);
    assert!(shadow.color.r <= s.main.color.r);
    let d = shadow.points[0] - s.main.points[0];
    assert!(d.x > 0.0 && (d.x - d.y).abs() < 1e-9);
}

#[test]
fn spiky_never_gets_an_overlay() {
    let cfg = CompositorConfig {
        overlay_probability: 1.0,
        ..CompositorConfig::default()
    };
    let palette = Palette::named("cool").unwrap();
    let mut rng = Pcg32::seed_from_u64(5);
    for _ in 0..20 {
        let spiky = sample_shape(
            &mut rng,
            canvas(),
            &palette,
            ShapeMode::Spiky,
            flags(false, false),
            &cfg,
        );
        assert!(spiky.overlay.is_none());
        assert_eq!(spiky.main.points.len(), cfg.spiky.points as usize);
    }

    let blob = sample_shape(
        &mut rng,
        canvas(),
        &palette,
        ShapeMode::Blob,
        flags(false, false),
        &cfg,
    );
    let overlay = blob.overlay.expect("overlay forced on");
    assert_eq!(overlay.mode, ShapeMode::Blob);
}

#[test]
fn soften_samples_a_positive_sigma() {
    let cfg = CompositorConfig::default();
    let palette = Palette::named("muted").unwrap();
    let mut rng = Pcg32::seed_from_u64(8);
    let s = sample_shape(
        &mut rng,
        canvas(),
        &palette,
        ShapeMode::Blob,
        flags(false, true),
        &cfg,
    );
    assert!(s.main.blur_sigma.unwrap() >= 0.5);
}
