use super::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

#[test]
fn grain_matches_canvas_size_and_is_opaque_gray() {
    let canvas = Canvas::new(37, 19).unwrap();
    let mut rng = Pcg32::seed_from_u64(1);
    let grain = grain_rgba8(&mut rng, canvas, 4).unwrap();
    assert_eq!(grain.len(), canvas.rgba_len());
    for px in grain.chunks_exact(4) {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert_eq!(px[3], 255);
    }
}

#[test]
fn grain_is_seed_stable() {
    let canvas = Canvas::new(16, 16).unwrap();
    let a = grain_rgba8(&mut Pcg32::seed_from_u64(9), canvas, 4).unwrap();
    let b = grain_rgba8(&mut Pcg32::seed_from_u64(9), canvas, 4).unwrap();
    assert_eq!(a, b);
}

#[test]
fn tiny_canvas_uses_one_sample() {
    let canvas = Canvas::new(2, 3).unwrap();
    let grain = grain_rgba8(&mut Pcg32::seed_from_u64(4), canvas, 8).unwrap();
    let first = &grain[0..4];
    assert!(grain.chunks_exact(4).all(|px| px == first));
}
