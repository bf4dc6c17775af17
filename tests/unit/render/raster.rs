use super::*;
use crate::foundation::core::Rgb8;
use crate::params::model::ShapeMode;
use crate::shape::geometry::vertex_ring;

fn square_canvas(side: i64) -> Canvas {
    Canvas::new(side, side).unwrap()
}

fn disc(center: Point, radius: f64, mode: ShapeMode, blur_sigma: Option<f64>) -> ShapeLayer {
    ShapeLayer {
        mode,
        points: vertex_ring(center, radius, &[0.0; 16]),
        color: Rgb8::new(200, 40, 10),
        alpha: 1.0,
        blur_sigma,
    }
}

fn layer_px(layer: &Layer, cx: i64, cy: i64) -> [u8; 4] {
    let lx = (cx - layer.x) as usize;
    let ly = (cy - layer.y) as usize;
    let idx = (ly * layer.width as usize + lx) * 4;
    [
        layer.data[idx],
        layer.data[idx + 1],
        layer.data[idx + 2],
        layer.data[idx + 3],
    ]
}

#[test]
fn filled_center_is_opaque_shape_color() {
    let shape = disc(Point::new(32.0, 32.0), 12.0, ShapeMode::Blob, None);
    let layer = rasterize_layer(&shape, square_canvas(64)).unwrap().unwrap();
    assert_eq!(layer_px(&layer, 32, 32), [200, 40, 10, 255]);
    // Corner of the padded bbox is outside the silhouette.
    assert_eq!(layer.data[3], 0);
}

#[test]
fn layer_is_clipped_to_canvas() {
    let shape = disc(Point::new(2.0, 2.0), 10.0, ShapeMode::Spiky, None);
    let layer = rasterize_layer(&shape, square_canvas(32)).unwrap().unwrap();
    assert_eq!((layer.x, layer.y), (0, 0));
    assert!(layer.width <= 32 && layer.height <= 32);
    assert_eq!(layer.data.len(), (layer.width * layer.height * 4) as usize);
}

#[test]
fn shape_outside_canvas_yields_no_layer() {
    let shape = disc(Point::new(-100.0, -100.0), 5.0, ShapeMode::Blob, None);
    assert!(rasterize_layer(&shape, square_canvas(16)).unwrap().is_none());
}

#[test]
fn blur_softens_the_edge() {
    let sharp = disc(Point::new(32.0, 32.0), 10.0, ShapeMode::Blob, None);
    let soft = disc(Point::new(32.0, 32.0), 10.0, ShapeMode::Blob, Some(2.0));
    let sharp = rasterize_layer(&sharp, square_canvas(64)).unwrap().unwrap();
    let soft = rasterize_layer(&soft, square_canvas(64)).unwrap().unwrap();

    // Just outside the radius: no coverage when sharp, some when blurred.
    assert_eq!(layer_px(&sharp, 44, 32)[3], 0);
    assert!(layer_px(&soft, 44, 32)[3] > 0);
}

#[test]
fn softened_layer_is_padded_and_keeps_its_color() {
    let sharp = disc(Point::new(40.0, 40.0), 10.0, ShapeMode::Blob, None);
    let soft = disc(Point::new(40.0, 40.0), 10.0, ShapeMode::Blob, Some(2.0));
    let sharp = rasterize_layer(&sharp, square_canvas(80)).unwrap().unwrap();
    let soft = rasterize_layer(&soft, square_canvas(80)).unwrap().unwrap();

    // sigma 2 reaches 6 px further on every side.
    assert_eq!(soft.width, sharp.width + 12);
    assert_eq!(soft.x, sharp.x - 6);
    assert_eq!(layer_px(&soft, 40, 40), [200, 40, 10, 255]);
    for px in soft.data.chunks_exact(4) {
        let a = u32::from(px[3]);
        assert_eq!(u32::from(px[0]), (200 * a + 127) / 255);
    }
}

#[test]
fn png_encoding_decodes_to_the_same_pixels() {
    let img = RasterImage {
        width: 2,
        height: 1,
        data: vec![255, 0, 0, 255, 0, 0, 255, 255],
    };
    let png = img.encode_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.into_raw(), img.data);
    assert_eq!(img.to_rgb8(), vec![255, 0, 0, 0, 0, 255]);
}

#[test]
fn mismatched_raster_fails_to_encode() {
    let img = RasterImage {
        width: 3,
        height: 3,
        data: vec![0; 4],
    };
    assert!(matches!(img.encode_png(), Err(StudioError::Render(_))));
}
