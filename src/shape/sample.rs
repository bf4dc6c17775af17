use rand::Rng;

use crate::foundation::core::{Canvas, Point, Rgb8, Vec2};
use crate::params::{config::CompositorConfig, model::ShapeMode, palette::Palette};
use crate::shape::geometry::vertex_ring;

/// One filled silhouette ready to rasterize.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ShapeLayer {
    pub mode: ShapeMode,
    pub points: Vec<Point>,
    pub color: Rgb8,
    pub alpha: f64,
    pub blur_sigma: Option<f64>,
}

/// A sampled shape with its optional shadow (painted first) and overlay (painted last).
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Shape {
    pub center: Point,
    pub radius: f64,
    pub main: ShapeLayer,
    pub shadow: Option<ShapeLayer>,
    pub overlay: Option<ShapeLayer>,
}

impl Shape {
    pub fn layers(&self) -> impl Iterator<Item = &ShapeLayer> {
        self.shadow
            .iter()
            .chain(std::iter::once(&self.main))
            .chain(self.overlay.iter())
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct SampleFlags {
    pub shadow: bool,
    pub soften: bool,
}

/// Draw one shape from `rng`.
///
/// Draw order is part of the seed contract: center x, center y, radius, color, alpha,
/// shadow roll, vertex offsets, blur sigma, overlay roll, overlay parameters. Draws for
/// disabled options are skipped entirely.
pub(crate) fn sample_shape<R: Rng + ?Sized>(
    rng: &mut R,
    canvas: Canvas,
    palette: &Palette,
    mode: ShapeMode,
    flags: SampleFlags,
    cfg: &CompositorConfig,
) -> Shape {
    let (w, h) = (f64::from(canvas.width), f64::from(canvas.height));
    let m = cfg.center_margin;
    let cx = uniform(rng, m * w, (1.0 - m) * w);
    let cy = uniform(rng, m * h, (1.0 - m) * h);
    let center = Point::new(cx, cy);

    let min_side = canvas.min_side();
    let radius = uniform(
        rng,
        cfg.radius_range.0 * min_side,
        cfg.radius_range.1 * min_side,
    )
    .max(1.0);

    let color = palette.pick(rng.random_range(0..palette.len()));
    let alpha = uniform(rng, cfg.alpha_range.0, cfg.alpha_range.1);

    let cast_shadow = flags.shadow && rng.random::<f64>() < cfg.shadow_probability;

    let points = sample_ring(rng, center, radius, mode, cfg);
    let blur_sigma = sample_sigma(rng, radius, flags.soften, cfg);

    let main = ShapeLayer {
        mode,
        points,
        color,
        alpha,
        blur_sigma,
    };

    let shadow = cast_shadow.then(|| {
        let offset = Vec2::new(radius * cfg.shadow_offset, radius * cfg.shadow_offset);
        ShapeLayer {
            mode,
            points: main.points.iter().map(|&p| p + offset).collect(),
            color: color.scaled(cfg.shadow_darken),
            alpha: alpha * cfg.shadow_alpha_scale,
            blur_sigma,
        }
    });

    let overlay = match mode {
        ShapeMode::Blob if rng.random::<f64>() < cfg.overlay_probability => {
            let span = cfg.overlay_offset * radius;
            let dx = uniform(rng, -span, span);
            let dy = uniform(rng, -span, span);
            let scale = uniform(rng, cfg.overlay_scale_range.0, cfg.overlay_scale_range.1);
            let color = palette.pick(rng.random_range(0..palette.len()));
            let alpha = uniform(rng, cfg.alpha_range.0, cfg.alpha_range.1);
            let o_center = center + Vec2::new(dx, dy);
            let o_radius = (radius * scale).max(1.0);
            let points = sample_ring(rng, o_center, o_radius, ShapeMode::Blob, cfg);
            let blur_sigma = sample_sigma(rng, o_radius, flags.soften, cfg);
            Some(ShapeLayer {
                mode: ShapeMode::Blob,
                points,
                color,
                alpha,
                blur_sigma,
            })
        }
        _ => None,
    };

    Shape {
        center,
        radius,
        main,
        shadow,
        overlay,
    }
}

fn sample_ring<R: Rng + ?Sized>(
    rng: &mut R,
    center: Point,
    radius: f64,
    mode: ShapeMode,
    cfg: &CompositorConfig,
) -> Vec<Point> {
    let s = cfg.silhouette(mode);
    let span = s.irregularity * radius;
    let offsets: Vec<f64> = (0..s.points).map(|_| uniform(rng, -span, span)).collect();
    vertex_ring(center, radius, &offsets)
}

fn sample_sigma<R: Rng + ?Sized>(
    rng: &mut R,
    radius: f64,
    soften: bool,
    cfg: &CompositorConfig,
) -> Option<f64> {
    if !soften {
        return None;
    }
    let (lo, hi) = cfg.soften_sigma_range;
    Some(uniform(rng, lo * radius, hi * radius).max(0.5))
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi <= lo {
        return lo;
    }
    rng.random_range(lo..=hi)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/sample.rs"]
mod tests;
