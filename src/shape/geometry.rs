use std::f64::consts::TAU;

use crate::foundation::core::{BezPath, Point, Rect, Vec2};
use crate::params::model::ShapeMode;

/// Smallest radius a perturbed vertex may collapse to, relative to the base radius.
const MIN_RADIUS_FRAC: f64 = 0.05;

/// Closed ring of vertices around a center, one per radial offset, evenly spaced in angle.
///
/// Vertex `i` sits at angle `i * TAU / n`, distance `radius + offsets[i]`.
pub fn vertex_ring(center: Point, radius: f64, offsets: &[f64]) -> Vec<Point> {
    let n = offsets.len().max(1) as f64;
    let floor = radius * MIN_RADIUS_FRAC;
    offsets
        .iter()
        .enumerate()
        .map(|(i, off)| {
            let theta = TAU * (i as f64) / n;
            let r = (radius + off).max(floor);
            center + Vec2::from_angle(theta) * r
        })
        .collect()
}

/// Smooth closed outline: quadratic segments through the edge midpoints, with each vertex as
/// the control point.
pub fn blob_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let Some(&last) = points.last() else {
        return path;
    };
    path.move_to(last.midpoint(points[0]));
    for (i, &p) in points.iter().enumerate() {
        let next = points[(i + 1) % points.len()];
        path.quad_to(p, p.midpoint(next));
    }
    path.close_path();
    path
}

/// Straight-edged closed polygon through every vertex.
pub fn polygon_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = points.iter();
    let Some(&first) = iter.next() else {
        return path;
    };
    path.move_to(first);
    for &p in iter {
        path.line_to(p);
    }
    path.close_path();
    path
}

pub fn silhouette_path(mode: ShapeMode, points: &[Point]) -> BezPath {
    match mode {
        ShapeMode::Blob => blob_path(points),
        ShapeMode::Spiky => polygon_path(points),
    }
}

/// Axis-aligned bounds of the vertices. Both path styles stay inside the vertex hull.
pub fn bounds(points: &[Point]) -> Rect {
    let mut iter = points.iter();
    let Some(&first) = iter.next() else {
        return Rect::ZERO;
    };
    iter.fold(Rect::from_points(first, first), |r, &p| r.union_pt(p))
}

#[cfg(test)]
#[path = "../../tests/unit/shape/geometry.rs"]
mod tests;
