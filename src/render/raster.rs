use std::{io::Cursor, path::Path};

use anyhow::Context as _;

use crate::effects::blur::{SoftenKernel, soften_layer};
use crate::foundation::core::{BezPath, Canvas, Point};
use crate::foundation::error::{StudioError, StudioResult};
use crate::shape::{geometry, sample::ShapeLayer};

/// Finished render: opaque RGBA8, row-major, tightly packed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl RasterImage {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Drop the (always opaque) alpha channel.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    pub fn to_rgba_image(&self) -> StudioResult<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.data.clone())
            .ok_or_else(|| StudioError::render("raster byte length does not match its size"))
    }

    pub fn encode_png(&self) -> StudioResult<Vec<u8>> {
        let img = self.to_rgba_image()?;
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(bytes)
    }

    pub fn save_png(&self, path: &Path) -> StudioResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        image::save_buffer_with_format(
            path,
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

/// A rasterized silhouette covering only its (padded, canvas-clipped) bounding box.
#[derive(Clone, Debug)]
pub(crate) struct Layer {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8.
    pub data: Vec<u8>,
}

/// Anti-aliased fill of one shape layer in its opaque color, optionally blurred.
///
/// Returns `None` when the padded bounds miss the canvas entirely.
pub(crate) fn rasterize_layer(shape: &ShapeLayer, canvas: Canvas) -> StudioResult<Option<Layer>> {
    let kernel = shape.blur_sigma.and_then(SoftenKernel::new);
    let pad = 2.0 + kernel.as_ref().map_or(0.0, |k| f64::from(k.radius()));

    let b = geometry::bounds(&shape.points);
    let x0 = ((b.x0 - pad).floor() as i64).max(0);
    let y0 = ((b.y0 - pad).floor() as i64).max(0);
    let x1 = ((b.x1 + pad).ceil() as i64).min(i64::from(canvas.width));
    let y1 = ((b.y1 + pad).ceil() as i64).min(i64::from(canvas.height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(None);
    }
    let (w, h) = ((x1 - x0) as u32, (y1 - y0) as u32);
    let w16: u16 = w
        .try_into()
        .map_err(|_| StudioError::render("layer width exceeds u16"))?;
    let h16: u16 = h
        .try_into()
        .map_err(|_| StudioError::render("layer height exceeds u16"))?;

    let path = geometry::silhouette_path(shape.mode, &shape.points);

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate(
        vello_cpu::kurbo::Vec2::new(-(x0 as f64), -(y0 as f64)),
    ));
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
        shape.color.r,
        shape.color.g,
        shape.color.b,
        255,
    ));
    ctx.fill_path(&bezpath_to_cpu(&path));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);
    let mut data = pixmap.data_as_u8_slice().to_vec();

    if let Some(kernel) = &kernel {
        soften_layer(&mut data, w, h, shape.color, kernel)?;
    }

    Ok(Some(Layer {
        x: x0,
        y: y0,
        width: w,
        height: h,
        data,
    }))
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
