use image::{GrayImage, imageops::FilterType};
use rand::Rng;

use crate::foundation::core::Canvas;
use crate::foundation::error::{StudioError, StudioResult};

/// Opaque gray grain covering the whole canvas, as premultiplied RGBA8.
///
/// Values are drawn row-major at `1 / downscale` resolution (at least 1x1) and upscaled with a
/// triangle filter, which keeps the grain soft rather than blocky.
pub fn grain_rgba8<R: Rng + ?Sized>(
    rng: &mut R,
    canvas: Canvas,
    downscale: u32,
) -> StudioResult<Vec<u8>> {
    let downscale = downscale.max(1);
    let sw = (canvas.width / downscale).max(1);
    let sh = (canvas.height / downscale).max(1);

    let values: Vec<u8> = (0..(sw as usize) * (sh as usize))
        .map(|_| rng.random::<u8>())
        .collect();
    let small = GrayImage::from_raw(sw, sh, values)
        .ok_or_else(|| StudioError::render("noise buffer size mismatch"))?;

    let full = if (sw, sh) == (canvas.width, canvas.height) {
        small
    } else {
        image::imageops::resize(&small, canvas.width, canvas.height, FilterType::Triangle)
    };

    let mut out = Vec::with_capacity(canvas.rgba_len());
    for g in full.into_raw() {
        out.extend_from_slice(&[g, g, g, 255]);
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/effects/noise.rs"]
mod tests;
