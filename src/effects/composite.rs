use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::unit_to_u8;

/// 255 * 255: full coverage at full opacity.
const FULL: u32 = 65_025;

/// Blend one premultiplied RGBA8 pixel over an opaque one at opacity `k / 255`.
///
/// `out = src * k + dst * (1 - src_a * k)`, rounded once. The result is always opaque.
fn blend_px(dst: &mut [u8], src: &[u8], k: u32) {
    let cover = u32::from(src[3]) * k;
    if cover == 0 {
        return;
    }
    let keep = FULL - cover;
    for c in 0..3 {
        let v = (u32::from(src[c]) * k * 255 + u32::from(dst[c]) * keep + FULL / 2) / FULL;
        dst[c] = v.min(255) as u8;
    }
    dst[3] = 255;
}

/// Blend a same-sized premultiplied buffer over an opaque canvas buffer.
pub fn blend_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> StudioResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(StudioError::render(
            "blend_in_place expects equal-length rgba8 buffers",
        ));
    }
    let k = u32::from(unit_to_u8(opacity));
    if k == 0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        blend_px(d, s, k);
    }
    Ok(())
}

/// Where a smaller layer lands on a larger destination buffer.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    pub dst_width: u32,
    pub dst_height: u32,
    pub src_width: u32,
    pub src_height: u32,
    /// Destination coordinates of the layer's top-left pixel; may be negative.
    pub x: i64,
    pub y: i64,
    pub opacity: f32,
}

/// Blend `src` over `dst` at an offset, clipping whatever falls outside `dst`.
pub fn blend_at_in_place(dst: &mut [u8], src: &[u8], place: Placement) -> StudioResult<()> {
    let Placement {
        dst_width,
        dst_height,
        src_width,
        src_height,
        x,
        y,
        opacity,
    } = place;

    let dst_len = (dst_width as usize) * (dst_height as usize) * 4;
    let src_len = (src_width as usize) * (src_height as usize) * 4;
    if dst.len() != dst_len || src.len() != src_len {
        return Err(StudioError::render(
            "blend_at_in_place expects buffers matching their declared sizes",
        ));
    }

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + i64::from(src_width)).min(i64::from(dst_width));
    let y1 = (y + i64::from(src_height)).min(i64::from(dst_height));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let run = ((x1 - x0) as usize) * 4;
    let sx = (x0 - x) as usize;
    for dy in y0..y1 {
        let sy = (dy - y) as usize;
        let s_idx = (sy * src_width as usize + sx) * 4;
        let d_idx = ((dy as usize) * dst_width as usize + x0 as usize) * 4;
        blend_in_place(&mut dst[d_idx..d_idx + run], &src[s_idx..s_idx + run], opacity)?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
