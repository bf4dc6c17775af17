use crate::foundation::core::Rgb8;
use crate::foundation::error::{StudioError, StudioResult};
use crate::foundation::math::mul_div255_u8;

/// Normalized 1-D Gaussian covering `±ceil(3σ)`.
#[derive(Clone, Debug, PartialEq)]
pub struct SoftenKernel {
    taps: Vec<f32>,
}

impl SoftenKernel {
    /// `None` when `sigma` is not a positive finite number.
    pub fn new(sigma: f64) -> Option<Self> {
        if !sigma.is_finite() || sigma <= 0.0 {
            return None;
        }
        let radius = (3.0 * sigma).ceil() as i32;
        let denom = 2.0 * sigma * sigma;
        let raw: Vec<f64> = (-radius..=radius)
            .map(|i| (-f64::from(i * i) / denom).exp())
            .collect();
        let sum: f64 = raw.iter().sum();
        Some(Self {
            taps: raw.iter().map(|w| (w / sum) as f32).collect(),
        })
    }

    /// Pixels the kernel reaches on either side of its center.
    pub fn radius(&self) -> u32 {
        (self.taps.len() / 2) as u32
    }

    pub fn taps(&self) -> &[f32] {
        &self.taps
    }
}

/// Soften a single-color layer in place.
///
/// `data` is premultiplied RGBA8 whose color channels are `color` scaled by coverage, which is
/// what an opaque fill produces. Only the coverage is blurred; the color channels are rebuilt
/// from `color` afterwards, so edges never pick up fringe tints. Samples past the layer border
/// repeat the border.
pub fn soften_layer(
    data: &mut [u8],
    width: u32,
    height: u32,
    color: Rgb8,
    kernel: &SoftenKernel,
) -> StudioResult<()> {
    let (w, h) = (width as usize, height as usize);
    if data.len() != w * h * 4 {
        return Err(StudioError::render(
            "soften_layer expects width*height*4 bytes",
        ));
    }
    if w == 0 || h == 0 {
        return Ok(());
    }

    let coverage: Vec<f32> = data.chunks_exact(4).map(|px| f32::from(px[3])).collect();
    let across = convolve_lines(&coverage, w, h, Axis::Rows, &kernel.taps);
    let soft = convolve_lines(&across, w, h, Axis::Columns, &kernel.taps);

    for (px, &c) in data.chunks_exact_mut(4).zip(&soft) {
        let a = c.round().clamp(0.0, 255.0) as u8;
        let tint = |channel: u8| mul_div255_u8(u16::from(channel), u16::from(a));
        px.copy_from_slice(&[tint(color.r), tint(color.g), tint(color.b), a]);
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Axis {
    Rows,
    Columns,
}

fn convolve_lines(src: &[f32], w: usize, h: usize, axis: Axis, taps: &[f32]) -> Vec<f32> {
    let r = (taps.len() / 2) as isize;
    let (len, lines) = match axis {
        Axis::Rows => (w, h),
        Axis::Columns => (h, w),
    };
    let index = |line: usize, i: usize| match axis {
        Axis::Rows => line * w + i,
        Axis::Columns => i * w + line,
    };

    let mut out = vec![0.0f32; src.len()];
    for line in 0..lines {
        for i in 0..len {
            let acc: f32 = taps
                .iter()
                .enumerate()
                .map(|(k, tap)| {
                    let j = (i as isize + k as isize - r).clamp(0, len as isize - 1) as usize;
                    tap * src[index(line, j)]
                })
                .sum();
            out[index(line, i)] = acc;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
