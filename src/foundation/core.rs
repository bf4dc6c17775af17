use crate::foundation::error::{StudioError, StudioResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Largest canvas side the CPU rasterizer can address.
pub const MAX_SIDE: u32 = u16::MAX as u32;

/// Straight (non-premultiplied) RGB8 color. Serialized as `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation from `self` (t = 0) to `other` (t = 1), truncating each channel.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 { ((1.0 - t) * f64::from(a) + t * f64::from(b)) as u8 };
        Self {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Multiply every channel by `factor` (clamped to `[0, 1]`), rounding.
    pub fn scaled(self, factor: f64) -> Self {
        let f = factor.clamp(0.0, 1.0);
        let s = |c: u8| -> u8 { (f64::from(c) * f).round() as u8 };
        Self {
            r: s(self.r),
            g: s(self.g),
            b: s(self.b),
        }
    }

    pub fn to_rgba(self, a: u8) -> [u8; 4] {
        [self.r, self.g, self.b, a]
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

/// Validated canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Accepts signed input so that callers can pass through unvalidated numbers; anything
    /// outside `1..=MAX_SIDE` is an [`StudioError::InvalidDimension`].
    pub fn new(width: i64, height: i64) -> StudioResult<Self> {
        let in_range = |v: i64| v > 0 && v <= i64::from(MAX_SIDE);
        if !in_range(width) || !in_range(height) {
            return Err(StudioError::InvalidDimension {
                width,
                height,
                max: MAX_SIDE,
            });
        }
        Ok(Self {
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn min_side(self) -> f64 {
        f64::from(self.width.min(self.height))
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize) * (self.height as usize) * 4
    }

    pub(crate) fn width_u16(self) -> u16 {
        self.width as u16
    }

    pub(crate) fn height_u16(self) -> u16 {
        self.height as u16
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
