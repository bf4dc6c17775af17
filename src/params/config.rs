use std::path::PathBuf;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{StudioError, StudioResult};
use crate::params::model::ShapeMode;

/// Vertex count and radial jitter for one silhouette family.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SilhouetteConfig {
    pub points: u32,
    /// Max per-vertex radial offset as a fraction of the base radius.
    pub irregularity: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Noise is generated at `1 / downscale` of the canvas size and upscaled.
    pub downscale: u32,
    pub opacity: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            downscale: 4,
            opacity: 0.08,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub max_chars: usize,
    /// Font size at a 1024px short side; scaled linearly with the canvas.
    pub font_px_at_1024: f64,
    pub min_font_px: f64,
    pub margin_px: f64,
    pub padding_px: f64,
    pub panel_rgb: Rgb8,
    pub panel_alpha: u8,
    pub text_rgb: Rgb8,
    /// Preferred font families, tried in order before the generic sans-serif.
    pub families: Vec<String>,
    /// Load the platform's installed fonts.
    pub system_fonts: bool,
    /// Extra directories scanned for `.ttf`/`.otf`/`.ttc` files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            max_chars: 120,
            font_px_at_1024: 28.0,
            min_font_px: 10.0,
            margin_px: 10.0,
            padding_px: 6.0,
            panel_rgb: Rgb8::new(255, 255, 255),
            panel_alpha: 200,
            text_rgb: Rgb8::new(30, 30, 40),
            families: vec!["DejaVu Sans".to_string()],
            system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// Every tunable probability and range used while sampling shapes.
///
/// Defaults reproduce the look of the reference studio. Any change here changes which
/// image a given seed produces.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Fraction of each axis kept free of shape centers on both sides.
    pub center_margin: f64,
    /// Base radius range as fractions of `min(width, height)`.
    pub radius_range: (f64, f64),
    pub alpha_range: (f64, f64),

    pub shadow_probability: f64,
    /// Shadow offset (right and down) as a fraction of the shape radius.
    pub shadow_offset: f64,
    pub shadow_darken: f64,
    pub shadow_alpha_scale: f64,

    /// Chance that a blob gets a smaller overlay blob.
    pub overlay_probability: f64,
    /// Max overlay center offset as a fraction of the parent radius.
    pub overlay_offset: f64,
    pub overlay_scale_range: (f64, f64),

    pub blob: SilhouetteConfig,
    pub spiky: SilhouetteConfig,

    /// Soften blur sigma range as fractions of the shape radius.
    pub soften_sigma_range: (f64, f64),

    pub noise: NoiseConfig,
    pub label: LabelConfig,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            center_margin: 0.05,
            radius_range: (0.06, 0.22),
            alpha_range: (0.35, 0.95),
            shadow_probability: 0.35,
            shadow_offset: 0.06,
            shadow_darken: 0.35,
            shadow_alpha_scale: 0.5,
            overlay_probability: 0.3,
            overlay_offset: 0.35,
            overlay_scale_range: (0.3, 0.6),
            blob: SilhouetteConfig {
                points: 18,
                irregularity: 0.22,
            },
            spiky: SilhouetteConfig {
                points: 9,
                irregularity: 0.55,
            },
            soften_sigma_range: (0.015, 0.045),
            noise: NoiseConfig::default(),
            label: LabelConfig::default(),
        }
    }
}

impl CompositorConfig {
    pub fn silhouette(&self, mode: ShapeMode) -> SilhouetteConfig {
        match mode {
            ShapeMode::Blob => self.blob,
            ShapeMode::Spiky => self.spiky,
        }
    }

    pub fn validate(&self) -> StudioResult<()> {
        fn range(name: &str, (lo, hi): (f64, f64), min: f64, max: f64) -> StudioResult<()> {
            if !(lo.is_finite() && hi.is_finite()) || lo > hi || lo < min || hi > max {
                return Err(StudioError::validation(format!(
                    "{name} must satisfy {min} <= lo <= hi <= {max}, got ({lo}, {hi})"
                )));
            }
            Ok(())
        }
        fn unit(name: &str, v: f64) -> StudioResult<()> {
            range(name, (v, v), 0.0, 1.0)
        }

        range("center_margin", (self.center_margin, self.center_margin), 0.0, 0.5)?;
        range("radius_range", self.radius_range, 0.0, 1.0)?;
        range("alpha_range", self.alpha_range, 0.0, 1.0)?;
        unit("shadow_probability", self.shadow_probability)?;
        unit("shadow_offset", self.shadow_offset)?;
        unit("shadow_darken", self.shadow_darken)?;
        unit("shadow_alpha_scale", self.shadow_alpha_scale)?;
        unit("overlay_probability", self.overlay_probability)?;
        unit("overlay_offset", self.overlay_offset)?;
        range("overlay_scale_range", self.overlay_scale_range, 0.0, 1.0)?;
        range("soften_sigma_range", self.soften_sigma_range, 0.0, 1.0)?;

        for (name, s) in [("blob", self.blob), ("spiky", self.spiky)] {
            if s.points < 3 {
                return Err(StudioError::validation(format!(
                    "{name}.points must be >= 3"
                )));
            }
            if !(0.0..1.0).contains(&s.irregularity) {
                return Err(StudioError::validation(format!(
                    "{name}.irregularity must be in [0, 1)"
                )));
            }
        }

        if self.noise.downscale == 0 {
            return Err(StudioError::validation("noise.downscale must be >= 1"));
        }
        if !(0.0..=1.0).contains(&self.noise.opacity) {
            return Err(StudioError::validation("noise.opacity must be in [0, 1]"));
        }
        if self.label.max_chars == 0 {
            return Err(StudioError::validation("label.max_chars must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/config.rs"]
mod tests;
