use std::{fmt, path::Path, str::FromStr};

use anyhow::Context as _;

use crate::foundation::error::{StudioError, StudioResult};
use crate::params::palette::{Palette, PaletteRepr};

/// Silhouette family for every shape in one render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeMode {
    /// Smooth, organic outlines with many mildly perturbed vertices.
    #[default]
    Blob,
    /// Jagged star-like outlines with few strongly perturbed vertices.
    Spiky,
}

impl ShapeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blob => "blob",
            Self::Spiky => "spiky",
        }
    }
}

impl fmt::Display for ShapeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeMode {
    type Err = StudioError;

    fn from_str(s: &str) -> StudioResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "blob" => Ok(Self::Blob),
            "spiky" => Ok(Self::Spiky),
            _ => Err(StudioError::UnknownMode(s.to_string())),
        }
    }
}

/// Optional passes layered on top of the core shape compositing.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Vertical two-color gradient background instead of a flat fill.
    pub gradient: bool,
    /// Occasional darker offset duplicate beneath a shape.
    pub shadow: bool,
    /// Low-opacity gray grain over the finished canvas.
    pub noise: bool,
    /// Gaussian-soften each shape layer before compositing.
    pub soften: bool,
    /// Caption drawn on a light panel in the bottom-left corner.
    pub label: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            gradient: true,
            shadow: false,
            noise: false,
            soften: false,
            label: None,
        }
    }
}

/// Full input record for one render call.
///
/// `width` and `height` are signed so that bad input reaches validation instead of failing
/// to parse; `seed == 0` asks for a non-reproducible image.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RenderParamsRepr", into = "RenderParamsRepr")]
pub struct RenderParams {
    pub width: i64,
    pub height: i64,
    pub palette: Palette,
    pub shape_count: u32,
    pub seed: u64,
    pub mode: ShapeMode,
    pub options: RenderOptions,
}

/// Flat JSON record. The palette stays unvalidated here so that palette errors surface as
/// their own [`StudioError`] variants instead of a serde message.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct RenderParamsRepr {
    width: i64,
    height: i64,
    palette: PaletteRepr,
    shape_count: u32,
    #[serde(default)]
    seed: u64,
    #[serde(default)]
    mode: ShapeMode,
    #[serde(default = "default_gradient")]
    gradient: bool,
    #[serde(default)]
    shadow: bool,
    #[serde(default)]
    noise: bool,
    #[serde(default)]
    soften: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

fn default_gradient() -> bool {
    true
}

impl TryFrom<RenderParamsRepr> for RenderParams {
    type Error = StudioError;

    fn try_from(r: RenderParamsRepr) -> StudioResult<Self> {
        Ok(Self {
            width: r.width,
            height: r.height,
            palette: Palette::try_from(r.palette)?,
            shape_count: r.shape_count,
            seed: r.seed,
            mode: r.mode,
            options: RenderOptions {
                gradient: r.gradient,
                shadow: r.shadow,
                noise: r.noise,
                soften: r.soften,
                label: r.label,
            },
        })
    }
}

impl From<RenderParams> for RenderParamsRepr {
    fn from(p: RenderParams) -> Self {
        Self {
            width: p.width,
            height: p.height,
            palette: p.palette.into(),
            shape_count: p.shape_count,
            seed: p.seed,
            mode: p.mode,
            gradient: p.options.gradient,
            shadow: p.options.shadow,
            noise: p.options.noise,
            soften: p.options.soften,
            label: p.options.label,
        }
    }
}

impl RenderParams {
    pub fn new(width: i64, height: i64, palette: Palette) -> Self {
        Self {
            width,
            height,
            palette,
            shape_count: 12,
            seed: 0,
            mode: ShapeMode::Blob,
            options: RenderOptions::default(),
        }
    }

    pub fn with_seed(&self, seed: u64) -> Self {
        Self {
            seed,
            ..self.clone()
        }
    }

    /// Parse the flat JSON record. Unknown keys are rejected; an empty or unknown palette
    /// fails with [`StudioError::InvalidPalette`] / [`StudioError::UnknownPalette`].
    pub fn from_json_str(json: &str) -> StudioResult<Self> {
        let repr: RenderParamsRepr =
            serde_json::from_str(json).context("parse render params json")?;
        Self::try_from(repr)
    }

    pub fn from_path(path: &Path) -> StudioResult<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read render params '{}'", path.display()))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/model.rs"]
mod tests;
