//! genstudio is a deterministic procedural art compositor.
//!
//! One call turns a small parameter record into pixels:
//!
//! 1. **Background**: a vertical gradient from the first to the last palette color, or a flat
//!    fill with the first color.
//! 2. **Shapes**: `shape_count` irregular silhouettes (smooth blobs or jagged spiky polygons),
//!    each with an optional offset shadow beneath it and, for blobs, an occasional smaller
//!    overlay blob. Every silhouette is rasterized anti-aliased and alpha-blended onto the
//!    canvas.
//! 3. **Finish**: an optional low-opacity gray grain and an optional caption panel.
//!
//! The design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic per seed**: one random stream per call, consumed in a fixed order. Seed 0
//!   asks for fresh entropy; any other seed reproduces the same image bit for bit.
//! - **No shared mutable state**: each render owns its canvas and generator, so renders can run
//!   in parallel (see [`render_variations`]).
//! - **No IO in the compositor**: encoding and saving are explicit calls on [`RasterImage`].
//!
//! ```no_run
//! use genstudio::{Palette, RenderParams, ShapeMode, render};
//!
//! let mut params = RenderParams::new(400, 400, Palette::named("pastel")?);
//! params.shape_count = 10;
//! params.seed = 42;
//! params.mode = ShapeMode::Blob;
//! params.options.shadow = true;
//! let image = render(&params)?;
//! image.save_png(std::path::Path::new("out.png"))?;
//! # Ok::<(), genstudio::StudioError>(())
//! ```
#![forbid(unsafe_code)]

mod effects;
mod foundation;
mod params;
mod render;
mod shape;
mod studio;

pub use foundation::core::{Canvas, MAX_SIDE, Rgb8};
pub use foundation::error::{StudioError, StudioResult};
pub use params::config::{CompositorConfig, LabelConfig, NoiseConfig, SilhouetteConfig};
pub use params::model::{RenderOptions, RenderParams, ShapeMode};
pub use params::palette::Palette;
pub use render::compositor::{Compositor, render};
pub use render::raster::RasterImage;
pub use studio::gallery::{EntryMeta, Gallery, GalleryEntry};
pub use studio::prompt::{AspectRatio, Prompt};
pub use studio::variations::{MAX_RANDOM_SEED, Variation, render_variations, variation_seeds};
