use std::sync::{Arc, OnceLock};

use rand::SeedableRng;
use rand_pcg::Pcg32;
use usvg::fontdb;

use crate::effects::composite::{Placement, blend_at_in_place, blend_in_place};
use crate::effects::noise::grain_rgba8;
use crate::foundation::core::Canvas;
use crate::foundation::error::{StudioError, StudioResult};
use crate::params::{
    config::CompositorConfig,
    model::{RenderOptions, RenderParams},
    palette::Palette,
};
use crate::render::{label, raster::RasterImage, raster::rasterize_layer};
use crate::shape::sample::{SampleFlags, sample_shape};

/// Layered procedural compositor.
///
/// Holds the sampling configuration and a lazily loaded, read-only font database for labels.
/// Every [`Compositor::render`] call owns its own canvas and random stream, so one compositor
/// can serve any number of threads.
pub struct Compositor {
    config: CompositorConfig,
    fonts: OnceLock<Arc<fontdb::Database>>,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            config: CompositorConfig::default(),
            fonts: OnceLock::new(),
        }
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor")
            .field("config", &self.config)
            .field("fonts_loaded", &self.fonts.get().is_some())
            .finish()
    }
}

impl Compositor {
    pub fn new(config: CompositorConfig) -> StudioResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fonts: OnceLock::new(),
        })
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    fn fonts(&self) -> &Arc<fontdb::Database> {
        self.fonts
            .get_or_init(|| label::load_fontdb(&self.config.label))
    }

    /// Render one image.
    ///
    /// Fails with [`StudioError::InvalidDimension`] or [`StudioError::InvalidPalette`]
    /// before any drawing. With `seed > 0` the output is a pure function of `params` and
    /// the compositor's configuration.
    #[tracing::instrument(
        skip(self, params),
        fields(
            width = params.width,
            height = params.height,
            seed = params.seed,
            mode = %params.mode,
            shapes = params.shape_count
        )
    )]
    pub fn render(&self, params: &RenderParams) -> StudioResult<RasterImage> {
        let canvas = Canvas::new(params.width, params.height)?;
        if params.palette.is_empty() {
            return Err(StudioError::InvalidPalette);
        }

        let mut rng = rng_for_seed(params.seed);
        let mut pixels = paint_background(canvas, &params.palette, params.options.gradient);

        let flags = SampleFlags {
            shadow: params.options.shadow,
            soften: params.options.soften,
        };
        for i in 0..params.shape_count {
            let shape = sample_shape(
                &mut rng,
                canvas,
                &params.palette,
                params.mode,
                flags,
                &self.config,
            );
            tracing::debug!(
                index = i,
                x = shape.center.x,
                y = shape.center.y,
                radius = shape.radius,
                shadow = shape.shadow.is_some(),
                overlay = shape.overlay.is_some(),
                "shape sampled"
            );
            for layer in shape.layers() {
                let Some(raster) = rasterize_layer(layer, canvas)? else {
                    continue;
                };
                blend_at_in_place(
                    &mut pixels,
                    &raster.data,
                    Placement {
                        dst_width: canvas.width,
                        dst_height: canvas.height,
                        src_width: raster.width,
                        src_height: raster.height,
                        x: raster.x,
                        y: raster.y,
                        opacity: layer.alpha as f32,
                    },
                )?;
            }
        }

        self.finish(&mut rng, canvas, &mut pixels, &params.options)?;

        Ok(RasterImage {
            width: canvas.width,
            height: canvas.height,
            data: pixels,
        })
    }

    fn finish(
        &self,
        rng: &mut Pcg32,
        canvas: Canvas,
        pixels: &mut [u8],
        options: &RenderOptions,
    ) -> StudioResult<()> {
        if options.noise {
            let grain = grain_rgba8(rng, canvas, self.config.noise.downscale)?;
            blend_in_place(pixels, &grain, self.config.noise.opacity)?;
        }
        if let Some(text) = &options.label {
            label::draw_label(pixels, canvas, text, &self.config.label, self.fonts())?;
        }
        Ok(())
    }
}

/// Render with the default configuration.
pub fn render(params: &RenderParams) -> StudioResult<RasterImage> {
    Compositor::default().render(params)
}

/// Seed 0 draws a fresh stream from thread-local entropy; anything else is reproducible.
pub(crate) fn rng_for_seed(seed: u64) -> Pcg32 {
    if seed == 0 {
        Pcg32::from_rng(&mut rand::rng())
    } else {
        Pcg32::seed_from_u64(seed)
    }
}

/// Opaque background: a vertical first-to-last palette gradient, or a flat first color.
pub(crate) fn paint_background(canvas: Canvas, palette: &Palette, gradient: bool) -> Vec<u8> {
    let (w, h) = (canvas.width as usize, canvas.height as usize);
    let mut pixels = Vec::with_capacity(canvas.rgba_len());
    let (top, bottom) = (palette.first(), palette.last());
    for y in 0..h {
        let color = if gradient {
            top.lerp(bottom, y as f64 / h as f64)
        } else {
            top
        };
        let px = color.to_rgba(255);
        for _ in 0..w {
            pixels.extend_from_slice(&px);
        }
    }
    pixels
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
