use rand::Rng;
use rayon::prelude::*;

use crate::foundation::error::StudioResult;
use crate::params::model::RenderParams;
use crate::render::{compositor::Compositor, raster::RasterImage};

/// Largest seed handed out for randomized variations.
pub const MAX_RANDOM_SEED: u64 = (1 << 31) - 1;

/// Seeds for `n` variations: consecutive from `seed` when it is positive, otherwise fresh
/// random seeds in `1..=MAX_RANDOM_SEED` so every variation is still reproducible afterwards.
///
/// Consecutive seeds wrap past `u64::MAX` to 1; 0 is never handed out.
pub fn variation_seeds<R: Rng + ?Sized>(seed: u64, n: usize, rng: &mut R) -> Vec<u64> {
    if seed > 0 {
        std::iter::successors(Some(seed), |s| Some(s.wrapping_add(1).max(1)))
            .take(n)
            .collect()
    } else {
        (0..n).map(|_| rng.random_range(1..=MAX_RANDOM_SEED)).collect()
    }
}

/// One rendered variation and the seed that reproduces it.
#[derive(Clone, Debug)]
pub struct Variation {
    pub seed: u64,
    pub image: RasterImage,
}

/// Render `n` seed variations of `params` in parallel, returned in seed order.
#[tracing::instrument(skip(compositor, params), fields(seed = params.seed))]
pub fn render_variations(
    compositor: &Compositor,
    params: &RenderParams,
    n: usize,
) -> StudioResult<Vec<Variation>> {
    let seeds = variation_seeds(params.seed, n, &mut rand::rng());
    seeds
        .into_par_iter()
        .map(|seed| {
            let image = compositor.render(&params.with_seed(seed))?;
            Ok(Variation { seed, image })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/studio/variations.rs"]
mod tests;
