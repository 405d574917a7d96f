//! Additive noise ("add artifacts").

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::state::ImageState;

/// Add uniform noise in `[0, amplitude)` to every channel of every pixel.
///
/// Sums saturate at 255. The generator is seeded by the caller, so the same
/// seed on the same image always produces the same result. An amplitude of
/// zero returns an unchanged copy.
pub fn add_noise(image: &ImageState, amplitude: u8, seed: u64) -> ImageState {
    let mut out = image.clone();
    if amplitude == 0 {
        return out;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    for value in out.pixels.iter_mut() {
        *value = value.saturating_add(rng.gen_range(0..amplitude));
    }
    out
}
