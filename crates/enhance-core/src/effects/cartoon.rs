//! Cartoon-style stylization.
//!
//! ## Algorithm
//! 1. Convert to grayscale (fixed-point BT.601 weights)
//! 2. Edge mask: adaptive mean threshold. A pixel is kept when it is brighter
//!    than `mean(block) - c` over a `block x block` window (replicated border)
//! 3. Color: bilateral filter over a circular window of the given diameter,
//!    weighting neighbours by spatial distance and by L1 color distance
//!    (reflected border)
//! 4. Pixels outside the edge mask become black

use serde::{Deserialize, Serialize};

use super::EffectError;
use crate::state::{ImageState, CHANNELS};

/// Largest threshold block or bilateral diameter accepted.
///
/// Keeps the 8-bit window sums of the threshold within `u32`.
pub const MAX_WINDOW: u32 = 255;

/// Tuning for [`cartoonize`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartoonParams {
    /// Odd window size of the adaptive threshold.
    pub block_size: u32,
    /// Constant subtracted from the local mean.
    pub threshold_offset: i32,
    /// Bilateral filter window diameter.
    pub diameter: u32,
    pub sigma_color: f32,
    pub sigma_space: f32,
}

impl Default for CartoonParams {
    fn default() -> Self {
        Self {
            block_size: 9,
            threshold_offset: 10,
            diameter: 9,
            sigma_color: 300.0,
            sigma_space: 300.0,
        }
    }
}

impl CartoonParams {
    /// Check the window sizes and sigmas.
    pub fn validate(&self) -> Result<(), EffectError> {
        if self.block_size < 3 || self.block_size % 2 == 0 || self.block_size > MAX_WINDOW {
            return Err(EffectError::OutOfRange {
                name: "threshold block size",
                value: self.block_size as f64,
            });
        }
        if self.diameter == 0 || self.diameter > MAX_WINDOW {
            return Err(EffectError::OutOfRange {
                name: "bilateral diameter",
                value: self.diameter as f64,
            });
        }
        for (name, sigma) in [
            ("sigma color", self.sigma_color),
            ("sigma space", self.sigma_space),
        ] {
            if !(sigma.is_finite() && sigma > 0.0) {
                return Err(EffectError::OutOfRange {
                    name,
                    value: sigma as f64,
                });
            }
        }
        Ok(())
    }
}

/// Apply the cartoon effect.
pub fn cartoonize(image: &ImageState, params: &CartoonParams) -> Result<ImageState, EffectError> {
    params.validate()?;

    let gray = grayscale(image);
    let edges = adaptive_threshold(
        &gray,
        image.width as usize,
        image.height as usize,
        params.block_size as usize,
        params.threshold_offset,
    );
    let mut out = bilateral_filter(image, params);

    for (pixel, &keep) in out.pixels.chunks_exact_mut(CHANNELS).zip(edges.iter()) {
        if !keep {
            pixel.fill(0);
        }
    }
    Ok(out)
}

/// Grayscale luma with the 14-bit fixed point weights 0.299/0.587/0.114.
fn grayscale(image: &ImageState) -> Vec<u8> {
    image
        .pixels
        .chunks_exact(CHANNELS)
        .map(|p| ((p[0] as u32 * 4899 + p[1] as u32 * 9617 + p[2] as u32 * 1868 + 8192) >> 14) as u8)
        .collect()
}

/// Binary edge mask: `true` where the pixel exceeds its local mean minus `offset`.
fn adaptive_threshold(gray: &[u8], width: usize, height: usize, block: usize, offset: i32) -> Vec<bool> {
    let radius = (block / 2) as i64;
    let area = (block * block) as u32;
    let integral = integral_image(gray, width, height);
    let stride = width + 1;

    let clamp = |v: i64, n: usize| v.clamp(0, n as i64 - 1) as usize;

    let mut mask = Vec::with_capacity(gray.len());
    for y in 0..height {
        for x in 0..width {
            // Replicated border: sum each clamped row/column span explicitly
            // when the window leaves the image, otherwise use the table.
            let (x0, x1) = (x as i64 - radius, x as i64 + radius);
            let (y0, y1) = (y as i64 - radius, y as i64 + radius);
            let inside = x0 >= 0 && y0 >= 0 && x1 < width as i64 && y1 < height as i64;

            let sum = if inside {
                let (x0, x1, y0, y1) = (x0 as usize, x1 as usize + 1, y0 as usize, y1 as usize + 1);
                integral[y1 * stride + x1] + integral[y0 * stride + x0]
                    - integral[y0 * stride + x1]
                    - integral[y1 * stride + x0]
            } else {
                let mut sum = 0u32;
                for wy in y0..=y1 {
                    let row = clamp(wy, height) * width;
                    for wx in x0..=x1 {
                        sum += gray[row + clamp(wx, width)] as u32;
                    }
                }
                sum
            };

            let mean = ((sum + area / 2) / area) as i32;
            mask.push(gray[y * width + x] as i32 - mean > -offset);
        }
    }
    mask
}

/// Summed-area table with a leading zero row and column.
fn integral_image(gray: &[u8], width: usize, height: usize) -> Vec<u32> {
    let stride = width + 1;
    let mut table = vec![0u32; stride * (height + 1)];
    for y in 0..height {
        let mut row_sum = 0u32;
        for x in 0..width {
            row_sum += gray[y * width + x] as u32;
            table[(y + 1) * stride + x + 1] = table[y * stride + x + 1] + row_sum;
        }
    }
    table
}

/// Reflect an out-of-range index back into `[0, n)` without repeating the edge.
fn reflect_101(mut i: i64, n: usize) -> usize {
    let n = n as i64;
    if n == 1 {
        return 0;
    }
    loop {
        if i < 0 {
            i = -i;
        } else if i >= n {
            i = 2 * (n - 1) - i;
        } else {
            return i as usize;
        }
    }
}

#[inline]
fn rgb_at(image: &ImageState, x: usize, y: usize) -> &[u8] {
    let i = (y * image.width as usize + x) * CHANNELS;
    &image.pixels[i..i + CHANNELS]
}

fn bilateral_filter(image: &ImageState, params: &CartoonParams) -> ImageState {
    let (width, height) = (image.width as usize, image.height as usize);
    let radius = (params.diameter / 2) as i64;

    let space_coeff = -0.5 / (params.sigma_space * params.sigma_space);
    let color_coeff = -0.5 / (params.sigma_color * params.sigma_color);

    // Circular window offsets with their spatial weights
    let mut window = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let dist_sq = (dx * dx + dy * dy) as f32;
            if dist_sq <= (radius * radius) as f32 {
                window.push((dx, dy, (dist_sq * space_coeff).exp()));
            }
        }
    }

    // Color weight indexed by L1 distance across the three channels
    let color_weights: Vec<f32> = (0..=255 * CHANNELS)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    let mut out = image.clone();

    for y in 0..height {
        for x in 0..width {
            let center = rgb_at(image, x, y);
            let mut acc = [0f32; 3];
            let mut total = 0f32;

            for &(dx, dy, space_weight) in &window {
                let nx = reflect_101(x as i64 + dx, width);
                let ny = reflect_101(y as i64 + dy, height);
                let neighbour = rgb_at(image, nx, ny);

                let distance: usize = center
                    .iter()
                    .zip(neighbour)
                    .map(|(&a, &b)| a.abs_diff(b) as usize)
                    .sum();
                let weight = space_weight * color_weights[distance];

                for c in 0..CHANNELS {
                    acc[c] += neighbour[c] as f32 * weight;
                }
                total += weight;
            }

            let i = (y * width + x) * CHANNELS;
            for c in 0..CHANNELS {
                out.pixels[i + c] = (acc[c] / total).round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    out
}
