//! Sharpness enhancement.
//!
//! A degenerate copy is produced with the 3x3 smoothing kernel
//!
//! ```text
//! 1 1 1
//! 1 5 1   / 13
//! 1 1 1
//! ```
//!
//! and the output is `smooth + factor * (original - smooth)`. A factor above
//! 1.0 sharpens, below 1.0 softens, exactly 1.0 is the identity. The outermost
//! ring of pixels keeps its original values.

use serde::{Deserialize, Serialize};

use super::EffectError;
use crate::state::{ImageState, CHANNELS};

const KERNEL: [[u32; 3]; 3] = [[1, 1, 1], [1, 5, 1], [1, 1, 1]];
const KERNEL_SUM: u32 = 13;

/// Direction of a sharpness change requested from the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SharpenStrength {
    /// Increase sharpness ("Sharpen +").
    Enhance,
    /// Decrease sharpness ("Sharpen -").
    Reduce,
}

/// Apply a sharpness enhancement factor.
///
/// # Errors
///
/// Returns `EffectError::OutOfRange` for a negative or non-finite factor.
pub fn apply_sharpness(image: &ImageState, factor: f32) -> Result<ImageState, EffectError> {
    if !factor.is_finite() || factor < 0.0 {
        return Err(EffectError::OutOfRange {
            name: "sharpness factor",
            value: factor as f64,
        });
    }

    let smooth = smooth(image);
    let mut out = image.clone();

    for (dst, (&orig, &soft)) in out
        .pixels
        .iter_mut()
        .zip(image.pixels.iter().zip(smooth.iter()))
    {
        let soft = soft as f32;
        let blended = soft + factor * (orig as f32 - soft);
        *dst = blended.round().clamp(0.0, 255.0) as u8;
    }

    Ok(out)
}

/// Smoothed copy of the pixel buffer. Edge pixels are copied unchanged.
fn smooth(image: &ImageState) -> Vec<u8> {
    let mut out = image.pixels.clone();
    let (w, h) = (image.width as usize, image.height as usize);
    if w < 3 || h < 3 {
        return out;
    }

    let stride = w * CHANNELS;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            for c in 0..CHANNELS {
                let mut sum = 0u32;
                for (ky, row) in KERNEL.iter().enumerate() {
                    for (kx, &weight) in row.iter().enumerate() {
                        let idx = (y + ky - 1) * stride + (x + kx - 1) * CHANNELS + c;
                        sum += weight * image.pixels[idx] as u32;
                    }
                }
                out[y * stride + x * CHANNELS + c] = ((sum + KERNEL_SUM / 2) / KERNEL_SUM) as u8;
            }
        }
    }
    out
}
