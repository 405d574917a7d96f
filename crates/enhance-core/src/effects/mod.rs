//! Effect primitives applied by the editing session.
//!
//! Every primitive takes the current state by reference and returns a new
//! state; the input is never mutated. Parameters are validated up front so
//! the session can reject a bad request before it snapshots anything.
//!
//! ## Effects
//!
//! - **Sharpness**: blend between a 3x3 smoothed copy and the original
//! - **Noise**: seeded per-channel additive noise
//! - **Text**: glyphs rasterized from a caller-supplied font
//! - **Border**: solid frame added around the image
//! - **Cartoon**: bilateral color smoothing masked by adaptive-threshold edges
//! - **Erase**: filled disc painted at an image-space point

mod border;
mod cartoon;
mod erase;
mod noise;
mod sharpen;
mod text;

pub use border::{add_border, bordered_dimensions, parse_border_size};
pub use cartoon::{cartoonize, CartoonParams};
pub use erase::erase_at_point;
pub use noise::add_noise;
pub use sharpen::{apply_sharpness, SharpenStrength};
pub use text::{draw_text, load_font, TextStyle};

use thiserror::Error;

/// Errors raised by effect primitives and their parameter validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EffectError {
    /// Text overlay requested with nothing to draw.
    #[error("Text to draw is empty")]
    EmptyText,

    /// The supplied font bytes could not be parsed.
    #[error("Invalid font data: {0}")]
    InvalidFont(String),

    /// Border size is not a non-negative whole number.
    #[error("Border size must be a non-negative whole number, got {0:?}")]
    InvalidBorderSize(String),

    /// Adding the border would overflow the image dimensions.
    #[error("Border of {border}px on a {width}x{height} image is too large")]
    BorderTooLarge { width: u32, height: u32, border: u32 },

    /// A numeric effect parameter is out of range.
    #[error("Invalid {name}: {value}")]
    OutOfRange { name: &'static str, value: f64 },
}
