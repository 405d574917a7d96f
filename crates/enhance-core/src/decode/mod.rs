//! Image decoding for the editing session.
//!
//! This module provides functionality for:
//! - Decoding JPEG, PNG and WebP files with EXIF orientation correction
//! - Fitting a freshly loaded image into the display box
//! - The resize operations behind the zoom commands
//!
//! All operations are synchronous and single-threaded.

mod file;
mod resize;
mod types;

pub use file::{decode_file, decode_image};
pub use resize::{resize, resize_by_factor, resize_to_fit, scaled_dimensions};
pub use types::{DecodeError, FilterType, Orientation};
