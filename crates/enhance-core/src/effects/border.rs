//! Solid border around the image.

use super::EffectError;
use crate::state::{ImageState, CHANNELS, MAX_DIMENSION};

/// Parse a border size typed by the user.
///
/// Only plain ASCII digits are accepted; signs, decimals, whitespace inside
/// the number and empty input are rejected. Surrounding whitespace is trimmed.
pub fn parse_border_size(input: &str) -> Result<u32, EffectError> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EffectError::InvalidBorderSize(input.to_string()));
    }
    trimmed
        .parse()
        .map_err(|_| EffectError::InvalidBorderSize(input.to_string()))
}

/// Dimensions after adding a `size` pixel border on every side.
///
/// Returns `None` when either side would overflow or exceed [`MAX_DIMENSION`].
pub fn bordered_dimensions(width: u32, height: u32, size: u32) -> Option<(u32, u32)> {
    let grow = size.checked_mul(2)?;
    let width = width.checked_add(grow)?;
    let height = height.checked_add(grow)?;
    (width <= MAX_DIMENSION && height <= MAX_DIMENSION).then_some((width, height))
}

/// Surround the image with a `size` pixel frame of `color` on all four sides.
///
/// # Errors
///
/// Returns `EffectError::BorderTooLarge` if the new dimensions overflow or
/// exceed [`MAX_DIMENSION`].
pub fn add_border(image: &ImageState, size: u32, color: [u8; 3]) -> Result<ImageState, EffectError> {
    let (width, height) =
        bordered_dimensions(image.width, image.height, size).ok_or(EffectError::BorderTooLarge {
            width: image.width,
            height: image.height,
            border: size,
        })?;

    let mut out = ImageState::filled(width, height, color);

    let src_stride = image.width as usize * CHANNELS;
    let dst_stride = width as usize * CHANNELS;
    let offset = size as usize * CHANNELS;
    for (y, row) in image.pixels.chunks_exact(src_stride.max(1)).enumerate() {
        let start = (y + size as usize) * dst_stride + offset;
        out.pixels[start..start + src_stride].copy_from_slice(row);
    }

    Ok(out)
}
