//! Image resizing: fit-to-display on load and the zoom presets.
//!
//! All functions return new `ImageState` instances without modifying the input.

use super::{DecodeError, FilterType};
use crate::state::{ImageState, MAX_DIMENSION};

/// Resize an image to exact dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if a target dimension is zero and
/// `DecodeError::CorruptedFile` if the source buffer does not match its size.
pub fn resize(
    image: &ImageState,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<ImageState, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(ImageState::from_rgb_image(resized))
}

/// Dimensions after scaling by `factor`, truncated toward zero.
///
/// Returns `None` when the factor is not a positive finite number or when
/// either dimension would collapse to zero or exceed [`MAX_DIMENSION`].
pub fn scaled_dimensions(width: u32, height: u32, factor: f64) -> Option<(u32, u32)> {
    if !(factor.is_finite() && factor > 0.0) {
        return None;
    }

    let w = (width as f64 * factor).trunc();
    let h = (height as f64 * factor).trunc();
    if w < 1.0 || h < 1.0 || w > MAX_DIMENSION as f64 || h > MAX_DIMENSION as f64 {
        return None;
    }
    Some((w as u32, h as u32))
}

/// Scale an image by a uniform factor (zoom in / zoom out).
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the factor yields an empty image.
pub fn resize_by_factor(
    image: &ImageState,
    factor: f64,
    filter: FilterType,
) -> Result<ImageState, DecodeError> {
    let (width, height) =
        scaled_dimensions(image.width, image.height, factor).ok_or(DecodeError::InvalidFormat)?;
    resize(image, width, height, filter)
}

/// Downscale an image to fit within a `max_width x max_height` box.
///
/// The aspect ratio is preserved. Images that already fit are returned
/// unchanged; this never upscales.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the box has a zero side.
pub fn resize_to_fit(
    image: &ImageState,
    max_width: u32,
    max_height: u32,
    filter: FilterType,
) -> Result<ImageState, DecodeError> {
    if max_width == 0 || max_height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    if image.width <= max_width && image.height <= max_height {
        return Ok(image.clone());
    }

    let (new_width, new_height) =
        calculate_fit_dimensions(image.width, image.height, max_width, max_height);

    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions that fit inside the box while preserving aspect ratio.
fn calculate_fit_dimensions(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let scale = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    if scale >= 1.0 {
        return (width, height);
    }

    let new_width = (width as f64 * scale).round() as u32;
    let new_height = (height as f64 * scale).round() as u32;
    (new_width.clamp(1, max_width), new_height.clamp(1, max_height))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> ImageState {
        // Create a simple gradient image for testing
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8); // R
                pixels.push(((y * 255) / height.max(1)) as u8); // G
                pixels.push(128); // B
            }
        }
        ImageState::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);

        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_zoom_in_and_out_presets() {
        let img = create_test_image(100, 80);

        let zoomed_in = resize_by_factor(&img, 1.25, FilterType::Lanczos3).unwrap();
        assert_eq!((zoomed_in.width, zoomed_in.height), (125, 100));

        let zoomed_out = resize_by_factor(&img, 0.8, FilterType::Lanczos3).unwrap();
        assert_eq!((zoomed_out.width, zoomed_out.height), (80, 64));
    }

    #[test]
    fn test_scaled_dimensions_truncate() {
        // 33 * 0.8 = 26.4 -> 26
        assert_eq!(scaled_dimensions(33, 10, 0.8), Some((26, 8)));
    }

    #[test]
    fn test_scaled_dimensions_rejects_bad_factors() {
        assert_eq!(scaled_dimensions(100, 100, 0.0), None);
        assert_eq!(scaled_dimensions(100, 100, -1.0), None);
        assert_eq!(scaled_dimensions(100, 100, f64::NAN), None);
        assert_eq!(scaled_dimensions(100, 100, f64::INFINITY), None);
        // Collapses to zero
        assert_eq!(scaled_dimensions(1, 1, 0.8), None);
        // Grows past the limit
        assert_eq!(scaled_dimensions(MAX_DIMENSION, 10, 1.25), None);
    }

    #[test]
    fn test_resize_by_factor_collapse_is_error() {
        let img = create_test_image(1, 1);
        assert!(resize_by_factor(&img, 0.5, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_to_fit_landscape() {
        let img = create_test_image(1200, 600);
        let fitted = resize_to_fit(&img, 600, 400, FilterType::Lanczos3).unwrap();

        assert_eq!((fitted.width, fitted.height), (600, 300));
    }

    #[test]
    fn test_resize_to_fit_portrait() {
        let img = create_test_image(400, 800);
        let fitted = resize_to_fit(&img, 600, 400, FilterType::Lanczos3).unwrap();

        assert_eq!((fitted.width, fitted.height), (200, 400));
    }

    #[test]
    fn test_resize_to_fit_already_smaller() {
        let img = create_test_image(100, 50);
        let fitted = resize_to_fit(&img, 600, 400, FilterType::Bilinear).unwrap();

        // Never upscales
        assert_eq!((fitted.width, fitted.height), (100, 50));
    }

    #[test]
    fn test_resize_to_fit_zero_box_error() {
        let img = create_test_image(100, 50);
        assert!(resize_to_fit(&img, 0, 400, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_calculate_fit_dimensions() {
        assert_eq!(calculate_fit_dimensions(1000, 800, 600, 400), (500, 400));
        assert_eq!(calculate_fit_dimensions(6000, 4000, 600, 400), (600, 400));
        assert_eq!(calculate_fit_dimensions(0, 0, 600, 400), (0, 0));
        // Extreme aspect ratio keeps at least one pixel
        assert_eq!(calculate_fit_dimensions(10_000, 1, 600, 400), (600, 1));
    }
}
