//! Widget-space to image-space coordinate mapping.
//!
//! The display widget may render the image at a different size than its
//! buffer, with independent horizontal and vertical scale. Point operations
//! such as erase need the buffer pixel under the pointer, so the click is
//! scaled by `image / widget` on each axis and clamped into the buffer.
//!
//! The mapping is recomputed for every interaction since the widget may have
//! been resized, or the image zoomed, since the previous click.

use thiserror::Error;

/// A widget dimension was zero, negative or not a finite number.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Display widget has degenerate size {width}x{height}")]
pub struct DegenerateWidget {
    pub width: f64,
    pub height: f64,
}

/// Rendered size of the on-screen display widget, in widget pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetSize {
    pub width: f64,
    pub height: f64,
}

impl WidgetSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether a scale factor can be derived from this size.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        // NaN fails the comparison and counts as degenerate
        let positive = self.width > 0.0 && self.height > 0.0;
        !(positive && self.width.is_finite() && self.height.is_finite())
    }
}

/// Map a click in widget space to a pixel in image space.
///
/// Computes `scale = image / widget` per axis, rounds `click * scale` to the
/// nearest pixel and clamps into `[0, image_width-1] x [0, image_height-1]`.
///
/// # Errors
///
/// Returns [`DegenerateWidget`] when either widget dimension is `<= 0` or not
/// finite.
pub fn map_to_image_space(
    click_x: f64,
    click_y: f64,
    image_width: u32,
    image_height: u32,
    widget_width: f64,
    widget_height: f64,
) -> Result<(u32, u32), DegenerateWidget> {
    let widget = WidgetSize::new(widget_width, widget_height);
    if widget.is_degenerate() {
        return Err(DegenerateWidget {
            width: widget_width,
            height: widget_height,
        });
    }

    let scale_x = image_width as f64 / widget_width;
    let scale_y = image_height as f64 / widget_height;

    let x = clamp_axis((click_x * scale_x).round(), image_width);
    let y = clamp_axis((click_y * scale_y).round(), image_height);
    Ok((x, y))
}

/// Clamp a rounded coordinate into `[0, extent-1]`.
#[inline]
fn clamp_axis(value: f64, extent: u32) -> u32 {
    let max = extent.saturating_sub(1) as f64;
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, max) as u32
}


// ============================================================================
// Property-Based Tests
// ============================================================================
