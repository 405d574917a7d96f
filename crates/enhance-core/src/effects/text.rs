//! Text overlay rasterized with `ab_glyph`.
//!
//! The font is supplied by the caller as raw TTF/OTF bytes, so the core
//! crate carries no font of its own. Glyph coverage is alpha-blended onto
//! the image in the requested color.

use ab_glyph::{point, Font, FontRef, PxScale, ScaleFont};
use serde::{Deserialize, Serialize};

use super::EffectError;
use crate::state::ImageState;

/// Placement and appearance of a text overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Left edge of the first glyph, in image pixels.
    pub x: i32,
    /// Baseline, in image pixels.
    pub y: i32,
    /// Glyph height in pixels.
    pub size: f32,
    pub color: [u8; 3],
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            x: 50,
            y: 50,
            size: 32.0,
            color: [255, 0, 0],
        }
    }
}

/// Parse font bytes, reporting a malformed font as `EffectError::InvalidFont`.
pub fn load_font(font_data: &[u8]) -> Result<FontRef<'_>, EffectError> {
    FontRef::try_from_slice(font_data).map_err(|e| EffectError::InvalidFont(e.to_string()))
}

/// Draw a single line of text onto a copy of the image.
///
/// Glyphs falling partly or wholly outside the image are clipped.
///
/// # Errors
///
/// Returns `EffectError::EmptyText` for empty or whitespace-only text,
/// `EffectError::OutOfRange` for a non-positive size and
/// `EffectError::InvalidFont` if the font cannot be parsed.
pub fn draw_text(
    image: &ImageState,
    text: &str,
    font_data: &[u8],
    style: &TextStyle,
) -> Result<ImageState, EffectError> {
    if text.trim().is_empty() {
        return Err(EffectError::EmptyText);
    }
    if !(style.size.is_finite() && style.size > 0.0) {
        return Err(EffectError::OutOfRange {
            name: "text size",
            value: style.size as f64,
        });
    }
    let font = load_font(font_data)?;

    let scale = PxScale::from(style.size);
    let scaled = font.as_scaled(scale);
    let color = style.color.map(|c| c as f32);

    let mut out = image.clone();
    let mut caret = style.x as f32;
    let mut previous = None;

    for ch in text.chars() {
        let id = font.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }

        let glyph = id.with_scale_and_position(scale, point(caret, style.y as f32));
        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                blend(&mut out, px, py, color, coverage);
            });
        }

        caret += scaled.h_advance(id);
        previous = Some(id);
    }

    Ok(out)
}

/// Alpha-blend `color` over the pixel at (x, y) with the given coverage.
fn blend(image: &mut ImageState, x: i64, y: i64, color: [f32; 3], coverage: f32) {
    if x < 0 || y < 0 || x >= image.width as i64 || y >= image.height as i64 {
        return;
    }
    let Some(dst) = image.pixel(x as u32, y as u32) else {
        return;
    };

    let alpha = coverage.clamp(0.0, 1.0);
    let mixed = [0, 1, 2].map(|c| {
        let value = color[c] * alpha + dst[c] as f32 * (1.0 - alpha);
        value.round().clamp(0.0, 255.0) as u8
    });
    image.set_pixel(x as u32, y as u32, mixed);
}
