//! Point erase: paint a filled disc over an artifact.

use crate::state::ImageState;

/// Paint a filled disc of `radius` pixels centered on (x, y).
///
/// A pixel is covered when its squared distance from the center is at most
/// `radius²`. Parts of the disc outside the image are clipped; a radius of
/// zero paints only the center pixel.
pub fn erase_at_point(image: &ImageState, x: u32, y: u32, radius: u32, color: [u8; 3]) -> ImageState {
    let mut out = image.clone();
    if image.is_empty() {
        return out;
    }

    let r = radius as i64;
    let (cx, cy) = (x as i64, y as i64);
    let r_sq = r * r;

    let min_y = (cy - r).max(0);
    let max_y = (cy + r).min(image.height as i64 - 1);
    let min_x = (cx - r).max(0);
    let max_x = (cx + r).min(image.width as i64 - 1);

    for py in min_y..=max_y {
        let dy = py - cy;
        for px in min_x..=max_x {
            let dx = px - cx;
            if dx * dx + dy * dy <= r_sq {
                out.set_pixel(px as u32, py as u32, color);
            }
        }
    }
    out
}
