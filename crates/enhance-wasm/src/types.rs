//! WASM-compatible wrapper types for image data.
//!
//! These types copy data out of the core session so JavaScript can hold on
//! to them after the session moves on to the next edit.

use enhance_core::{ExportedImage, ImageState};
use wasm_bindgen::prelude::*;

/// An image wrapper for JavaScript.
///
/// Holds a copy of the session's current image at the time it was returned.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. The `free()` method can be called to
/// release WASM memory early; otherwise wasm-bindgen's finalizer handles cleanup.
#[wasm_bindgen]
pub struct JsImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsImage {
    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3 for RGB)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns RGBA pixel data (alpha 255), ready for `new ImageData(...)`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixels.len() / 3 * 4);
        for rgb in self.pixels.chunks_exact(3) {
            rgba.extend_from_slice(rgb);
            rgba.push(255);
        }
        rgba
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsImage {
    pub(crate) fn from_state(image: &ImageState) -> Self {
        Self {
            width: image.width,
            height: image.height,
            pixels: image.pixels.clone(),
        }
    }
}

/// Encoded bytes ready to be offered as a download.
#[wasm_bindgen]
pub struct JsExportedImage {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

#[wasm_bindgen]
impl JsExportedImage {
    /// Output file name, `"{name}.{format}"`
    #[wasm_bindgen(getter)]
    pub fn file_name(&self) -> String {
        self.file_name.clone()
    }

    /// MIME type for the download `Blob`
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Returns the encoded file as Uint8Array.
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl From<ExportedImage> for JsExportedImage {
    fn from(export: ExportedImage) -> Self {
        Self {
            mime_type: export.mime_type().to_string(),
            file_name: export.file_name,
            bytes: export.bytes,
        }
    }
}
