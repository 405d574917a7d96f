//! Output formats and their encoders.
//!
//! Formats are a fixed enumerated set. JPEG honours the configured quality,
//! PNG and WebP are written lossless.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::{ImageState, CHANNELS};

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The requested format is not one of the supported output formats.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: OutputFormat,
        message: String,
    },
}

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpg,
    Jpeg,
    Png,
    Webp,
}

impl OutputFormat {
    /// Every supported format, in the order a format picker lists them.
    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Jpg,
        OutputFormat::Jpeg,
        OutputFormat::Png,
        OutputFormat::Webp,
    ];

    /// File extension written after the output base name.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpg => "jpg",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Png => "png",
            OutputFormat::Webp => "webp",
        }
    }

    /// MIME type of the encoded bytes.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Jpg | OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Webp => "image/webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = EncodeError;

    /// Parse a format selector, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.extension() == wanted)
            .ok_or_else(|| EncodeError::UnsupportedFormat(s.to_string()))
    }
}

/// Build the output file name `"{base}.{extension}"`.
pub fn output_file_name(base: &str, format: OutputFormat) -> String {
    format!("{}.{}", base, format.extension())
}

/// Encode an image state to the given format.
///
/// # Arguments
///
/// * `image` - The state to encode
/// * `format` - Target format
/// * `jpeg_quality` - JPEG quality (clamped to 1-100); ignored by lossless formats
pub fn encode_image(
    image: &ImageState,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = (image.width, image.height);
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = width as usize * height as usize * CHANNELS;
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());
    let pixels = image.pixels.as_slice();

    let result = match format {
        OutputFormat::Jpg | OutputFormat::Jpeg => {
            JpegEncoder::new_with_quality(&mut buffer, jpeg_quality.clamp(1, 100))
                .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut buffer).write_image(pixels, width, height, ExtendedColorType::Rgb8)
        }
        OutputFormat::Webp => WebPEncoder::new_lossless(&mut buffer).write_image(
            pixels,
            width,
            height,
            ExtendedColorType::Rgb8,
        ),
    };

    result.map_err(|e| EncodeError::EncodingFailed {
        format,
        message: e.to_string(),
    })?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
