//! Image file decoding with EXIF orientation handling.

use std::io::{Cursor, ErrorKind};
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{ImageError, ImageReader};

use super::{DecodeError, Orientation};
use crate::state::ImageState;

/// Decode a JPEG, PNG or WebP image from bytes, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the bytes are not a supported format.
/// Returns `DecodeError::CorruptedFile` if the file is damaged or truncated.
pub fn decode_image(bytes: &[u8]) -> Result<ImageState, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(map_image_error)?;
    let oriented = orientation.apply(img);

    Ok(ImageState::from_rgb_image(oriented.into_rgb8()))
}

/// Read and decode an image file from disk.
///
/// A missing file is reported as `DecodeError::FileNotFound` so the caller
/// can tell it apart from an unreadable or undecodable one.
pub fn decode_file(path: impl AsRef<Path>) -> Result<ImageState, DecodeError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DecodeError::FileNotFound(path.to_path_buf()),
        _ => DecodeError::IoError(e.to_string()),
    })?;
    decode_image(&bytes)
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}

/// EXIF orientation of the file, `Normal` when absent or unreadable.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };

    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}
