//! Image encoding for export.
//!
//! This module provides functionality for:
//! - Parsing the output format selected by the user
//! - Encoding the current image state to JPEG, PNG or WebP bytes
//!
//! Encoding never touches the edit history; it only reads the state it is
//! given.

mod format;

pub use format::{encode_image, output_file_name, EncodeError, OutputFormat};
