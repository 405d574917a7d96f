//! Tagged commands dispatched to an [`EditSession`](crate::EditSession).
//!
//! One variant per user intent. The shell builds a command from whatever
//! widget fired and hands it to `EditSession::dispatch`; nothing else in the
//! session is reachable from a button.

use crate::effects::SharpenStrength;
use crate::encode::OutputFormat;
use crate::mapping::WidgetSize;

/// A user intent.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the session with a freshly decoded image.
    Load { bytes: Vec<u8> },
    /// Scale the current image by `factor` (zoom presets are factors too).
    Resize { factor: f64 },
    Sharpen(SharpenStrength),
    /// Additive noise drawn from a generator seeded with `seed`.
    AddNoise { seed: u64 },
    /// Draw `text` with the session font.
    AddText { text: String },
    /// Add a solid border `size` pixels wide on every side.
    AddBorder { size: u32 },
    Cartoonize,
    /// Erase a disc under a click given in widget space.
    ///
    /// `radius` falls back to the configured erase radius.
    PointErase {
        x: f64,
        y: f64,
        widget: WidgetSize,
        radius: Option<u32>,
    },
    Rollback,
    /// Encode the current image as `"{name}.{format}"`.
    Save { name: String, format: OutputFormat },
}

impl Command {
    /// Whether the command pushes a snapshot before it runs.
    pub fn is_transform(&self) -> bool {
        !matches!(
            self,
            Command::Load { .. } | Command::Rollback | Command::Save { .. }
        )
    }

    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Load { .. } => "load",
            Command::Resize { .. } => "resize",
            Command::Sharpen(_) => "sharpen",
            Command::AddNoise { .. } => "add_noise",
            Command::AddText { .. } => "add_text",
            Command::AddBorder { .. } => "add_border",
            Command::Cartoonize => "cartoonize",
            Command::PointErase { .. } => "point_erase",
            Command::Rollback => "rollback",
            Command::Save { .. } => "save",
        }
    }
}

/// What a successful dispatch did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A new image was loaded; the history is empty.
    Loaded { width: u32, height: u32 },
    /// A transform replaced the current image.
    Applied { width: u32, height: u32 },
    /// The most recent snapshot became current again.
    RolledBack { width: u32, height: u32 },
    Saved(ExportedImage),
}

/// Encoded bytes of the current image together with their output file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub format: OutputFormat,
    pub bytes: Vec<u8>,
}

impl ExportedImage {
    /// MIME type of the encoded bytes.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}
