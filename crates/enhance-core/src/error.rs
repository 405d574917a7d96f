//! Session-level error type.

use thiserror::Error;

use crate::decode::DecodeError;
use crate::effects::EffectError;
use crate::encode::EncodeError;
use crate::history::NoPriorState;
use crate::mapping::DegenerateWidget;

/// Errors reported by [`EditSession`](crate::EditSession).
///
/// Whatever the variant, the session's current image and history are left
/// exactly as they were before the rejected call.
#[derive(Debug, Error)]
pub enum EditError {
    /// A transform or save was requested before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Rollback was requested with nothing to roll back to.
    #[error(transparent)]
    NoPriorState(#[from] NoPriorState),

    /// A point interaction arrived with an unusable widget size.
    #[error(transparent)]
    DegenerateWidget(#[from] DegenerateWidget),

    /// Save was requested with a format outside the supported set.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// A command parameter failed validation.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The image could not be loaded.
    #[error("Load failed: {0}")]
    Decode(#[from] DecodeError),

    /// The image could not be encoded for saving.
    #[error("Save failed: {0}")]
    Encode(EncodeError),
}

impl EditError {
    /// Whether the shell may simply ignore or report the error and carry on.
    ///
    /// Load and encode failures are worth surfacing prominently; every other
    /// variant is a rejected request with no side effects.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, EditError::Decode(_) | EditError::Encode(_))
    }
}

impl From<EncodeError> for EditError {
    fn from(err: EncodeError) -> Self {
        match err {
            EncodeError::UnsupportedFormat(format) => EditError::UnsupportedFormat(format),
            other => EditError::Encode(other),
        }
    }
}

impl From<EffectError> for EditError {
    /// Every effect error is a rejected parameter.
    fn from(err: EffectError) -> Self {
        EditError::InvalidParameter(err.to_string())
    }
}
