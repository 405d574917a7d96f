//! Enhance Core - Image editing library
//!
//! This crate provides the core functionality of the Enhance Me editor:
//! an editing session with snapshot/rollback history, mapping of clicks on
//! a scaled display widget into image pixels, the effect primitives, and
//! decoding and encoding of the supported file formats.

pub mod command;
pub mod config;
pub mod decode;
pub mod effects;
pub mod encode;
pub mod error;
pub mod history;
pub mod mapping;
pub mod session;
pub mod state;

pub use command::{Command, ExportedImage, Outcome};
pub use config::EditorConfig;
pub use effects::{CartoonParams, EffectError, SharpenStrength, TextStyle};
pub use encode::OutputFormat;
pub use error::EditError;
pub use history::{EditHistory, NoPriorState};
pub use mapping::{map_to_image_space, DegenerateWidget, WidgetSize};
pub use session::EditSession;
pub use state::ImageState;
