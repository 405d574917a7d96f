//! Enhance WASM - WebAssembly bindings for the Enhance Me editor
//!
//! This crate exposes an enhance-core editing session to a browser front end.
//! The page owns one `JsEditSession`, forwards each button press to it and
//! redraws from the image it returns.
//!
//! # Module Structure
//!
//! - `session` - The editing session: load, effects, point erase, rollback, save
//! - `types` - WASM-compatible wrapper types for image data and exports
//! - `log` - Session events written to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession, supported_formats } from '@enhance-me/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsEditSession();
//! const image = session.load(new Uint8Array(await file.arrayBuffer()));
//! console.log(`Loaded ${image.width}x${image.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod log;
mod session;
mod types;

// Re-export public types
pub use session::{supported_formats, JsEditSession};
pub use types::{JsExportedImage, JsImage};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    log::info(&format!("enhance-wasm {} ready", version()));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
