//! Editing session WASM bindings.
//!
//! One `JsEditSession` per open editor. Each button handler builds a core
//! `Command` and dispatches it; the new current image is returned so the
//! caller can redraw. Rejected operations throw a JavaScript error with the
//! session left exactly as it was.
//!
//! # Example
//!
//! ```typescript
//! import { JsEditSession } from '@enhance-me/wasm';
//!
//! const session = new JsEditSession();
//! session.set_font(new Uint8Array(await (await fetch(fontUrl)).arrayBuffer()));
//!
//! let image = session.load(new Uint8Array(await file.arrayBuffer()));
//! image = session.zoom_in();
//! image = session.cartoonize();
//!
//! // Erase mode: the next click on the canvas paints a white disc
//! session.begin_point_erase();
//! canvas.onclick = (e) => {
//!   if (session.click(e.offsetX, e.offsetY, canvas.clientWidth, canvas.clientHeight)) {
//!     redraw(session.current());
//!   }
//! };
//!
//! const out = session.save('enhanced_image', 'png');
//! download(new Blob([out.bytes()], { type: out.mime_type }), out.file_name);
//! ```

use enhance_core::effects::parse_border_size;
use enhance_core::{
    Command, EditError, EditSession, EditorConfig, Outcome, OutputFormat, SharpenStrength,
    WidgetSize,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::log;
use crate::types::{JsExportedImage, JsImage};

/// An editing session exposed to JavaScript.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl JsEditSession {
    /// Create a session with the default configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsEditSession {
        JsEditSession {
            inner: EditSession::new(),
        }
    }

    /// Create a session from a (possibly partial) configuration object.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    /// Returns error if the object cannot be deserialized or fails validation
    pub fn with_config(config: JsValue) -> Result<JsEditSession, JsValue> {
        let config: EditorConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?;
        let inner = EditSession::with_config(config).map_err(|e| reject("configure", e))?;
        Ok(JsEditSession { inner })
    }

    /// The active configuration as a plain object.
    pub fn config(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.config())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Set the font (TTF/OTF bytes) used by `add_text`.
    pub fn set_font(&mut self, font: Vec<u8>) -> Result<(), JsValue> {
        self.inner.set_font(font).map_err(|e| reject("set_font", e))?;
        log::info("font set");
        Ok(())
    }

    /// Decode file bytes and start a new edit sequence.
    pub fn load(&mut self, bytes: Vec<u8>) -> Result<JsImage, JsValue> {
        self.run(Command::Load { bytes })
    }

    /// Copy of the current image, or `undefined` before the first load.
    pub fn current(&self) -> Option<JsImage> {
        self.inner.current_or_none().map(JsImage::from_state)
    }

    pub fn zoom_in(&mut self) -> Result<JsImage, JsValue> {
        let factor = self.inner.config().zoom_in_factor;
        self.run(Command::Resize { factor })
    }

    pub fn zoom_out(&mut self) -> Result<JsImage, JsValue> {
        let factor = self.inner.config().zoom_out_factor;
        self.run(Command::Resize { factor })
    }

    pub fn resize(&mut self, factor: f64) -> Result<JsImage, JsValue> {
        self.run(Command::Resize { factor })
    }

    /// "Sharpen +" when `enhance` is true, "Sharpen -" otherwise.
    pub fn sharpen(&mut self, enhance: bool) -> Result<JsImage, JsValue> {
        let strength = if enhance {
            SharpenStrength::Enhance
        } else {
            SharpenStrength::Reduce
        };
        self.run(Command::Sharpen(strength))
    }

    /// Add noise. Without a seed one is taken from the clock.
    pub fn add_noise(&mut self, seed: Option<u64>) -> Result<JsImage, JsValue> {
        let seed = seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        self.run(Command::AddNoise { seed })
    }

    pub fn add_text(&mut self, text: String) -> Result<JsImage, JsValue> {
        self.run(Command::AddText { text })
    }

    /// Add a border whose size is typed by the user (digits only).
    pub fn add_border(&mut self, size: &str) -> Result<JsImage, JsValue> {
        let size = parse_border_size(size).map_err(|e| reject("add_border", e.into()))?;
        self.run(Command::AddBorder { size })
    }

    pub fn cartoonize(&mut self) -> Result<JsImage, JsValue> {
        self.run(Command::Cartoonize)
    }

    /// Arm a point erase; the next `click` performs it.
    pub fn begin_point_erase(&mut self, radius: Option<u32>) -> Result<(), JsValue> {
        self.inner
            .begin_point_erase(radius)
            .map_err(|e| reject("begin_point_erase", e))?;
        log::info("point erase armed");
        Ok(())
    }

    /// Disarm a pending point erase. Returns whether one was armed.
    pub fn cancel_point_erase(&mut self) -> bool {
        self.inner.cancel_point_erase()
    }

    #[wasm_bindgen(getter)]
    pub fn point_erase_pending(&self) -> bool {
        self.inner.is_point_erase_pending()
    }

    /// Deliver a click on the display widget.
    ///
    /// Returns `true` when the click performed an armed point erase.
    pub fn click(
        &mut self,
        x: f64,
        y: f64,
        widget_width: f64,
        widget_height: f64,
    ) -> Result<bool, JsValue> {
        let widget = WidgetSize::new(widget_width, widget_height);
        match self.inner.click(x, y, widget) {
            Ok(Some((px, py))) => {
                log::info(&format!("point_erase at ({}, {})", px, py));
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(e) => Err(reject("click", e)),
        }
    }

    /// Restore the state before the most recent transform.
    pub fn rollback(&mut self) -> Result<JsImage, JsValue> {
        self.run(Command::Rollback)
    }

    #[wasm_bindgen(getter)]
    pub fn can_rollback(&self) -> bool {
        self.inner.can_rollback()
    }

    #[wasm_bindgen(getter)]
    pub fn history_length(&self) -> usize {
        self.inner.history().len()
    }

    /// Snapshot of the session for the toolbar: `{ width, height,
    /// historyLength, pointErasePending, hasFont }`.
    ///
    /// `width` and `height` are absent before the first load.
    pub fn status(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&SessionStatus::of(&self.inner))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Encode the current image as `"{name}.{format}"`.
    ///
    /// Without a format the configured default is used. Never changes the
    /// current image or its history.
    pub fn save(&self, name: String, format: Option<String>) -> Result<JsExportedImage, JsValue> {
        let format = match format {
            Some(format) => format
                .parse::<OutputFormat>()
                .map_err(|e| reject("save", e.into()))?,
            None => self.inner.config().default_format,
        };

        let export = self.inner.save(&name, format).map_err(|e| reject("save", e))?;
        log::info(&format!(
            "save: {} ({} bytes)",
            export.file_name,
            export.bytes.len()
        ));
        Ok(export.into())
    }
}

/// Plain-object view of the session state, see `JsEditSession::status`.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
    history_length: usize,
    point_erase_pending: bool,
    has_font: bool,
}

impl SessionStatus {
    fn of(session: &EditSession) -> Self {
        let current = session.current_or_none();
        Self {
            width: current.map(|image| image.width),
            height: current.map(|image| image.height),
            history_length: session.history().len(),
            point_erase_pending: session.is_point_erase_pending(),
            has_font: session.has_font(),
        }
    }
}

impl JsEditSession {
    /// Dispatch a command and return a copy of the resulting current image.
    fn run(&mut self, command: Command) -> Result<JsImage, JsValue> {
        let name = command.name();
        let transform = command.is_transform();
        let outcome = self.inner.dispatch(command).map_err(|e| reject(name, e))?;
        log::info(&describe(name, &outcome));
        if transform {
            log::info(&format!("{} undo step(s)", self.inner.history().len()));
        }

        self.current()
            .ok_or_else(|| reject(name, EditError::NoImageLoaded))
    }
}

fn describe(name: &str, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Loaded { width, height } => format!("{name}: loaded {width}x{height}"),
        Outcome::Applied { width, height } => format!("{name}: applied, now {width}x{height}"),
        Outcome::RolledBack { width, height } => {
            format!("{name}: rolled back to {width}x{height}")
        }
        Outcome::Saved(export) => format!("{name}: {}", export.file_name),
    }
}

/// Log a rejected operation and convert the error for JavaScript.
fn reject(operation: &str, err: EditError) -> JsValue {
    log::warn_or_error(&rejection(operation, &err), err.is_recoverable());
    JsValue::from_str(&err.to_string())
}

/// Console line for a rejected operation. Decode and encode failures read
/// as failures, everything else as a refused request.
fn rejection(operation: &str, err: &EditError) -> String {
    if err.is_recoverable() {
        format!("{operation} rejected: {err}")
    } else {
        format!("{operation} failed: {err}")
    }
}

/// Output formats accepted by `save`, in picker order.
#[wasm_bindgen]
pub fn supported_formats() -> js_sys::Array {
    OutputFormat::ALL
        .iter()
        .map(|format| JsValue::from_str(format.extension()))
        .collect()
}
