//! Session event logging to the browser console.
//!
//! Native builds (unit tests, tooling) have no console to write to, so the
//! functions compile to no-ops off `wasm32`.

#[cfg(target_arch = "wasm32")]
pub(crate) fn info(message: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn warn(message: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn error(message: &str) {
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(message));
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn info(_message: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn warn(_message: &str) {}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn error(_message: &str) {}

/// Warning for a recoverable problem, error otherwise.
pub(crate) fn warn_or_error(message: &str, recoverable: bool) {
    if recoverable {
        warn(message);
    } else {
        error(message);
    }
}
