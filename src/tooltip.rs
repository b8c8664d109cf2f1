//! JavaScript interop for Bootstrap tooltips.
//! Provides Rust bindings to helper functions defined in tooltip_helpers.js.

use crate::dom::{self, ControllerError};
use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen(module = "/tooltip_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = hasBootstrapTooltip)]
    fn has_bootstrap_tooltip() -> bool;

    #[wasm_bindgen(js_name = activateTooltip, catch)]
    fn activate_tooltip(element: &Element) -> Result<(), JsValue>;
}

/// Activate tooltips on `root` and every element under it matching `selector`.
///
/// Returns how many were activated; zero when Bootstrap is not loaded.
pub fn activate_tooltips(root: &Element, selector: &str) -> Result<usize, ControllerError> {
    let mut targets = dom::query_all(root, selector)?;
    if root.matches(selector)? {
        targets.insert(0, root.clone());
    }
    if targets.is_empty() {
        return Ok(0);
    }
    if !has_bootstrap_tooltip() {
        log::info!("Bootstrap not loaded; skipping {} tooltip(s)", targets.len());
        return Ok(0);
    }

    let mut activated = 0;
    for el in &targets {
        match activate_tooltip(el) {
            Ok(()) => activated += 1,
            Err(e) => log::warn!("Tooltip activation failed: {}", ControllerError::from(e)),
        }
    }
    Ok(activated)
}
