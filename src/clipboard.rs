//! Clipboard access behind a small trait so pages and tests can swap the writer.

use crate::alerts::{show_error, show_success};
use crate::config::ControllerConfig;
use futures::future::{self, FutureExt, LocalBoxFuture};
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::Element;

/// Why a clipboard write did not happen.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardError {
    NoWindow,
    /// `navigator.clipboard` is missing, e.g. outside a secure context.
    Unsupported,
    /// The write promise rejected (permission denied, document not focused...).
    Rejected(String),
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::NoWindow => write!(f, "window is unavailable"),
            ClipboardError::Unsupported => write!(f, "Clipboard API is not available in this context"),
            ClipboardError::Rejected(reason) => write!(f, "Clipboard write rejected: {}", reason),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Anything that can put text on the clipboard.
pub trait ClipboardWriter {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>>;
}

/// The browser's asynchronous clipboard (`navigator.clipboard`).
#[derive(Debug, Default, Clone, Copy)]
pub struct NavigatorClipboard;

impl ClipboardWriter for NavigatorClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        let Some(window) = web_sys::window() else {
            return future::ready(Err(ClipboardError::NoWindow)).boxed_local();
        };
        let navigator = window.navigator();

        // Insecure contexts have no `clipboard` property at all
        let present = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .map(|v| !v.is_undefined() && !v.is_null())
            .unwrap_or(false);
        if !present {
            return future::ready(Err(ClipboardError::Unsupported)).boxed_local();
        }

        let promise = navigator.clipboard().write_text(text);
        JsFuture::from(promise)
            .map(|res| {
                res.map(|_| ()).map_err(|e| {
                    let reason = crate::dom::ControllerError::from(e);
                    ClipboardError::Rejected(reason.to_string())
                })
            })
            .boxed_local()
    }
}

/// Copy `text` and report the outcome as an alert in the result container.
///
/// Resolves once the alert has been rendered; returns the clipboard outcome.
pub async fn copy_result(
    root: Element,
    config: Rc<ControllerConfig>,
    clipboard: Rc<dyn ClipboardWriter>,
    text: String,
) -> Result<(), ClipboardError> {
    let outcome = clipboard.write_text(&text).await;
    let rendered = match &outcome {
        Ok(()) => {
            log::debug!("Copied {} characters to the clipboard", text.len());
            show_success(&root, &config, &config.copy_success_message)
        }
        Err(e) => {
            log::warn!("Copy failed: {}", e);
            show_error(&root, &config, &config.copy_failure_message)
        }
    };
    if let Err(e) = rendered {
        log::warn!("Could not report copy outcome: {}", e);
    }
    outcome
}

/// Fire-and-forget variant used by the click handler.
pub fn spawn_copy_result(
    root: Element,
    config: Rc<ControllerConfig>,
    clipboard: Rc<dyn ClipboardWriter>,
    text: String,
) {
    wasm_bindgen_futures::spawn_local(async move {
        let _ = copy_result(root, config, clipboard, text).await;
    });
}
