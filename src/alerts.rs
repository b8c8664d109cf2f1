//! Dismissible Bootstrap alert banners rendered into the result container.
//!
//! Messages are inserted as text nodes, so caller-supplied text is never
//! parsed as markup. Close buttons carry no listener of their own; the
//! controller dismisses alerts through one delegated click handler.

use crate::config::{ControllerConfig, ALERT_FADE_MS};
use crate::dom::{self, ControllerError};
use gloo_timers::future::TimeoutFuture;
use web_sys::Element;

/// Alert flavour, mapped onto Bootstrap's contextual classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Success,
}

impl Severity {
    pub fn alert_class(self) -> &'static str {
        match self {
            Severity::Error => "alert-danger",
            Severity::Success => "alert-success",
        }
    }

    /// Full class attribute of the alert element.
    pub fn class_attribute(self) -> String {
        format!("alert {} alert-dismissible fade show", self.alert_class())
    }
}

/// Replace the children of `container` with a single alert carrying `message`.
pub fn render_alert(container: &Element, severity: Severity, message: &str) -> Result<Element, ControllerError> {
    let document = dom::owner_document(container)?;

    let alert = document.create_element("div")?;
    alert.set_class_name(&severity.class_attribute());
    alert.set_attribute("role", "alert")?;
    alert.append_child(&document.create_text_node(message))?;

    let close = document.create_element("button")?;
    close.set_class_name("btn-close");
    close.set_attribute("type", "button")?;
    close.set_attribute("data-bs-dismiss", "alert")?;
    close.set_attribute("aria-label", "Close")?;
    alert.append_child(&close)?;

    container.set_text_content(None);
    container.append_child(&alert)?;
    Ok(alert)
}

/// Fade the alert out, then detach it once the transition has run.
pub fn dismiss_alert(alert: &Element) {
    dom::toggle_class(alert, "show", false);
    let alert = alert.clone();
    wasm_bindgen_futures::spawn_local(async move {
        TimeoutFuture::new(ALERT_FADE_MS).await;
        alert.remove();
    });
}

/// Show `message` with the given severity in the configured result container.
pub fn show_message(
    root: &Element,
    config: &ControllerConfig,
    severity: Severity,
    message: &str,
) -> Result<Element, ControllerError> {
    let container = dom::find_by_id(root, &config.result_container_id)?;
    render_alert(&container, severity, message)
}

pub fn show_error(root: &Element, config: &ControllerConfig, message: &str) -> Result<Element, ControllerError> {
    show_message(root, config, Severity::Error, message)
}

pub fn show_success(root: &Element, config: &ControllerConfig, message: &str) -> Result<Element, ControllerError> {
    show_message(root, config, Severity::Success, message)
}
