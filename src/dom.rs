//! Small `web-sys` helpers shared by the controller, alerts and validation code.

use std::fmt;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, Node};

/// Failures while locating or manipulating page elements.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerError {
    NoDocument,
    MissingElement(String),
    WrongElementType { id: String, expected: &'static str },
    Config(String),
    Js(String),
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::NoDocument => write!(f, "document is unavailable"),
            ControllerError::MissingElement(id) => write!(f, "No element with id '{}'", id),
            ControllerError::WrongElementType { id, expected } => {
                write!(f, "Element '{}' is not a {}", id, expected)
            }
            ControllerError::Config(msg) => write!(f, "Invalid controller config: {}", msg),
            ControllerError::Js(msg) => write!(f, "DOM call failed: {}", msg),
        }
    }
}

impl std::error::Error for ControllerError {}

impl From<JsValue> for ControllerError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{:?}", value));
        ControllerError::Js(msg)
    }
}

impl From<ControllerError> for JsValue {
    fn from(err: ControllerError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// The document that owns `element`, without touching the global `window`.
pub fn owner_document(element: &Element) -> Result<Document, ControllerError> {
    element.owner_document().ok_or(ControllerError::NoDocument)
}

/// True when `element` is `root` or one of its descendants.
pub fn is_within(root: &Element, element: &Element) -> bool {
    let node: &Node = element;
    root.contains(Some(node))
}

/// Find `id` at or below `root`, ignoring same-id elements elsewhere on the page.
pub fn find_by_id(root: &Element, id: &str) -> Result<Element, ControllerError> {
    if root.id() == id {
        return Ok(root.clone());
    }
    let selector = format!("[id=\"{}\"]", id.replace('\\', "\\\\").replace('"', "\\\""));
    root.query_selector(&selector)?
        .ok_or_else(|| ControllerError::MissingElement(id.to_string()))
}

/// All elements under `root` matching `selector`, in document order.
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, ControllerError> {
    let list = root.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

/// The closest ancestor-or-self of the event target matching `selector`,
/// as long as it lives inside `root`.
pub fn delegated_target(root: &Element, target: Option<web_sys::EventTarget>, selector: &str) -> Option<Element> {
    let element = target?.dyn_into::<Element>().ok()?;
    let matched = element.closest(selector).ok()??;
    is_within(root, &matched).then_some(matched)
}

/// Current value of a form control; empty for anything that has no value.
pub fn field_value(element: &Element) -> String {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.value()
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

/// Set the value of a form control; ignored for non-controls.
pub fn set_field_value(element: &Element, value: &str) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_value(value);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_value(value);
    }
}

/// Enable or disable a form control.
pub fn set_disabled(element: &Element, disabled: bool) {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        input.set_disabled(disabled);
    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
        select.set_disabled(disabled);
    } else if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        area.set_disabled(disabled);
    } else {
        let res = if disabled {
            element.set_attribute("disabled", "")
        } else {
            element.remove_attribute("disabled")
        };
        if let Err(e) = res {
            log::warn!("Could not toggle disabled on <{}>: {}", element.tag_name(), ControllerError::from(e));
        }
    }
}

/// Add or remove a class, logging instead of failing on a rejected token.
pub fn toggle_class(element: &Element, class: &str, on: bool) {
    let classes = element.class_list();
    let res = if on { classes.add_1(class) } else { classes.remove_1(class) };
    if let Err(e) = res {
        log::warn!("Could not toggle class '{}': {}", class, ControllerError::from(e));
    }
}
