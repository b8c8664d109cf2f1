//! Client-side helpers for the server-rendered CalcLab calculation pages.
//!
//! The page host calls [`FormController::initialize`] (or `initFormController`
//! from JavaScript) once with the element that contains the calculation form.
//! The remaining exports are the stateless helpers the templates call from
//! inline scripts; the ones that touch the page take the root element and
//! read the embedded config block, if any.

use wasm_bindgen::prelude::*;
use web_sys::Element;

pub mod alerts;
pub mod clipboard;
pub mod config;
pub mod controller;
pub mod dependent;
pub mod dom;
pub mod tooltip;
pub mod utils;
pub mod validation;

pub use alerts::Severity;
pub use clipboard::{ClipboardError, ClipboardWriter, NavigatorClipboard};
pub use config::ControllerConfig;
pub use controller::FormController;
pub use dom::ControllerError;
pub use utils::{format_number, format_number_str, is_valid_number, NumberFormatError};

fn resolve_config(root: &Element, config: JsValue) -> Result<ControllerConfig, ControllerError> {
    if config.is_undefined() || config.is_null() {
        controller::load_page_config(root)
    } else {
        serde_wasm_bindgen::from_value(config).map_err(|e| ControllerError::Config(e.to_string()))
    }
}

/// JavaScript handle around a [`FormController`].
#[wasm_bindgen]
pub struct FormControllerHandle {
    inner: FormController,
}

#[wasm_bindgen]
impl FormControllerHandle {
    #[wasm_bindgen(js_name = showError)]
    pub fn show_error(&self, message: &str) -> Result<(), JsValue> {
        self.inner.show_error(message)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = showSuccess)]
    pub fn show_success(&self, message: &str) -> Result<(), JsValue> {
        self.inner.show_success(message)?;
        Ok(())
    }

    /// Resolves to `true` when the text reached the clipboard.
    #[wasm_bindgen(js_name = copyResult)]
    pub fn copy_result(&self, text: String) -> js_sys::Promise {
        let copy = self.inner.copy_result(text);
        wasm_bindgen_futures::future_to_promise(async move {
            let copied = copy.await.is_ok();
            Ok(JsValue::from_bool(copied))
        })
    }

    #[wasm_bindgen(js_name = resetForm)]
    pub fn reset_form(&self) -> Result<(), JsValue> {
        self.inner.reset_form()?;
        Ok(())
    }

    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&self, form: &Element) -> Result<bool, JsValue> {
        Ok(self.inner.validate_form(form)?)
    }

    /// Remove every listener; the handle is unusable afterwards.
    pub fn detach(self) {
        drop(self.inner);
    }
}

/// Bind the controller to `root`.
///
/// `config` is an optional object overriding selectors and messages; without
/// it, a `<script type="application/json" id="form-controller-config">` block
/// is used when the page has one.
#[wasm_bindgen(js_name = initFormController)]
pub fn init_form_controller(root: &Element, config: JsValue) -> Result<FormControllerHandle, JsValue> {
    // Set the panic hook to log detailed errors to the console
    console_error_panic_hook::set_once();
    let config = resolve_config(root, config)?;
    let inner = FormController::initialize(root, config)?;
    Ok(FormControllerHandle { inner })
}

/// `formatNumber(value, decimalPlaces = 2)` for page scripts.
///
/// Accepts numbers or numeric strings; anything else throws.
#[wasm_bindgen(js_name = formatNumber)]
pub fn js_format_number(value: JsValue, decimal_places: Option<u32>) -> Result<String, JsValue> {
    let places = decimal_places.map_or(config::DEFAULT_DECIMAL_PLACES, |p| p as usize);
    let res = if let Some(n) = value.as_f64() {
        format_number(n, places)
    } else if let Some(s) = value.as_string() {
        format_number_str(&s, places)
    } else {
        Err(NumberFormatError::NotANumber(format!("{:?}", value)))
    };
    res.map_err(|e| js_sys::Error::new(&e.to_string()).into())
}

#[wasm_bindgen(js_name = isValidNumber)]
pub fn js_is_valid_number(value: &str) -> bool {
    is_valid_number(value)
}

#[wasm_bindgen(js_name = showError)]
pub fn js_show_error(root: &Element, message: &str) -> Result<(), JsValue> {
    let config = controller::load_page_config(root)?;
    alerts::show_error(root, &config, message)?;
    Ok(())
}

#[wasm_bindgen(js_name = showSuccess)]
pub fn js_show_success(root: &Element, message: &str) -> Result<(), JsValue> {
    let config = controller::load_page_config(root)?;
    alerts::show_success(root, &config, message)?;
    Ok(())
}

/// Copy `text` with the browser clipboard and report the outcome under `root`.
///
/// Resolves to `true` when the text reached the clipboard.
#[wasm_bindgen(js_name = copyResult)]
pub fn js_copy_result(root: &Element, text: String) -> Result<js_sys::Promise, JsValue> {
    let config = std::rc::Rc::new(controller::load_page_config(root)?);
    let copy = clipboard::copy_result(root.clone(), config, std::rc::Rc::new(NavigatorClipboard), text);
    Ok(wasm_bindgen_futures::future_to_promise(async move {
        Ok(JsValue::from_bool(copy.await.is_ok()))
    }))
}

#[wasm_bindgen(js_name = resetForm)]
pub fn js_reset_form(root: &Element) -> Result<(), JsValue> {
    let config = controller::load_page_config(root)?;
    controller::reset_form(root, &config)?;
    Ok(())
}

#[wasm_bindgen(js_name = validateForm)]
pub fn js_validate_form(form: &Element) -> Result<bool, JsValue> {
    Ok(validation::validate_form(form)?)
}
