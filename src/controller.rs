//! The form interaction controller: binds every page affordance to one root
//! element and keeps the listeners alive for as long as it lives.
//!
//! Delegated handlers (copy, clear, numeric filtering, dependent selects,
//! alert close buttons) sit on the root and match the event target inside
//! the handler, so elements rendered after initialization are covered too. Validation hooks attach to
//! each `.needs-validation` form present at initialization.

use crate::alerts::{self, Severity};
use crate::clipboard::{copy_result, spawn_copy_result, ClipboardError, ClipboardWriter, NavigatorClipboard};
use crate::config::{ControllerConfig, ALERT_CLOSE_SELECTOR, ALERT_SELECTOR, CONFIG_SCRIPT_ID};
use crate::dependent::sync_dependent;
use crate::dom::{self, ControllerError};
use crate::tooltip::activate_tooltips;
use crate::utils::filter_numeric_input;
use crate::validation::{handle_validated_submit, validate_form};
use gloo_events::{EventListener, EventListenerOptions};
use std::borrow::Cow;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement};

/// Live bindings for one page. Dropping it detaches every listener.
pub struct FormController {
    root: Element,
    config: Rc<ControllerConfig>,
    clipboard: Rc<dyn ClipboardWriter>,
    listeners: Vec<EventListener>,
    tooltip_count: usize,
}

impl FormController {
    /// Bind to `root` using the browser clipboard.
    pub fn initialize(root: &Element, config: ControllerConfig) -> Result<Self, ControllerError> {
        Self::with_clipboard(root, config, Rc::new(NavigatorClipboard))
    }

    /// Bind to `root` with a caller-supplied clipboard writer.
    pub fn with_clipboard(
        root: &Element,
        config: ControllerConfig,
        clipboard: Rc<dyn ClipboardWriter>,
    ) -> Result<Self, ControllerError> {
        let config = Rc::new(config);
        let mut listeners = Vec::new();

        listeners.extend(bind_validation(root, &config)?);
        listeners.push(bind_copy(root, &config, &clipboard));
        listeners.push(bind_clear(root, &config));
        listeners.push(bind_numeric_filter(root, &config));
        listeners.push(bind_dependents(root, &config));
        listeners.push(bind_alert_dismiss(root));

        let tooltip_count = activate_tooltips(root, &config.tooltip_selector).unwrap_or_else(|e| {
            log::warn!("Tooltip activation skipped: {}", e);
            0
        });

        log::info!(
            "Form controller bound to <{} id='{}'> with {} listeners",
            root.tag_name().to_lowercase(),
            root.id(),
            listeners.len()
        );

        Ok(Self {
            root: root.clone(),
            config,
            clipboard,
            listeners,
            tooltip_count,
        })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn tooltip_count(&self) -> usize {
        self.tooltip_count
    }

    pub fn show_error(&self, message: &str) -> Result<Element, ControllerError> {
        alerts::show_message(&self.root, &self.config, Severity::Error, message)
    }

    pub fn show_success(&self, message: &str) -> Result<Element, ControllerError> {
        alerts::show_message(&self.root, &self.config, Severity::Success, message)
    }

    /// Copy `text`; resolves after the outcome alert is shown.
    pub fn copy_result(&self, text: String) -> impl Future<Output = Result<(), ClipboardError>> + 'static {
        copy_result(self.root.clone(), self.config.clone(), self.clipboard.clone(), text)
    }

    pub fn reset_form(&self) -> Result<(), ControllerError> {
        reset_form(&self.root, &self.config)
    }

    pub fn validate_form(&self, form: &Element) -> Result<bool, ControllerError> {
        validate_form(form)
    }
}

impl Drop for FormController {
    fn drop(&mut self) {
        log::debug!("Detaching {} form controller listeners", self.listeners.len());
    }
}

/// Reset the calculation form to its defaults and empty the result container.
pub fn reset_form(root: &Element, config: &ControllerConfig) -> Result<(), ControllerError> {
    let form = dom::find_by_id(root, &config.form_id)?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| ControllerError::WrongElementType {
            id: config.form_id.clone(),
            expected: "form",
        })?;
    form.reset();

    let container = dom::find_by_id(root, &config.result_container_id)?;
    container.set_text_content(None);
    Ok(())
}

/// Read the JSON config block the templates may embed, if present.
pub fn load_page_config(root: &Element) -> Result<ControllerConfig, ControllerError> {
    let script = dom::owner_document(root)?.get_element_by_id(CONFIG_SCRIPT_ID);
    match script.and_then(|s| s.text_content()) {
        Some(json) => ControllerConfig::from_json(&json).map_err(|e| ControllerError::Config(e.to_string())),
        None => Ok(ControllerConfig::default()),
    }
}

fn bind_validation(root: &Element, config: &ControllerConfig) -> Result<Vec<EventListener>, ControllerError> {
    let mut forms = dom::query_all(root, &config.validation_form_selector)?;
    if root.matches(&config.validation_form_selector).unwrap_or(false) {
        forms.insert(0, root.clone());
    }

    Ok(forms
        .into_iter()
        .map(|form| {
            let target = form.clone();
            // passive listeners cannot cancel the submission
            EventListener::new_with_options(
                &target,
                "submit",
                EventListenerOptions::enable_prevent_default(),
                move |event| handle_validated_submit(&form, event),
            )
        })
        .collect())
}

fn bind_copy(root: &Element, config: &Rc<ControllerConfig>, clipboard: &Rc<dyn ClipboardWriter>) -> EventListener {
    let root_el = root.clone();
    let config = config.clone();
    let clipboard = clipboard.clone();
    EventListener::new(root, "click", move |event| {
        let Some(button) = dom::delegated_target(&root_el, event.target(), &config.copy_button_selector) else {
            return;
        };
        let text = button.get_attribute(&config.result_attribute).unwrap_or_default();
        spawn_copy_result(root_el.clone(), config.clone(), clipboard.clone(), text);
    })
}

fn bind_clear(root: &Element, config: &Rc<ControllerConfig>) -> EventListener {
    let root_el = root.clone();
    let config = config.clone();
    EventListener::new(root, "click", move |event| {
        if dom::delegated_target(&root_el, event.target(), &config.clear_button_selector).is_none() {
            return;
        }
        if let Err(e) = reset_form(&root_el, &config) {
            log::warn!("Clear failed: {}", e);
        }
    })
}

fn bind_numeric_filter(root: &Element, config: &Rc<ControllerConfig>) -> EventListener {
    let root_el = root.clone();
    let config = config.clone();
    EventListener::new(root, "input", move |event| {
        let Some(field) = dom::delegated_target(&root_el, event.target(), &config.numeric_input_selector) else {
            return;
        };
        let Some(input) = field.dyn_ref::<HtmlInputElement>() else {
            return;
        };
        let raw = input.value();
        // only write back on change so the caret stays put
        if let Cow::Owned(clean) = filter_numeric_input(&raw) {
            input.set_value(&clean);
        }
    })
}

fn bind_dependents(root: &Element, config: &Rc<ControllerConfig>) -> EventListener {
    let root_el = root.clone();
    let config = config.clone();
    EventListener::new(root, "change", move |event| {
        let Some(select) = dom::delegated_target(&root_el, event.target(), &config.dependent_select_selector) else {
            return;
        };
        if let Err(e) = sync_dependent(&select, &config.depends_on_attribute) {
            log::warn!("Dependent field update failed: {}", e);
        }
    })
}

fn bind_alert_dismiss(root: &Element) -> EventListener {
    let root_el = root.clone();
    EventListener::new(root, "click", move |event| {
        let Some(close) = dom::delegated_target(&root_el, event.target(), ALERT_CLOSE_SELECTOR) else {
            return;
        };
        if let Ok(Some(alert)) = close.closest(ALERT_SELECTOR) {
            alerts::dismiss_alert(&alert);
        }
    })
}
