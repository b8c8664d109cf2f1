//! Page-level configuration: the DOM contract shared with the server templates.

use serde::Deserialize;

// Formatting
pub const DEFAULT_DECIMAL_PLACES: usize = 2;
pub const MAX_DECIMAL_PLACES: usize = 100;

// UI Behavior
pub const ALERT_FADE_MS: u32 = 150;
pub const CONFIG_SCRIPT_ID: &str = "form-controller-config";

// Default element ids and selectors rendered by the templates
pub const RESULT_CONTAINER_ID: &str = "resultado-container";
pub const FORM_ID: &str = "calculo-form";
pub const VALIDATION_FORM_SELECTOR: &str = ".needs-validation";
pub const COPY_BUTTON_SELECTOR: &str = ".btn-copy";
pub const CLEAR_BUTTON_SELECTOR: &str = ".btn-clear";
pub const NUMERIC_INPUT_SELECTOR: &str = r#"input[type="number"]"#;
pub const TOOLTIP_SELECTOR: &str = r#"[data-bs-toggle="tooltip"]"#;
pub const DEPENDENT_SELECT_SELECTOR: &str = "select[data-depends-on]";
pub const DEPENDS_ON_ATTRIBUTE: &str = "data-depends-on";
pub const RESULT_ATTRIBUTE: &str = "data-resultado";
pub const REQUIRED_SELECTOR: &str = "[required]";
pub const ALERT_SELECTOR: &str = ".alert";
pub const ALERT_CLOSE_SELECTOR: &str = ".alert .btn-close";

// Bootstrap state classes
pub const INVALID_CLASS: &str = "is-invalid";
pub const VALIDATED_CLASS: &str = "was-validated";

// User-facing messages
pub const COPY_SUCCESS_MESSAGE: &str = "Resultado copiado para a área de transferência!";
pub const COPY_FAILURE_MESSAGE: &str = "Não foi possível copiar o resultado.";

/// Selectors, ids and messages the controller binds to.
///
/// Every field falls back to the template defaults above, so a host only
/// passes the keys it wants to override:
///
/// ```
/// use calclab_form::config::ControllerConfig;
///
/// let config = ControllerConfig::from_json(r#"{ "formId": "quimica-form" }"#).unwrap();
/// assert_eq!(config.form_id, "quimica-form");
/// assert_eq!(config.result_container_id, "resultado-container");
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ControllerConfig {
    pub result_container_id: String,
    pub form_id: String,
    pub validation_form_selector: String,
    pub copy_button_selector: String,
    pub clear_button_selector: String,
    pub numeric_input_selector: String,
    pub tooltip_selector: String,
    pub dependent_select_selector: String,
    pub depends_on_attribute: String,
    pub result_attribute: String,
    pub copy_success_message: String,
    pub copy_failure_message: String,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            result_container_id: RESULT_CONTAINER_ID.to_string(),
            form_id: FORM_ID.to_string(),
            validation_form_selector: VALIDATION_FORM_SELECTOR.to_string(),
            copy_button_selector: COPY_BUTTON_SELECTOR.to_string(),
            clear_button_selector: CLEAR_BUTTON_SELECTOR.to_string(),
            numeric_input_selector: NUMERIC_INPUT_SELECTOR.to_string(),
            tooltip_selector: TOOLTIP_SELECTOR.to_string(),
            dependent_select_selector: DEPENDENT_SELECT_SELECTOR.to_string(),
            depends_on_attribute: DEPENDS_ON_ATTRIBUTE.to_string(),
            result_attribute: RESULT_ATTRIBUTE.to_string(),
            copy_success_message: COPY_SUCCESS_MESSAGE.to_string(),
            copy_failure_message: COPY_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl ControllerConfig {
    /// Parse a (possibly partial) JSON object, as embedded by the templates.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let trimmed = json.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ControllerConfig::from_json(
            r#"{ "copyButtonSelector": ".copy", "copySuccessMessage": "Copied" }"#,
        )
        .unwrap();
        assert_eq!(config.copy_button_selector, ".copy");
        assert_eq!(config.copy_success_message, "Copied");
        assert_eq!(config.clear_button_selector, CLEAR_BUTTON_SELECTOR);
        assert_eq!(config.depends_on_attribute, DEPENDS_ON_ATTRIBUTE);
    }

    #[test]
    fn blank_json_is_default() {
        assert_eq!(ControllerConfig::from_json("  \n").unwrap(), ControllerConfig::default());
        assert_eq!(ControllerConfig::from_json("{}").unwrap(), ControllerConfig::default());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(ControllerConfig::from_json("{ formId: }").is_err());
        assert!(ControllerConfig::from_json(r#"{ "formId": 3 }"#).is_err());
    }
}
