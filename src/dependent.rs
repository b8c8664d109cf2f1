//! Selects whose availability follows another field's value.

use crate::dom::{self, ControllerError};
use web_sys::Element;

/// What happens to the dependent select after its controller changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependentState {
    /// Enabled, current value kept.
    Enabled,
    /// Disabled and cleared.
    Disabled,
}

impl DependentState {
    /// A missing controller counts as empty.
    pub fn for_controller_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => DependentState::Enabled,
            _ => DependentState::Disabled,
        }
    }

    pub fn apply(self, dependent: &Element) {
        match self {
            DependentState::Enabled => dom::set_disabled(dependent, false),
            DependentState::Disabled => {
                dom::set_disabled(dependent, true);
                dom::set_field_value(dependent, "");
            }
        }
    }
}

/// Re-evaluate `dependent` against the element named by its `attribute`.
pub fn sync_dependent(dependent: &Element, attribute: &str) -> Result<DependentState, ControllerError> {
    let controller_id = dependent.get_attribute(attribute).unwrap_or_default();
    let controller = if controller_id.is_empty() {
        None
    } else {
        dom::owner_document(dependent)?.get_element_by_id(&controller_id)
    };
    if controller.is_none() {
        log::warn!(
            "Dependent field '{}' names missing controller '{}'",
            dependent.id(),
            controller_id
        );
    }

    let value = controller.as_ref().map(dom::field_value);
    let state = DependentState::for_controller_value(value.as_deref());
    state.apply(dependent);
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_missing_controller_disables() {
        assert_eq!(DependentState::for_controller_value(Some("")), DependentState::Disabled);
        assert_eq!(DependentState::for_controller_value(None), DependentState::Disabled);
    }

    #[test]
    fn any_value_enables() {
        assert_eq!(DependentState::for_controller_value(Some("x")), DependentState::Enabled);
        assert_eq!(DependentState::for_controller_value(Some("0")), DependentState::Enabled);
        assert_eq!(DependentState::for_controller_value(Some(" ")), DependentState::Enabled);
    }
}
