//! Required-field checks and Bootstrap validation feedback.

use crate::config::{INVALID_CLASS, REQUIRED_SELECTOR, VALIDATED_CLASS};
use crate::dom::{self, ControllerError};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlFormElement};

/// A field whose emptiness is checked and whose invalid state is shown.
pub trait RequiredField {
    fn value(&self) -> String;
    fn set_invalid(&self, invalid: bool);
}

impl RequiredField for Element {
    fn value(&self) -> String {
        dom::field_value(self)
    }

    fn set_invalid(&self, invalid: bool) {
        dom::toggle_class(self, INVALID_CLASS, invalid);
    }
}

/// Mark every empty field invalid and clear the marking on the rest.
///
/// Visits all fields even after the first failure so the whole form gets
/// feedback at once.
pub fn validate_fields<'a, F, I>(fields: I) -> bool
where
    F: RequiredField + ?Sized + 'a,
    I: IntoIterator<Item = &'a F>,
{
    let mut valid = true;
    for field in fields {
        let empty = field.value().is_empty();
        field.set_invalid(empty);
        if empty {
            valid = false;
        }
    }
    valid
}

/// Check every `[required]` element inside `form`.
pub fn validate_form(form: &Element) -> Result<bool, ControllerError> {
    let fields = dom::query_all(form, REQUIRED_SELECTOR)?;
    Ok(validate_fields(fields.iter()))
}

/// Submit interception for a `.needs-validation` form: block submission when
/// native constraint validation fails, and always flag the form as validated.
pub fn handle_validated_submit(form: &Element, event: &Event) {
    let valid = match form.dyn_ref::<HtmlFormElement>() {
        Some(f) => f.check_validity(),
        None => {
            log::warn!("Validation marker on a non-form element <{}>", form.tag_name());
            true
        }
    };
    if !valid {
        log::debug!("Blocked submission of form '{}'", form.id());
        event.prevent_default();
        event.stop_propagation();
    }
    dom::toggle_class(form, VALIDATED_CLASS, true);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeField {
        value: &'static str,
        invalid: Cell<bool>,
    }

    impl FakeField {
        fn new(value: &'static str) -> Self {
            // starts marked so that clearing is observable
            Self { value, invalid: Cell::new(true) }
        }
    }

    impl RequiredField for FakeField {
        fn value(&self) -> String {
            self.value.to_string()
        }

        fn set_invalid(&self, invalid: bool) {
            self.invalid.set(invalid);
        }
    }

    #[test]
    fn marks_exactly_the_empty_fields() {
        let fields = [FakeField::new("1"), FakeField::new(""), FakeField::new("3")];
        assert!(!validate_fields(fields.iter()));
        let marked: Vec<bool> = fields.iter().map(|f| f.invalid.get()).collect();
        assert_eq!(marked, vec![false, true, false]);
    }

    #[test]
    fn all_filled_is_valid_and_clears_marks() {
        let fields = [FakeField::new("a"), FakeField::new("b"), FakeField::new("c")];
        assert!(validate_fields(fields.iter()));
        assert!(fields.iter().all(|f| !f.invalid.get()));
    }

    #[test]
    fn does_not_stop_at_first_failure() {
        let fields = [FakeField::new(""), FakeField::new("x"), FakeField::new("")];
        assert!(!validate_fields(fields.iter()));
        assert!(fields[0].invalid.get());
        assert!(!fields[1].invalid.get());
        assert!(fields[2].invalid.get());
    }

    #[test]
    fn no_required_fields_is_valid() {
        let fields: [FakeField; 0] = [];
        assert!(validate_fields(fields.iter()));
    }
}
