//! Demo host for the form controller using Yew.
//! Renders a sample calculation page shaped like the server templates and
//! binds the controller to it, so the helpers can be tried under trunk.

use calclab_form::{
    alerts::{show_error, show_success},
    config::{ControllerConfig, DEFAULT_DECIMAL_PLACES},
    format_number,
    utils::parse_number,
    FormController,
};
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Read a numeric field rendered by the form below.
fn read_field(id: &str) -> Option<f64> {
    let input: HtmlInputElement = gloo_utils::document().get_element_by_id(id)?.dyn_into().ok()?;
    parse_number(&input.value())
}

fn read_decimal_places() -> usize {
    gloo_utils::document()
        .get_element_by_id("casas-decimais")
        .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        .and_then(|select| select.value().parse().ok())
        .unwrap_or(DEFAULT_DECIMAL_PLACES)
}

/// The delta of a quadratic, `b² - 4ac`.
fn delta(a: f64, b: f64, c: f64) -> f64 {
    b * b - 4.0 * a * c
}

#[function_component(CalculationPage)]
fn calculation_page() -> Html {
    let root_ref = use_node_ref();
    let config = ControllerConfig::default();

    // Bind once the page is in the DOM; unbinding happens in the destructor
    {
        let root_ref = root_ref.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            let controller = root_ref.cast::<Element>().and_then(|root| {
                FormController::initialize(&root, config)
                    .map_err(|e| log::warn!("Form controller not started: {}", e))
                    .ok()
            });
            move || drop(controller)
        });
    }

    let copy_value = use_state(String::new);

    // Only reached when native validation passed; the controller stops
    // propagation of invalid submissions before Yew sees them.
    let onsubmit = {
        let root_ref = root_ref.clone();
        let copy_value = copy_value.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let Some(root) = root_ref.cast::<Element>() else {
                return;
            };
            let (Some(a), Some(b), Some(c)) = (read_field("a"), read_field("b"), read_field("c")) else {
                if let Err(e) = show_error(&root, &config, "Informe valores numéricos para a, b e c.") {
                    log::warn!("Could not show error: {}", e);
                }
                return;
            };
            match format_number(delta(a, b, c), read_decimal_places()) {
                Ok(text) => {
                    if let Err(e) = show_success(&root, &config, &format!("Δ = {}", text)) {
                        log::warn!("Could not show result: {}", e);
                    }
                    copy_value.set(text);
                }
                Err(err) => {
                    if let Err(e) = show_error(&root, &config, &err.to_string()) {
                        log::warn!("Could not show error: {}", e);
                    }
                }
            }
        })
    };

    html! {
        <div class="container py-4" ref={root_ref}>
            <h1 class="h3">{ "Fórmula do Delta" }</h1>
            <form id="calculo-form" class="needs-validation" novalidate={true} {onsubmit}>
                { for ["a", "b", "c"].iter().map(|name| html! {
                    <div class="mb-3">
                        <label class="form-label" for={*name}>{ *name }</label>
                        <input type="number" step="any" class="form-control" id={*name} name={*name} required={true} />
                        <div class="invalid-feedback">{ "Campo obrigatório" }</div>
                    </div>
                }) }
                <div class="mb-3">
                    <label class="form-label" for="casas-decimais">{ "Casas decimais" }</label>
                    <select class="form-select" id="casas-decimais" data-depends-on="c">
                        <option value="">{ "Padrão" }</option>
                        <option value="0">{ "0" }</option>
                        <option value="2">{ "2" }</option>
                        <option value="4">{ "4" }</option>
                    </select>
                </div>
                <button type="submit" class="btn btn-primary"
                    data-bs-toggle="tooltip" title="Calcula b² - 4ac">{ "Calcular" }</button>
                <button type="button" class="btn btn-secondary btn-clear ms-2">{ "Limpar" }</button>
                <button type="button" class="btn btn-outline-primary btn-copy ms-2"
                    data-resultado={(*copy_value).clone()}
                    disabled={copy_value.is_empty()}>{ "Copiar" }</button>
            </form>
            <div id="resultado-container" class="mt-3"></div>
        </div>
    }
}

/// Entry point: initializes Yew renderer for the demo page.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<CalculationPage>::new().render();
}
