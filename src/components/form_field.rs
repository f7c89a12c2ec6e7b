//! Form Field Helpers
//!
//! Per-field error text driven by a `FieldErrors` signal.

use leptos::prelude::*;

use crate::error::FieldErrors;

/// Message for `field`, hidden when there is none
#[component]
pub fn FieldMessage(errors: RwSignal<FieldErrors>, field: &'static str) -> impl IntoView {
    let message = move || errors.with(|e| e.get(field).map(str::to_string));

    view! {
        {move || message().map(|m| view! { <p class="field-error">{m}</p> })}
    }
}

/// CSS class for an input, flagged when its field has an error
pub fn input_class(errors: RwSignal<FieldErrors>, field: &'static str) -> impl Fn() -> &'static str + Copy {
    move || if errors.with(|e| e.get(field).is_some()) { "input invalid" } else { "input" }
}
