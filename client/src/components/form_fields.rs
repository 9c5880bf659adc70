//! Labeled inputs bound to a draft signal, with inline validation messages.
//!
//! DESIGN
//! ======
//! Fields read and write the draft through plain accessor functions so one
//! helper serves every text field of both entity forms.

use leptos::prelude::*;

use crate::util::form_validation::{FieldError, error_for};

/// Inline error for `field`, rendered only while one is present.
pub fn field_error(errors: RwSignal<Vec<FieldError>>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|errs| error_for(errs, field).map(str::to_owned)).map(|message| {
            view! { <p class="form-field__error">{message}</p> }
        })
    }
}

/// `<input>` bound to one string field of a draft.
pub fn text_field<D>(
    label: &'static str,
    field: &'static str,
    input_type: &'static str,
    draft: RwSignal<D>,
    errors: RwSignal<Vec<FieldError>>,
    get: fn(&D) -> &str,
    set: fn(&mut D, String),
) -> impl IntoView
where
    D: Send + Sync + 'static,
{
    let step = (input_type == "number").then_some("any");
    view! {
        <label class="form-field">
            <span class="form-field__label">{label}</span>
            <input
                class="form-field__input"
                class:form-field__input--invalid=move || errors.with(|e| error_for(e, field).is_some())
                type=input_type
                step=step
                prop:value=move || draft.with(|d| get(d).to_owned())
                on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
            />
            {field_error(errors, field)}
        </label>
    }
}

/// `<textarea>` bound to one string field of a draft.
pub fn text_area<D>(
    label: &'static str,
    draft: RwSignal<D>,
    get: fn(&D) -> &str,
    set: fn(&mut D, String),
) -> impl IntoView
where
    D: Send + Sync + 'static,
{
    view! {
        <label class="form-field form-field--wide">
            <span class="form-field__label">{label}</span>
            <textarea
                class="form-field__input"
                rows="4"
                prop:value=move || draft.with(|d| get(d).to_owned())
                on:input=move |ev| draft.update(|d| set(d, event_target_value(&ev)))
            ></textarea>
        </label>
    }
}

/// Checkbox bound to one flag of a draft.
pub fn check_box<D>(label: &'static str, draft: RwSignal<D>, get: fn(&D) -> bool, set: fn(&mut D, bool)) -> impl IntoView
where
    D: Send + Sync + 'static,
{
    view! {
        <label class="form-check">
            <input
                type="checkbox"
                prop:checked=move || draft.with(get)
                on:change=move |ev| draft.update(|d| set(d, event_target_checked(&ev)))
            />
            {label}
        </label>
    }
}
