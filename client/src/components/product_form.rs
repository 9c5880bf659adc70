//! Modal form for creating or editing a product.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened by the admin page with the record being edited (or `None` for
//! create). Field conversion and validation live in
//! [`crate::util::product_form`]; this component only binds them to inputs
//! and runs the upload and submit requests.

use leptos::prelude::*;

use super::form_fields::{check_box, text_area, text_field};
use crate::config::ClientConfig;
use crate::net::types::{Category, Product};
use crate::state::records::RecordCache;
use crate::state::toast::ToastState;
use crate::util::form_validation::FieldError;
use crate::util::product_form::ProductDraft;

#[component]
pub fn ProductForm(
    product: Option<Product>,
    #[prop(into)] categories: Signal<Vec<Category>>,
    on_close: Callback<()>,
) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let cache = expect_context::<RwSignal<RecordCache>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let editing_id = product.as_ref().map(|p| p.id.clone());
    let is_edit = editing_id.is_some();
    let draft = RwSignal::new(product.as_ref().map_or_else(ProductDraft::new, ProductDraft::from_product));
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let saving = RwSignal::new(false);
    let uploading = RwSignal::new(false);

    let submit_config = config.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let payload = match draft.with_untracked(ProductDraft::to_payload) {
            Ok(payload) => payload,
            Err(field_errors) => {
                errors.set(field_errors);
                return;
            }
        };
        errors.set(Vec::new());
        saving.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = crate::net::api::HttpApi::from_config(&submit_config);
            let editing_id = editing_id.clone();
            leptos::task::spawn_local(async move {
                let manager = crate::net::records::RecordManager::<Product, _>::new(api);
                let outcome = match editing_id {
                    Some(id) => manager.update(&id, &payload).await,
                    None => manager.create(&payload).await,
                };
                let succeeded = outcome.succeeded();
                crate::util::mutation::apply_mutation(outcome, cache, toasts);
                saving.set(false);
                if succeeded {
                    on_close.run(());
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (payload, &submit_config, &editing_id, cache, toasts);
        }
    };

    let on_files = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let files = crate::util::upload::files_from_event(&ev);
            if files.is_empty() {
                return;
            }
            uploading.set(true);
            let api = crate::net::api::HttpApi::from_config(&config);
            leptos::task::spawn_local(async move {
                let result = crate::util::upload::upload_all(&api, &files).await;
                let mut notice = None;
                draft.update(|d| notice = Some(d.apply_upload(result)));
                if let Some(notice) = notice {
                    crate::components::toast_stack::notify(toasts, notice);
                }
                uploading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (ev, &config);
        }
    };

    let on_backdrop = move |_| on_close.run(());
    let on_cancel = move |_| on_close.run(());

    view! {
        <div class="dialog-backdrop" on:click=on_backdrop>
            <div class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation()>
                <h2>{if is_edit { "Edit Product" } else { "Create Product" }}</h2>
                <form class="entity-form" on:submit=on_submit novalidate>
                    <div class="entity-form__grid">
                        {text_field("Name *", "name", "text", draft, errors, |d| d.name.as_str(), |d, v| d.name = v)}
                        {text_field("SKU", "sku", "text", draft, errors, |d| d.sku.as_str(), |d, v| d.sku = v)}
                        {text_field("Brand", "brand", "text", draft, errors, |d| d.brand.as_str(), |d, v| d.brand = v)}
                        {text_field(
                            "Part Number",
                            "part_number",
                            "text",
                            draft,
                            errors,
                            |d| d.part_number.as_str(),
                            |d, v| d.part_number = v,
                        )}
                        {text_field("Price *", "price", "number", draft, errors, |d| d.price.as_str(), |d, v| d.price = v)}
                        {text_field(
                            "Discount Price",
                            "discount_price",
                            "number",
                            draft,
                            errors,
                            |d| d.discount_price.as_str(),
                            |d, v| d.discount_price = v,
                        )}
                        <label class="form-field">
                            <span class="form-field__label">"Category"</span>
                            <select
                                class="form-field__input"
                                prop:value=move || draft.with(|d| d.category_id.clone())
                                on:change=move |ev| draft.update(|d| d.category_id = event_target_value(&ev))
                            >
                                <option value="">"Select category"</option>
                                <For
                                    each=move || categories.get()
                                    key=|c| c.id.clone()
                                    children=move |c: Category| {
                                        let selected = draft.with_untracked(|d| d.category_id == c.id);
                                        view! { <option value=c.id selected=selected>{c.name}</option> }
                                    }
                                />
                            </select>
                        </label>
                        {text_field(
                            "Stock Quantity *",
                            "stock_quantity",
                            "number",
                            draft,
                            errors,
                            |d| d.stock_quantity.as_str(),
                            |d, v| d.stock_quantity = v,
                        )}
                    </div>

                    {text_area("Description", draft, |d| d.description.as_str(), |d, v| d.description = v)}

                    <div class="form-field form-field--wide">
                        <span class="form-field__label">"Images"</span>
                        <input
                            type="file"
                            multiple
                            accept="image/*"
                            disabled=move || uploading.get()
                            on:change=on_files
                        />
                        <Show when=move || uploading.get()>
                            <p class="form-field__hint">"Uploading..."</p>
                        </Show>
                        <div class="image-grid">
                            <For
                                each=move || draft.with(|d| d.image_urls.iter().cloned().enumerate().collect::<Vec<_>>())
                                key=|(index, url)| (*index, url.clone())
                                children=move |(index, url): (usize, String)| {
                                    view! {
                                        <div class="image-grid__item">
                                            <img src=url alt=format!("Product {}", index + 1)/>
                                            <button
                                                type="button"
                                                class="image-grid__remove"
                                                title="Remove image"
                                                on:click=move |_| draft.update(|d| d.remove_image(index))
                                            >
                                                "×"
                                            </button>
                                        </div>
                                    }
                                }
                            />
                        </div>
                    </div>

                    <div class="entity-form__grid entity-form__grid--three">
                        {text_field("Weight (kg)", "weight", "number", draft, errors, |d| d.weight.as_str(), |d, v| d.weight = v)}
                        {text_field(
                            "Warranty",
                            "warranty",
                            "text",
                            draft,
                            errors,
                            |d| d.warranty.as_str(),
                            |d, v| d.warranty = v,
                        )}
                    </div>

                    <fieldset class="entity-form__group">
                        <legend>"Dimensions (cm)"</legend>
                        <div class="entity-form__grid entity-form__grid--three">
                            {text_field("Length", "length", "number", draft, errors, |d| d.length.as_str(), |d, v| d.length = v)}
                            {text_field("Width", "width", "number", draft, errors, |d| d.width.as_str(), |d, v| d.width = v)}
                            {text_field("Height", "height", "number", draft, errors, |d| d.height.as_str(), |d, v| d.height = v)}
                        </div>
                    </fieldset>

                    <CompatibilityEditor draft=draft/>

                    <div class="entity-form__checks">
                        {check_box("Active", draft, |d| d.is_active, |d, v| d.is_active = v)}
                        {check_box("Featured", draft, |d| d.is_featured, |d, v| d.is_featured = v)}
                    </div>

                    <div class="dialog__actions">
                        <button type="button" class="btn" on:click=on_cancel>"Cancel"</button>
                        <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                            {move || {
                                if saving.get() {
                                    "Saving..."
                                } else if is_edit {
                                    "Update Product"
                                } else {
                                    "Create Product"
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}

/// Key/value rows for the product's compatibility map.
#[component]
fn CompatibilityEditor(draft: RwSignal<ProductDraft>) -> impl IntoView {
    let rows = move || draft.with(|d| (0..d.compatibility.len()).collect::<Vec<_>>());
    let cell = move |index: usize, key: bool| {
        draft.with(|d| {
            d.compatibility
                .get(index)
                .map(|row| if key { row.key.clone() } else { row.value.clone() })
                .unwrap_or_default()
        })
    };

    view! {
        <fieldset class="entity-form__group">
            <legend>"Compatibility"</legend>
            <For
                each=rows
                key=|index| *index
                children=move |index: usize| {
                    view! {
                        <div class="compat-row">
                            <input
                                class="form-field__input"
                                placeholder="Model"
                                prop:value=move || cell(index, true)
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    draft.update(|d| {
                                        if let Some(row) = d.compatibility.get_mut(index) {
                                            row.key = value;
                                        }
                                    });
                                }
                            />
                            <input
                                class="form-field__input"
                                placeholder="Years or notes"
                                prop:value=move || cell(index, false)
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    draft.update(|d| {
                                        if let Some(row) = d.compatibility.get_mut(index) {
                                            row.value = value;
                                        }
                                    });
                                }
                            />
                            <button
                                type="button"
                                class="btn btn--small"
                                on:click=move |_| draft.update(|d| d.remove_compatibility_row(index))
                            >
                                "Remove"
                            </button>
                        </div>
                    }
                }
            />
            <button type="button" class="btn btn--small" on:click=move |_| draft.update(ProductDraft::add_compatibility_row)>
                "+ Add compatibility"
            </button>
        </fieldset>
    }
}
