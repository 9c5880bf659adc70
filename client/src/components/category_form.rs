//! Modal form for creating or editing a category.

use leptos::prelude::*;

use super::form_fields::{check_box, text_area, text_field};
use crate::config::ClientConfig;
use crate::net::types::Category;
use crate::state::records::RecordCache;
use crate::state::toast::ToastState;
use crate::util::category_form::CategoryDraft;
use crate::util::form_validation::FieldError;

#[component]
pub fn CategoryForm(category: Option<Category>, on_close: Callback<()>) -> impl IntoView {
    let config = expect_context::<ClientConfig>();
    let cache = expect_context::<RwSignal<RecordCache>>();
    let toasts = expect_context::<RwSignal<ToastState>>();

    let editing_id = category.as_ref().map(|c| c.id.clone());
    let is_edit = editing_id.is_some();
    let draft = RwSignal::new(category.as_ref().map_or_else(CategoryDraft::new, CategoryDraft::from_category));
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let saving = RwSignal::new(false);
    let uploading = RwSignal::new(false);

    let submit_config = config.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let payload = match draft.with_untracked(CategoryDraft::to_payload) {
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
                let manager = crate::net::records::RecordManager::<Category, _>::new(api);
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

    let on_file = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            use crate::net::api::Uploader as _;

            let Some(file) = crate::util::upload::files_from_event(&ev).into_iter().next() else {
                return;
            };
            uploading.set(true);
            let api = crate::net::api::HttpApi::from_config(&config);
            leptos::task::spawn_local(async move {
                let result = api.upload(&file).await;
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

    let has_image = move || draft.with(|d| !d.image_url.is_empty());

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>{if is_edit { "Edit Category" } else { "Create Category" }}</h2>
                <form class="entity-form" on:submit=on_submit novalidate>
                    {text_field("Name *", "name", "text", draft, errors, |d| d.name.as_str(), |d, v| d.name = v)}
                    {text_area("Description", draft, |d| d.description.as_str(), |d, v| d.description = v)}

                    <div class="form-field">
                        <span class="form-field__label">"Image"</span>
                        <input type="file" accept="image/*" disabled=move || uploading.get() on:change=on_file/>
                        <Show when=move || uploading.get()>
                            <p class="form-field__hint">"Uploading..."</p>
                        </Show>
                        <Show when=has_image>
                            <div class="image-grid__item">
                                <img src=move || draft.with(|d| d.image_url.clone()) alt="Category"/>
                                <button
                                    type="button"
                                    class="image-grid__remove"
                                    title="Remove image"
                                    on:click=move |_| draft.update(CategoryDraft::clear_image)
                                >
                                    "×"
                                </button>
                            </div>
                        </Show>
                    </div>

                    {check_box("Active", draft, |d| d.is_active, |d, v| d.is_active = v)}

                    <div class="dialog__actions">
                        <button type="button" class="btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                        <button type="submit" class="btn btn--primary" disabled=move || saving.get()>
                            {move || {
                                if saving.get() {
                                    "Saving..."
                                } else if is_edit {
                                    "Update Category"
                                } else {
                                    "Create Category"
                                }
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
