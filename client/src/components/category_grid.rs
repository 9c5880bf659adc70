//! Category cards shown on the admin Categories tab.

use leptos::prelude::*;

use crate::net::types::Category;
use crate::state::records::CollectionState;

#[component]
pub fn CategoryGrid(
    categories: RwSignal<CollectionState<Category>>,
    on_edit: Callback<Category>,
    on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <Show when=move || categories.with(|c| c.error.is_some())>
            <p class="admin-page__error">{move || categories.with(|c| c.error.clone().unwrap_or_default())}</p>
        </Show>
        <Show
            when=move || categories.with(|c| !c.loading || !c.items.is_empty())
            fallback=|| view! { <p>"Loading categories..."</p> }
        >
            <div class="category-grid">
                <For
                    each=move || categories.with(|c| c.items.clone())
                    key=|c| c.id.clone()
                    children=move |category: Category| {
                        let id = category.id.clone();
                        let inactive = !category.is_active;
                        let edit_target = category.clone();
                        view! {
                            <div class="category-card" class:category-card--inactive=inactive>
                                {category
                                    .image_url
                                    .clone()
                                    .map(|src| view! { <img class="category-card__image" src=src alt=""/> })}
                                <h3 class="category-card__name">{category.name.clone()}</h3>
                                <p class="category-card__description">
                                    {category.description.clone().unwrap_or_default()}
                                </p>
                                <div class="category-card__actions">
                                    <button class="btn btn--small" on:click=move |_| on_edit.run(edit_target.clone())>
                                        "Edit"
                                    </button>
                                    <button
                                        class="btn btn--small btn--danger"
                                        on:click=move |_| on_delete.run(id.clone())
                                    >
                                        "Delete"
                                    </button>
                                </div>
                            </div>
                        }
                    }
                />
            </div>
        </Show>
    }
}
