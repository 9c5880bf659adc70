//! Admin dashboard for products and categories.
//!
//! SYSTEM CONTEXT
//! ==============
//! Signed-out visitors are redirected to `/login`; signed-in users without
//! the admin role see an access-denied view. For admins, each collection is
//! refetched whenever its generation in the shared [`RecordCache`] changes,
//! so every successful mutation shows up without patching local lists.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::category_form::CategoryForm;
use crate::components::category_grid::CategoryGrid;
use crate::components::product_form::ProductForm;
use crate::components::product_table::ProductTable;
use crate::config::ClientConfig;
use crate::net::types::{Category, Product};
use crate::state::auth::AuthState;
use crate::state::records::{CollectionKey, CollectionState, RecordCache};
use crate::state::toast::ToastState;
use crate::state::ui::{AdminTab, AdminUiState, Editor};
use crate::util::auth::{apply_auth_step, browser_auth_flow, install_unauth_redirect};

#[component]
pub fn AdminPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    install_unauth_redirect(auth, use_navigate());

    view! {
        <Show
            when=move || auth.with(AuthState::is_admin)
            fallback=move || {
                view! {
                    <div class="access-denied">
                        {move || {
                            if auth.with(|a| a.loading || a.user.is_none()) {
                                view! { <p>"Loading..."</p> }.into_any()
                            } else {
                                view! {
                                    <h1>"Access Denied"</h1>
                                    <p>"You need admin privileges to access this page."</p>
                                }
                                    .into_any()
                            }
                        }}
                    </div>
                }
            }
        >
            <AdminDashboard/>
        </Show>
    }
}

/// Load a collection into `target`, keeping the current items on screen.
#[cfg(feature = "hydrate")]
fn refetch<E>(config: &ClientConfig, target: RwSignal<CollectionState<E>>)
where
    E: crate::net::records::AdminEntity + Send + Sync,
{
    use crate::net::records::{RecordManager, list_failed};

    target.update(CollectionState::begin_fetch);
    let manager = RecordManager::<E, _>::new(crate::net::api::HttpApi::from_config(config));
    leptos::task::spawn_local(async move {
        let result = manager.list().await.map_err(|e| {
            leptos::logging::warn!("{} fetch failed: {e}", E::COLLECTION.as_str());
            e.user_message(&list_failed::<E>())
        });
        target.update(|state| state.finish(result));
    });
}

/// Delete a record after confirmation and apply the outcome.
#[cfg(feature = "hydrate")]
fn delete_record<E>(config: &ClientConfig, id: String, cache: RwSignal<RecordCache>, toasts: RwSignal<ToastState>)
where
    E: crate::net::records::AdminEntity,
{
    let manager = crate::net::records::RecordManager::<E, _>::new(crate::net::api::HttpApi::from_config(config));
    leptos::task::spawn_local(async move {
        let outcome = manager.delete(&id, crate::util::mutation::confirm).await;
        crate::util::mutation::apply_mutation(outcome, cache, toasts);
    });
}

#[component]
fn AdminDashboard() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let cache = expect_context::<RwSignal<RecordCache>>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let ui = RwSignal::new(AdminUiState::default());
    let products = RwSignal::new(CollectionState::<Product>::default());
    let categories = RwSignal::new(CollectionState::<Category>::default());

    #[cfg(feature = "hydrate")]
    {
        use crate::util::mutation::generation_memo;

        let products_generation = generation_memo(cache, CollectionKey::AdminProducts);
        let categories_generation = generation_memo(cache, CollectionKey::Categories);

        let products_config = config.clone();
        Effect::new(move || {
            products_generation.track();
            refetch(&products_config, products);
        });
        let categories_config = config.clone();
        Effect::new(move || {
            categories_generation.track();
            refetch(&categories_config, categories);
        });
    }

    let delete_config = config.clone();
    let on_delete_product = Callback::new(move |id: String| {
        #[cfg(feature = "hydrate")]
        delete_record::<Product>(&delete_config, id, cache, toasts);
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, &delete_config);
    });
    let on_delete_category = Callback::new(move |id: String| {
        #[cfg(feature = "hydrate")]
        delete_record::<Category>(&config, id, cache, toasts);
        #[cfg(not(feature = "hydrate"))]
        let _ = (id, &config);
    });
    let on_edit_product = Callback::new(move |product: Product| ui.update(|u| u.edit_product(product)));
    let on_edit_category = Callback::new(move |category: Category| ui.update(|u| u.edit_category(category)));
    let on_close_form = Callback::new(move |()| ui.update(AdminUiState::close_editor));

    let logout_config = expect_context::<ClientConfig>();
    let on_logout = move |_| {
        let step = browser_auth_flow(&logout_config).logout();
        apply_auth_step(step, auth, toasts, &navigate);
    };

    let category_options = Signal::derive(move || categories.with(|c| c.items.clone()));
    let tab_button = move |tab: AdminTab| {
        view! {
            <button
                class="admin-tabs__tab"
                class:admin-tabs__tab--active=move || ui.with(|u| u.tab == tab)
                on:click=move |_| ui.update(|u| u.select_tab(tab))
            >
                {tab.label()}
            </button>
        }
    };
    let count = move |key: CollectionKey| match key {
        CollectionKey::AdminProducts => products.with(|p| p.items.len()),
        CollectionKey::Categories => categories.with(|c| c.items.len()),
    };

    view! {
        <div class="admin-page">
            <header class="admin-page__header toolbar">
                <a class="toolbar__title" href="/">"Storefront Admin"</a>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">
                    {move || auth.with(|a| a.user.as_ref().map(|u| u.display_name().to_owned()))}
                </span>
                <button class="btn toolbar__logout" on:click=on_logout>"Logout"</button>
            </header>

            <div class="admin-page__stats">
                <div class="stat-card">
                    <span class="stat-card__label">"Products"</span>
                    <span class="stat-card__value">{move || count(CollectionKey::AdminProducts)}</span>
                </div>
                <div class="stat-card">
                    <span class="stat-card__label">"Categories"</span>
                    <span class="stat-card__value">{move || count(CollectionKey::Categories)}</span>
                </div>
            </div>

            <nav class="admin-tabs">
                {tab_button(AdminTab::Products)}
                {tab_button(AdminTab::Categories)}
                <span class="toolbar__spacer"></span>
                <button class="btn btn--primary" on:click=move |_| ui.update(AdminUiState::open_create)>
                    {move || match ui.with(|u| u.tab) {
                        AdminTab::Products => "+ Add Product",
                        AdminTab::Categories => "+ Add Category",
                    }}
                </button>
            </nav>

            <section class="admin-page__content">
                {move || match ui.with(|u| u.tab) {
                    AdminTab::Products => {
                        view! {
                            <ProductTable products=products on_edit=on_edit_product on_delete=on_delete_product/>
                        }
                            .into_any()
                    }
                    AdminTab::Categories => {
                        view! {
                            <CategoryGrid
                                categories=categories
                                on_edit=on_edit_category
                                on_delete=on_delete_category
                            />
                        }
                            .into_any()
                    }
                }}
            </section>

            {move || match ui.with(|u| u.editor.clone()) {
                Editor::Closed => None,
                Editor::NewProduct => {
                    Some(
                        view! { <ProductForm product=None categories=category_options on_close=on_close_form/> }
                            .into_any(),
                    )
                }
                Editor::EditProduct(product) => {
                    Some(
                        view! {
                            <ProductForm product=Some(product) categories=category_options on_close=on_close_form/>
                        }
                            .into_any(),
                    )
                }
                Editor::NewCategory => {
                    Some(view! { <CategoryForm category=None on_close=on_close_form/> }.into_any())
                }
                Editor::EditCategory(category) => {
                    Some(view! { <CategoryForm category=Some(category) on_close=on_close_form/> }.into_any())
                }
            }}
        </div>
    }
}
