//! Landing page: who is signed in and where to go next.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;
use crate::util::auth::{apply_auth_step, browser_auth_flow};

#[component]
pub fn HomePage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let on_logout = move |_| {
        let step = browser_auth_flow(&config).logout();
        apply_auth_step(step, auth, toasts, &navigate);
    };

    let signed_out = move || auth.with(|a| a.user.is_none());
    let greeting = move || {
        auth.with(|a| a.user.as_ref().map(|u| format!("Signed in as {}", u.display_name())))
            .unwrap_or_default()
    };

    view! {
        <div class="home-page">
            <header class="home-page__header toolbar">
                <span class="toolbar__title">"Storefront Admin"</span>
                <span class="toolbar__spacer"></span>
                <Show
                    when=move || !signed_out()
                    fallback=|| {
                        view! {
                            <a class="btn" href="/login">"Sign In"</a>
                            <a class="btn btn--primary" href="/register">"Register"</a>
                        }
                    }
                >
                    <span class="toolbar__self">{greeting}</span>
                    <Show when=move || auth.with(AuthState::is_admin)>
                        <a class="btn btn--primary" href="/admin">"Admin"</a>
                    </Show>
                </Show>
                <button class="btn toolbar__logout" hidden=move || signed_out() on:click=on_logout>
                    "Logout"
                </button>
            </header>
            <main class="home-page__body">
                <Show
                    when=move || !auth.with(|a| a.loading)
                    fallback=|| view! { <p>"Loading..."</p> }
                >
                    <p>"Manage products and categories from the admin dashboard."</p>
                </Show>
            </main>
        </div>
    }
}
