//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::toast_stack::ToastStack;
use crate::config::ClientConfig;
use crate::pages::{admin::AdminPage, home::HomePage, login::LoginPage, register::RegisterPage};
use crate::state::{auth::AuthState, records::RecordCache, toast::ToastState};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides all shared state contexts, restores the stored session once the
/// app is running in the browser, and sets up client-side routing.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = ClientConfig::from_build_env();
    let auth = RwSignal::new(AuthState::default());
    let toasts = RwSignal::new(ToastState::default());
    let cache = RwSignal::new(RecordCache::default());

    provide_context(config.clone());
    provide_context(auth);
    provide_context(toasts);
    provide_context(cache);

    #[cfg(feature = "hydrate")]
    {
        let flow = crate::util::auth::browser_auth_flow(&config);
        leptos::task::spawn_local(async move {
            let step = flow.restore().await;
            auth.update(|state| state.apply(step.user));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = config;

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront-admin.css"/>
        <Title text="Storefront Admin"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=StaticSegment("login") view=LoginPage/>
                <Route path=StaticSegment("register") view=RegisterPage/>
                <Route path=StaticSegment("admin") view=AdminPage/>
            </Routes>
        </Router>
        <ToastStack/>
    }
}
