//! Login page supporting email + password and Google sign-in.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;

pub(crate) fn validate_login_input(email: &str, password: &str) -> Result<(String, String), &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter your email and password.");
    }
    Ok((email.to_owned(), password.to_owned()))
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let google_hint = (!config.google_enabled()).then_some("Google sign-in is not configured");
    let submit_config = config.clone();
    let submit_navigate = navigate.clone();
    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (email_value, password_value) = match validate_login_input(&email.get(), &password.get()) {
            Ok(values) => values,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let flow = crate::util::auth::browser_auth_flow(&submit_config);
            let navigate = submit_navigate.clone();
            leptos::task::spawn_local(async move {
                let step = flow.login(&email_value, &password_value).await;
                crate::util::auth::apply_auth_step(step, auth, toasts, &navigate);
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, password_value, &submit_config, &submit_navigate, auth, toasts);
        }
    };

    let on_google = move |_| {
        #[cfg(feature = "hydrate")]
        {
            let config = config.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let flow = crate::util::auth::browser_auth_flow(&config);
                let on_credential = move |credential: String| {
                    let flow = flow.clone();
                    let navigate = navigate.clone();
                    leptos::task::spawn_local(async move {
                        let step = flow.login_with_google_credential(&credential).await;
                        crate::util::auth::apply_auth_step(step, auth, toasts, &navigate);
                    });
                };
                let report = move |e: crate::util::google_identity::GoogleSignInError| {
                    leptos::logging::warn!("google sign-in unavailable: {e}");
                    crate::components::toast_stack::notify(toasts, crate::state::toast::Notice::error(e.user_message()));
                };
                let requested = crate::util::google_identity::request_credential(
                    &config.google_client_id,
                    on_credential,
                    report,
                )
                .await;
                if let Err(e) = requested {
                    report(e);
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&config, &navigate);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Storefront Admin"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@example.com"
                        autocomplete="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        autocomplete="current-password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign In" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <div class="login-divider"></div>
                <button class="login-button login-button--google" type="button" title=google_hint on:click=on_google>
                    "Continue with Google"
                </button>
                <p class="login-card__footer">
                    "No account? "
                    <a href="/register">"Create one"</a>
                </p>
            </div>
        </div>
    }
}
