//! Account registration page.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::config::ClientConfig;
use crate::state::auth::AuthState;
use crate::state::toast::ToastState;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub(crate) fn validate_register_input(
    name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<Registration, &'static str> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err("Fill in every field.");
    }
    if !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(Registration { name: name.to_owned(), email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let config = expect_context::<ClientConfig>();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let registration = match validate_register_input(&name.get(), &email.get(), &password.get(), &confirm.get()) {
            Ok(registration) => registration,
            Err(message) => {
                info.set(message.to_owned());
                return;
            }
        };
        info.set(String::new());
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let flow = crate::util::auth::browser_auth_flow(&config);
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                let step = flow
                    .register(&registration.name, &registration.email, &registration.password)
                    .await;
                crate::util::auth::apply_auth_step(step, auth, toasts, &navigate);
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (registration, &config, &navigate, auth, toasts);
        }
    };

    let input = move |kind: &'static str, placeholder: &'static str, value: RwSignal<String>| {
        view! {
            <input
                class="login-input"
                type=kind
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create Account"</h1>
                <form class="login-form" on:submit=on_submit>
                    {input("text", "Full name", name)}
                    {input("email", "you@example.com", email)}
                    {input("password", "Password", password)}
                    {input("password", "Confirm password", confirm)}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Creating account..." } else { "Create Account" }}
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message">{move || info.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "Already registered? "
                    <a href="/login">"Sign in"</a>
                </p>
            </div>
        </div>
    }
}
