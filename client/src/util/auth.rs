//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route components should apply identical unauthenticated redirect behavior,
//! and every auth operation lands in the shared contexts the same way.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::components::toast_stack::notify;
use crate::config::ClientConfig;
use crate::net::api::HttpApi;
use crate::state::auth::AuthState;
use crate::state::session::{AuthFlow, AuthStep, LOGIN_ROUTE};
use crate::state::toast::ToastState;
use crate::util::token_store::LocalTokenStore;

/// The auth flow wired to the real backend and `localStorage`.
pub type BrowserAuthFlow = AuthFlow<HttpApi, LocalTokenStore>;

#[must_use]
pub fn browser_auth_flow(config: &ClientConfig) -> BrowserAuthFlow {
    AuthFlow::new(HttpApi::from_config(config), LocalTokenStore)
}

/// `true` once the session check finished without finding a user.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Redirect to `/login` whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(LOGIN_ROUTE, NavigateOptions::default());
        }
    });
}

/// Apply a finished auth operation: update the user, show its toast and
/// follow its redirect.
pub fn apply_auth_step<F>(step: AuthStep, auth: RwSignal<AuthState>, toasts: RwSignal<ToastState>, navigate: &F)
where
    F: Fn(&str, NavigateOptions),
{
    let AuthStep { user, notice, redirect } = step;
    auth.update(|state| state.apply(user));
    if let Some(notice) = notice {
        notify(toasts, notice);
    }
    if let Some(path) = redirect {
        navigate(path, NavigateOptions::default());
    }
}
