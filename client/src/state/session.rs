//! Session token lifecycle: restore, login, registration, Google exchange, logout.
//!
//! ARCHITECTURE
//! ============
//! `AuthFlow` talks to the backend and the token store, then describes what
//! the UI should do as an [`AuthStep`]: how the current user changes, which
//! notice to show and where to navigate. The step is applied in one place,
//! so the flow is the single writer of session state.
//!
//! TRADE-OFFS
//! ==========
//! A token is only kept when the profile fetch that follows it succeeds, so
//! a sign-in that fails at `/auth/me` must be retried from scratch.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::ShopApi;
use crate::net::error::{ApiError, NETWORK_ERROR_MESSAGE};
use crate::net::types::{RegisterRequest, User};
use crate::state::auth::UserChange;
use crate::state::toast::Notice;
use crate::util::token_store::TokenStore;

pub const HOME_ROUTE: &str = "/";
pub const LOGIN_ROUTE: &str = "/login";

const LOGIN_SUCCESS: &str = "Welcome back!";
const LOGIN_FAILED: &str = "Login failed";
const REGISTER_SUCCESS: &str = "Account created successfully!";
const REGISTER_FAILED: &str = "Registration failed";
const REGISTER_LOGIN_FAILED: &str = "Registration successful but login failed";
const LOGOUT_SUCCESS: &str = "Logged out successfully";
const GOOGLE_SUCCESS: &str = "Signed in with Google";
pub const GOOGLE_FAILED: &str = "Google login failed";

/// What the UI should do after an auth operation completes.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthStep {
    pub user: UserChange,
    pub notice: Option<Notice>,
    pub redirect: Option<&'static str>,
}

impl AuthStep {
    fn signed_in(user: User, message: &str) -> Self {
        Self { user: UserChange::Replace(user), notice: Some(Notice::success(message)), redirect: Some(HOME_ROUTE) }
    }

    fn failed(message: String) -> Self {
        Self { user: UserChange::Keep, notice: Some(Notice::error(message)), redirect: None }
    }

    fn silent(user: UserChange) -> Self {
        Self { user, notice: None, redirect: None }
    }
}

/// Derive a username from an email address: the text before the first `@`,
/// or the whole input when there is none.
#[must_use]
pub fn username_from_email(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

/// Orchestrates every session transition against the backend.
#[derive(Clone, Debug)]
pub struct AuthFlow<A, S> {
    api: A,
    tokens: S,
}

impl<A, S> AuthFlow<A, S>
where
    A: ShopApi,
    S: TokenStore,
{
    pub fn new(api: A, tokens: S) -> Self {
        Self { api, tokens }
    }

    /// Silently restore the session from a stored token.
    ///
    /// On any failure the token is removed. If another sign-in replaced the
    /// token while the check was in flight, the result is discarded.
    pub async fn restore(&self) -> AuthStep {
        let Some(token) = self.tokens.load() else {
            return AuthStep::silent(UserChange::Keep);
        };
        let result = self.api.current_user(&token).await;
        if self.tokens.load().as_deref() != Some(token.as_str()) {
            leptos::logging::log!("session token replaced during restore; keeping newer session");
            return AuthStep::silent(UserChange::Keep);
        }
        match result {
            Ok(user) => AuthStep::silent(UserChange::Replace(user)),
            Err(e) => {
                leptos::logging::warn!("session restore failed: {e}");
                self.tokens.clear();
                AuthStep::silent(UserChange::Keep)
            }
        }
    }

    /// Sign in with email and password.
    pub async fn login(&self, email: &str, password: &str) -> AuthStep {
        let token = match self.api.login(email, password).await {
            Ok(token) => token.access_token,
            Err(e) => return AuthStep::failed(e.user_message(LOGIN_FAILED)),
        };
        match self.adopt_token(&token).await {
            Ok(user) => AuthStep::signed_in(user, LOGIN_SUCCESS),
            Err(e) => AuthStep::failed(e.user_message(LOGIN_FAILED)),
        }
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// The session user comes from `/auth/me`, like every other sign-in path,
    /// rather than from the registration response body.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> AuthStep {
        let request = RegisterRequest {
            username: username_from_email(email).to_owned(),
            email: email.to_owned(),
            password: password.to_owned(),
            full_name: name.to_owned(),
        };
        if let Err(e) = self.api.register(&request).await {
            return AuthStep::failed(e.user_message(REGISTER_FAILED));
        }

        let token = match self.api.login(email, password).await {
            Ok(token) => token.access_token,
            Err(ApiError::Transport(_)) => return AuthStep::failed(NETWORK_ERROR_MESSAGE.to_owned()),
            Err(_) => return AuthStep::failed(REGISTER_LOGIN_FAILED.to_owned()),
        };
        match self.adopt_token(&token).await {
            Ok(user) => AuthStep::signed_in(user, REGISTER_SUCCESS),
            Err(e) => AuthStep::failed(e.user_message(REGISTER_LOGIN_FAILED)),
        }
    }

    /// Trade a Google identity credential for a session.
    pub async fn login_with_google_credential(&self, credential: &str) -> AuthStep {
        let token = match self.api.exchange_google_credential(credential).await {
            Ok(token) => token.access_token,
            Err(e) => return AuthStep::failed(e.user_message(GOOGLE_FAILED)),
        };
        match self.adopt_token(&token).await {
            Ok(user) => AuthStep::signed_in(user, GOOGLE_SUCCESS),
            Err(e) => AuthStep::failed(e.user_message(GOOGLE_FAILED)),
        }
    }

    /// End the session. Always succeeds, even with no active session.
    pub fn logout(&self) -> AuthStep {
        self.tokens.clear();
        AuthStep { user: UserChange::Clear, notice: Some(Notice::success(LOGOUT_SUCCESS)), redirect: Some(LOGIN_ROUTE) }
    }

    /// Store `token` and fetch the profile it belongs to. If the profile
    /// cannot be fetched, the previously stored token is put back.
    async fn adopt_token(&self, token: &str) -> Result<User, ApiError> {
        let prior = self.tokens.load();
        self.tokens.save(token);
        match self.api.current_user(token).await {
            Ok(user) => Ok(user),
            Err(e) => {
                leptos::logging::warn!("profile fetch after sign-in failed: {e}");
                match prior {
                    Some(prior) => self.tokens.save(&prior),
                    None => self.tokens.clear(),
                }
                Err(e)
            }
        }
    }
}
