//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects
//! and identity-dependent rendering. Only [`AuthState::apply`] writes to it;
//! the values it applies come from [`crate::state::session::AuthFlow`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// How a completed auth operation changes the current user.
#[derive(Clone, Debug, PartialEq)]
pub enum UserChange {
    /// Leave the current user as it is.
    Keep,
    /// Replace the current user wholesale.
    Replace(User),
    /// Forget the current user.
    Clear,
}

/// Authentication state tracking the current user and loading status.
///
/// `loading` starts `true` and stays so until the stored token has been
/// checked on startup.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Apply the outcome of an auth operation. Every completed operation
    /// resolves the initial loading state.
    pub fn apply(&mut self, change: UserChange) {
        match change {
            UserChange::Keep => {}
            UserChange::Replace(user) => self.user = Some(user),
            UserChange::Clear => self.user = None,
        }
        self.loading = false;
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }
}
