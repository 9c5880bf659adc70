//! Client configuration baked in at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The WASM bundle has no process environment, so settings are read with
//! `option_env!` when the crate is compiled and provided to components as a
//! context value.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// API base used when `SHOP_API_URL` is not set at build time.
pub const DEFAULT_API_BASE_URL: &str = "/api";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Prefix for every backend path, without a trailing slash.
    pub api_base_url: String,
    /// Google Identity Services client id; empty disables Google sign-in.
    pub google_client_id: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

impl ClientConfig {
    /// Read `SHOP_API_URL` and `SHOP_GOOGLE_CLIENT_ID` as captured at compile time.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("SHOP_API_URL"), option_env!("SHOP_GOOGLE_CLIENT_ID"))
    }

    /// Apply defaults and normalization to raw settings.
    #[must_use]
    pub fn resolve(api_base_url: Option<&str>, google_client_id: Option<&str>) -> Self {
        let api_base_url = match api_base_url.map(str::trim) {
            Some(url) if !url.is_empty() => url.trim_end_matches('/').to_owned(),
            _ => DEFAULT_API_BASE_URL.to_owned(),
        };
        Self {
            api_base_url,
            google_client_id: google_client_id.map(str::trim).unwrap_or_default().to_owned(),
        }
    }

    #[must_use]
    pub fn google_enabled(&self) -> bool {
        !self.google_client_id.is_empty()
    }
}
