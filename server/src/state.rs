//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into the proxy handler via the `State` extractor.
//! It holds one pooled HTTP client for all upstream calls and the backend
//! origin requests are forwarded to.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use std::sync::Arc;

use crate::config::HostConfig;
use crate::error::HostError;

/// Shared application state. Clone is required by Axum; inner fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub http: reqwest::Client,
    pub backend_url: Arc<str>,
}

impl AppState {
    /// Build the upstream client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`HostError::HttpClientBuild`] if the TLS backend cannot initialize.
    pub fn new(config: &HostConfig) -> Result<Self, HostError> {
        let http = reqwest::Client::builder()
            .timeout(config.proxy_timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| HostError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, backend_url: Arc::from(config.backend_url.as_str()) })
    }
}
