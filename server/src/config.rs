//! Host configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use crate::error::HostError;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_PROXY_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub port: u16,
    pub backend_url: String,
    pub proxy_timeout: Duration,
}

impl HostConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: listen port, default 3000
    /// - `BACKEND_URL`: shop API origin, default `http://localhost:8000`
    /// - `PROXY_TIMEOUT_SECS`: upstream request timeout, default 30
    ///
    /// # Errors
    ///
    /// Returns [`HostError::InvalidEnv`] when a numeric variable does not parse.
    pub fn from_env() -> Result<Self, HostError> {
        let port = env_parse("PORT", DEFAULT_PORT)?;
        let backend_url = backend_url(std::env::var("BACKEND_URL").ok().as_deref());
        let timeout_secs = env_parse("PROXY_TIMEOUT_SECS", DEFAULT_PROXY_TIMEOUT_SECS)?;
        Ok(Self { port, backend_url, proxy_timeout: Duration::from_secs(timeout_secs) })
    }
}

fn backend_url(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => DEFAULT_BACKEND_URL.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T, HostError> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map_err(|_| HostError::InvalidEnv { var: key.to_string(), value: raw }),
        _ => Ok(default),
    }
}
