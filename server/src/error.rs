//! Host startup errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: String, value: String },

    #[error("leptos configuration: {0}")]
    Leptos(String),

    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server failed: {0}")]
    Serve(#[from] std::io::Error),
}
