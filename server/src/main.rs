#![recursion_limit = "256"]

mod config;
mod error;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

use crate::config::HostConfig;
use crate::error::HostError;

#[tokio::main]
async fn main() {
    // A missing .env is fine; the process environment still applies.
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "storefront-admin failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), HostError> {
    let config = HostConfig::from_env()?;
    let state = state::AppState::new(&config)?;
    let app = routes::app(state)?;

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|source| HostError::Bind { addr: addr.clone(), source })?;

    tracing::info!(port = config.port, backend = %config.backend_url, "storefront-admin listening");
    axum::serve(listener, app).await?;
    Ok(())
}
