//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the server-rendered Leptos admin app, the compiled
//! WASM/CSS bundle under `/pkg`, and a same-origin `/api` proxy to the shop
//! backend so the browser never needs CORS.


pub mod proxy;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{any, get};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::HostError;
use crate::state::AppState;

/// Backend proxy and health routes.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/{*path}", any(proxy::forward))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Full host router: API proxy + Leptos SSR + static bundle.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section and no `LEPTOS_*` overrides).
pub fn app(state: AppState) -> Result<Router, HostError> {
    let conf = get_configuration(None).map_err(|e| HostError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(admin_client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || admin_client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes(state)
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
