//! Reverse proxy for the shop API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser talks to `/api` on the same origin; this handler replays each
//! request against `BACKEND_URL` and streams the answer back. Method, query,
//! body and end-to-end headers pass through unchanged.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod proxy_test;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::header::{self, HeaderMap, HeaderName};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::state::AppState;

/// Largest request body forwarded upstream (image uploads included).
pub const MAX_BODY_BYTES: usize = 20 * 1024 * 1024;

const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Upstream URL for an incoming `/api/...` request.
pub(crate) fn upstream_url(backend_url: &str, uri: &Uri) -> String {
    let path_and_query = uri.path_and_query().map_or_else(|| uri.path(), |pq| pq.as_str());
    format!("{backend_url}{path_and_query}")
}

pub(crate) fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(&name.as_str())
}

/// Copy end-to-end headers, dropping hop-by-hop ones, `Host` and
/// `Content-Length` (the HTTP client recomputes both).
pub(crate) fn forwarded_headers(headers: &HeaderMap) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !is_hop_by_hop(name) && **name != header::HOST && **name != header::CONTENT_LENGTH)
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

pub async fn forward(State(state): State<AppState>, request: Request) -> Response {
    let (parts, body) = request.into_parts();
    let url = upstream_url(&state.backend_url, &parts.uri);

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, %url, "proxy request body rejected");
            return (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response();
        }
    };

    let upstream = state
        .http
        .request(parts.method.clone(), &url)
        .headers(forwarded_headers(&parts.headers))
        .body(body)
        .send()
        .await;

    let upstream = match upstream {
        Ok(resp) => resp,
        Err(e) => {
            tracing::error!(error = %e, method = %parts.method, %url, "backend unreachable");
            return (StatusCode::BAD_GATEWAY, "backend unavailable").into_response();
        }
    };

    let status = upstream.status();
    let headers = forwarded_headers(upstream.headers());
    let bytes = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(error = %e, %url, "backend response truncated");
            return (StatusCode::BAD_GATEWAY, "backend response failed").into_response();
        }
    };

    tracing::debug!(method = %parts.method, %url, status = status.as_u16(), "proxied");
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}
