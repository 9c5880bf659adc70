use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{any, get};

use super::*;
use crate::config::HostConfig;

// =============================================================================
// pure helpers
// =============================================================================

#[test]
fn upstream_url_keeps_path_and_query() {
    let uri: Uri = "/api/products/?limit=100".parse().unwrap();
    assert_eq!(upstream_url("http://backend:8000", &uri), "http://backend:8000/api/products/?limit=100");
}

#[test]
fn upstream_url_without_query() {
    let uri: Uri = "/api/categories/c1".parse().unwrap();
    assert_eq!(upstream_url("http://backend:8000", &uri), "http://backend:8000/api/categories/c1");
}

#[test]
fn hop_by_hop_headers_are_recognized() {
    assert!(is_hop_by_hop(&header::CONNECTION));
    assert!(is_hop_by_hop(&header::TRANSFER_ENCODING));
    assert!(!is_hop_by_hop(&header::AUTHORIZATION));
    assert!(!is_hop_by_hop(&header::CONTENT_TYPE));
}

#[test]
fn forwarded_headers_drop_host_length_and_hop_by_hop() {
    let mut headers = HeaderMap::new();
    headers.insert(header::HOST, HeaderValue::from_static("localhost:3000"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from_static("12"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer t"));
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let out = forwarded_headers(&headers);

    assert_eq!(out.len(), 2);
    assert_eq!(out[header::AUTHORIZATION], "Bearer t");
    assert_eq!(out[header::CONTENT_TYPE], "application/json");
}

// =============================================================================
// forward: live loopback servers
// =============================================================================

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

async fn echo(method: Method, headers: HeaderMap, uri: Uri, body: String) -> (StatusCode, String) {
    let auth = headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()).unwrap_or("-").to_string();
    (StatusCode::CREATED, format!("{method} {uri} {auth} {body}"))
}

fn proxy_app(backend_url: &str) -> Router {
    let config = HostConfig {
        port: 0,
        backend_url: backend_url.to_string(),
        proxy_timeout: std::time::Duration::from_secs(5),
    };
    Router::new().route("/api/{*path}", any(forward)).with_state(AppState::new(&config).unwrap())
}

#[tokio::test]
async fn forward_replays_method_query_headers_and_body() {
    let backend = serve(Router::new().route("/api/{*path}", any(echo))).await;
    let host = serve(proxy_app(&backend)).await;

    let resp = reqwest::Client::new()
        .put(format!("{host}/api/products/p1?x=1"))
        .bearer_auth("tok")
        .body("{\"name\":\"Pad\"}")
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.text().await.unwrap(), "PUT /api/products/p1?x=1 Bearer tok {\"name\":\"Pad\"}");
}

#[tokio::test]
async fn forward_passes_backend_errors_through() {
    let backend = serve(Router::new().route(
        "/api/auth/login",
        get(|| async { (StatusCode::UNAUTHORIZED, "{\"detail\":\"Invalid credentials\"}") }),
    ))
    .await;
    let host = serve(proxy_app(&backend)).await;

    let resp = reqwest::get(format!("{host}/api/auth/login")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(resp.text().await.unwrap(), "{\"detail\":\"Invalid credentials\"}");
}

#[tokio::test]
async fn forward_unreachable_backend_is_bad_gateway() {
    let closed = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let backend = format!("http://{}", closed.local_addr().unwrap());
    drop(closed);
    let host = serve(proxy_app(&backend)).await;

    let resp = reqwest::get(format!("{host}/api/categories/")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}
