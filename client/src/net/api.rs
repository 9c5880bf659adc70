//! REST API client for the storefront backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call fails with a transport error since these
//! endpoints are only meaningful in the browser.
//!
//! DESIGN
//! ======
//! Callers depend on the [`ShopApi`] and [`Uploader`] traits rather than on
//! `HttpApi` directly, so the auth flow, record manager and upload batching
//! can be exercised against in-memory fakes.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::error::ApiError;
#[cfg(feature = "hydrate")]
use super::types::UploadResponse;
use super::types::{GoogleTokenRequest, LoginRequest, RegisterRequest, TokenResponse, User};
use crate::config::ClientConfig;
use crate::util::token_store::{LocalTokenStore, TokenStore};
use crate::util::upload::UploadFile;

pub const LOGIN_PATH: &str = "/auth/login";
pub const REGISTER_PATH: &str = "/auth/register";
pub const ME_PATH: &str = "/auth/me";
pub const GOOGLE_PATH: &str = "/auth/google";
pub const UPLOAD_PATH: &str = "/upload/";

#[cfg(not(feature = "hydrate"))]
const NOT_IN_BROWSER: &str = "not available on server";

/// Backend operations used by the session and admin workflows.
#[async_trait(?Send)]
pub trait ShopApi {
    /// `POST /auth/login`.
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError>;

    /// `POST /auth/register`, returning the created user.
    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError>;

    /// `GET /auth/me` using `token` as the bearer credential.
    async fn current_user(&self, token: &str) -> Result<User, ApiError>;

    /// `POST /auth/google`, trading a Google identity credential for a session token.
    async fn exchange_google_credential(&self, credential: &str) -> Result<TokenResponse, ApiError>;

    /// Authenticated `GET` of a JSON resource.
    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApiError>;

    /// Authenticated `POST` of a JSON body.
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value, ApiError>;

    /// Authenticated `PUT` of a JSON body.
    async fn put_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value, ApiError>;

    /// Authenticated `DELETE`; the response body is ignored.
    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}

/// Single-file upload endpoint returning the stored file's public URL.
#[async_trait(?Send)]
pub trait Uploader {
    async fn upload(&self, file: &UploadFile) -> Result<String, ApiError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

/// `gloo-net` implementation of [`ShopApi`] and [`Uploader`].
///
/// Record and upload requests attach the stored session token, if any.
#[derive(Clone, Debug)]
pub struct HttpApi {
    base_url: String,
    tokens: LocalTokenStore,
}

impl HttpApi {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_owned(), tokens: LocalTokenStore }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.api_base_url)
    }

    async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&serde_json::Value>,
        bearer: Option<String>,
    ) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::{Method, RequestBuilder};

            let method = match method {
                HttpMethod::Get => Method::GET,
                HttpMethod::Post => Method::POST,
                HttpMethod::Put => Method::PUT,
                HttpMethod::Delete => Method::DELETE,
            };
            let url = endpoint(&self.base_url, path);
            let mut builder = RequestBuilder::new(&url).method(method);
            if let Some(token) = bearer {
                builder = builder.header("Authorization", &bearer_header(&token));
            }
            let request = match body {
                Some(body) => builder.json(body),
                None => builder.build(),
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;

            let resp = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            let text = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(ApiError::rejected(resp.status(), &text));
            }
            Ok(text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, path, body, bearer);
            Err(ApiError::Transport(NOT_IN_BROWSER.to_owned()))
        }
    }
}

#[async_trait(?Send)]
impl ShopApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let body = to_json(&LoginRequest { email, password })?;
        let text = self.request(HttpMethod::Post, LOGIN_PATH, Some(&body), None).await?;
        decode(&text)
    }

    async fn register(&self, request: &RegisterRequest) -> Result<User, ApiError> {
        let body = to_json(request)?;
        let text = self.request(HttpMethod::Post, REGISTER_PATH, Some(&body), None).await?;
        decode(&text)
    }

    async fn current_user(&self, token: &str) -> Result<User, ApiError> {
        let text = self
            .request(HttpMethod::Get, ME_PATH, None, Some(token.to_owned()))
            .await?;
        decode(&text)
    }

    async fn exchange_google_credential(&self, credential: &str) -> Result<TokenResponse, ApiError> {
        let body = to_json(&GoogleTokenRequest { token: credential })?;
        let text = self.request(HttpMethod::Post, GOOGLE_PATH, Some(&body), None).await?;
        decode(&text)
    }

    async fn get_json(&self, path: &str) -> Result<serde_json::Value, ApiError> {
        let text = self.request(HttpMethod::Get, path, None, self.tokens.load()).await?;
        decode(&text)
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value, ApiError> {
        let text = self
            .request(HttpMethod::Post, path, Some(body), self.tokens.load())
            .await?;
        decode_body(&text)
    }

    async fn put_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value, ApiError> {
        let text = self
            .request(HttpMethod::Put, path, Some(body), self.tokens.load())
            .await?;
        decode_body(&text)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(HttpMethod::Delete, path, None, self.tokens.load())
            .await
            .map(|_| ())
    }
}

#[async_trait(?Send)]
impl Uploader for HttpApi {
    async fn upload(&self, file: &UploadFile) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::{Method, RequestBuilder};

            let js_err = |e: wasm_bindgen::JsValue| ApiError::Transport(format!("{e:?}"));
            let form = web_sys::FormData::new().map_err(js_err)?;
            form.append_with_blob_and_filename("file", file.blob(), &file.name)
                .map_err(js_err)?;

            let url = endpoint(&self.base_url, UPLOAD_PATH);
            let mut builder = RequestBuilder::new(&url).method(Method::POST);
            if let Some(token) = self.tokens.load() {
                builder = builder.header("Authorization", &bearer_header(&token));
            }
            let resp = builder
                .body(form)
                .map_err(|e| ApiError::Transport(e.to_string()))?
                .send()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            let text = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            if !resp.ok() {
                return Err(ApiError::rejected(resp.status(), &text));
            }
            decode::<UploadResponse>(&text).map(|body| body.url)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = file;
            Err(ApiError::Transport(NOT_IN_BROWSER.to_owned()))
        }
    }
}

/// Join the configured base URL and an endpoint path.
#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
pub(crate) fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

pub(crate) fn to_json<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a mutation response; an empty body decodes as `null`.
pub(crate) fn decode_body(text: &str) -> Result<serde_json::Value, ApiError> {
    if text.trim().is_empty() { Ok(serde_json::Value::Null) } else { decode(text) }
}

pub(crate) fn decode_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}
