//! Request failure taxonomy shared by every REST call.
//!
//! DESIGN
//! ======
//! Two kinds matter to the UI: the request never completed (`Transport`) or
//! the server answered with a rejection (`Rejected`). Both end up as a toast
//! via [`ApiError::user_message`]; nothing is retried.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Toast text for requests that could not reach the server.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request could not complete (offline, DNS, CORS, aborted).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },
    /// The server answered successfully but the body did not match.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message for a user-facing notification, preferring the server's own
    /// `detail` and falling back to `fallback` otherwise.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(_) => NETWORK_ERROR_MESSAGE.to_owned(),
            Self::Rejected { detail: Some(detail), .. } => detail.clone(),
            Self::Rejected { detail: None, .. } | Self::Decode(_) => fallback.to_owned(),
        }
    }

    /// Build a rejection from a response status and raw body text.
    #[must_use]
    pub fn rejected(status: u16, body: &str) -> Self {
        Self::Rejected { status, detail: detail_from_body(body) }
    }
}

/// Extract the `detail` field of a FastAPI-style error body.
///
/// `detail` is either a plain string or, for request validation failures, a
/// list of `{ "msg": ... }` objects; list messages are joined with `"; "`.
#[must_use]
pub fn detail_from_body(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(serde_json::Value::as_str))
                .collect();
            if messages.is_empty() { None } else { Some(messages.join("; ")) }
        }
        _ => None,
    }
}
