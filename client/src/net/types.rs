//! Wire DTOs for the storefront REST API.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON bodies. Numeric fields are decoded
//! leniently because decimal columns may serialize either as JSON numbers or
//! as decimal strings depending on the backend's encoder.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Role marker that unlocks the admin page.
pub const ADMIN_ROLE: &str = "admin";

/// The authenticated user as returned by `/auth/me` and `/auth/register`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier (UUID string).
    pub id: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_verified: bool,
    /// `true` when the account was created through Google sign-in.
    #[serde(default)]
    pub is_google_user: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    /// Authorization role (e.g. `"admin"`, `"customer"`), if the backend sends one.
    #[serde(default)]
    pub role: Option<String>,
}

impl User {
    /// Name shown in page chrome: full name when set, otherwise username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => &self.username,
        }
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

/// Bearer token issued by `/auth/login` and `/auth/google`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Body of `POST /auth/google`: the identity credential issued by Google.
#[derive(Debug, Serialize)]
pub struct GoogleTokenRequest<'a> {
    pub token: &'a str,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}

// =============================================================================
// CATALOG RECORDS
// =============================================================================

/// Physical dimensions in centimetres. Every key is always serialized, with
/// `null` for sub-values that were not provided.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub length: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub width: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub height: Option<f64>,
}

/// A catalog product as listed by `/products/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "deserialize_f64_lenient")]
    pub price: f64,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_i64_or_zero")]
    pub stock_quantity: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub part_number: Option<String>,
    /// Open-ended vehicle/model compatibility map.
    #[serde(default)]
    pub compatibility: Option<BTreeMap<String, serde_json::Value>>,
    #[serde(default, deserialize_with = "deserialize_opt_f64_lenient")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
    #[serde(default)]
    pub warranty: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub image_urls: Vec<String>,
}

/// A catalog category as listed by `/categories/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Normalized product body sent on create and update.
///
/// `None` serializes as `null` so the backend can tell "not provided" from zero.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub discount_price: Option<f64>,
    pub category_id: Option<String>,
    pub stock_quantity: i64,
    pub is_active: bool,
    pub is_featured: bool,
    pub sku: String,
    pub brand: String,
    pub part_number: String,
    pub compatibility: Option<BTreeMap<String, serde_json::Value>>,
    pub weight: Option<f64>,
    pub dimensions: Option<Dimensions>,
    pub warranty: String,
    pub image_urls: Vec<String>,
}

/// Normalized category body sent on create and update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn deserialize_null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_i64_or_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(0),
        serde_json::Value::Number(number) => number
            .as_i64()
            .ok_or_else(|| D::Error::custom(format!("expected whole number, got {number}"))),
        serde_json::Value::String(raw) if raw.trim().is_empty() => Ok(0),
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected whole number string, got {raw:?}"))),
        other => Err(D::Error::custom(format!("expected whole number, got {other}"))),
    }
}

fn deserialize_f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserialize_opt_f64_lenient(deserializer)?.ok_or_else(|| D::Error::custom("expected number, got null"))
}

fn deserialize_opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Number(number) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| D::Error::custom("number out of range for f64")),
        serde_json::Value::String(raw) if raw.trim().is_empty() => Ok(None),
        serde_json::Value::String(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected decimal string, got {raw:?}"))),
        _ => Err(D::Error::custom("expected number or decimal string")),
    }
}
