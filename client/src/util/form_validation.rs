//! Field parsing and validation shared by the entity forms.
//!
//! Drafts keep every field as the text the user typed; these helpers turn
//! that text into typed values and collect per-field errors before submit.

#[cfg(test)]
#[path = "form_validation_test.rs"]
mod form_validation_test;

/// A validation failure attached to one form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

/// Message for `field` in `errors`, if any.
#[must_use]
pub fn error_for<'a>(errors: &'a [FieldError], field: &str) -> Option<&'a str> {
    errors.iter().find(|e| e.field == field).map(|e| e.message.as_str())
}

/// Parse a finite decimal number. Blank input is `None`.
#[must_use]
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an integer. Blank input is `None`.
#[must_use]
pub fn parse_integer(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<i64>().ok()
}

/// `None` for blank text, the trimmed text otherwise.
#[must_use]
pub fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
}

/// Require non-blank text.
pub fn require_text(errors: &mut Vec<FieldError>, field: &'static str, label: &str, raw: &str) {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    }
}

/// Require a finite number.
pub fn require_decimal(errors: &mut Vec<FieldError>, field: &'static str, label: &str, raw: &str) {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    } else if parse_decimal(raw).is_none() {
        errors.push(FieldError::new(field, format!("{label} must be a number")));
    }
}

/// Require a whole number.
pub fn require_integer(errors: &mut Vec<FieldError>, field: &'static str, label: &str, raw: &str) {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(field, format!("{label} is required")));
    } else if parse_integer(raw).is_none() {
        errors.push(FieldError::new(field, format!("{label} must be a whole number")));
    }
}

/// Accept blank text or a finite number.
pub fn optional_decimal(errors: &mut Vec<FieldError>, field: &'static str, label: &str, raw: &str) {
    if !raw.trim().is_empty() && parse_decimal(raw).is_none() {
        errors.push(FieldError::new(field, format!("{label} must be a number")));
    }
}
