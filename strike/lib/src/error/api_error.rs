//! Failure responses that carried a body.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

/// The API answered with a non-success status and a body.
///
/// The body is kept whole because its shape is not fixed by the API: any
/// field the API put into it (`code`, `message`, `traceId`, ...) can be read
/// back with [`get`](Self::get). Bodies that are not JSON are kept as a JSON
/// string.
///
/// ## Examples
///
/// ```rust
/// use strike_lib::error::ApiError;
///
/// let err = ApiError::new(
///     404,
///     Some("Not Found".to_string()),
///     serde_json::json!({"code": "NOT_FOUND", "message": "invoice not found"}),
/// );
/// assert_eq!(err.code(), Some("NOT_FOUND"));
/// assert_eq!(err.get("message").and_then(|v| v.as_str()), Some("invoice not found"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ApiError {
    status: u16,
    status_text: Option<String>,
    body: Value,
}

impl ApiError {
    pub fn new(status: u16, status_text: Option<String>, body: Value) -> Self {
        Self {
            status,
            status_text,
            body,
        }
    }

    /// Builds the error from a raw response body.
    ///
    /// JSON bodies are parsed; anything else is kept as a string value.
    pub fn from_raw_body(status: u16, status_text: Option<String>, raw: &[u8]) -> Self {
        let body = serde_json::from_slice(raw)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(raw).into_owned()));
        Self::new(status, status_text, body)
    }

    /// HTTP status code of the failure response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Canonical reason phrase for the status, if one exists.
    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    /// The complete error body.
    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// A top-level field of the error body.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.body.as_object().and_then(|map| map.get(field))
    }

    /// The `code` field, looked up at the top level and then under `data`.
    pub fn code(&self) -> Option<&str> {
        self.lookup_str("code")
    }

    /// The `message` field, looked up at the top level and then under `data`.
    pub fn message(&self) -> Option<&str> {
        self.lookup_str("message")
    }

    fn lookup_str(&self, field: &str) -> Option<&str> {
        self.get(field)
            .or_else(|| self.get("data").and_then(|data| data.get(field)))
            .and_then(Value::as_str)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(text) = &self.status_text {
            write!(f, " {text}")?;
        }
        write!(f, ": {}", self.body)
    }
}
