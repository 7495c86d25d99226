//! Top-level error type.

use serde_json::Value;
use thiserror::Error;

use super::{ApiError, ConfigError, DecodeError, TransportError};

/// Message carried by every failed API call.
pub const REQUEST_FAILED: &str = "Request Failed";

/// Top-level error type for all Strike client operations.
///
/// Every variant produced by an API call displays as `Request Failed`, so
/// callers see one error contract regardless of the operation. The variant
/// and the `source()` chain carry the details.
///
/// ## Examples
///
/// ```rust,ignore
/// use strike_lib::StrikeError;
///
/// match client.find_invoice_by_id("inv_1").await {
///     Ok(invoice) => println!("{:?}", invoice.state),
///     Err(StrikeError::Api(err)) => eprintln!("{}: {:?}", err.status(), err.code()),
///     Err(StrikeError::Transport(err)) => eprintln!("transport: {err}"),
///     Err(other) => eprintln!("{other}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum StrikeError {
    /// The API answered with an error body.
    #[error("Request Failed")]
    Api(#[from] ApiError),

    /// No error body was available, or no response was received.
    #[error("Request Failed")]
    Transport(#[from] TransportError),

    /// A success response did not match the expected type.
    #[error("Request Failed")]
    Decode(#[from] DecodeError),

    /// The request body could not be serialized.
    #[error("Request Failed")]
    Encode(#[source] serde_json::Error),

    /// A path value cannot be sent as a single URL segment (empty, `.` or
    /// `..`). Nothing was sent.
    #[error("Request Failed")]
    InvalidPathValue { param: &'static str, value: String },

    /// The client configuration is invalid.
    #[error("invalid client configuration: {0}")]
    Config(#[from] ConfigError),
}

impl StrikeError {
    /// Returns `true` for errors produced by an API call rather than by
    /// client construction.
    pub fn is_request_failure(&self) -> bool {
        !matches!(self, Self::Config(_))
    }

    /// HTTP status code, when a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.status()),
            Self::Transport(err) => err.status(),
            Self::Decode(err) => Some(err.status()),
            Self::Encode(_) | Self::InvalidPathValue { .. } | Self::Config(_) => None,
        }
    }

    /// Canonical reason phrase of the status, when known.
    pub fn status_text(&self) -> Option<&str> {
        match self {
            Self::Api(err) => err.status_text(),
            Self::Transport(err) => err.status_text(),
            _ => None,
        }
    }

    /// The error body returned by the API, if any.
    pub fn body(&self) -> Option<&Value> {
        match self {
            Self::Api(err) => Some(err.body()),
            _ => None,
        }
    }

    /// A top-level field of the API error body.
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Api(err) => err.get(name),
            _ => None,
        }
    }

    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(err) => Some(err),
            _ => None,
        }
    }
}
