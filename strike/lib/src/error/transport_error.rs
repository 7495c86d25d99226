//! Failures without a usable response body.

use std::fmt;

use thiserror::Error;

/// A failure with no response body to report.
///
/// Either the API answered with an empty error body, in which case `status`
/// and `status_text` are set, or no response was received at all (DNS,
/// connection, timeout), in which case both are `None` and the underlying
/// transport error is available through `source()`.
#[derive(Debug, Error)]
pub struct TransportError {
    status: Option<u16>,
    status_text: Option<String>,
    #[source]
    source: Option<reqwest::Error>,
}

impl TransportError {
    /// An error response without a body.
    pub fn from_status(status: u16, status_text: Option<String>) -> Self {
        Self {
            status: Some(status),
            status_text,
            source: None,
        }
    }

    /// A request that failed before or while receiving a response.
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        let status = err.status();
        Self {
            status: status.map(|s| s.as_u16()),
            status_text: status
                .and_then(|s| s.canonical_reason())
                .map(str::to_string),
            source: Some(err),
        }
    }

    /// A response whose body could not be read to the end.
    pub fn interrupted(status: u16, status_text: Option<String>, err: reqwest::Error) -> Self {
        Self {
            status: Some(status),
            status_text,
            source: Some(err),
        }
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status_text.as_deref()
    }

    /// Returns `true` if no HTTP response was received.
    pub fn is_no_response(&self) -> bool {
        self.status.is_none()
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        self.source.as_ref().is_some_and(reqwest::Error::is_timeout)
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, self.status_text.as_deref()) {
            (Some(status), Some(text)) => write!(f, "HTTP {status} {text}"),
            (Some(status), None) => write!(f, "HTTP {status}"),
            (None, _) => f.write_str("no response received"),
        }
    }
}
