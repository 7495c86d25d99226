//! Success responses with an unexpected body.

use thiserror::Error;

/// A success response whose body did not match the expected type.
#[derive(Debug, Error)]
#[error("HTTP {status}: unexpected response body: {source}")]
pub struct DecodeError {
    status: u16,
    #[source]
    source: serde_json::Error,
}

impl DecodeError {
    pub fn new(status: u16, source: serde_json::Error) -> Self {
        Self { status, source }
    }

    pub fn status(&self) -> u16 {
        self.status
    }
}
