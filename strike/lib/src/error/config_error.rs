//! Client construction errors.

use thiserror::Error;

/// Errors raised while building a [`StrikeClient`](crate::StrikeClient).
///
/// These never come out of an API call; they are only returned by
/// [`StrikeClientBuilder::build`](crate::StrikeClientBuilder::build).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("base URL '{0}' cannot carry a path")]
    CannotBeABase(String),

    /// The API version is empty or contains a `/`.
    #[error("invalid API version '{0}'")]
    InvalidApiVersion(String),

    /// The API key cannot be sent as an HTTP header value.
    #[error("API key contains characters that are not allowed in an HTTP header")]
    InvalidApiKey,

    /// A default header name or value is not valid HTTP.
    #[error("invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// The underlying HTTP client could not be created.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
