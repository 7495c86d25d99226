//! Request execution with tracing instrumentation.
//!
//! This module provides the [`StrikeClient`] struct, its builder, and the
//! single call boundary ([`StrikeClient::execute`]) through which every
//! operation is sent and every failure is normalized.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use tracing::{Span, debug, instrument, warn};
use url::Url;

use crate::error::{ApiError, ConfigError, DecodeError, StrikeError, TransportError};
use crate::request::StrikeRequest;
use crate::response::ResponseFormat;

/// Production host of the Strike API.
pub const DEFAULT_BASE_URL: &str = "https://api.strike.me";

/// API version used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v1";

/// Builder for configuring a [`StrikeClient`].
pub struct StrikeClientBuilder {
    api_key: String,
    base_url: String,
    api_version: String,
    timeout: Option<Duration>,
    default_headers: HeaderMap,
}

impl fmt::Debug for StrikeClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StrikeClientBuilder")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StrikeClientBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: None,
            default_headers: HeaderMap::new(),
        }
    }

    /// Selects the API version appended to the host (default `v1`).
    ///
    /// ## Examples
    ///
    /// ```rust
    /// use strike_lib::StrikeClient;
    ///
    /// let client = StrikeClient::builder("secret").api_version("v2").build()?;
    /// assert_eq!(client.base_url().as_str(), "https://api.strike.me/v2");
    /// # Ok::<(), strike_lib::StrikeError>(())
    /// ```
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Overrides the host, e.g. for a sandbox or a local mock server.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets a total request timeout. No timeout is applied by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request.
    ///
    /// `Authorization` and `Content-Type` are always set by the client and
    /// cannot be overridden here.
    ///
    /// ## Errors
    ///
    /// Returns an error if the header name or value is invalid.
    pub fn default_header(
        mut self,
        name: impl AsRef<str>,
        value: impl AsRef<str>,
    ) -> Result<Self, StrikeError> {
        let invalid = |reason: String| ConfigError::InvalidHeader {
            name: name.as_ref().to_string(),
            reason,
        };
        let header_name =
            HeaderName::try_from(name.as_ref()).map_err(|e| invalid(e.to_string()))?;
        let header_value =
            HeaderValue::try_from(value.as_ref()).map_err(|e| invalid(e.to_string()))?;
        self.default_headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Builds the [`StrikeClient`].
    ///
    /// ## Errors
    ///
    /// Returns [`StrikeError::Config`] if the host cannot be parsed, the
    /// version is empty or contains `/`, the API key cannot be sent as a
    /// header, or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<StrikeClient, StrikeError> {
        let version = self.api_version.trim();
        if version.is_empty() || version.contains('/') {
            return Err(ConfigError::InvalidApiVersion(self.api_version.clone()).into());
        }

        let mut base_url =
            Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                source,
            })?;
        base_url
            .path_segments_mut()
            .map_err(|_| ConfigError::CannotBeABase(self.base_url.clone()))?
            .pop_if_empty()
            .push(version);

        let mut headers = self.default_headers;
        let mut auth = HeaderValue::try_from(format!("Bearer {}", self.api_key))
            .map_err(|_| ConfigError::InvalidApiKey)?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut client = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            client = client.timeout(timeout);
        }
        let client = client.build().map_err(ConfigError::HttpClient)?;

        Ok(StrikeClient {
            client,
            base_url,
            api_version: version.to_string(),
        })
    }
}

/// Async client for the Strike API.
///
/// The configuration is fixed at construction; the client can be cloned
/// cheaply and shared between concurrent calls.
///
/// ## Examples
///
/// ```rust,ignore
/// use strike_lib::StrikeClient;
///
/// let client = StrikeClient::new(std::env::var("STRIKE_API_KEY")?)?;
/// for rate in client.get_rates().await? {
///     println!("{} -> {}: {}", rate.source_currency, rate.target_currency, rate.amount);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StrikeClient {
    client: reqwest::Client,
    base_url: Url,
    api_version: String,
}

impl StrikeClient {
    /// Creates a new builder for configuring a client.
    pub fn builder(api_key: impl Into<String>) -> StrikeClientBuilder {
        StrikeClientBuilder::new(api_key)
    }

    /// Creates a client for the production host and API version `v1`.
    ///
    /// ## Errors
    ///
    /// Returns an error if the API key cannot be sent as a header value or
    /// the HTTP client cannot be constructed.
    pub fn new(api_key: impl Into<String>) -> Result<Self, StrikeError> {
        Self::builder(api_key).build()
    }

    /// The versioned base URL, e.g. `https://api.strike.me/v1`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Executes a request and parses the success body with `F`.
    ///
    /// This is the only place requests are sent. Whatever the operation,
    /// a failure comes back as [`StrikeError`]:
    /// - an error response with a body becomes [`StrikeError::Api`] holding
    ///   the whole body
    /// - an error response without a body becomes [`StrikeError::Transport`]
    ///   with `status` and `status_text`
    /// - no response at all becomes [`StrikeError::Transport`] with neither
    /// - a success body of the wrong shape becomes [`StrikeError::Decode`]
    ///
    /// ## Errors
    ///
    /// See above. Nothing is retried.
    #[instrument(
        name = "strike_request",
        skip(self, request),
        fields(
            strike.operation = tracing::field::Empty,
            http.method = tracing::field::Empty,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
            otel.status_code = tracing::field::Empty,
        )
    )]
    pub async fn execute<F>(
        &self,
        request: impl Into<StrikeRequest>,
    ) -> Result<F::Output, StrikeError>
    where
        F: ResponseFormat,
    {
        let parts = request.into().into_parts()?;
        let method = parts.endpoint.method();
        let url = self.endpoint_url(&parts.segments);

        let span = Span::current();
        span.record("strike.operation", parts.endpoint.to_string().as_str());
        span.record("http.method", method.to_string().as_str());
        span.record("http.url", url.as_str());

        let mut request = self.client.request(method.to_reqwest(), url);
        if let Some(body) = &parts.body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(err) => {
                span.record("otel.status_code", "ERROR");
                warn!(error = %err, "no response received");
                return Err(TransportError::from_reqwest(err).into());
            }
        };

        let status = response.status();
        span.record("http.status_code", status.as_u16());

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(err) => {
                span.record("otel.status_code", "ERROR");
                warn!(error = %err, "failed to read response body");
                let err = TransportError::interrupted(status.as_u16(), status_text(status), err);
                return Err(err.into());
            }
        };

        if !status.is_success() {
            let otel_status = if status.is_server_error() {
                "ERROR"
            } else {
                "UNSET"
            };
            span.record("otel.status_code", otel_status);
            warn!(status = status.as_u16(), "request failed");
            return Err(normalize_failure(status, &body));
        }

        span.record("otel.status_code", "OK");
        debug!(bytes = body.len(), "request succeeded");

        F::parse(body)
            .await
            .map_err(|e| DecodeError::new(status.as_u16(), e).into())
    }

    /// Appends path segments to the versioned base URL, percent-encoding each.
    fn endpoint_url(&self, segments: &[String]) -> Url {
        let mut url = self.base_url.clone();
        // The base URL was checked to accept path segments when built.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

/// Turns a non-success response into the error raised to the caller.
///
/// A response with a body keeps that body whole; an empty or `null` one
/// only reports its status.
pub(crate) fn normalize_failure(status: StatusCode, body: &[u8]) -> StrikeError {
    let code = status.as_u16();
    let absent = body.iter().all(u8::is_ascii_whitespace)
        || matches!(
            serde_json::from_slice::<serde_json::Value>(body),
            Ok(serde_json::Value::Null)
        );
    if absent {
        TransportError::from_status(code, status_text(status)).into()
    } else {
        ApiError::from_raw_body(code, status_text(status), body).into()
    }
}

fn status_text(status: StatusCode) -> Option<String> {
    status.canonical_reason().map(str::to_string)
}
