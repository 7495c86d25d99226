//! Layered error types for the Strike client.
//!
//! Every failed call surfaces as a [`StrikeError`] whose message is always
//! `Request Failed`. What went wrong is carried by the variant:
//! - [`ApiError`] - the API answered with an error body
//! - [`TransportError`] - no body was available (bare status, or no response)
//! - [`DecodeError`] - a success body did not match the expected shape
//! - [`ConfigError`] - the client could not be constructed

mod api_error;
mod config_error;
mod decode_error;
mod strike_error;
mod transport_error;

pub use api_error::ApiError;
pub use config_error::ConfigError;
pub use decode_error::DecodeError;
pub use strike_error::{REQUEST_FAILED, StrikeError};
pub use transport_error::TransportError;
