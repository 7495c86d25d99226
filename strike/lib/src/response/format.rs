//! Response format trait and implementations.

use std::future::Future;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

/// Strategy for parsing a success response body.
///
/// ## Examples
///
/// ```rust,ignore
/// use strike_lib::response::{JsonFormat, ResponseFormat};
/// use strike_lib::Invoice;
///
/// let invoice = JsonFormat::<Invoice>::parse(body).await?;
/// ```
pub trait ResponseFormat: Send + Sync {
    /// The output type after parsing.
    type Output: Send;

    /// Parse a response body into the output type.
    fn parse(
        body: bytes::Bytes,
    ) -> impl Future<Output = Result<Self::Output, serde_json::Error>> + Send;
}

/// Typed JSON body.
#[derive(Debug, Clone, Copy)]
pub struct JsonFormat<T>(PhantomData<T>);

impl<T: DeserializeOwned + Send + Sync> ResponseFormat for JsonFormat<T> {
    type Output = T;

    async fn parse(body: bytes::Bytes) -> Result<Self::Output, serde_json::Error> {
        serde_json::from_slice(&body)
    }
}

/// Discards the body. Used by operations that return nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyFormat;

impl ResponseFormat for EmptyFormat {
    type Output = ();

    async fn parse(_body: bytes::Bytes) -> Result<Self::Output, serde_json::Error> {
        Ok(())
    }
}
