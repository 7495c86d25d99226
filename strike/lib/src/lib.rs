//! Typed async client for the Strike payments API.
//!
//! The `strike_lib` crate builds authenticated requests against
//! `https://api.strike.me/<version>`, serializes request bodies, parses
//! responses into typed records, and reports every failure through one
//! error type.
//!
//! ## Features
//!
//! - **One method per operation**: rates, public profiles, invoices, quotes,
//!   events and webhook subscriptions
//! - **Typed records**: amounts stay decimal strings, event payloads stay
//!   opaque JSON
//! - **Uniform errors**: every failed call is a [`StrikeError`] whose message
//!   is `Request Failed`, carrying either the API's error body or the bare
//!   status
//! - **Tracing**: each request runs in a `strike_request` span
//!
//! ## Example
//!
//! ```rust,ignore
//! use strike_lib::{Amount, Currency, NewInvoiceRequest, StrikeClient};
//!
//! let client = StrikeClient::new("sk-xxx")?;
//!
//! let invoice = client
//!     .new_invoice(
//!         NewInvoiceRequest::new(Amount::new(Currency::Usd, "15.00"))
//!             .with_description("Invoice for order 123"),
//!     )
//!     .await?;
//!
//! match client.new_quote(&invoice.invoice_id).await {
//!     Ok(quote) => println!("{}", quote.ln_invoice),
//!     Err(err) => eprintln!("{err}: {:?}", err.body()),
//! }
//! ```

pub mod client;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod request;
pub mod response;
pub mod types;

pub use client::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, StrikeClient, StrikeClientBuilder};
pub use endpoint::StrikeEndpoint;
pub use error::{ApiError, ConfigError, DecodeError, REQUEST_FAILED, StrikeError, TransportError};
pub use method::RestMethod;
pub use request::{RequestParts, StrikeRequest};
pub use response::ResponseFormat;
pub use types::{
    Amount, ConversionRate, CreateSubscriptionRequest, Currency, CurrencyAvailability, Event,
    EventType, InvoiceState, Invoice, ListResponse, NewInvoiceRequest, PublicProfile, Quote, Rate,
    UpdateSubscriptionRequest, WebhookSubscription, WebhookVersion,
};
