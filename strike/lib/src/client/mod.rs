//! HTTP client module.
//!
//! [`StrikeClient`] holds the fixed configuration (versioned base URL,
//! bearer token, JSON content type) and exposes one async method per remote
//! operation. All of them go through [`StrikeClient::execute`].
//!
//! ## Examples
//!
//! ```rust,ignore
//! use strike_lib::{Amount, Currency, NewInvoiceRequest, StrikeClient};
//!
//! let client = StrikeClient::builder("sk-xxx").api_version("v1").build()?;
//!
//! let invoice = client
//!     .new_invoice(NewInvoiceRequest::new(Amount::new(Currency::Usd, "5.00")))
//!     .await?;
//! let quote = client.new_quote(&invoice.invoice_id).await?;
//! println!("pay {}", quote.ln_invoice);
//! ```

mod executor;
mod operations;

pub use executor::{DEFAULT_API_VERSION, DEFAULT_BASE_URL, StrikeClient, StrikeClientBuilder};
