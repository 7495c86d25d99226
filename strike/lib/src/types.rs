//! Request and response records of the Strike API.
//!
//! These types mirror the remote JSON field for field. Monetary amounts are
//! kept as decimal strings and are never converted to floating point.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Declares a string-valued enum that keeps values it does not list.
///
/// The remote API may add currencies, states or event types at any time;
/// an unlisted value decodes into `Other` with its wire form intact and
/// serializes back unchanged.
macro_rules! open_string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$variant_meta])* $variant, )+
            /// Any value not listed above, kept verbatim.
            Other(String),
        }

        impl $name {
            /// The wire form of the value.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $wire, )+
                    Self::Other(other) => other,
                }
            }

            /// Returns `true` if the value is not one this crate lists.
            pub fn is_other(&self) -> bool {
                matches!(self, Self::Other(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $wire => Self::$variant, )+
                    _ => Self::Other(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Other(other) => other,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

open_string_enum! {
    /// Currency of an amount or rate.
    pub enum Currency {
        Btc => "BTC",
        Usd => "USD",
        Eur => "EUR",
        Usdt => "USDT",
        Gbp => "GBP",
    }
}

/// Parses a listed currency, ignoring case.
///
/// Unlike decoding, parsing rejects unlisted values; it is meant for input
/// typed by a user.
impl FromStr for Currency {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from(s.to_ascii_uppercase()) {
            Self::Other(_) => Err(strum::ParseError::VariantNotFound),
            known => Ok(known),
        }
    }
}

open_string_enum! {
    /// Lifecycle state of an invoice. Transitions happen server-side only.
    pub enum InvoiceState {
        Unpaid => "UNPAID",
        Paid => "PAID",
        Cancelled => "CANCELLED",
        Pending => "PENDING",
    }
}

open_string_enum! {
    /// Type of an event delivered to webhooks or listed under `/events`.
    pub enum EventType {
        /// `invoice.created`
        InvoiceCreated => "invoice.created",
        /// `invoice.updated`
        InvoiceUpdated => "invoice.updated",
    }
}

/// Webhook payload version. `v1` is the only version the API defines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum WebhookVersion {
    #[default]
    #[serde(rename = "v1")]
    #[strum(serialize = "v1")]
    V1,
}

/// A monetary amount: a currency plus a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency: Currency,
    /// Decimal string such as `"150.00"`; never parsed by this crate.
    pub amount: String,
}

impl Amount {
    pub fn new(currency: Currency, amount: impl Into<String>) -> Self {
        Self {
            currency,
            amount: amount.into(),
        }
    }
}

/// Exchange rate between two currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rate {
    pub amount: String,
    pub source_currency: Currency,
    pub target_currency: Currency,
}

/// The rate locked in by a [`Quote`]. Same shape as [`Rate`].
pub type ConversionRate = Rate;

/// Per-currency receive capability of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyAvailability {
    pub currency: Currency,
    pub is_default_currency: bool,
    pub is_available: bool,
    pub is_invoiceable: bool,
}

/// Public profile of a Strike account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub handle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub can_receive: bool,
    #[serde(default)]
    pub currencies: Vec<CurrencyAvailability>,
}

/// An invoice: a request for payment of a given amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub invoice_id: String,
    pub amount: Amount,
    pub state: InvoiceState,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub issuer_id: String,
    pub receiver_id: String,
}

/// A time-bounded conversion offer generated against an invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// BOLT11 Lightning invoice settling the quote.
    pub ln_invoice: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub onchain_address: Option<String>,
    pub expiration: DateTime<Utc>,
    pub expiration_in_sec: u64,
    pub target_amount: Amount,
    pub source_amount: Amount,
    pub conversion_rate: ConversionRate,
}

impl Quote {
    /// Returns `true` once `now` has reached the quote's expiration.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expiration
    }
}

/// A recorded state change, e.g. an invoice being created or updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub event_type: EventType,
    pub webhook_version: WebhookVersion,
    /// Payload whose shape depends on `event_type`; not interpreted here.
    #[serde(default)]
    pub data: serde_json::Value,
    pub created: DateTime<Utc>,
    pub delivery_success: bool,
}

/// A registered webhook callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookSubscription {
    pub id: String,
    pub webhook_url: String,
    pub webhook_version: WebhookVersion,
    pub enabled: bool,
    pub created: DateTime<Utc>,
    #[serde(default)]
    pub event_types: Vec<EventType>,
}

/// Collection wrapper used by the list endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub count: u64,
}

impl<T> ListResponse<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> IntoIterator for ListResponse<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Body of `POST /invoices` and `POST /invoices/handle/{handle}`.
///
/// ## Examples
///
/// ```rust
/// use strike_lib::{Amount, Currency, NewInvoiceRequest};
///
/// let request = NewInvoiceRequest::new(Amount::new(Currency::Usd, "1.00"))
///     .with_description("coffee")
///     .with_correlation_id("order-42");
/// assert_eq!(request.description.as_deref(), Some("coffee"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInvoiceRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub amount: Amount,
}

impl NewInvoiceRequest {
    pub fn new(amount: Amount) -> Self {
        Self {
            correlation_id: None,
            description: None,
            amount,
        }
    }

    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Body of `POST /subscriptions`.
///
/// `event_types` is always serialized, even when empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionRequest {
    pub webhook_url: String,
    pub webhook_version: WebhookVersion,
    pub secret: String,
    pub enabled: bool,
    pub event_types: Vec<EventType>,
}

impl CreateSubscriptionRequest {
    /// An enabled `v1` subscription with the given event types.
    pub fn new(
        webhook_url: impl Into<String>,
        secret: impl Into<String>,
        event_types: impl IntoIterator<Item = EventType>,
    ) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            webhook_version: WebhookVersion::V1,
            secret: secret.into(),
            enabled: true,
            event_types: event_types.into_iter().collect(),
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Body of `PATCH /subscriptions/{id}`. Only fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubscriptionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_version: Option<WebhookVersion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_types: Option<Vec<EventType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

impl UpdateSubscriptionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_webhook_url(mut self, webhook_url: impl Into<String>) -> Self {
        self.webhook_url = Some(webhook_url.into());
        self
    }

    pub fn with_webhook_version(mut self, webhook_version: WebhookVersion) -> Self {
        self.webhook_version = Some(webhook_version);
        self
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_event_types(mut self, event_types: impl IntoIterator<Item = EventType>) -> Self {
        self.event_types = Some(event_types.into_iter().collect());
        self
    }

    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }

    /// Returns `true` when no field would be sent.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
