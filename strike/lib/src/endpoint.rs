//! Catalog of the Strike API endpoints.
//!
//! Every remote operation has exactly one [`StrikeEndpoint`] entry that knows
//! its HTTP method and path template. Path templates use `{param}`
//! placeholders which are substituted segment by segment, so that each value
//! always lands in a single path segment once the URL is built.

use strum::{Display, EnumIter, EnumString};

use crate::method::RestMethod;

/// One remote operation of the Strike API.
///
/// The `Display`/`FromStr` form is the snake_case operation name, which is
/// also what the client records on its tracing span.
///
/// ## Examples
///
/// ```rust
/// use strike_lib::{RestMethod, StrikeEndpoint};
///
/// let endpoint = StrikeEndpoint::CancelInvoice;
/// assert_eq!(endpoint.method(), RestMethod::Patch);
/// assert_eq!(endpoint.path_template(), "/invoices/{id}/cancel");
/// assert_eq!(endpoint.render_path(&[("id", "inv_1")]), "/invoices/inv_1/cancel");
/// assert_eq!(endpoint.to_string(), "cancel_invoice");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum StrikeEndpoint {
    GetRates,
    FetchPublicProfileById,
    FetchPublicProfileByHandle,
    GetEvents,
    FindEventById,
    GetInvoices,
    NewInvoice,
    FindInvoiceById,
    NewInvoiceForReceiver,
    NewQuote,
    CancelInvoice,
    GetSubscriptions,
    CreateSubscription,
    GetSubscriptionById,
    UpdateSubscription,
    DeleteSubscription,
}

impl StrikeEndpoint {
    /// HTTP method used by this endpoint.
    pub fn method(self) -> RestMethod {
        match self {
            Self::GetRates
            | Self::FetchPublicProfileById
            | Self::FetchPublicProfileByHandle
            | Self::GetEvents
            | Self::FindEventById
            | Self::GetInvoices
            | Self::FindInvoiceById
            | Self::GetSubscriptions
            | Self::GetSubscriptionById => RestMethod::Get,
            Self::NewInvoice
            | Self::NewInvoiceForReceiver
            | Self::NewQuote
            | Self::CreateSubscription => RestMethod::Post,
            Self::CancelInvoice | Self::UpdateSubscription => RestMethod::Patch,
            Self::DeleteSubscription => RestMethod::Delete,
        }
    }

    /// Path template relative to the versioned base URL.
    pub fn path_template(self) -> &'static str {
        match self {
            Self::GetRates => "/rates/ticker",
            Self::FetchPublicProfileById => "/accounts/{id}/profile",
            Self::FetchPublicProfileByHandle => "/accounts/handle/{handle}/profile",
            Self::GetEvents => "/events",
            Self::FindEventById => "/events/{id}",
            Self::GetInvoices | Self::NewInvoice => "/invoices",
            Self::FindInvoiceById => "/invoices/{id}",
            Self::NewInvoiceForReceiver => "/invoices/handle/{handle}",
            Self::NewQuote => "/invoices/{id}/quote",
            Self::CancelInvoice => "/invoices/{id}/cancel",
            Self::GetSubscriptions | Self::CreateSubscription => "/subscriptions",
            Self::GetSubscriptionById | Self::UpdateSubscription | Self::DeleteSubscription => {
                "/subscriptions/{id}"
            }
        }
    }

    /// Placeholder names in the path template, in order of appearance.
    pub fn path_params(self) -> Vec<&'static str> {
        self.path_template()
            .split('/')
            .filter_map(placeholder_name)
            .collect()
    }

    /// Substitutes path parameters and returns the path segments.
    ///
    /// Values are returned verbatim; percent-encoding happens when the
    /// segments are pushed onto a URL. A placeholder with no matching
    /// parameter is left as-is.
    pub fn render_segments(self, params: &[(&str, &str)]) -> Vec<String> {
        self.path_template()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| match placeholder_name(segment) {
                Some(name) => params
                    .iter()
                    .find(|(key, _)| *key == name)
                    .map(|(_, value)| (*value).to_string())
                    .unwrap_or_else(|| segment.to_string()),
                None => segment.to_string(),
            })
            .collect()
    }

    /// Substitutes path parameters and returns the joined, unencoded path.
    pub fn render_path(self, params: &[(&str, &str)]) -> String {
        format!("/{}", self.render_segments(params).join("/"))
    }
}

fn placeholder_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}
