//! Request enum covering every Strike operation.
//!
//! A [`StrikeRequest`] carries the path parameters and body of one call and
//! knows which [`StrikeEndpoint`] it targets. The client turns it into
//! [`RequestParts`] right before sending.

use serde_json::Value;

use crate::endpoint::StrikeEndpoint;
use crate::error::StrikeError;
use crate::types::{CreateSubscriptionRequest, NewInvoiceRequest, UpdateSubscriptionRequest};

/// One call to the Strike API.
#[derive(Debug, Clone, PartialEq)]
pub enum StrikeRequest {
    GetRates,
    FetchPublicProfileById { id: String },
    FetchPublicProfileByHandle { handle: String },
    GetEvents,
    FindEventById { id: String },
    GetInvoices,
    NewInvoice(NewInvoiceRequest),
    FindInvoiceById { id: String },
    NewInvoiceForReceiver {
        handle: String,
        request: NewInvoiceRequest,
    },
    NewQuote { invoice_id: String },
    CancelInvoice { invoice_id: String },
    GetSubscriptions,
    CreateSubscription(CreateSubscriptionRequest),
    GetSubscriptionById { id: String },
    UpdateSubscription {
        id: String,
        request: UpdateSubscriptionRequest,
    },
    DeleteSubscription { id: String },
}

/// The components of a prepared HTTP request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParts {
    pub endpoint: StrikeEndpoint,
    /// Path segments relative to the versioned base URL, not yet encoded.
    pub segments: Vec<String>,
    /// JSON body, if the operation sends one.
    pub body: Option<Value>,
}

impl RequestParts {
    /// The unencoded path, for logging and display.
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

impl StrikeRequest {
    /// The catalog entry this request targets.
    pub fn endpoint(&self) -> StrikeEndpoint {
        match self {
            Self::GetRates => StrikeEndpoint::GetRates,
            Self::FetchPublicProfileById { .. } => StrikeEndpoint::FetchPublicProfileById,
            Self::FetchPublicProfileByHandle { .. } => StrikeEndpoint::FetchPublicProfileByHandle,
            Self::GetEvents => StrikeEndpoint::GetEvents,
            Self::FindEventById { .. } => StrikeEndpoint::FindEventById,
            Self::GetInvoices => StrikeEndpoint::GetInvoices,
            Self::NewInvoice(_) => StrikeEndpoint::NewInvoice,
            Self::FindInvoiceById { .. } => StrikeEndpoint::FindInvoiceById,
            Self::NewInvoiceForReceiver { .. } => StrikeEndpoint::NewInvoiceForReceiver,
            Self::NewQuote { .. } => StrikeEndpoint::NewQuote,
            Self::CancelInvoice { .. } => StrikeEndpoint::CancelInvoice,
            Self::GetSubscriptions => StrikeEndpoint::GetSubscriptions,
            Self::CreateSubscription(_) => StrikeEndpoint::CreateSubscription,
            Self::GetSubscriptionById { .. } => StrikeEndpoint::GetSubscriptionById,
            Self::UpdateSubscription { .. } => StrikeEndpoint::UpdateSubscription,
            Self::DeleteSubscription { .. } => StrikeEndpoint::DeleteSubscription,
        }
    }

    fn path_params(&self) -> Vec<(&'static str, &str)> {
        match self {
            Self::FetchPublicProfileById { id }
            | Self::FindEventById { id }
            | Self::FindInvoiceById { id }
            | Self::GetSubscriptionById { id }
            | Self::UpdateSubscription { id, .. }
            | Self::DeleteSubscription { id } => vec![("id", id.as_str())],
            Self::NewQuote { invoice_id } | Self::CancelInvoice { invoice_id } => {
                vec![("id", invoice_id.as_str())]
            }
            Self::FetchPublicProfileByHandle { handle }
            | Self::NewInvoiceForReceiver { handle, .. } => vec![("handle", handle.as_str())],
            Self::GetRates
            | Self::GetEvents
            | Self::GetInvoices
            | Self::NewInvoice(_)
            | Self::GetSubscriptions
            | Self::CreateSubscription(_) => Vec::new(),
        }
    }

    /// Splits the request into endpoint, path segments and JSON body.
    ///
    /// Path values are not validated beyond one rule: each must stay a single
    /// literal segment, so empty values, `.` and `..` are refused. URL
    /// parsing would otherwise fold them into a different endpoint.
    ///
    /// ## Errors
    ///
    /// Returns [`StrikeError::InvalidPathValue`] for such a value and
    /// [`StrikeError::Encode`] if the body cannot be serialized.
    pub fn into_parts(self) -> Result<RequestParts, StrikeError> {
        let endpoint = self.endpoint();
        let params = self.path_params();
        if let Some((param, value)) = params
            .iter()
            .find(|(_, value)| matches!(*value, "" | "." | ".."))
        {
            return Err(StrikeError::InvalidPathValue {
                param: *param,
                value: value.to_string(),
            });
        }
        let segments = endpoint.render_segments(&params);

        let body = if endpoint.method().has_body() {
            match self {
                Self::NewInvoice(request) | Self::NewInvoiceForReceiver { request, .. } => {
                    Some(to_body(&request)?)
                }
                Self::CreateSubscription(request) => Some(to_body(&request)?),
                Self::UpdateSubscription { request, .. } => Some(to_body(&request)?),
                _ => None,
            }
        } else {
            None
        };

        Ok(RequestParts {
            endpoint,
            segments,
            body,
        })
    }
}

fn to_body<T: serde::Serialize>(value: &T) -> Result<Value, StrikeError> {
    serde_json::to_value(value).map_err(StrikeError::Encode)
}

impl From<NewInvoiceRequest> for StrikeRequest {
    fn from(request: NewInvoiceRequest) -> Self {
        Self::NewInvoice(request)
    }
}

impl From<CreateSubscriptionRequest> for StrikeRequest {
    fn from(request: CreateSubscriptionRequest) -> Self {
        Self::CreateSubscription(request)
    }
}
