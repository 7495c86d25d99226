//! Typed operations of the Strike API.
//!
//! Each method maps to exactly one HTTP request and returns the record the
//! API documents for it. Path parameters are passed through unchecked; bad
//! ids are rejected by the API and come back as [`StrikeError`].

use super::StrikeClient;
use crate::error::StrikeError;
use crate::request::StrikeRequest;
use crate::response::{EmptyFormat, JsonFormat};
use crate::types::{
    CreateSubscriptionRequest, Event, Invoice, ListResponse, NewInvoiceRequest, PublicProfile,
    Quote, Rate, UpdateSubscriptionRequest, WebhookSubscription,
};

impl StrikeClient {
    /// `GET /rates/ticker`: current exchange rates.
    pub async fn get_rates(&self) -> Result<Vec<Rate>, StrikeError> {
        self.execute::<JsonFormat<Vec<Rate>>>(StrikeRequest::GetRates).await
    }

    /// `GET /accounts/{id}/profile`
    pub async fn fetch_public_profile_by_id(
        &self,
        id: impl Into<String>,
    ) -> Result<PublicProfile, StrikeError> {
        let request = StrikeRequest::FetchPublicProfileById { id: id.into() };
        self.execute::<JsonFormat<PublicProfile>>(request).await
    }

    /// `GET /accounts/handle/{handle}/profile`
    pub async fn fetch_public_profile_by_handle(
        &self,
        handle: impl Into<String>,
    ) -> Result<PublicProfile, StrikeError> {
        self.execute::<JsonFormat<PublicProfile>>(StrikeRequest::FetchPublicProfileByHandle {
            handle: handle.into(),
        })
        .await
    }

    /// `GET /events`
    pub async fn get_events(&self) -> Result<ListResponse<Event>, StrikeError> {
        self.execute::<JsonFormat<ListResponse<Event>>>(StrikeRequest::GetEvents).await
    }

    /// `GET /events/{id}`
    pub async fn find_event_by_id(&self, id: impl Into<String>) -> Result<Event, StrikeError> {
        let request = StrikeRequest::FindEventById { id: id.into() };
        self.execute::<JsonFormat<Event>>(request).await
    }

    /// `GET /invoices`
    pub async fn get_invoices(&self) -> Result<ListResponse<Invoice>, StrikeError> {
        self.execute::<JsonFormat<ListResponse<Invoice>>>(StrikeRequest::GetInvoices)
            .await
    }

    /// `POST /invoices`: issues an invoice payable to the calling account.
    pub async fn new_invoice(&self, request: NewInvoiceRequest) -> Result<Invoice, StrikeError> {
        self.execute::<JsonFormat<Invoice>>(StrikeRequest::NewInvoice(request))
            .await
    }

    /// `GET /invoices/{id}`
    pub async fn find_invoice_by_id(&self, id: impl Into<String>) -> Result<Invoice, StrikeError> {
        let request = StrikeRequest::FindInvoiceById { id: id.into() };
        self.execute::<JsonFormat<Invoice>>(request).await
    }

    /// `POST /invoices/handle/{handle}`: issues an invoice payable to the
    /// account behind `handle`.
    pub async fn new_invoice_for_receiver(
        &self,
        handle: impl Into<String>,
        request: NewInvoiceRequest,
    ) -> Result<Invoice, StrikeError> {
        self.execute::<JsonFormat<Invoice>>(StrikeRequest::NewInvoiceForReceiver {
            handle: handle.into(),
            request,
        })
        .await
    }

    /// `POST /invoices/{id}/quote` with no body.
    ///
    /// The quote is only valid until [`Quote::expiration`]; request a new one
    /// once it has passed.
    pub async fn new_quote(&self, invoice_id: impl Into<String>) -> Result<Quote, StrikeError> {
        self.execute::<JsonFormat<Quote>>(StrikeRequest::NewQuote {
            invoice_id: invoice_id.into(),
        })
        .await
    }

    /// `PATCH /invoices/{id}/cancel` with no body. Returns the updated invoice.
    pub async fn cancel_invoice(
        &self,
        invoice_id: impl Into<String>,
    ) -> Result<Invoice, StrikeError> {
        self.execute::<JsonFormat<Invoice>>(StrikeRequest::CancelInvoice {
            invoice_id: invoice_id.into(),
        })
        .await
    }

    /// `GET /subscriptions`
    pub async fn get_subscriptions(
        &self,
    ) -> Result<ListResponse<WebhookSubscription>, StrikeError> {
        self.execute::<JsonFormat<ListResponse<WebhookSubscription>>>(
            StrikeRequest::GetSubscriptions,
        )
        .await
    }

    /// `POST /subscriptions`
    pub async fn create_subscription(
        &self,
        request: CreateSubscriptionRequest,
    ) -> Result<WebhookSubscription, StrikeError> {
        self.execute::<JsonFormat<WebhookSubscription>>(StrikeRequest::CreateSubscription(
            request,
        ))
        .await
    }

    /// `GET /subscriptions/{id}`
    pub async fn get_subscription_by_id(
        &self,
        id: impl Into<String>,
    ) -> Result<WebhookSubscription, StrikeError> {
        let request = StrikeRequest::GetSubscriptionById { id: id.into() };
        self.execute::<JsonFormat<WebhookSubscription>>(request).await
    }

    /// `PATCH /subscriptions/{id}`: sends only the fields set on `request`.
    pub async fn update_subscription(
        &self,
        id: impl Into<String>,
        request: UpdateSubscriptionRequest,
    ) -> Result<WebhookSubscription, StrikeError> {
        self.execute::<JsonFormat<WebhookSubscription>>(StrikeRequest::UpdateSubscription {
            id: id.into(),
            request,
        })
        .await
    }

    /// `DELETE /subscriptions/{id}`
    ///
    /// Any response body is discarded.
    pub async fn delete_subscription(&self, id: impl Into<String>) -> Result<(), StrikeError> {
        self.execute::<EmptyFormat>(StrikeRequest::DeleteSubscription { id: id.into() })
            .await
    }
}
