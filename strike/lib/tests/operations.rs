//! Integration tests for the Strike client operations.
//!
//! These tests use wiremock to mock the Strike API and verify the verb,
//! path, headers and body of every request and the typed result.

use serde_json::{Value, json};
use strike_lib::{
    Amount, CreateSubscriptionRequest, Currency, EventType, InvoiceState, NewInvoiceRequest,
    Rate, StrikeClient, StrikeError, UpdateSubscriptionRequest, WebhookVersion,
};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn client_for(server: &MockServer) -> StrikeClient {
    StrikeClient::builder("test-secret")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn invoice_json(state: &str) -> Value {
    json!({
        "invoiceId": "inv_1",
        "amount": {"currency": "USD", "amount": "150.00"},
        "state": state,
        "created": "2021-11-12T20:08:55.301806+00:00",
        "correlationId": "order-42",
        "description": "Invoice for order 42",
        "issuerId": "acct_issuer",
        "receiverId": "acct_receiver"
    })
}

fn subscription_json(enabled: bool) -> Value {
    json!({
        "id": "sub_1",
        "webhookUrl": "https://example.com/hook",
        "webhookVersion": "v1",
        "enabled": enabled,
        "created": "2021-11-12T20:08:55+00:00",
        "eventTypes": ["invoice.created", "invoice.updated"]
    })
}

fn profile_json() -> Value {
    json!({
        "handle": "alice",
        "avatarUrl": "https://example.com/alice.png",
        "description": "Alice",
        "canReceive": true,
        "currencies": [
            {"currency": "BTC", "isDefaultCurrency": false, "isAvailable": true, "isInvoiceable": true},
            {"currency": "USD", "isDefaultCurrency": true, "isAvailable": true, "isInvoiceable": true}
        ]
    })
}

fn no_body(request: &Request) -> bool {
    request.body.is_empty()
}

mod reads {
    use super::*;

    #[tokio::test]
    async fn get_rates_matches_fixture() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/rates/ticker"))
            .and(header("authorization", "Bearer test-secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"amount": "50000.00", "sourceCurrency": "BTC", "targetCurrency": "USD"}
            ])))
            .mount(&server)
            .await;

        let rates = client_for(&server).get_rates().await.unwrap();

        assert_eq!(
            rates,
            vec![Rate {
                amount: "50000.00".to_string(),
                source_currency: Currency::Btc,
                target_currency: Currency::Usd,
            }]
        );
    }

    #[tokio::test]
    async fn unlisted_currency_keeps_the_other_rates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/rates/ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"amount": "50000.00", "sourceCurrency": "BTC", "targetCurrency": "USD"},
                {"amount": "75000.00", "sourceCurrency": "BTC", "targetCurrency": "AUD"}
            ])))
            .mount(&server)
            .await;

        let rates = client_for(&server).get_rates().await.unwrap();

        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0].target_currency, Currency::Usd);
        assert_eq!(rates[1].target_currency, Currency::Other("AUD".to_string()));
    }

    #[tokio::test]
    async fn profile_by_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/acct_1/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .mount(&server)
            .await;

        let profile = client_for(&server)
            .fetch_public_profile_by_id("acct_1")
            .await
            .unwrap();

        assert_eq!(profile.handle, "alice");
        assert!(profile.can_receive);
        assert_eq!(profile.currencies.len(), 2);
        assert!(profile.currencies[1].is_default_currency);
    }

    #[tokio::test]
    async fn profile_by_handle_targets_exact_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/handle/alice/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .expect(1)
            .mount(&server)
            .await;

        let profile = client_for(&server)
            .fetch_public_profile_by_handle("alice")
            .await
            .unwrap();
        assert_eq!(profile.avatar_url.as_deref(), Some("https://example.com/alice.png"));
    }

    #[tokio::test]
    async fn handle_with_slash_stays_in_one_segment() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/accounts/handle/a%2Fb/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile_json()))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .fetch_public_profile_by_handle("a/b")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn dot_segments_are_refused_before_sending() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let errors = [
            client.find_invoice_by_id("..").await.unwrap_err(),
            client.cancel_invoice(".").await.unwrap_err(),
            client.delete_subscription("..").await.unwrap_err(),
            client.fetch_public_profile_by_handle("").await.unwrap_err(),
        ];

        for err in errors {
            assert_eq!(err.to_string(), "Request Failed");
            assert!(matches!(err, StrikeError::InvalidPathValue { .. }), "{err:?}");
            assert_eq!(err.status(), None);
        }
    }

    #[tokio::test]
    async fn list_and_find_events() {
        let server = MockServer::start().await;
        let event = json!({
            "id": "evt_1",
            "eventType": "invoice.updated",
            "webhookVersion": "v1",
            "data": {"entityId": "inv_1", "changes": ["state"]},
            "created": "2021-11-12T20:08:55+00:00",
            "deliverySuccess": false
        });
        Mock::given(method("GET"))
            .and(path("/v1/events"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"items": [event.clone()], "count": 1})),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/events/evt_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(event))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let events = client.get_events().await.unwrap();
        assert_eq!(events.count, 1);
        assert_eq!(events.items[0].event_type, EventType::InvoiceUpdated);

        let found = client.find_event_by_id("evt_1").await.unwrap();
        assert_eq!(found, events.items[0]);
        assert_eq!(found.data, json!({"entityId": "inv_1", "changes": ["state"]}));
        assert!(!found.delivery_success);
    }

    #[tokio::test]
    async fn list_invoices() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/invoices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [invoice_json("UNPAID"), invoice_json("PAID")],
                "count": 2
            })))
            .mount(&server)
            .await;

        let invoices = client_for(&server).get_invoices().await.unwrap();
        assert_eq!(invoices.count, 2);
        let states: Vec<_> = invoices.items.iter().map(|i| i.state.clone()).collect();
        assert_eq!(states, vec![InvoiceState::Unpaid, InvoiceState::Paid]);
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/invoices/inv_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(invoice_json("UNPAID")))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/subscriptions/sub_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscription_json(true)))
            .expect(2)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.find_invoice_by_id("inv_1").await.unwrap();
        let second = client.find_invoice_by_id("inv_1").await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.correlation_id.as_deref(), Some("order-42"));

        let first = client.get_subscription_by_id("sub_1").await.unwrap();
        let second = client.get_subscription_by_id("sub_1").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_subscriptions() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/subscriptions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [subscription_json(true)],
                "count": 1
            })))
            .mount(&server)
            .await;

        let subscriptions = client_for(&server).get_subscriptions().await.unwrap();
        let subscription = &subscriptions.items[0];
        assert_eq!(subscription.webhook_version, WebhookVersion::V1);
        assert_eq!(
            subscription.event_types,
            vec![EventType::InvoiceCreated, EventType::InvoiceUpdated]
        );
    }
}

mod writes {
    use super::*;

    #[tokio::test]
    async fn new_invoice_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/invoices"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "correlationId": "order-42",
                "description": "Invoice for order 42",
                "amount": {"currency": "USD", "amount": "150.00"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(invoice_json("UNPAID")))
            .expect(1)
            .mount(&server)
            .await;

        let invoice = client_for(&server)
            .new_invoice(
                NewInvoiceRequest::new(Amount::new(Currency::Usd, "150.00"))
                    .with_correlation_id("order-42")
                    .with_description("Invoice for order 42"),
            )
            .await
            .unwrap();

        assert_eq!(invoice.invoice_id, "inv_1");
        assert_eq!(invoice.amount, Amount::new(Currency::Usd, "150.00"));
    }

    #[tokio::test]
    async fn new_invoice_for_receiver_posts_to_handle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/invoices/handle/bob"))
            .and(body_json(json!({"amount": {"currency": "BTC", "amount": "0.0001"}})))
            .respond_with(ResponseTemplate::new(201).set_body_json(invoice_json("UNPAID")))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .new_invoice_for_receiver("bob", NewInvoiceRequest::new(Amount::new(Currency::Btc, "0.0001")))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn new_quote_posts_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/invoices/inv_1/quote"))
            .and(no_body)
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "quoteId": "q_1",
                "description": "Invoice for order 42",
                "lnInvoice": "lnbcrt1...",
                "onchainAddress": "bcrt1q...",
                "expiration": "2021-11-12T20:09:55+00:00",
                "expirationInSec": 60,
                "targetAmount": {"currency": "USD", "amount": "150.00"},
                "sourceAmount": {"currency": "BTC", "amount": "0.003"},
                "conversionRate": {"amount": "50000.00", "sourceCurrency": "BTC", "targetCurrency": "USD"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let quote = client_for(&server).new_quote("inv_1").await.unwrap();
        assert_eq!(quote.quote_id, "q_1");
        assert_eq!(quote.expiration_in_sec, 60);
        assert_eq!(quote.source_amount, Amount::new(Currency::Btc, "0.003"));
        assert_eq!(quote.conversion_rate.source_currency, Currency::Btc);
    }

    #[tokio::test]
    async fn cancel_invoice_patches_without_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/invoices/inv_1/cancel"))
            .and(no_body)
            .respond_with(ResponseTemplate::new(200).set_body_json(invoice_json("CANCELLED")))
            .expect(1)
            .mount(&server)
            .await;

        let invoice = client_for(&server).cancel_invoice("inv_1").await.unwrap();
        assert_eq!(invoice.state, InvoiceState::Cancelled);
    }

    #[tokio::test]
    async fn create_subscription_sends_empty_event_types() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/subscriptions"))
            .and(body_json(json!({
                "webhookUrl": "https://example.com/hook",
                "webhookVersion": "v1",
                "secret": "0123456789abcdef",
                "enabled": true,
                "eventTypes": []
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(subscription_json(true)))
            .expect(1)
            .mount(&server)
            .await;

        let subscription = client_for(&server)
            .create_subscription(CreateSubscriptionRequest::new(
                "https://example.com/hook",
                "0123456789abcdef",
                [],
            ))
            .await
            .unwrap();
        assert_eq!(subscription.id, "sub_1");
    }

    #[tokio::test]
    async fn update_subscription_sends_partial_body() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/subscriptions/sub_1"))
            .and(body_json(json!({"enabled": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(subscription_json(false)))
            .expect(1)
            .mount(&server)
            .await;

        let subscription = client_for(&server)
            .update_subscription("sub_1", UpdateSubscriptionRequest::new().with_enabled(false))
            .await
            .unwrap();
        assert!(!subscription.enabled);
    }

    #[tokio::test]
    async fn delete_subscription_ignores_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/subscriptions/sub_1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v1/subscriptions/sub_2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deleted": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client.delete_subscription("sub_1").await.unwrap();
        client.delete_subscription("sub_2").await.unwrap();
    }
}

mod versioning {
    use super::*;

    #[tokio::test]
    async fn v2_client_routes_under_v2() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v2/rates/ticker"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/v2/invoices/inv_1/cancel"))
            .respond_with(ResponseTemplate::new(200).set_body_json(invoice_json("CANCELLED")))
            .expect(1)
            .mount(&server)
            .await;

        let client = StrikeClient::builder("test-secret")
            .base_url(server.uri())
            .api_version("v2")
            .build()
            .unwrap();

        assert!(client.get_rates().await.unwrap().is_empty());
        client.cancel_invoice("inv_1").await.unwrap();
    }
}

mod errors {
    use super::*;

    /// Every operation, invoked against a server that fails all requests.
    async fn call_every_operation(client: &StrikeClient) -> Vec<(&'static str, StrikeError)> {
        let amount = || NewInvoiceRequest::new(Amount::new(Currency::Usd, "1.00"));
        vec![
            ("get_rates", client.get_rates().await.unwrap_err()),
            ("profile_by_id", client.fetch_public_profile_by_id("x").await.unwrap_err()),
            ("profile_by_handle", client.fetch_public_profile_by_handle("x").await.unwrap_err()),
            ("get_events", client.get_events().await.unwrap_err()),
            ("find_event", client.find_event_by_id("x").await.unwrap_err()),
            ("get_invoices", client.get_invoices().await.unwrap_err()),
            ("new_invoice", client.new_invoice(amount()).await.unwrap_err()),
            ("find_invoice", client.find_invoice_by_id("x").await.unwrap_err()),
            ("invoice_for_receiver", client.new_invoice_for_receiver("x", amount()).await.unwrap_err()),
            ("new_quote", client.new_quote("x").await.unwrap_err()),
            ("cancel_invoice", client.cancel_invoice("x").await.unwrap_err()),
            ("get_subscriptions", client.get_subscriptions().await.unwrap_err()),
            (
                "create_subscription",
                client
                    .create_subscription(CreateSubscriptionRequest::new("u", "s", []))
                    .await
                    .unwrap_err(),
            ),
            ("get_subscription", client.get_subscription_by_id("x").await.unwrap_err()),
            (
                "update_subscription",
                client
                    .update_subscription("x", UpdateSubscriptionRequest::new())
                    .await
                    .unwrap_err(),
            ),
            ("delete_subscription", client.delete_subscription("x").await.unwrap_err()),
        ]
    }

    #[tokio::test]
    async fn error_body_is_spread_onto_error_for_every_operation() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "code": "NOT_FOUND",
                "message": "invoice not found"
            })))
            .mount(&server)
            .await;

        let errors = call_every_operation(&client_for(&server)).await;
        assert_eq!(errors.len(), 16);

        for (operation, err) in errors {
            assert_eq!(err.to_string(), "Request Failed", "{operation}");
            assert!(matches!(err, StrikeError::Api(_)), "{operation}: {err:?}");
            assert_eq!(err.status(), Some(404), "{operation}");
            assert_eq!(err.field("code"), Some(&json!("NOT_FOUND")), "{operation}");
            assert_eq!(err.field("message"), Some(&json!("invoice not found")), "{operation}");
        }
    }

    #[tokio::test]
    async fn empty_error_body_reports_status_for_every_operation() {
        let server = MockServer::start().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        for (operation, err) in call_every_operation(&client_for(&server)).await {
            assert_eq!(err.to_string(), "Request Failed", "{operation}");
            assert!(matches!(err, StrikeError::Transport(_)), "{operation}: {err:?}");
            assert_eq!(err.status(), Some(500), "{operation}");
            assert_eq!(err.status_text(), Some("Internal Server Error"), "{operation}");
            assert!(err.body().is_none(), "{operation}");
        }
    }

    #[tokio::test]
    async fn remote_error_fields_are_preserved_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/invoices"))
            .respond_with(ResponseTemplate::new(422).set_body_json(json!({
                "traceId": "0HMD2R1A0P3S1:00000002",
                "data": {
                    "status": 422,
                    "code": "INVALID_DATA",
                    "message": "Invalid data.",
                    "validationErrors": {"amount.amount": [{"code": "INVALID_AMOUNT"}]}
                }
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .new_invoice(NewInvoiceRequest::new(Amount::new(Currency::Usd, "-1")))
            .await
            .unwrap_err();

        let api = err.as_api_error().unwrap();
        assert_eq!(api.status(), 422);
        assert_eq!(api.code(), Some("INVALID_DATA"));
        assert_eq!(err.field("traceId"), Some(&json!("0HMD2R1A0P3S1:00000002")));
        assert_eq!(
            api.get("data").and_then(|d| d.get("validationErrors")),
            Some(&json!({"amount.amount": [{"code": "INVALID_AMOUNT"}]}))
        );
    }

    #[tokio::test]
    async fn plain_text_error_body_is_kept() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/rates/ticker"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_rates().await.unwrap_err();
        assert_eq!(err.body(), Some(&json!("upstream unavailable")));
        assert_eq!(err.status(), Some(503));
    }
}

mod concurrency {
    use super::*;

    #[tokio::test]
    async fn one_client_serves_overlapping_calls() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/invoices/inv_1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(invoice_json("PAID")))
            .expect(8)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let client = client.clone();
                tokio::spawn(async move { client.find_invoice_by_id("inv_1").await })
            })
            .collect();

        for handle in handles {
            let invoice = handle.await.unwrap().unwrap();
            assert_eq!(invoice.state, InvoiceState::Paid);
        }
    }
}
