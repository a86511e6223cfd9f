// Contract tests for the invoice API client
//
// Runs HttpInvoiceClient against the fake invoice API over real HTTP and
// checks what goes on the wire:
// - endpoint paths and JSON field names of each request
// - Authorization only when the session carries a token
// - a fresh UUID Idempotency-Key on every payment attempt
// - mapping of non-2xx responses and unreachable servers to AppError
// - unreadable 2xx bodies surfaced as decode errors

#[path = "../helpers/mod.rs"]
mod helpers;

use std::str::FromStr;

use helpers::*;
use invoicely::core::{AppError, ErrorSurface, Session};
use invoicely::gateway::{CreateInvoiceRequest, InvoiceGateway, PaymentRequest};
use invoicely::invoices::models::{Invoice, InvoiceSummary};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use uuid::Uuid;

fn wire_decimal(value: &Value) -> Decimal {
    Decimal::from_str(&value.to_string()).expect("JSON number")
}

#[actix_web::test]
async fn test_create_request_shape() {
    let api = FakeInvoiceApi::start();
    let client = api.client();

    let mut invoice = TestDataFactory::scenario_a();
    invoice.items[1].description = "   ".to_string();
    invoice.currency = "usd".to_string();
    let request = CreateInvoiceRequest::try_from(&invoice).unwrap();

    let id = client.create_invoice(&request).await.unwrap();
    assert!(id.starts_with("inv"), "unexpected id {}", id);

    let requests = api.requests();
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.method, "POST");
    assert_eq!(sent.path, "/api/invoices");

    let body = &sent.body;
    assert_eq!(body["invoiceNumber"], invoice.invoice_number.as_str());
    assert_eq!(body["customerName"], "Acme Enterprise");
    assert_eq!(body["customerEmail"], "billing@acme.test");
    assert_eq!(body["issueDate"], invoice.issue_date.format("%Y-%m-%d").to_string());
    assert_eq!(body["dueDate"], invoice.due_date.format("%Y-%m-%d").to_string());
    assert_eq!(body["currency"], "USD");
    assert_eq!(body["status"], "DRAFT");
    assert_eq!(wire_decimal(&body["taxRate"]), dec!(10));

    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["description"], "Website design");
    assert_eq!(items[0]["quantity"].as_u64(), Some(2));
    assert_eq!(wire_decimal(&items[0]["unitPrice"]), dec!(50));
    assert_eq!(items[1]["description"], "Untitled Item");
}

#[actix_web::test]
async fn test_detail_response_decodes_into_invoice() {
    let api = FakeInvoiceApi::start();
    let client = api.client();
    let request = CreateInvoiceRequest::try_from(&TestDataFactory::scenario_a()).unwrap();
    let id = client.create_invoice(&request).await.unwrap();

    let document = client.get_invoice(&id).await.unwrap();
    let invoice = Invoice::try_from(document).unwrap();

    assert_eq!(invoice.id, id);
    assert_eq!(invoice.line_items.len(), 2);
    assert!(invoice.line_items.iter().all(|item| item.id.starts_with("li")));
    assert_money(invoice.subtotal().unwrap(), "130");
    assert_money(invoice.tax_amount().unwrap(), "13");
    assert_money(invoice.total().unwrap(), "143");
    assert!(!invoice.is_archived);

    let requests = api.requests();
    assert_eq!(requests[1].method, "GET");
    assert_eq!(requests[1].path, format!("/api/invoices/{}", id));
}

#[actix_web::test]
async fn test_bearer_token_only_with_authenticated_session() {
    let api = FakeInvoiceApi::start();

    api.client().list_invoices().await.unwrap();
    api.client_with_session(Session::with_token("secret-token"))
        .list_invoices()
        .await
        .unwrap();

    let requests = api.requests();
    assert_eq!(requests[0].authorization, None);
    assert_eq!(requests[1].authorization.as_deref(), Some("Bearer secret-token"));
}

#[actix_web::test]
async fn test_payment_attempts_carry_distinct_idempotency_keys() {
    let api = FakeInvoiceApi::start();
    let manager = api.manager();
    let invoice = manager.create(&TestDataFactory::scenario_a()).await.unwrap();

    manager.record_payment(&invoice.id, dec!(40)).await.unwrap();
    manager.record_payment(&invoice.id, dec!(40)).await.unwrap();

    let payments: Vec<_> = api
        .mutations()
        .into_iter()
        .filter(|request| request.path.ends_with("/payments"))
        .collect();
    assert_eq!(payments.len(), 2);

    let keys: Vec<Uuid> = payments
        .iter()
        .map(|request| {
            let key = request.idempotency_key.as_deref().expect("Idempotency-Key sent");
            Uuid::parse_str(key).expect("Idempotency-Key is a UUID")
        })
        .collect();
    assert_ne!(keys[0], keys[1]);

    assert_eq!(payments[0].path, format!("/api/invoices/{}/payments", invoice.id));
    assert_eq!(wire_decimal(&payments[0].body["amount"]), dec!(40));
}

#[actix_web::test]
async fn test_archive_and_restore_paths() {
    let api = FakeInvoiceApi::start();
    let client = api.client();
    let request = CreateInvoiceRequest::try_from(&TestDataFactory::scenario_a()).unwrap();
    let id = client.create_invoice(&request).await.unwrap();

    client.archive_invoice(&id).await.unwrap();
    client.restore_invoice(&id).await.unwrap();

    let paths: Vec<String> = api.mutations().into_iter().map(|r| r.path).collect();
    assert_eq!(
        paths,
        vec![
            "/api/invoices".to_string(),
            format!("/api/invoices/{}/archive", id),
            format!("/api/invoices/{}/restore", id),
        ]
    );
}

#[actix_web::test]
async fn test_server_message_is_surfaced() {
    let api = FakeInvoiceApi::start();
    api.fail_next(500, Some(r#"{"message":"Database unavailable"}"#));

    let err = api.client().list_invoices().await.unwrap_err();
    assert_remote_error(&err, "Database unavailable", 500);
}

#[actix_web::test]
async fn test_generic_message_when_body_has_none() {
    let api = FakeInvoiceApi::start();
    let client = api.client();

    api.fail_next(502, None);
    let err = client.list_invoices().await.unwrap_err();
    assert_remote_error(&err, "Load invoices failed (502)", 502);

    api.fail_next(503, Some("<html>Service Unavailable</html>"));
    let request = CreateInvoiceRequest::try_from(&TestDataFactory::scenario_a()).unwrap();
    let err = client.create_invoice(&request).await.unwrap_err();
    assert_remote_error(&err, "Create invoice failed (503)", 503);
}

#[actix_web::test]
async fn test_unreadable_creation_response_is_decode_error() {
    let api = FakeInvoiceApi::start();
    api.fail_next(201, Some(r#"{"created":true}"#));

    let request = CreateInvoiceRequest::try_from(&TestDataFactory::scenario_a()).unwrap();
    let err = api.client().create_invoice(&request).await.unwrap_err();

    assert!(matches!(err, AppError::Decode(_)), "unexpected error {:?}", err);
    // Sent exactly once; the invoice may exist server-side
    assert_eq!(api.mutations().len(), 1);
}

#[actix_web::test]
async fn test_missing_invoice_is_not_found() {
    let api = FakeInvoiceApi::start();
    let err = api.client().get_invoice("does-not-exist").await.unwrap_err();
    assert_remote_error(&err, "Invoice not found", 404);
}

#[actix_web::test]
async fn test_server_side_payment_rejection() {
    let api = FakeInvoiceApi::start();
    let client = api.client();
    let request = CreateInvoiceRequest::try_from(&TestDataFactory::scenario_a()).unwrap();
    let id = client.create_invoice(&request).await.unwrap();

    let err = client
        .add_payment(&id, &PaymentRequest { amount: dec!(500) }, Uuid::new_v4())
        .await
        .unwrap_err();
    assert_remote_error(&err, "amount exceeds balance due of $143.00", 400);
}

#[actix_web::test]
async fn test_unreachable_server_is_transport_error() {
    // Bind then release a port so nothing is listening on it
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = invoicely::gateway::HttpInvoiceClient::with_client(
        reqwest::Client::new(),
        &format!("http://127.0.0.1:{}", port),
        Session::anonymous(),
    )
    .unwrap();

    let err = client.list_invoices().await.unwrap_err();
    assert!(matches!(err, AppError::Transport(_)));
    assert_eq!(err.status_code(), 0);
    assert_eq!(err.to_string(), "Something went wrong");
    assert_eq!(err.surface(), ErrorSurface::Retry);
    assert!(err.is_retryable());
}

#[actix_web::test]
async fn test_list_without_collections_uses_server_figures() {
    let api = FakeInvoiceApi::start();
    let manager = api.manager();
    let invoice = manager.create(&TestDataFactory::scenario_a()).await.unwrap();
    manager.record_payment(&invoice.id, dec!(100)).await.unwrap();

    api.list_without_collections();
    let documents = api.client().list_invoices().await.unwrap();
    assert_eq!(documents.len(), 1);
    assert!(documents[0].line_items.is_none());

    let summary = InvoiceSummary::try_from(documents.into_iter().next().unwrap()).unwrap();
    assert_money(summary.total, "143");
    assert_money(summary.amount_paid, "100");
    assert_money(summary.balance_due, "43");
    assert!(summary.due_date.is_some());
}
