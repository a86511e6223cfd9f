// Integration tests for the dashboard summary
//
// Builds the dashboard over the fake invoice API and checks the headline
// figures, the recent-invoice panel and the per-currency split.

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::Arc;

use helpers::*;
use invoicely::invoices::models::StoredStatus;
use invoicely::reports::{active_only, DashboardService, RECENT_INVOICE_COUNT};
use rust_decimal_macros::dec;

#[actix_web::test]
async fn test_summary_over_mixed_invoices() {
    let api = FakeInvoiceApi::start();
    let manager = Arc::new(api.manager());
    let dashboard = DashboardService::new(manager.clone());

    let partly_paid = manager.create(&TestDataFactory::scenario_a()).await.unwrap();
    manager.record_payment(&partly_paid.id, dec!(100)).await.unwrap();

    let mut marked_paid = TestDataFactory::scenario_a();
    marked_paid.status = StoredStatus::Paid;
    manager.create(&marked_paid).await.unwrap();

    let archived = manager.create(&TestDataFactory::overdue()).await.unwrap();
    manager.archive(&archived.id).await.unwrap();

    let summary = dashboard.summary().await.unwrap();

    // Archived invoices still count
    assert_eq!(summary.total_count, 3);
    assert_eq!(summary.paid_count, 1);
    assert_money(summary.total_revenue, "100");
    assert_money(summary.pending_amount, "329");
    assert!(!summary.is_multi_currency());

    // Newest first, as the server lists them
    assert_eq!(summary.recent.len(), 3);
    assert_eq!(summary.recent[0].id, archived.id);
    assert_eq!(summary.recent[2].id, partly_paid.id);

    let active = active_only(&manager.list().await.unwrap());
    assert_eq!(active.len(), 2);
    assert!(active.iter().all(|invoice| invoice.id != archived.id));
}

#[actix_web::test]
async fn test_recent_panel_is_capped() {
    let api = FakeInvoiceApi::start();
    let manager = Arc::new(api.manager());

    for _ in 0..RECENT_INVOICE_COUNT + 2 {
        manager.create(&TestDataFactory::scenario_a()).await.unwrap();
    }

    let summary = DashboardService::new(manager).summary().await.unwrap();
    assert_eq!(summary.total_count, RECENT_INVOICE_COUNT + 2);
    assert_eq!(summary.recent.len(), RECENT_INVOICE_COUNT);
}

#[actix_web::test]
async fn test_currency_breakdown() {
    let api = FakeInvoiceApi::start();
    let manager = Arc::new(api.manager());

    let usd = manager.create(&TestDataFactory::scenario_a()).await.unwrap();
    manager.record_payment(&usd.id, dec!(43)).await.unwrap();

    let mut euro = TestDataFactory::scenario_a();
    euro.currency = "EUR".to_string();
    manager.create(&euro).await.unwrap();

    let summary = DashboardService::new(manager).summary().await.unwrap();
    assert!(summary.is_multi_currency());

    // Headline sums add across currencies; the split keeps them apart
    assert_money(summary.total_revenue, "43");
    assert_money(summary.pending_amount, "243");

    let usd_totals = summary.by_currency.iter().find(|t| t.currency == "USD").unwrap();
    assert_money(usd_totals.revenue, "43");
    assert_money(usd_totals.pending, "100");
    assert_eq!(usd_totals.invoice_count, 1);

    let eur_totals = summary.by_currency.iter().find(|t| t.currency == "EUR").unwrap();
    assert_money(eur_totals.revenue, "0");
    assert_money(eur_totals.pending, "143");
}

#[actix_web::test]
async fn test_summary_from_rows_without_collections() {
    let api = FakeInvoiceApi::start();
    let manager = Arc::new(api.manager());

    let invoice = manager.create(&TestDataFactory::scenario_a()).await.unwrap();
    manager.record_payment(&invoice.id, dec!(100)).await.unwrap();
    api.list_without_collections();

    let summary = DashboardService::new(manager).summary().await.unwrap();
    assert_money(summary.total_revenue, "100");
    assert_money(summary.pending_amount, "43");
    assert_money(summary.recent[0].total, "143");
}

#[actix_web::test]
async fn test_summary_surfaces_list_failure() {
    let api = FakeInvoiceApi::start();
    let manager = Arc::new(api.manager());
    api.fail_next(500, Some(r#"{"message":"Database unavailable"}"#));

    let err = DashboardService::new(manager).summary().await.unwrap_err();
    assert_remote_error(&err, "Database unavailable", 500);
}
