use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use invoicely::config::{Config, LogFormat};
use invoicely::core::{format_currency, Result};
use invoicely::gateway::HttpInvoiceClient;
use invoicely::invoices::{Invoice, InvoiceLifecycleManager, StatusLabels};
use invoicely::reports::{DashboardService, DashboardSummary};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    let json = config.app.log_format == LogFormat::Json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("invoicely={},reqwest=info", config.app.log_level).into()
            }),
        )
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer()))
        .init();

    config
        .validate()
        .context("Configuration validation failed")?;

    tracing::info!(
        env = %config.app.env,
        api = %config.api.base_url,
        authenticated = config.api.session().is_authenticated(),
        "Starting invoicely console"
    );

    let client = HttpInvoiceClient::new(&config.api).context("Failed to build API client")?;
    let manager = Arc::new(
        InvoiceLifecycleManager::new(Arc::new(client))
            .with_policy(config.billing.settlement_policy),
    );

    match std::env::args().nth(1) {
        Some(invoice_id) => {
            let invoice = manager
                .fetch(&invoice_id)
                .await
                .with_context(|| format!("Failed to load invoice {}", invoice_id))?;
            print_invoice(&manager, &invoice)?;
        }
        None => {
            let summary = DashboardService::new(manager.clone())
                .summary()
                .await
                .context("Failed to load invoices")?;
            print_dashboard(&manager, &summary, &config.billing.default_currency);
        }
    }

    Ok(())
}

fn print_dashboard(manager: &InvoiceLifecycleManager, summary: &DashboardSummary, currency: &str) {
    let now = Utc::now();
    let labels = StatusLabels::LEDGER;

    println!("Invoices        {}", summary.total_count);
    println!("Paid invoices   {}", summary.paid_count);
    println!("Total revenue   {}", format_currency(summary.total_revenue, currency));
    println!("Pending amount  {}", format_currency(summary.pending_amount, currency));

    if summary.is_multi_currency() {
        for totals in &summary.by_currency {
            println!(
                "  {:<4} revenue {}  pending {}",
                totals.currency,
                format_currency(totals.revenue, &totals.currency),
                format_currency(totals.pending, &totals.currency)
            );
        }
    }

    println!();
    println!("Recent invoices");
    for invoice in &summary.recent {
        let status = manager.resolver().resolve(invoice, now);
        println!(
            "  {:<12} {:<24} {:>14}  {}{}",
            invoice.invoice_number,
            invoice.customer_name,
            format_currency(invoice.total, &invoice.currency),
            labels.label(status),
            if invoice.is_archived { " (archived)" } else { "" }
        );
    }
}

fn print_invoice(manager: &InvoiceLifecycleManager, invoice: &Invoice) -> Result<()> {
    let status = manager.display_status(invoice, Utc::now());
    let totals = invoice.totals()?;

    println!(
        "{}  {}",
        invoice.invoice_number,
        StatusLabels::DOCUMENT.label(status)
    );
    println!("Bill to   {}", invoice.customer_name);
    if !invoice.customer_email.is_empty() {
        println!("          {}", invoice.customer_email);
    }
    if !invoice.address.is_empty() {
        println!("          {}", invoice.address);
    }
    println!("Issued    {}", invoice.issue_date.format("%Y-%m-%d"));
    println!("Due       {}", invoice.due_date.format("%Y-%m-%d"));
    if invoice.is_archived {
        println!("Archived");
    }

    println!();
    for item in &invoice.line_items {
        println!(
            "  {:<32} {:>5} x {:>12} = {:>14}",
            item.description,
            item.quantity,
            invoice.format_money(item.unit_price),
            invoice.format_money(item.line_total()?)
        );
    }

    println!();
    println!("Subtotal     {:>14}", invoice.format_money(totals.subtotal));
    println!(
        "Tax ({}%)  {:>14}",
        invoice.tax_rate.normalize(),
        invoice.format_money(totals.tax_amount)
    );
    println!("Total        {:>14}", invoice.format_money(totals.total));
    println!("Paid         {:>14}", invoice.format_money(invoice.amount_paid()?));
    println!("Balance due  {:>14}", invoice.format_money(invoice.balance_due()?));

    if !invoice.payments.is_empty() {
        println!();
        println!("Payments");
        for payment in &invoice.payments {
            let date = payment
                .payment_date
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string());
            println!("  {}  {:>14}", date, invoice.format_money(payment.amount));
        }
    }

    Ok(())
}
