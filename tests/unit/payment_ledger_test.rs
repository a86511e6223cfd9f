// Property-based tests for the payment ledger
//
// Properties tested:
// 1. amountPaid = Σ payments and balanceDue = total − amountPaid
// 2. balanceDue ≥ 0 after every successful recordPayment
// 3. amounts ≤ 0 or > balanceDue are rejected and leave the ledger unchanged
// 4. recording a payment never changes the stored status

use chrono::{TimeZone, Utc};
use invoicely::core::AppError;
use invoicely::invoices::models::{Invoice, LineItem, StoredStatus};
use invoicely::payments::PaymentLedger;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn invoice(items: &[(u32, Decimal)], tax_rate: Decimal) -> Invoice {
    let day = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    Invoice {
        id: "inv-1".to_string(),
        invoice_number: "INV-00001".to_string(),
        customer_name: "Acme".to_string(),
        customer_email: String::new(),
        address: String::new(),
        issue_date: day,
        due_date: day,
        currency: "USD".to_string(),
        tax_rate,
        line_items: items
            .iter()
            .enumerate()
            .map(|(n, (quantity, unit_price))| LineItem {
                id: format!("li-{}", n),
                description: "Item".to_string(),
                quantity: *quantity,
                unit_price: *unit_price,
            })
            .collect(),
        status: StoredStatus::Draft,
        is_archived: false,
        payments: vec![],
    }
}

fn scenario_a() -> Invoice {
    invoice(&[(2, dec!(50)), (1, dec!(30))], dec!(10))
}

proptest! {
    /// Property: a sequence of attempted payments keeps the ledger consistent
    #[test]
    fn test_ledger_invariants_hold_for_any_attempts(
        attempts in prop::collection::vec(-5_000i64..=20_000, 1..30)
    ) {
        let mut invoice = scenario_a();
        let paid_at = Utc.with_ymd_and_hms(2025, 1, 2, 0, 0, 0).unwrap();

        for (n, cents) in attempts.into_iter().enumerate() {
            let amount = Decimal::new(cents, 2);
            let before = invoice.payments.clone();
            let balance_before = invoice.balance_due().unwrap();

            let result = PaymentLedger::record_payment(&mut invoice, amount, format!("p-{}", n), paid_at)
                .map(|payment| payment.amount);

            if amount <= Decimal::ZERO || amount > balance_before {
                prop_assert!(matches!(result, Err(AppError::Validation(_))));
                prop_assert_eq!(&invoice.payments, &before);
            } else {
                prop_assert_eq!(result.ok(), Some(amount));
                prop_assert_eq!(invoice.balance_due().unwrap(), balance_before - amount);
            }

            let paid: Decimal = invoice.payments.iter().map(|p| p.amount).sum();
            prop_assert_eq!(invoice.amount_paid().unwrap(), paid);
            prop_assert_eq!(invoice.balance_due().unwrap(), invoice.total().unwrap() - paid);
            prop_assert!(invoice.balance_due().unwrap() >= Decimal::ZERO);
            prop_assert_eq!(invoice.status, StoredStatus::Draft);
        }
    }
}

#[test]
fn test_scenario_b_partial_payment() {
    let mut invoice = scenario_a();
    let paid_at = Utc::now();
    PaymentLedger::record_payment(&mut invoice, dec!(100), "p-1", paid_at).unwrap();

    assert_eq!(invoice.amount_paid().unwrap(), dec!(100));
    assert_eq!(invoice.balance_due().unwrap(), dec!(43));
    assert_eq!(invoice.status, StoredStatus::Draft);
}

#[test]
fn test_scenario_c_overpayment_message() {
    let mut invoice = scenario_a();
    PaymentLedger::record_payment(&mut invoice, dec!(100), "p-1", Utc::now()).unwrap();

    let err = PaymentLedger::record_payment(&mut invoice, dec!(50), "p-2", Utc::now()).unwrap_err();
    assert_eq!(err.to_string(), "amount exceeds balance due of $43.00");
    assert_eq!(invoice.payments.len(), 1);
    assert_eq!(invoice.balance_due().unwrap(), dec!(43));
}

#[test]
fn test_overpayment_message_uses_invoice_currency() {
    let mut invoice = scenario_a();
    invoice.currency = "EUR".to_string();
    let err = PaymentLedger::validate_payment(&invoice, dec!(1000)).unwrap_err();
    assert_eq!(err.to_string(), "amount exceeds balance due of €143.00");
}

#[test]
fn test_zero_amount_message() {
    let err = PaymentLedger::validate_payment(&scenario_a(), Decimal::ZERO).unwrap_err();
    assert_eq!(err.to_string(), "amount must be > 0");
}

#[test]
fn test_fractional_balance_is_compared_at_full_precision() {
    // 1 × 0.10 at 7.5% tax = 0.1075 total
    let mut invoice = invoice(&[(1, dec!(0.10))], dec!(7.5));
    assert_eq!(invoice.total().unwrap(), dec!(0.1075));

    // 0.11 displays as the rounded balance but still exceeds it
    let err = PaymentLedger::validate_payment(&invoice, dec!(0.11)).unwrap_err();
    assert_eq!(err.to_string(), "amount exceeds balance due of $0.11");

    PaymentLedger::record_payment(&mut invoice, dec!(0.1075), "p-1", Utc::now()).unwrap();
    assert_eq!(invoice.balance_due().unwrap(), Decimal::ZERO);
}
