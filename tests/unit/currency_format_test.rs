// Currency formatting tests
//
// Amounts keep full precision internally and are rounded only here,
// half away from zero, to the currency's display scale.

use invoicely::core::{format_currency, Currency};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_known_currencies() {
    assert_eq!(format_currency(dec!(143), "USD"), "$143.00");
    assert_eq!(format_currency(dec!(1234567.891), "USD"), "$1,234,567.89");
    assert_eq!(format_currency(dec!(99.5), "EUR"), "€99.50");
    assert_eq!(format_currency(dec!(1000), "GBP"), "£1,000.00");
    assert_eq!(format_currency(dec!(250000), "INR"), "₹250,000.00");
    assert_eq!(format_currency(dec!(1500.4), "JPY"), "¥1,500");
    assert_eq!(format_currency(dec!(1000), "IDR"), "IDR 1,000.00");
    assert_eq!(format_currency(dec!(10.5), "MYR"), "MYR 10.50");
}

#[test]
fn test_negative_amounts_put_sign_first() {
    assert_eq!(format_currency(dec!(-5), "USD"), "-$5.00");
    assert_eq!(format_currency(dec!(-1234.5), "MYR"), "-MYR 1,234.50");
}

#[test]
fn test_unknown_code_falls_back_to_dollar_fixed_two() {
    assert_eq!(format_currency(dec!(1234.5), "ABC"), "$1234.50");
    assert_eq!(format_currency(dec!(7), ""), "$7.00");
}

#[test]
fn test_rounding_happens_only_at_display() {
    // 0.1075 is shown as 0.11 while the value keeps four places
    let amount = dec!(0.1075);
    assert_eq!(format_currency(amount, "USD"), "$0.11");
    assert_eq!(amount, dec!(0.1075));
    assert_eq!(format_currency(dec!(2.345), "USD"), "$2.35");
}

#[test]
fn test_currency_code_parsing() {
    assert_eq!(" eur ".parse::<Currency>(), Ok(Currency::EUR));
    assert!("dollars".parse::<Currency>().is_err());
    assert_eq!(Currency::try_from("jpy"), Ok(Currency::JPY));
}

proptest! {
    /// Property: USD output always has exactly two fraction digits
    #[test]
    fn test_usd_has_two_fraction_digits(cents in -1_000_000_000i64..=1_000_000_000, extra in 0u32..=4) {
        let amount = Decimal::new(cents, 2) / Decimal::from(10u64.pow(extra));
        let formatted = format_currency(amount, "USD");
        let fraction = formatted.rsplit('.').next().unwrap();
        prop_assert_eq!(fraction.len(), 2);
        prop_assert!(formatted.starts_with('$') || formatted.starts_with("-$"));
    }

    /// Property: removing separators and symbol gives back the rounded amount
    #[test]
    fn test_grouping_preserves_value(cents in 0i64..=1_000_000_000_000) {
        let amount = Decimal::new(cents, 2);
        let formatted = format_currency(amount, "USD");
        let digits: String = formatted.chars().filter(|c| *c != '$' && *c != ',').collect();
        prop_assert_eq!(digits.parse::<Decimal>().unwrap(), amount);
    }
}
