use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Code used when an invoice does not specify one
pub const DEFAULT_CURRENCY: &str = "USD";

/// Currencies with a known display format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar (2 decimal places)
    USD,
    /// Euro (2 decimal places)
    EUR,
    /// Pound Sterling (2 decimal places)
    GBP,
    /// Indian Rupee (2 decimal places)
    INR,
    /// Japanese Yen (no decimal places)
    JPY,
    /// Indonesian Rupiah (2 decimal places, code-prefixed)
    IDR,
    /// Malaysian Ringgit (2 decimal places, code-prefixed)
    MYR,
}

impl Currency {
    /// Returns the number of fraction digits shown for this currency
    pub fn scale(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Display prefix; `None` means the ISO code followed by a space is used
    fn symbol(&self) -> Option<&'static str> {
        match self {
            Currency::USD => Some("$"),
            Currency::EUR => Some("€"),
            Currency::GBP => Some("£"),
            Currency::INR => Some("₹"),
            Currency::JPY => Some("¥"),
            Currency::IDR | Currency::MYR => None,
        }
    }

    /// Rounds half away from zero to this currency's display scale
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats an amount the way an en-US currency formatter renders it:
    /// `$1,234.50`, `-€5.00`, `¥1,235`, `IDR 1,000.00`
    pub fn format_amount(&self, amount: Decimal) -> String {
        let mut rounded = self.round(amount);
        rounded.rescale(self.scale());

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let digits = group_thousands(&rounded.abs().to_string());

        match self.symbol() {
            Some(symbol) => format!("{}{}{}", sign, symbol, digits),
            None => format!("{}{} {}", sign, self, digits),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
            Currency::IDR => "IDR",
            Currency::MYR => "MYR",
        };
        f.write_str(code)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            "GBP" => Ok(Currency::GBP),
            "INR" => Ok(Currency::INR),
            "JPY" => Ok(Currency::JPY),
            "IDR" => Ok(Currency::IDR),
            "MYR" => Ok(Currency::MYR),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}

impl TryFrom<&str> for Currency {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Formats `amount` for display in the currency named by `code`.
///
/// Unrecognized codes fall back to a `$`-prefixed, two-decimal string
/// without grouping (`$1234.50`).
pub fn format_currency(amount: Decimal, code: &str) -> String {
    match code.parse::<Currency>() {
        Ok(currency) => currency.format_amount(amount),
        Err(_) => {
            let mut fixed = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            fixed.rescale(2);
            format!("${}", fixed)
        }
    }
}

/// Inserts `,` every three digits of the integer part of a plain decimal string
fn group_thousands(plain: &str) -> String {
    let (integer, fraction) = match plain.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(plain.len() + integer.len() / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if let Some(fraction) = fraction {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}
