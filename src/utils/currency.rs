//! Price field formatting in the fixed pt-BR / BRL display convention.
//!
//! `format_currency_input` turns raw keystrokes into the canonical display
//! form and `parse_currency_display` reads that form back as an exact amount.

use regex::Regex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use tracing::debug;

pub const CURRENCY_PREFIX: &str = "R$ ";
pub const THOUSANDS_SEPARATOR: char = '.';
pub const DECIMAL_SEPARATOR: char = ',';

/// Keystrokes past this many significant digits are dropped.
pub const MAX_INPUT_DIGITS: usize = 15;

/// Largest amount `format_currency_input` can produce.
pub fn max_input_amount() -> Decimal {
    Decimal::new(10_i64.pow(MAX_INPUT_DIGITS as u32) - 1, 2)
}

lazy_static::lazy_static! {
    static ref NON_DIGIT: Regex = Regex::new(r"[^0-9]").unwrap();
    static ref NON_AMOUNT: Regex = Regex::new(r"[^0-9,]").unwrap();
}

/// Formats raw price-field text, reading its digits as minor units.
///
/// `"123456"` becomes `"R$ 1.234,56"`; text without digits becomes `"R$ 0,00"`.
pub fn format_currency_input(raw: &str) -> String {
    let digits = NON_DIGIT.replace_all(raw, "");
    let significant = digits.trim_start_matches('0');
    let kept = &significant[..significant.len().min(MAX_INPUT_DIGITS)];

    // at most 15 ascii digits, always fits
    let minor_units: i64 = if kept.is_empty() { 0 } else { kept.parse().unwrap_or(0) };

    let formatted = format_amount(Decimal::new(minor_units, 2));
    debug!("Formatted price input '{}' as '{}'", raw, formatted);
    formatted
}

/// Parses a display string such as `"R$ 1.234,56"` into an exact amount.
///
/// Returns `None` when no digits remain or the remainder is not a number.
pub fn parse_currency_display(text: &str) -> Option<Decimal> {
    let stripped = NON_AMOUNT.replace_all(text, "");
    if stripped.is_empty() {
        return None;
    }

    let normalized = stripped.replacen(DECIMAL_SEPARATOR, ".", 1);
    match Decimal::from_str(&normalized) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!("Could not parse '{}' as an amount: {}", text, e);
            None
        }
    }
}

/// Renders an amount in the display convention, rounded half away from zero
/// to two decimals.
pub fn format_amount(amount: Decimal) -> String {
    let minor_units = (amount * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i128()
        .unwrap_or_default();

    let sign = if minor_units < 0 { "-" } else { "" };
    let magnitude = minor_units.unsigned_abs();

    format!(
        "{}{}{}{}{:02}",
        sign,
        CURRENCY_PREFIX,
        group_thousands(magnitude / 100),
        DECIMAL_SEPARATOR,
        magnitude % 100
    )
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }
    grouped
}
