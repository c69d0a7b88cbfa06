use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::OnceLock;

#[allow(clippy::unwrap_used)] // literal pattern
fn date_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap())
}

/// True iff `s` is exactly a valid calendar date in "YYYY-MM-DD".
/// Unpadded fields, trailing text, and impossible dates (month 13,
/// February 30) are all rejected.
pub(crate) fn validate_date(s: &str) -> bool {
    date_shape().is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

/// Parse a user-entered monetary amount. A comma is accepted as the decimal
/// separator and normalized to a point. Returns `None` unless the result is
/// a number strictly greater than zero; the store itself also accepts zero,
/// but user input must not be.
pub(crate) fn validate_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace(',', ".");
    match Decimal::from_str(&normalized) {
        Ok(amount) if amount > Decimal::ZERO => Some(amount),
        _ => None,
    }
}

#[cfg(test)]
mod tests;
