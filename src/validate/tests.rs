#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::*;

// ── validate_date ─────────────────────────────────────────────

#[test]
fn test_valid_dates() {
    assert!(validate_date("2024-03-01"));
    assert!(validate_date("2024-12-31"));
    assert!(validate_date("2000-02-29")); // leap year
    assert!(validate_date("1999-01-01"));
}

#[test]
fn test_invalid_calendar_dates() {
    assert!(!validate_date("2024-13-01")); // month 13
    assert!(!validate_date("2024-02-30"));
    assert!(!validate_date("2023-02-29")); // not a leap year
    assert!(!validate_date("2024-00-10"));
    assert!(!validate_date("2024-04-31"));
}

#[test]
fn test_wrong_shape_rejected() {
    assert!(!validate_date(""));
    assert!(!validate_date("2024-3-1")); // unpadded
    assert!(!validate_date("24-03-01"));
    assert!(!validate_date("2024/03/01"));
    assert!(!validate_date("01-03-2024"));
    assert!(!validate_date("2024-03-01 "));
    assert!(!validate_date("2024-03-01x"));
    assert!(!validate_date("2024-03-01T00:00:00"));
}

// ── validate_amount ───────────────────────────────────────────

#[test]
fn test_plain_amounts() {
    assert_eq!(validate_amount("5000"), Some(dec!(5000)));
    assert_eq!(validate_amount("12.50"), Some(dec!(12.50)));
    assert_eq!(validate_amount("0.01"), Some(dec!(0.01)));
}

#[test]
fn test_comma_decimal_separator() {
    assert_eq!(validate_amount("5000,50"), Some(dec!(5000.50)));
    assert_eq!(validate_amount("1,5"), Some(dec!(1.5)));
}

#[test]
fn test_surrounding_whitespace() {
    assert_eq!(validate_amount(" 250 "), Some(dec!(250)));
}

#[test]
fn test_zero_and_negative_rejected() {
    assert_eq!(validate_amount("0"), None);
    assert_eq!(validate_amount("0,00"), None);
    assert_eq!(validate_amount("-5"), None);
    assert_eq!(validate_amount("-0.01"), None);
}

#[test]
fn test_garbage_rejected() {
    assert_eq!(validate_amount(""), None);
    assert_eq!(validate_amount("abc"), None);
    assert_eq!(validate_amount("Rp5000"), None);
    assert_eq!(validate_amount("1.234.567"), None); // thousand separators
    assert_eq!(validate_amount("5 000"), None);
}
