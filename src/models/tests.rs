#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ── Kind ──────────────────────────────────────────────────────

#[test]
fn test_kind_parse() {
    assert_eq!(Kind::parse("income"), Some(Kind::Income));
    assert_eq!(Kind::parse("expense"), Some(Kind::Expense));
    assert_eq!(Kind::parse("INCOME"), Some(Kind::Income));
    assert_eq!(Kind::parse("Expense"), Some(Kind::Expense));
}

#[test]
fn test_kind_parse_rejects_unknown() {
    assert_eq!(Kind::parse(""), None);
    assert_eq!(Kind::parse("transfer"), None);
    assert_eq!(Kind::parse("incomes"), None);
    assert_eq!(Kind::parse(" income"), None);
}

#[test]
fn test_kind_roundtrip() {
    for kind in [Kind::Income, Kind::Expense] {
        assert_eq!(Kind::parse(kind.as_str()), Some(kind));
    }
}

#[test]
fn test_kind_display() {
    assert_eq!(format!("{}", Kind::Income), "income");
    assert_eq!(format!("{}", Kind::Expense), "expense");
}

// ── Transaction ───────────────────────────────────────────────

fn make_txn(kind: Kind, amount: Decimal) -> Transaction {
    Transaction {
        id: None,
        kind,
        amount,
        category_id: 1,
        description: None,
        date: "2024-03-01".into(),
        created_at: String::new(),
    }
}

#[test]
fn test_income_helpers() {
    let txn = make_txn(Kind::Income, dec!(100.00));
    assert!(txn.is_income());
    assert!(!txn.is_expense());
}

#[test]
fn test_expense_helpers() {
    let txn = make_txn(Kind::Expense, dec!(50.00));
    assert!(!txn.is_income());
    assert!(txn.is_expense());
}

#[test]
fn test_kind_follows_field_not_amount() {
    // The discriminator is the stored kind, never the amount's sign.
    let txn = make_txn(Kind::Expense, Decimal::ZERO);
    assert!(txn.is_expense());
    assert!(!txn.is_income());
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_display() {
    let cat = Category {
        id: Some(3),
        name: "Makanan".into(),
        kind: Kind::Expense,
        created_at: String::new(),
    };
    assert_eq!(format!("{cat}"), "Makanan (expense)");
}
