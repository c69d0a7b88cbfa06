use rust_decimal::Decimal;

use super::Kind;

#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: Option<i64>,
    pub kind: Kind,
    pub amount: Decimal,
    pub category_id: i64,
    pub description: Option<String>,
    /// Calendar date as "YYYY-MM-DD"; lexical order is chronological order.
    pub date: String,
    pub created_at: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == Kind::Expense
    }
}

/// A transaction joined with its category's name and kind, as returned by
/// every read path.
#[derive(Debug, Clone)]
pub struct TransactionWithCategory {
    pub transaction: Transaction,
    pub category_name: String,
    pub category_kind: Kind,
}
