use rust_decimal::Decimal;

use super::Kind;

/// Raw aggregation results for the balance report. Percentages and bar
/// rendering are left to the presentation layer.
#[derive(Debug, Clone)]
pub struct BalanceSummary {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub balance: Decimal,
    pub by_category: Vec<CategoryTotal>,
}

/// Sum of all transaction amounts recorded against one category.
#[derive(Debug, Clone)]
pub struct CategoryTotal {
    pub kind: Kind,
    pub name: String,
    pub total: Decimal,
}
