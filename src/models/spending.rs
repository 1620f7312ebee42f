use serde::Serialize;

/// Total expense spend of one category in one calendar month (`YYYY-MM`).
/// Only months with at least one transaction are ever produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySpend {
    pub month: String,
    pub total_cents: i64,
}

/// Spending history of an expense category, as fed to the recommendation
/// engine.
#[derive(Debug, Clone)]
pub struct CategorySpendingPattern {
    pub category_id: i64,
    pub category: String,
    pub color: String,
    pub monthly_totals: Vec<MonthlySpend>,
    /// Amount of the category's active budget, 0 when it has none.
    pub current_budget_cents: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTrendPoint {
    pub month: String,
    pub spent: f64,
    pub transactions: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailySpending {
    pub date: String,
    pub spent: f64,
    pub transactions: i64,
}

/// Aggregate of expense transactions in one category over a window.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WindowTotals {
    pub spent_cents: i64,
    pub transaction_count: i64,
}

impl WindowTotals {
    pub fn avg_transaction_cents(&self) -> f64 {
        if self.transaction_count == 0 {
            return 0.0;
        }
        self.spent_cents as f64 / self.transaction_count as f64
    }
}
