use chrono::NaiveDate;
use serde::Serialize;

use crate::date_utils;
use crate::models::{BudgetWithCategory, WindowTotals};
use crate::money::{cents_to_dollars, round2};

/// Where a budget stands relative to its amount and alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendStatus {
    OnTrack,
    Warning,
    OverBudget,
}

impl SpendStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpendStatus::OnTrack => "on_track",
            SpendStatus::Warning => "warning",
            SpendStatus::OverBudget => "over_budget",
        }
    }
}

impl std::fmt::Display for SpendStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A budget together with the spend derived for it at request time.
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus {
    #[serde(flatten)]
    pub budget: BudgetWithCategory,
    pub spent: f64,
    pub spent_cents: i64,
    /// Clamped at zero for display.
    pub remaining: f64,
    pub remaining_cents: i64,
    pub percentage_used: f64,
    pub status: SpendStatus,
    pub days_remaining: Option<i64>,
    pub transaction_count: i64,
}

/// Percent of the budget consumed, rounded to two places. A zero amount
/// yields 0 rather than dividing by zero.
pub fn percentage_used(spent_cents: i64, amount_cents: i64) -> f64 {
    if amount_cents == 0 {
        return 0.0;
    }
    round2(spent_cents as f64 / amount_cents as f64 * 100.0)
}

/// Classify spend against a budget. Over-budget is decided on the exact
/// amounts; warning on the rounded percentage.
pub fn classify(spent_cents: i64, amount_cents: i64, alert_threshold: f64) -> SpendStatus {
    if amount_cents == 0 {
        return SpendStatus::OnTrack;
    }
    if spent_cents > amount_cents {
        return SpendStatus::OverBudget;
    }
    if percentage_used(spent_cents, amount_cents) >= alert_threshold {
        SpendStatus::Warning
    } else {
        SpendStatus::OnTrack
    }
}

/// Whole days from `today` until `end_date`, never negative. `None` for
/// open-ended budgets or an unreadable date.
pub fn days_remaining(end_date: Option<&str>, today: NaiveDate) -> Option<i64> {
    let end = date_utils::parse_date(end_date?)?;
    Some((end - today).num_days().max(0))
}

pub fn derive_status(
    budget: BudgetWithCategory,
    totals: WindowTotals,
    today: NaiveDate,
) -> BudgetStatus {
    let amount_cents = budget.budget.amount_cents;
    let spent_cents = totals.spent_cents;
    let remaining_cents = (amount_cents - spent_cents).max(0);
    let percentage = percentage_used(spent_cents, amount_cents);
    let status = classify(spent_cents, amount_cents, budget.budget.alert_threshold);
    let days = days_remaining(budget.budget.end_date.as_deref(), today);

    BudgetStatus {
        budget,
        spent: cents_to_dollars(spent_cents),
        spent_cents,
        remaining: cents_to_dollars(remaining_cents),
        remaining_cents,
        percentage_used: percentage,
        status,
        days_remaining: days,
        transaction_count: totals.transaction_count,
    }
}
