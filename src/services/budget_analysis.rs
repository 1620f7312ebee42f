use serde::Serialize;

use crate::models::MonthlyTrendPoint;
use crate::money::{cents_to_dollars, round2};
use crate::services::budget_status::{BudgetStatus, SpendStatus};

pub const OVER_BUDGET_PENALTY: u32 = 20;
pub const WARNING_PENALTY: u32 = 10;

/// 100 minus 20 per over-budget and 10 per warning budget, floored at 0.
pub fn health_score(over_budget_count: usize, warning_count: usize) -> u8 {
    let penalty = (over_budget_count as u32)
        .saturating_mul(OVER_BUDGET_PENALTY)
        .saturating_add((warning_count as u32).saturating_mul(WARNING_PENALTY));
    100u32.saturating_sub(penalty) as u8
}

#[derive(Debug, Clone, Serialize)]
pub struct PeriodAnalysis {
    pub total_budgets: usize,
    pub active_budgets: usize,
    pub total_budgeted: f64,
    pub total_spent: f64,
    pub total_remaining: f64,
    pub percentage_spent: f64,
    pub over_budget_count: usize,
    pub warning_count: usize,
    pub health_score: u8,
    pub avg_utilization: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetAnalysis {
    pub current_period: PeriodAnalysis,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

/// Roll budget statuses up into period totals. Inactive budgets are
/// ignored entirely.
pub fn analyze_period(statuses: &[BudgetStatus]) -> PeriodAnalysis {
    let active: Vec<&BudgetStatus> = statuses.iter().filter(|s| s.budget.budget.is_active).collect();

    let budgeted_cents: i64 = active.iter().map(|s| s.budget.budget.amount_cents).sum();
    let spent_cents: i64 = active.iter().map(|s| s.spent_cents).sum();
    let over_budget_count = active
        .iter()
        .filter(|s| s.status == SpendStatus::OverBudget)
        .count();
    let warning_count = active
        .iter()
        .filter(|s| s.status == SpendStatus::Warning)
        .count();

    let percentage_spent = if budgeted_cents == 0 {
        0.0
    } else {
        round2(spent_cents as f64 / budgeted_cents as f64 * 100.0)
    };

    PeriodAnalysis {
        total_budgets: active.len(),
        active_budgets: active.len(),
        total_budgeted: cents_to_dollars(budgeted_cents),
        total_spent: cents_to_dollars(spent_cents),
        total_remaining: cents_to_dollars(budgeted_cents - spent_cents),
        percentage_spent,
        over_budget_count,
        warning_count,
        health_score: health_score(over_budget_count, warning_count),
        avg_utilization: percentage_spent,
    }
}

pub fn analyze(statuses: &[BudgetStatus], monthly_trend: Vec<MonthlyTrendPoint>) -> BudgetAnalysis {
    BudgetAnalysis {
        current_period: analyze_period(statuses),
        monthly_trend,
    }
}
