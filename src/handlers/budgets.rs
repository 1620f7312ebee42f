use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::date_utils::{self, days_ago, format_date, months_ago};
use crate::db::queries::{budgets, categories, spending};
use crate::error::{AppError, AppResult};
use crate::handlers::response::{created, ok, ok_with_message, ApiJson};
use crate::handlers::validate;
use crate::models::budget::DEFAULT_ALERT_THRESHOLD;
use crate::models::{
    BudgetPeriod, BudgetUpdate, BudgetWithCategory, CategoryWithSpending, DailySpending, NewBudget,
    WindowTotals,
};
use crate::money::{format_cents, round2};
use crate::services::budget_analysis::{self, BudgetAnalysis};
use crate::services::budget_status::{derive_status, BudgetStatus};
use crate::services::recommendations::{self, RecommendationReport};
use crate::services::templates::{self, BudgetTemplate};
use crate::state::AppState;

const PERIODS: &str = "weekly, monthly, or yearly";
const RECENT_ACTIVITY_DAYS: i64 = 30;
const DAILY_BREAKDOWN_LIMIT: u32 = 30;

fn parse_period(value: &str) -> AppResult<BudgetPeriod> {
    validate::one_of(value, "period", PERIODS, BudgetPeriod::parse)
}

fn budget_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Budget {id} not found"))
}

/// Start of the trailing window budget status is derived over.
fn status_window_start(state: &AppState) -> String {
    format_date(days_ago(
        date_utils::today(),
        state.config.insights.status_window_days,
    ))
}

#[derive(Debug, Deserialize)]
pub struct BudgetListParams {
    pub active: Option<bool>,
    pub period: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<BudgetListParams>,
) -> AppResult<ApiJson<Vec<BudgetStatus>>> {
    let conn = state.db.get()?;

    let filter = budgets::BudgetFilter {
        active: params.active,
        period: params
            .period
            .as_deref()
            .filter(|p| !p.is_empty())
            .map(parse_period)
            .transpose()?,
    };

    let today = date_utils::today();
    let statuses = budgets::list_budgets(&conn, &filter, &status_window_start(&state))?
        .into_iter()
        .map(|(budget, totals)| derive_status(budget, totals, today))
        .collect();

    Ok(ok(statuses))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiJson<BudgetStatus>> {
    let conn = state.db.get()?;

    let budget = budgets::get_budget(&conn, id)?.ok_or_else(|| budget_not_found(id))?;
    let totals = match budget.budget.category_id {
        Some(category_id) => {
            spending::budget_window_totals(&conn, category_id, &status_window_start(&state), None)?
        }
        None => WindowTotals::default(),
    };

    Ok(ok(derive_status(budget, totals, date_utils::today())))
}

#[derive(Debug, Deserialize)]
pub struct CreateBudgetRequest {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub alert_threshold: Option<f64>,
    pub notes: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<CreateBudgetRequest>,
) -> AppResult<(StatusCode, ApiJson<BudgetWithCategory>)> {
    let category_id = validate::required(req.category_id, "category_id")?;
    let amount_cents = validate::positive_amount(validate::required(req.amount, "amount")?, "amount")?;
    let period = parse_period(req.period.as_deref().unwrap_or("monthly"))?;
    let start_date = match req.start_date {
        Some(d) => validate::date(&d, "start_date")?,
        None => format_date(date_utils::today()),
    };
    let end_date = validate::optional_date(req.end_date, "end_date")?;
    let alert_threshold =
        validate::alert_threshold(req.alert_threshold.unwrap_or(DEFAULT_ALERT_THRESHOLD))?;

    let conn = state.db.get()?;

    let category = categories::get_category(&conn, category_id)?
        .ok_or_else(|| AppError::Validation("Category not found".into()))?;
    if !category.category_type.accepts_expenses() {
        return Err(AppError::Validation(format!(
            "{} is an income category and cannot be budgeted",
            category.name
        )));
    }

    if budgets::find_active_budget(&conn, category_id, Some(period))?.is_some() {
        return Err(AppError::Conflict(format!(
            "Active {period} budget already exists for {}",
            category.name
        )));
    }

    let name = req
        .name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| format!("{} {} Budget", category.name, period.title()));

    let new_budget = NewBudget {
        category_id,
        name,
        amount_cents,
        period,
        start_date,
        end_date,
        description: req.description.unwrap_or_default(),
        is_active: req.is_active.unwrap_or(true),
        alert_threshold,
        notes: req.notes.unwrap_or_default(),
    };

    let id = budgets::create_budget(&conn, &new_budget)?;
    let budget = budgets::get_budget(&conn, id)?
        .ok_or_else(|| AppError::Internal("Created budget disappeared".into()))?;

    Ok(created(budget, "Budget created successfully"))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBudgetRequest {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub period: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub alert_threshold: Option<f64>,
    pub notes: Option<String>,
}

/// Partial update. Absent fields keep their stored value, except `end_date`
/// which is always replaced (omitting it makes the budget open-ended).
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    axum::Json(req): axum::Json<UpdateBudgetRequest>,
) -> AppResult<ApiJson<BudgetWithCategory>> {
    let conn = state.db.get()?;

    if budgets::get_budget(&conn, id)?.is_none() {
        return Err(budget_not_found(id));
    }

    if let Some(category_id) = req.category_id {
        if categories::get_category(&conn, category_id)?.is_none() {
            return Err(AppError::Validation("Category not found".into()));
        }
    }

    let update = BudgetUpdate {
        category_id: req.category_id,
        name: req.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty()),
        amount_cents: req
            .amount
            .map(|a| validate::positive_amount(a, "amount"))
            .transpose()?,
        period: req.period.as_deref().map(parse_period).transpose()?,
        start_date: req
            .start_date
            .map(|d| validate::date(&d, "start_date"))
            .transpose()?,
        end_date: validate::optional_date(req.end_date, "end_date")?,
        description: req.description,
        is_active: req.is_active,
        alert_threshold: req
            .alert_threshold
            .map(validate::alert_threshold)
            .transpose()?,
        notes: req.notes,
    };

    budgets::update_budget(&conn, id, &update)?;
    let budget = budgets::get_budget(&conn, id)?.ok_or_else(|| budget_not_found(id))?;

    Ok(ok_with_message(budget, "Budget updated successfully"))
}

#[derive(Debug, Serialize)]
pub struct DeletedBudget {
    pub id: i64,
    pub name: String,
    pub amount: String,
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiJson<DeletedBudget>> {
    let conn = state.db.get()?;

    let budget = budgets::get_budget(&conn, id)?.ok_or_else(|| budget_not_found(id))?;
    if !budgets::deactivate_budget(&conn, id)? {
        return Err(budget_not_found(id));
    }

    let deleted = DeletedBudget {
        id,
        name: budget.budget.name,
        amount: format_cents(budget.budget.amount_cents),
    };

    Ok(ok_with_message(deleted, "Budget deleted successfully"))
}

pub async fn analysis(State(state): State<AppState>) -> AppResult<ApiJson<BudgetAnalysis>> {
    let conn = state.db.get()?;
    let insights = &state.config.insights;
    let today = date_utils::today();

    let filter = budgets::BudgetFilter {
        active: Some(true),
        ..Default::default()
    };
    let statuses: Vec<BudgetStatus> =
        budgets::list_budgets(&conn, &filter, &status_window_start(&state))?
            .into_iter()
            .map(|(budget, totals)| derive_status(budget, totals, today))
            .collect();

    let trend_start = format_date(date_utils::month_start(months_ago(
        today,
        insights.trend_months.saturating_sub(1),
    )));
    let trend = spending::monthly_trend(&conn, &trend_start, insights.trend_months)?;

    Ok(ok(budget_analysis::analyze(&statuses, trend)))
}

pub async fn recommendations(
    State(state): State<AppState>,
) -> AppResult<ApiJson<RecommendationReport>> {
    let conn = state.db.get()?;
    let insights = &state.config.insights;

    let since = format_date(months_ago(date_utils::today(), insights.history_months));
    let patterns = spending::category_patterns(&conn, &since)?;
    let report = recommendations::recommend(&patterns, &insights.rules);

    tracing::debug!(
        categories = patterns.len(),
        returned = report.recommendations.len(),
        "Generated budget recommendations"
    );

    Ok(ok(report))
}

pub async fn list_templates() -> ApiJson<&'static [BudgetTemplate]> {
    ok(templates::all())
}

pub async fn spending_categories(
    State(state): State<AppState>,
) -> AppResult<ApiJson<Vec<CategoryWithSpending>>> {
    let conn = state.db.get()?;
    let today = date_utils::today();

    let history_start = format_date(months_ago(today, state.config.insights.history_months));
    let recent_start = format_date(days_ago(today, RECENT_ACTIVITY_DAYS));

    Ok(ok(spending::category_spending_summary(
        &conn,
        &history_start,
        &recent_start,
    )?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyTemplateRequest {
    pub template_id: Option<String>,
    pub total_budget: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedBudget {
    pub id: i64,
    pub category: &'static str,
    pub amount: String,
    pub percentage: u32,
}

#[derive(Debug, Serialize)]
pub struct AppliedTemplate {
    pub template: &'static str,
    pub created_budgets: Vec<CreatedBudget>,
    pub total_budget: f64,
}

/// Create one monthly budget per template category. Categories that do not
/// exist, or already have an active budget, are skipped.
pub async fn apply_template(
    State(state): State<AppState>,
    axum::Json(req): axum::Json<ApplyTemplateRequest>,
) -> AppResult<ApiJson<AppliedTemplate>> {
    let template_id = validate::non_empty(req.template_id, "templateId")?;
    let total_budget = validate::required(req.total_budget, "totalBudget")?;
    let total_cents = validate::positive_amount(total_budget, "totalBudget")?;

    let template = templates::find(&template_id)
        .ok_or_else(|| AppError::NotFound(format!("Template {template_id} not found")))?;

    let mut conn = state.db.get()?;
    let tx = conn.transaction()?;
    let today = format_date(date_utils::today());
    let mut created_budgets = Vec::new();

    for allocation in template.allocate(total_cents) {
        let Some(category) = categories::find_expense_category_by_name(&tx, allocation.category)?
        else {
            tracing::debug!(category = allocation.category, "Template category missing, skipped");
            continue;
        };
        if budgets::find_active_budget(&tx, category.id, None)?.is_some() {
            tracing::debug!(category = allocation.category, "Category already budgeted, skipped");
            continue;
        }

        let id = budgets::create_budget(
            &tx,
            &NewBudget {
                category_id: category.id,
                name: format!("{} Budget", allocation.category),
                amount_cents: allocation.amount_cents,
                period: BudgetPeriod::Monthly,
                start_date: today.clone(),
                end_date: None,
                description: String::new(),
                is_active: true,
                alert_threshold: DEFAULT_ALERT_THRESHOLD,
                notes: String::new(),
            },
        )?;

        created_budgets.push(CreatedBudget {
            id,
            category: allocation.category,
            amount: format_cents(allocation.amount_cents),
            percentage: allocation.percentage,
        });
    }
    tx.commit()?;

    tracing::info!(
        template = template.id,
        created = created_budgets.len(),
        "Applied budget template"
    );

    Ok(ok_with_message(
        AppliedTemplate {
            template: template.id,
            created_budgets,
            total_budget: round2(total_budget),
        },
        "Template applied successfully",
    ))
}

#[derive(Debug, Serialize)]
pub struct BudgetPerformance {
    pub budget: BudgetStatus,
    pub avg_transaction: f64,
    pub daily_breakdown: Vec<DailySpending>,
}

/// Status over the budget's own start/end window rather than the trailing
/// window, with a per-day breakdown of the latest days.
pub async fn performance(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiJson<BudgetPerformance>> {
    let conn = state.db.get()?;

    let budget = budgets::get_budget(&conn, id)?.ok_or_else(|| budget_not_found(id))?;
    let start = budget.budget.start_date.clone();
    let end = budget.budget.end_date.clone();

    let (totals, daily_breakdown) = match budget.budget.category_id {
        Some(category_id) => (
            spending::budget_window_totals(&conn, category_id, &start, end.as_deref())?,
            spending::daily_breakdown(
                &conn,
                category_id,
                &start,
                end.as_deref(),
                DAILY_BREAKDOWN_LIMIT,
            )?,
        ),
        None => (WindowTotals::default(), Vec::new()),
    };

    Ok(ok(BudgetPerformance {
        avg_transaction: round2(totals.avg_transaction_cents() / 100.0),
        budget: derive_status(budget, totals, date_utils::today()),
        daily_breakdown,
    }))
}
