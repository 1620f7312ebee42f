use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries::goals;
use crate::error::AppResult;
use crate::handlers::response::{created, ok, ApiJson};
use crate::handlers::validate;
use crate::models::{Goal, GoalCategory, GoalPriority, NewGoal};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> AppResult<ApiJson<Vec<Goal>>> {
    let conn = state.db.get()?;
    Ok(ok(goals::list_goals(&conn)?))
}

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub target_amount: Option<f64>,
    pub current_amount: Option<f64>,
    pub target_date: Option<String>,
    pub priority: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedGoal {
    pub id: i64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateGoalRequest>,
) -> AppResult<(StatusCode, ApiJson<CreatedGoal>)> {
    let name = validate::non_empty(req.name, "name")?;
    let category = validate::one_of(
        &validate::required(req.category, "category")?,
        "category",
        "emergency_fund, vacation, home_purchase, retirement, education, or other",
        GoalCategory::parse,
    )?;
    let target_amount_cents = validate::positive_amount(
        validate::required(req.target_amount, "target_amount")?,
        "target_amount",
    )?;
    let current_amount_cents =
        validate::non_negative_amount(req.current_amount.unwrap_or(0.0), "current_amount")?;
    let priority = match req.priority.as_deref() {
        Some(p) => validate::one_of(p, "priority", "low, medium, or high", GoalPriority::parse)?,
        None => GoalPriority::default(),
    };
    let target_date = validate::optional_date(req.target_date, "target_date")?;

    let conn = state.db.get()?;
    let id = goals::create_goal(
        &conn,
        &NewGoal {
            name,
            category,
            target_amount_cents,
            current_amount_cents,
            target_date,
            priority,
            description: req.description,
        },
    )?;

    Ok(created(CreatedGoal { id }, "Goal created successfully"))
}
