use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries::debts;
use crate::error::{AppError, AppResult};
use crate::handlers::response::{created, ok, ApiJson};
use crate::handlers::validate;
use crate::models::{Debt, DebtType, NewDebt};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> AppResult<ApiJson<Vec<Debt>>> {
    let conn = state.db.get()?;
    Ok(ok(debts::list_debts(&conn)?))
}

#[derive(Debug, Deserialize)]
pub struct CreateDebtRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub debt_type: Option<String>,
    pub balance: Option<f64>,
    pub interest_rate: Option<f64>,
    pub min_payment: Option<f64>,
    pub due_date: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedDebt {
    pub id: i64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateDebtRequest>,
) -> AppResult<(StatusCode, ApiJson<CreatedDebt>)> {
    let name = validate::non_empty(req.name, "name")?;
    let debt_type = validate::one_of(
        &validate::required(req.debt_type, "type")?,
        "type",
        "credit_card, auto_loan, mortgage, student_loan, personal_loan, or other",
        DebtType::parse,
    )?;
    let balance_cents =
        validate::non_negative_amount(validate::required(req.balance, "balance")?, "balance")?;
    let interest_rate = validate::required(req.interest_rate, "interest_rate")?;
    if !(0.0..=100.0).contains(&interest_rate) {
        return Err(AppError::Validation(
            "interest_rate must be between 0 and 100".into(),
        ));
    }
    let min_payment_cents = validate::non_negative_amount(
        validate::required(req.min_payment, "min_payment")?,
        "min_payment",
    )?;
    let due_date = validate::optional_date(req.due_date, "due_date")?;

    let conn = state.db.get()?;
    let id = debts::create_debt(
        &conn,
        &NewDebt {
            name,
            debt_type,
            balance_cents,
            interest_rate,
            min_payment_cents,
            due_date,
            notes: req.notes,
        },
    )?;

    Ok(created(CreatedDebt { id }, "Debt created successfully"))
}
