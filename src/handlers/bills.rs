use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries::{bills, categories};
use crate::error::{AppError, AppResult};
use crate::handlers::response::{created, ok, ApiJson};
use crate::handlers::validate;
use crate::models::{Bill, BillFrequency, NewBill};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>) -> AppResult<ApiJson<Vec<Bill>>> {
    let conn = state.db.get()?;
    Ok(ok(bills::list_bills(&conn)?))
}

#[derive(Debug, Deserialize)]
pub struct CreateBillRequest {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub amount: Option<f64>,
    pub due_date: Option<String>,
    pub frequency: Option<String>,
    pub auto_pay: Option<bool>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedBill {
    pub id: i64,
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateBillRequest>,
) -> AppResult<(StatusCode, ApiJson<CreatedBill>)> {
    let name = validate::non_empty(req.name, "name")?;
    let amount_cents = validate::positive_amount(validate::required(req.amount, "amount")?, "amount")?;
    let due_date = validate::date(&validate::required(req.due_date, "due_date")?, "due_date")?;
    let frequency = match req.frequency.as_deref() {
        Some(f) => validate::one_of(f, "frequency", "weekly, monthly, or yearly", BillFrequency::parse)?,
        None => BillFrequency::default(),
    };

    let conn = state.db.get()?;
    if let Some(category_id) = req.category_id {
        if categories::get_category(&conn, category_id)?.is_none() {
            return Err(AppError::Validation("Category not found".into()));
        }
    }

    let id = bills::create_bill(
        &conn,
        &NewBill {
            category_id: req.category_id,
            name,
            amount_cents,
            due_date,
            frequency,
            auto_pay: req.auto_pay.unwrap_or(false),
            notes: req.notes,
        },
    )?;

    Ok(created(CreatedBill { id }, "Bill created successfully"))
}
