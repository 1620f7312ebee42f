use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::db::queries::accounts;
use crate::error::{AppError, AppResult};
use crate::handlers::response::{created, ok, ApiJson};
use crate::handlers::validate;
use crate::models::{Account, AccountType, NewAccount};
use crate::money::dollars_to_cents;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub name: Option<String>,
    pub account_type: Option<String>,
    pub balance: Option<f64>,
    pub currency: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> AppResult<ApiJson<Vec<Account>>> {
    let conn = state.db.get()?;
    Ok(ok(accounts::list_active_accounts(&conn)?))
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<CreateAccountRequest>,
) -> AppResult<(StatusCode, ApiJson<Account>)> {
    let name = validate::non_empty(req.name, "name")?;
    let account_type = validate::one_of(
        &validate::required(req.account_type, "account_type")?,
        "account_type",
        "checking, savings, credit, investment, or cash",
        AccountType::parse,
    )?;
    let balance = req.balance.unwrap_or(0.0);
    if !balance.is_finite() {
        return Err(AppError::Validation("balance must be a number".into()));
    }

    let conn = state.db.get()?;
    let id = accounts::create_account(
        &conn,
        &NewAccount {
            name,
            account_type,
            balance_cents: dollars_to_cents(balance),
            currency: req
                .currency
                .map(|c| c.trim().to_uppercase())
                .filter(|c| !c.is_empty())
                .unwrap_or_else(|| "USD".into()),
        },
    )?;

    let account = accounts::get_account(&conn, id)?
        .ok_or_else(|| AppError::Internal("Created account disappeared".into()))?;

    Ok(created(account, "Account created successfully"))
}
