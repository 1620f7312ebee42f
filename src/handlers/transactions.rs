use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::db::queries::transactions::{self, TransactionFilter, TransactionStats};
use crate::db::queries::{accounts, categories};
use crate::error::{AppError, AppResult};
use crate::handlers::response::{created, ok, ok_with_message, ApiJson};
use crate::handlers::validate;
use crate::models::{NewTransaction, TransactionType, TransactionWithRelations};
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: i64 = 50;
const MAX_PAGE_SIZE: i64 = 500;
const TRANSACTION_TYPES: &str = "income or expense";

fn transaction_not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Transaction {id} not found"))
}

#[derive(Debug, Deserialize)]
pub struct TransactionListParams {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub category_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

#[derive(Debug, Serialize)]
pub struct TransactionPage {
    pub transactions: Vec<TransactionWithRelations>,
    pub pagination: Pagination,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<TransactionListParams>,
) -> AppResult<ApiJson<TransactionPage>> {
    let page = params.page.unwrap_or(1).max(1);
    let limit = params
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let filter = TransactionFilter {
        transaction_type: params
            .transaction_type
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| validate::one_of(t, "type", TRANSACTION_TYPES, TransactionType::parse))
            .transpose()?,
        category_id: params.category_id,
        from_date: validate::optional_date(params.start_date, "start_date")?,
        to_date: validate::optional_date(params.end_date, "end_date")?,
        limit: Some(limit),
        offset: Some((page - 1) * limit),
    };

    let conn = state.db.get()?;
    let total = transactions::count_transactions(&conn, &filter)?;
    let transactions = transactions::list_transactions(&conn, &filter)?;

    Ok(ok(TransactionPage {
        transactions,
        pagination: Pagination {
            page,
            limit,
            total,
            pages: (total + limit - 1) / limit,
        },
    }))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiJson<TransactionWithRelations>> {
    let conn = state.db.get()?;
    let tx = transactions::get_transaction(&conn, id)?.ok_or_else(|| transaction_not_found(id))?;
    Ok(ok(tx))
}

#[derive(Debug, Deserialize)]
pub struct TransactionRequest {
    pub account_id: Option<i64>,
    pub category_id: Option<i64>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub transaction_type: Option<String>,
    pub date: Option<String>,
    pub tags: Option<String>,
}

impl TransactionRequest {
    fn validate(self, conn: &Connection) -> AppResult<NewTransaction> {
        let category_id = validate::required(self.category_id, "category_id")?;
        let amount_cents =
            validate::positive_amount(validate::required(self.amount, "amount")?, "amount")?;
        let transaction_type = validate::one_of(
            &validate::required(self.transaction_type, "transaction_type")?,
            "transaction_type",
            TRANSACTION_TYPES,
            TransactionType::parse,
        )?;
        let date = validate::date(&validate::required(self.date, "date")?, "date")?;

        if categories::get_category(conn, category_id)?.is_none() {
            return Err(AppError::Validation("Category not found".into()));
        }
        if let Some(account_id) = self.account_id {
            if accounts::get_account(conn, account_id)?.is_none() {
                return Err(AppError::Validation("Account not found".into()));
            }
        }

        Ok(NewTransaction {
            account_id: self.account_id,
            category_id,
            amount_cents,
            description: self.description.unwrap_or_default().trim().to_string(),
            transaction_type,
            date,
            tags: self.tags.filter(|t| !t.trim().is_empty()),
        })
    }
}

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<TransactionRequest>,
) -> AppResult<(StatusCode, ApiJson<TransactionWithRelations>)> {
    let conn = state.db.get()?;
    let new_tx = req.validate(&conn)?;

    let id = transactions::create_transaction(&conn, &new_tx)?;
    let tx = transactions::get_transaction(&conn, id)?
        .ok_or_else(|| AppError::Internal("Created transaction disappeared".into()))?;

    Ok(created(tx, "Transaction created successfully"))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<TransactionRequest>,
) -> AppResult<ApiJson<TransactionWithRelations>> {
    let conn = state.db.get()?;
    let new_tx = req.validate(&conn)?;

    if !transactions::update_transaction(&conn, id, &new_tx)? {
        return Err(transaction_not_found(id));
    }
    let tx = transactions::get_transaction(&conn, id)?.ok_or_else(|| transaction_not_found(id))?;

    Ok(ok_with_message(tx, "Transaction updated successfully"))
}

#[derive(Debug, Serialize)]
pub struct DeletedTransaction {
    pub id: i64,
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<ApiJson<DeletedTransaction>> {
    let conn = state.db.get()?;
    if !transactions::delete_transaction(&conn, id)? {
        return Err(transaction_not_found(id));
    }
    Ok(ok_with_message(
        DeletedTransaction { id },
        "Transaction deleted successfully",
    ))
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

pub async fn stats(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> AppResult<ApiJson<TransactionStats>> {
    let from = validate::optional_date(params.start_date, "start_date")?;
    let to = validate::optional_date(params.end_date, "end_date")?;

    let conn = state.db.get()?;
    Ok(ok(transactions::transaction_stats(
        &conn,
        from.as_deref(),
        to.as_deref(),
    )?))
}
