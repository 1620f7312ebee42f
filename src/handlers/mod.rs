pub mod accounts;
pub mod bills;
pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod debts;
pub mod goals;
pub mod response;
pub mod transactions;
pub mod validate;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::json;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Reference data
        .route("/api/categories", get(categories::list))
        .route("/api/accounts", get(accounts::list).post(accounts::create))
        // Transactions
        .route(
            "/api/transactions",
            get(transactions::list).post(transactions::create),
        )
        .route("/api/transactions/stats/summary", get(transactions::stats))
        .route(
            "/api/transactions/:id",
            get(transactions::show)
                .put(transactions::update)
                .delete(transactions::delete),
        )
        // Budgets and insights
        .route("/api/budgets", get(budgets::list).post(budgets::create))
        .route("/api/budgets/analysis", get(budgets::analysis))
        .route("/api/budgets/recommendations", get(budgets::recommendations))
        .route("/api/budgets/templates", get(budgets::list_templates))
        .route("/api/budgets/categories", get(budgets::spending_categories))
        .route(
            "/api/budgets/apply-template",
            axum::routing::post(budgets::apply_template),
        )
        .route(
            "/api/budgets/:id",
            get(budgets::show)
                .put(budgets::update)
                .delete(budgets::delete),
        )
        .route("/api/budgets/:id/performance", get(budgets::performance))
        // Planning
        .route("/api/bills", get(bills::list).post(bills::create))
        .route("/api/debts", get(debts::list).post(debts::create))
        .route("/api/goals", get(goals::list).post(goals::create))
        .route("/api/dashboard/overview", get(dashboard::overview))
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}

pub async fn fallback() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Route not found" })),
    )
}
