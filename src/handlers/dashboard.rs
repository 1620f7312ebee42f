use axum::extract::State;
use serde::Serialize;
use tracing::debug;

use crate::db::queries::transactions::{self, TransactionFilter, TransactionStats};
use crate::error::AppResult;
use crate::handlers::response::{ok, ApiJson};
use crate::models::TransactionWithRelations;
use crate::state::AppState;

const RECENT_TRANSACTIONS: i64 = 5;

#[derive(Debug, Serialize)]
pub struct DashboardOverview {
    pub summary: TransactionStats,
    pub recent_transactions: Vec<TransactionWithRelations>,
}

pub async fn overview(State(state): State<AppState>) -> AppResult<ApiJson<DashboardOverview>> {
    debug!("Loading dashboard overview");
    let conn = state.db.get()?;

    let summary = transactions::transaction_stats(&conn, None, None)?;
    let filter = TransactionFilter {
        limit: Some(RECENT_TRANSACTIONS),
        ..Default::default()
    };
    let recent_transactions = transactions::list_transactions(&conn, &filter)?;

    Ok(ok(DashboardOverview {
        summary,
        recent_transactions,
    }))
}
