use axum::extract::{Query, State};
use serde::Deserialize;

use crate::db::queries::categories;
use crate::error::AppResult;
use crate::handlers::response::{ok, ApiJson};
use crate::handlers::validate;
use crate::models::{Category, CategoryType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    #[serde(rename = "type")]
    pub category_type: Option<String>,
}

pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<ApiJson<Vec<Category>>> {
    let category_type = params
        .category_type
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(|t| validate::one_of(t, "type", "income, expense, or both", CategoryType::parse))
        .transpose()?;

    let conn = state.db.get()?;
    Ok(ok(categories::list_categories(&conn, category_type)?))
}
