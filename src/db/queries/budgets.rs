use crate::models::budget::{Budget, BudgetPeriod, BudgetUpdate, BudgetWithCategory, NewBudget};
use crate::models::WindowTotals;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, info};

#[derive(Debug, Default)]
pub struct BudgetFilter {
    pub active: Option<bool>,
    pub period: Option<BudgetPeriod>,
}

const BUDGET_COLUMNS: &str = "b.id, b.category_id, b.name, b.amount_cents, b.period, b.start_date,
     b.end_date, b.description, b.is_active, b.alert_threshold, b.notes,
     b.created_at, b.updated_at, c.name, c.color, c.icon";

fn map_budget(row: &Row) -> rusqlite::Result<BudgetWithCategory> {
    let period: String = row.get(4)?;
    Ok(BudgetWithCategory {
        budget: Budget {
            id: row.get(0)?,
            category_id: row.get(1)?,
            name: row.get(2)?,
            amount_cents: row.get(3)?,
            period: BudgetPeriod::parse(&period).unwrap_or(BudgetPeriod::Monthly),
            start_date: row.get(5)?,
            end_date: row.get(6)?,
            description: row.get(7)?,
            is_active: row.get(8)?,
            alert_threshold: row.get(9)?,
            notes: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        },
        category_name: row.get(13)?,
        category_color: row.get(14)?,
        category_icon: row.get(15)?,
    })
}

fn map_budget_with_totals(row: &Row) -> rusqlite::Result<(BudgetWithCategory, WindowTotals)> {
    Ok((
        map_budget(row)?,
        WindowTotals {
            spent_cents: row.get(16)?,
            transaction_count: row.get(17)?,
        },
    ))
}

/// Budgets joined with their category and the expense spend of that
/// category since `window_start`. Budgets without a category, or without
/// matching transactions, report zero spend.
pub fn list_budgets(
    conn: &Connection,
    filter: &BudgetFilter,
    window_start: &str,
) -> rusqlite::Result<Vec<(BudgetWithCategory, WindowTotals)>> {
    let mut sql = format!(
        "SELECT {BUDGET_COLUMNS},
                COALESCE(spent.total_cents, 0), COALESCE(spent.transaction_count, 0)
         FROM budgets b
         LEFT JOIN categories c ON b.category_id = c.id
         LEFT JOIN (
             SELECT category_id, SUM(amount_cents) AS total_cents, COUNT(*) AS transaction_count
             FROM transactions
             WHERE transaction_type = 'expense' AND date >= ?
             GROUP BY category_id
         ) spent ON b.category_id = spent.category_id
         WHERE 1=1"
    );
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(window_start.to_string())];

    if let Some(active) = filter.active {
        sql.push_str(" AND b.is_active = ?");
        params_vec.push(Box::new(active));
    }
    if let Some(period) = filter.period {
        sql.push_str(" AND b.period = ?");
        params_vec.push(Box::new(period.as_str()));
    }
    sql.push_str(" ORDER BY b.created_at DESC, b.id DESC");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let budgets: Vec<_> = stmt
        .query_map(params_refs.as_slice(), map_budget_with_totals)?
        .filter_map(|b| b.ok())
        .collect();

    debug!(count = budgets.len(), window_start, "Listed budgets");
    Ok(budgets)
}

pub fn get_budget(conn: &Connection, id: i64) -> rusqlite::Result<Option<BudgetWithCategory>> {
    conn.query_row(
        &format!(
            "SELECT {BUDGET_COLUMNS}
             FROM budgets b
             LEFT JOIN categories c ON b.category_id = c.id
             WHERE b.id = ?"
        ),
        [id],
        map_budget,
    )
    .optional()
}

/// Active budget for a category, optionally restricted to one period.
pub fn find_active_budget(
    conn: &Connection,
    category_id: i64,
    period: Option<BudgetPeriod>,
) -> rusqlite::Result<Option<BudgetWithCategory>> {
    let sql = format!(
        "SELECT {BUDGET_COLUMNS}
         FROM budgets b
         LEFT JOIN categories c ON b.category_id = c.id
         WHERE b.category_id = ?1 AND b.is_active = 1 AND (?2 IS NULL OR b.period = ?2)
         ORDER BY b.id DESC
         LIMIT 1"
    );
    conn.query_row(
        &sql,
        params![category_id, period.map(|p| p.as_str())],
        map_budget,
    )
    .optional()
}

pub fn create_budget(conn: &Connection, budget: &NewBudget) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO budgets (category_id, name, amount_cents, period, start_date, end_date,
                              description, is_active, alert_threshold, notes)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            budget.category_id,
            budget.name,
            budget.amount_cents,
            budget.period.as_str(),
            budget.start_date,
            budget.end_date,
            budget.description,
            budget.is_active,
            budget.alert_threshold,
            budget.notes
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(
        budget_id = id,
        category_id = budget.category_id,
        amount_cents = budget.amount_cents,
        period = %budget.period,
        "Created budget"
    );
    Ok(id)
}

pub fn update_budget(conn: &Connection, id: i64, update: &BudgetUpdate) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE budgets SET
            category_id = COALESCE(?, category_id),
            name = COALESCE(?, name),
            amount_cents = COALESCE(?, amount_cents),
            period = COALESCE(?, period),
            start_date = COALESCE(?, start_date),
            end_date = ?,
            description = COALESCE(?, description),
            is_active = COALESCE(?, is_active),
            alert_threshold = COALESCE(?, alert_threshold),
            notes = COALESCE(?, notes),
            updated_at = datetime('now')
         WHERE id = ?",
        params![
            update.category_id,
            update.name,
            update.amount_cents,
            update.period.map(|p| p.as_str()),
            update.start_date,
            update.end_date,
            update.description,
            update.is_active,
            update.alert_threshold,
            update.notes,
            id
        ],
    )?;
    if rows > 0 {
        debug!(budget_id = id, "Updated budget");
    }
    Ok(rows > 0)
}

/// Soft delete: the row stays but no longer counts as an active budget.
pub fn deactivate_budget(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE budgets SET is_active = 0, updated_at = datetime('now') WHERE id = ?",
        [id],
    )?;
    if rows > 0 {
        info!(budget_id = id, "Deactivated budget");
    }
    Ok(rows > 0)
}
