use std::collections::{BTreeMap, HashMap};

use crate::db::queries::categories::list_categories;
use crate::models::{
    CategorySpendingPattern, CategoryType, CategoryWithSpending, DailySpending, MonthlySpend,
    MonthlyTrendPoint, WindowTotals,
};
use crate::money::{cents_to_dollars, round2};
use rusqlite::{params, Connection};
use tracing::debug;

/// Monthly expense totals per category since `since` (inclusive), months
/// ascending. Months without transactions are absent, not zero.
pub fn monthly_spend_history(
    conn: &Connection,
    since: &str,
    category_id: Option<i64>,
) -> rusqlite::Result<BTreeMap<i64, Vec<MonthlySpend>>> {
    let mut stmt = conn.prepare(
        "SELECT category_id, strftime('%Y-%m', date) AS month, SUM(amount_cents)
         FROM transactions
         WHERE transaction_type = 'expense' AND date >= ?1
           AND (?2 IS NULL OR category_id = ?2)
         GROUP BY category_id, month
         ORDER BY category_id, month",
    )?;

    let rows = stmt
        .query_map(params![since, category_id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                MonthlySpend {
                    month: row.get(1)?,
                    total_cents: row.get(2)?,
                },
            ))
        })?
        .filter_map(|r| r.ok());

    let mut history: BTreeMap<i64, Vec<MonthlySpend>> = BTreeMap::new();
    for (category_id, month) in rows {
        history.entry(category_id).or_default().push(month);
    }

    debug!(categories = history.len(), since, "Loaded monthly spend history");
    Ok(history)
}

/// Amount of the most recently created active budget per category.
fn active_budget_amounts(conn: &Connection) -> rusqlite::Result<HashMap<i64, i64>> {
    let mut stmt = conn.prepare(
        "SELECT category_id, amount_cents
         FROM budgets
         WHERE is_active = 1 AND category_id IS NOT NULL
         ORDER BY id",
    )?;
    let amounts = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))?
        .filter_map(|r| r.ok())
        .collect();
    Ok(amounts)
}

/// Spending history and current budget of every expense category.
pub fn category_patterns(
    conn: &Connection,
    since: &str,
) -> rusqlite::Result<Vec<CategorySpendingPattern>> {
    let mut history = monthly_spend_history(conn, since, None)?;
    let budgets = active_budget_amounts(conn)?;

    let patterns = list_categories(conn, Some(CategoryType::Expense))?
        .into_iter()
        .map(|c| CategorySpendingPattern {
            monthly_totals: history.remove(&c.id).unwrap_or_default(),
            current_budget_cents: budgets.get(&c.id).copied().unwrap_or(0),
            category_id: c.id,
            category: c.name,
            color: c.color,
        })
        .collect();

    Ok(patterns)
}

/// Expense totals per calendar month across all categories, the latest
/// `limit` months in ascending order.
pub fn monthly_trend(
    conn: &Connection,
    since: &str,
    limit: u32,
) -> rusqlite::Result<Vec<MonthlyTrendPoint>> {
    let mut stmt = conn.prepare(
        "SELECT strftime('%Y-%m', date) AS month, SUM(amount_cents), COUNT(*)
         FROM transactions
         WHERE transaction_type = 'expense' AND date >= ?
         GROUP BY month
         ORDER BY month DESC
         LIMIT ?",
    )?;

    let mut trend: Vec<MonthlyTrendPoint> = stmt
        .query_map(params![since, limit], |row| {
            Ok(MonthlyTrendPoint {
                month: row.get(0)?,
                spent: cents_to_dollars(row.get(1)?),
                transactions: row.get(2)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();
    trend.reverse();

    Ok(trend)
}

/// Expense categories with their average monthly spend since
/// `history_start`, transaction count since `recent_start` and budget.
/// Budgeted categories come first, then by average spend.
pub fn category_spending_summary(
    conn: &Connection,
    history_start: &str,
    recent_start: &str,
) -> rusqlite::Result<Vec<CategoryWithSpending>> {
    let history = monthly_spend_history(conn, history_start, None)?;
    let budgets = active_budget_amounts(conn)?;

    let mut stmt = conn.prepare(
        "SELECT category_id, COUNT(*)
         FROM transactions
         WHERE transaction_type = 'expense' AND date >= ?
         GROUP BY category_id",
    )?;
    let recent: HashMap<i64, i64> = stmt
        .query_map([recent_start], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?))
        })?
        .filter_map(|r| r.ok())
        .collect();

    let mut summary: Vec<CategoryWithSpending> = list_categories(conn, Some(CategoryType::Expense))?
        .into_iter()
        .map(|category| {
            let months = history.get(&category.id).map(Vec::as_slice).unwrap_or(&[]);
            let avg = if months.is_empty() {
                0.0
            } else {
                let total: i64 = months.iter().map(|m| m.total_cents).sum();
                round2(total as f64 / months.len() as f64 / 100.0)
            };
            let budget_cents = budgets.get(&category.id).copied();

            CategoryWithSpending {
                avg_monthly_spending: avg,
                months_with_data: months.len() as i64,
                recent_transactions: recent.get(&category.id).copied().unwrap_or(0),
                has_budget: budget_cents.is_some(),
                current_budget: budget_cents.map(cents_to_dollars).unwrap_or(0.0),
                category,
            }
        })
        .collect();

    summary.sort_by(|a, b| {
        b.has_budget.cmp(&a.has_budget).then(
            b.avg_monthly_spending
                .partial_cmp(&a.avg_monthly_spending)
                .unwrap_or(std::cmp::Ordering::Equal),
        )
    });

    Ok(summary)
}

/// Expense totals of one category between `start` and `end` (both
/// inclusive). An open `end` runs to the latest transaction.
pub fn budget_window_totals(
    conn: &Connection,
    category_id: i64,
    start: &str,
    end: Option<&str>,
) -> rusqlite::Result<WindowTotals> {
    conn.query_row(
        "SELECT COALESCE(SUM(amount_cents), 0), COUNT(*)
         FROM transactions
         WHERE transaction_type = 'expense' AND category_id = ?1
           AND date >= ?2 AND (?3 IS NULL OR date <= ?3)",
        params![category_id, start, end],
        |row| {
            Ok(WindowTotals {
                spent_cents: row.get(0)?,
                transaction_count: row.get(1)?,
            })
        },
    )
}

/// Per-day expense totals of one category inside a window, newest first.
pub fn daily_breakdown(
    conn: &Connection,
    category_id: i64,
    start: &str,
    end: Option<&str>,
    limit: u32,
) -> rusqlite::Result<Vec<DailySpending>> {
    let mut stmt = conn.prepare(
        "SELECT date, SUM(amount_cents), COUNT(*)
         FROM transactions
         WHERE transaction_type = 'expense' AND category_id = ?1
           AND date >= ?2 AND (?3 IS NULL OR date <= ?3)
         GROUP BY date
         ORDER BY date DESC
         LIMIT ?4",
    )?;

    let days = stmt
        .query_map(params![category_id, start, end, limit], |row| {
            Ok(DailySpending {
                date: row.get(0)?,
                spent: cents_to_dollars(row.get(1)?),
                transactions: row.get(2)?,
            })
        })?
        .filter_map(|r| r.ok())
        .collect();

    Ok(days)
}
