use crate::models::debt::{Debt, DebtType, NewDebt};
use rusqlite::{params, Connection};
use tracing::debug;

/// Active debts, largest balance first.
pub fn list_debts(conn: &Connection) -> rusqlite::Result<Vec<Debt>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, debt_type, balance_cents, interest_rate, min_payment_cents,
                due_date, notes, active, created_at
         FROM debts
         WHERE active = 1
         ORDER BY balance_cents DESC, id",
    )?;

    let debts = stmt
        .query_map([], |row| {
            let debt_type: String = row.get(2)?;
            Ok(Debt {
                id: row.get(0)?,
                name: row.get(1)?,
                debt_type: DebtType::parse(&debt_type).unwrap_or(DebtType::Other),
                balance_cents: row.get(3)?,
                interest_rate: row.get(4)?,
                min_payment_cents: row.get(5)?,
                due_date: row.get(6)?,
                notes: row.get(7)?,
                active: row.get(8)?,
                created_at: row.get(9)?,
            })
        })?
        .filter_map(|d| d.ok())
        .collect();

    Ok(debts)
}

pub fn create_debt(conn: &Connection, debt: &NewDebt) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO debts (name, debt_type, balance_cents, interest_rate, min_payment_cents,
                            due_date, notes)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            debt.name,
            debt.debt_type.as_str(),
            debt.balance_cents,
            debt.interest_rate,
            debt.min_payment_cents,
            debt.due_date,
            debt.notes
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(debt_id = id, kind = debt.debt_type.as_str(), "Created debt");
    Ok(id)
}
