use crate::models::transaction::{
    NewTransaction, Transaction, TransactionType, TransactionWithRelations,
};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Default)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category_id: Option<i64>,
    pub from_date: Option<String>,
    pub to_date: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl TransactionFilter {
    fn where_clause(&self) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
        let mut sql = String::from(" WHERE 1=1");
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(kind) = self.transaction_type {
            sql.push_str(" AND t.transaction_type = ?");
            params_vec.push(Box::new(kind.as_str()));
        }
        if let Some(category_id) = self.category_id {
            sql.push_str(" AND t.category_id = ?");
            params_vec.push(Box::new(category_id));
        }
        if let Some(ref from_date) = self.from_date {
            sql.push_str(" AND t.date >= ?");
            params_vec.push(Box::new(from_date.clone()));
        }
        if let Some(ref to_date) = self.to_date {
            sql.push_str(" AND t.date <= ?");
            params_vec.push(Box::new(to_date.clone()));
        }

        (sql, params_vec)
    }
}

const SELECT_WITH_RELATIONS: &str =
    "SELECT t.id, t.account_id, t.category_id, t.amount_cents, t.description,
            t.transaction_type, t.date, t.tags, t.created_at, t.updated_at,
            c.name, c.color, a.name
     FROM transactions t
     LEFT JOIN categories c ON t.category_id = c.id
     LEFT JOIN accounts a ON t.account_id = a.id";

fn map_transaction(row: &Row) -> rusqlite::Result<TransactionWithRelations> {
    let kind: String = row.get(5)?;
    Ok(TransactionWithRelations {
        transaction: Transaction {
            id: row.get(0)?,
            account_id: row.get(1)?,
            category_id: row.get(2)?,
            amount_cents: row.get(3)?,
            description: row.get(4)?,
            transaction_type: TransactionType::parse(&kind).unwrap_or(TransactionType::Expense),
            date: row.get(6)?,
            tags: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        },
        category_name: row.get(10)?,
        category_color: row.get(11)?,
        account_name: row.get(12)?,
    })
}

pub fn list_transactions(
    conn: &Connection,
    filter: &TransactionFilter,
) -> rusqlite::Result<Vec<TransactionWithRelations>> {
    let (where_sql, mut params_vec) = filter.where_clause();
    let mut sql = format!(
        "{SELECT_WITH_RELATIONS}{where_sql} ORDER BY t.date DESC, t.created_at DESC, t.id DESC"
    );

    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(Box::new(limit));
        if let Some(offset) = filter.offset {
            sql.push_str(" OFFSET ?");
            params_vec.push(Box::new(offset));
        }
    }

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let transactions: Vec<TransactionWithRelations> = stmt
        .query_map(params_refs.as_slice(), map_transaction)?
        .filter_map(|t| t.ok())
        .collect();

    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

pub fn count_transactions(conn: &Connection, filter: &TransactionFilter) -> rusqlite::Result<i64> {
    let (where_sql, params_vec) = filter.where_clause();
    let sql = format!("SELECT COUNT(*) FROM transactions t{where_sql}");
    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    conn.query_row(&sql, params_refs.as_slice(), |row| row.get(0))
}

pub fn get_transaction(
    conn: &Connection,
    id: i64,
) -> rusqlite::Result<Option<TransactionWithRelations>> {
    conn.query_row(
        &format!("{SELECT_WITH_RELATIONS} WHERE t.id = ?"),
        [id],
        map_transaction,
    )
    .optional()
}

pub fn create_transaction(conn: &Connection, tx: &NewTransaction) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO transactions
            (account_id, category_id, amount_cents, description, transaction_type, date, tags)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            tx.account_id,
            tx.category_id,
            tx.amount_cents,
            tx.description,
            tx.transaction_type.as_str(),
            tx.date,
            tx.tags
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(
        transaction_id = id,
        amount_cents = tx.amount_cents,
        kind = %tx.transaction_type,
        "Created transaction"
    );
    Ok(id)
}

pub fn update_transaction(
    conn: &Connection,
    id: i64,
    tx: &NewTransaction,
) -> rusqlite::Result<bool> {
    let rows = conn.execute(
        "UPDATE transactions
         SET account_id = ?, category_id = ?, amount_cents = ?, description = ?,
             transaction_type = ?, date = ?, tags = ?, updated_at = datetime('now')
         WHERE id = ?",
        params![
            tx.account_id,
            tx.category_id,
            tx.amount_cents,
            tx.description,
            tx.transaction_type.as_str(),
            tx.date,
            tx.tags,
            id
        ],
    )?;
    if rows > 0 {
        debug!(transaction_id = id, "Updated transaction");
    }
    Ok(rows > 0)
}

pub fn delete_transaction(conn: &Connection, id: i64) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM transactions WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(transaction_id = id, "Deleted transaction");
    }
    Ok(rows > 0)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionStats {
    pub total_income_cents: i64,
    pub total_expenses_cents: i64,
    pub total_transactions: i64,
    pub avg_transaction_cents: f64,
    pub net_income_cents: i64,
}

/// Income/expense totals, optionally bounded to an inclusive date range.
pub fn transaction_stats(
    conn: &Connection,
    from_date: Option<&str>,
    to_date: Option<&str>,
) -> rusqlite::Result<TransactionStats> {
    let filter = TransactionFilter {
        from_date: from_date.map(String::from),
        to_date: to_date.map(String::from),
        ..Default::default()
    };
    let (where_sql, params_vec) = filter.where_clause();
    let sql = format!(
        "SELECT
            COALESCE(SUM(CASE WHEN t.transaction_type = 'income' THEN t.amount_cents ELSE 0 END), 0),
            COALESCE(SUM(CASE WHEN t.transaction_type = 'expense' THEN t.amount_cents ELSE 0 END), 0),
            COUNT(*),
            COALESCE(AVG(t.amount_cents), 0.0)
         FROM transactions t{where_sql}"
    );
    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();

    conn.query_row(&sql, params_refs.as_slice(), |row| {
        let total_income_cents: i64 = row.get(0)?;
        let total_expenses_cents: i64 = row.get(1)?;
        Ok(TransactionStats {
            total_income_cents,
            total_expenses_cents,
            total_transactions: row.get(2)?,
            avg_transaction_cents: row.get(3)?,
            net_income_cents: total_income_cents - total_expenses_cents,
        })
    })
}
