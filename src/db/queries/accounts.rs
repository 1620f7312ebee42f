use crate::models::account::{Account, AccountType, NewAccount};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

fn map_account(row: &Row) -> rusqlite::Result<Account> {
    let account_type: String = row.get(2)?;
    Ok(Account {
        id: row.get(0)?,
        name: row.get(1)?,
        account_type: AccountType::parse(&account_type).unwrap_or(AccountType::Checking),
        balance_cents: row.get(3)?,
        currency: row.get(4)?,
        active: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

pub fn list_active_accounts(conn: &Connection) -> rusqlite::Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, account_type, balance_cents, currency, active, created_at, updated_at
         FROM accounts
         WHERE active = 1
         ORDER BY name",
    )?;

    let accounts = stmt
        .query_map([], map_account)?
        .filter_map(|a| a.ok())
        .collect();

    Ok(accounts)
}

pub fn get_account(conn: &Connection, id: i64) -> rusqlite::Result<Option<Account>> {
    conn.query_row(
        "SELECT id, name, account_type, balance_cents, currency, active, created_at, updated_at
         FROM accounts WHERE id = ?",
        [id],
        map_account,
    )
    .optional()
}

pub fn create_account(conn: &Connection, account: &NewAccount) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO accounts (name, account_type, balance_cents, currency) VALUES (?, ?, ?, ?)",
        params![
            account.name,
            account.account_type.as_str(),
            account.balance_cents,
            account.currency
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(account_id = id, name = %account.name, "Created account");
    Ok(id)
}
