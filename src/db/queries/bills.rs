use crate::models::bill::{Bill, BillFrequency, NewBill};
use rusqlite::{params, Connection};
use tracing::debug;

/// Active bills, soonest due first.
pub fn list_bills(conn: &Connection) -> rusqlite::Result<Vec<Bill>> {
    let mut stmt = conn.prepare(
        "SELECT b.id, b.category_id, b.name, b.amount_cents, b.due_date, b.frequency,
                b.auto_pay, b.notes, b.active, b.created_at, c.name, c.color
         FROM bills b
         LEFT JOIN categories c ON b.category_id = c.id
         WHERE b.active = 1
         ORDER BY b.due_date, b.id",
    )?;

    let bills = stmt
        .query_map([], |row| {
            let frequency: String = row.get(5)?;
            Ok(Bill {
                id: row.get(0)?,
                category_id: row.get(1)?,
                name: row.get(2)?,
                amount_cents: row.get(3)?,
                due_date: row.get(4)?,
                frequency: BillFrequency::parse(&frequency).unwrap_or_default(),
                auto_pay: row.get(6)?,
                notes: row.get(7)?,
                active: row.get(8)?,
                created_at: row.get(9)?,
                category_name: row.get(10)?,
                category_color: row.get(11)?,
            })
        })?
        .filter_map(|b| b.ok())
        .collect();

    Ok(bills)
}

pub fn create_bill(conn: &Connection, bill: &NewBill) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO bills (category_id, name, amount_cents, due_date, frequency, auto_pay, notes)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            bill.category_id,
            bill.name,
            bill.amount_cents,
            bill.due_date,
            bill.frequency.as_str(),
            bill.auto_pay,
            bill.notes
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(bill_id = id, name = %bill.name, "Created bill");
    Ok(id)
}
