use crate::models::category::{Category, CategoryType};
use rusqlite::{Connection, OptionalExtension, Row};

const CATEGORY_COLUMNS: &str = "id, name, category_type, color, icon, is_default, created_at";

fn map_category(row: &Row) -> rusqlite::Result<Category> {
    let category_type: String = row.get(2)?;
    Ok(Category {
        id: row.get(0)?,
        name: row.get(1)?,
        category_type: CategoryType::parse(&category_type).unwrap_or(CategoryType::Both),
        color: row.get(3)?,
        icon: row.get(4)?,
        is_default: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// List categories by name. Filtering by `income` or `expense` also returns
/// categories of type `both`.
pub fn list_categories(
    conn: &Connection,
    category_type: Option<CategoryType>,
) -> rusqlite::Result<Vec<Category>> {
    let categories = match category_type {
        Some(CategoryType::Both) | None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name"
            ))?;
            let rows = stmt.query_map([], map_category)?;
            rows.filter_map(|c| c.ok()).collect()
        }
        Some(kind) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {CATEGORY_COLUMNS} FROM categories
                 WHERE category_type = ? OR category_type = 'both'
                 ORDER BY name"
            ))?;
            let rows = stmt.query_map([kind.as_str()], map_category)?;
            rows.filter_map(|c| c.ok()).collect()
        }
    };

    Ok(categories)
}

pub fn get_category(conn: &Connection, id: i64) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id = ?"),
        [id],
        map_category,
    )
    .optional()
}

/// First category with this exact name that can hold expenses.
pub fn find_expense_category_by_name(
    conn: &Connection,
    name: &str,
) -> rusqlite::Result<Option<Category>> {
    conn.query_row(
        &format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories
             WHERE name = ? AND category_type IN ('expense', 'both')
             ORDER BY id LIMIT 1"
        ),
        [name],
        map_category,
    )
    .optional()
}
