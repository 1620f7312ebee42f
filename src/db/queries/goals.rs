use crate::models::goal::{Goal, GoalCategory, GoalPriority, NewGoal};
use rusqlite::{params, Connection};
use tracing::debug;

/// All goals, highest priority first, then by target date with undated
/// goals last.
pub fn list_goals(conn: &Connection) -> rusqlite::Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, goal_category, target_amount_cents, current_amount_cents,
                target_date, priority, description, achieved, created_at
         FROM goals
         ORDER BY CASE priority WHEN 'high' THEN 3 WHEN 'medium' THEN 2 ELSE 1 END DESC,
                  target_date IS NULL, target_date, id",
    )?;

    let goals = stmt
        .query_map([], |row| {
            let category: String = row.get(2)?;
            let priority: String = row.get(6)?;
            Ok(Goal {
                id: row.get(0)?,
                name: row.get(1)?,
                category: GoalCategory::parse(&category).unwrap_or(GoalCategory::Other),
                target_amount_cents: row.get(3)?,
                current_amount_cents: row.get(4)?,
                target_date: row.get(5)?,
                priority: GoalPriority::parse(&priority).unwrap_or_default(),
                description: row.get(7)?,
                achieved: row.get(8)?,
                created_at: row.get(9)?,
            })
        })?
        .filter_map(|g| g.ok())
        .collect();

    Ok(goals)
}

pub fn create_goal(conn: &Connection, goal: &NewGoal) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO goals (name, goal_category, target_amount_cents, current_amount_cents,
                            target_date, priority, description)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        params![
            goal.name,
            goal.category.as_str(),
            goal.target_amount_cents,
            goal.current_amount_cents,
            goal.target_date,
            goal.priority.as_str(),
            goal.description
        ],
    )?;
    let id = conn.last_insert_rowid();
    debug!(goal_id = id, name = %goal.name, "Created goal");
    Ok(id)
}
