use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("cannot read migrations from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("migration {name} failed: {source}")]
    Sql {
        name: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

fn migration_files(dir: &Path) -> Result<Vec<PathBuf>, MigrationError> {
    let io_err = |source| MigrationError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(io_err)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "sql"))
        .collect();
    files.sort();
    Ok(files)
}

/// Apply every `*.sql` file in `migrations_dir` that is not yet recorded in
/// `_migrations`, in file name order. Each file runs in its own transaction
/// together with its bookkeeping row. Returns the number applied.
pub fn run_migrations(conn: &mut Connection, migrations_dir: &Path) -> Result<usize, MigrationError> {
    debug!(dir = %migrations_dir.display(), "Checking for database migrations");

    conn.execute(
        "CREATE TABLE IF NOT EXISTS _migrations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let files = migration_files(migrations_dir)?;
    debug!(count = files.len(), "Found migration files");

    let mut applied = 0;
    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let seen = conn
            .query_row("SELECT 1 FROM _migrations WHERE name = ?", [&name], |_| Ok(()))
            .optional()?
            .is_some();
        if seen {
            continue;
        }

        let sql = fs::read_to_string(&path).map_err(|source| MigrationError::Io {
            path: path.clone(),
            source,
        })?;

        info!(migration = %name, "Applying migration");
        let sql_err = |source| MigrationError::Sql {
            name: name.clone(),
            source,
        };
        let tx = conn.transaction()?;
        tx.execute_batch(&sql).map_err(sql_err)?;
        tx.execute("INSERT INTO _migrations (name) VALUES (?)", [&name])?;
        tx.commit()?;
        applied += 1;
    }

    if applied > 0 {
        info!(count = applied, "Migrations applied");
    } else {
        debug!("No new migrations to apply");
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, sql: &str) {
        fs::write(dir.join(name), sql).unwrap();
    }

    #[test]
    fn test_applies_in_name_order_once() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "002_seed.sql", "INSERT INTO t (v) VALUES (1);");
        write(dir.path(), "001_table.sql", "CREATE TABLE t (v INTEGER);");
        write(dir.path(), "README.txt", "not a migration");

        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_migrations(&mut conn, dir.path()).unwrap(), 2);
        assert_eq!(run_migrations(&mut conn, dir.path()).unwrap(), 0);

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM t", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_failed_migration_is_not_recorded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "001_broken.sql", "CREATE TABLE ok (v INTEGER); NOT SQL;");

        let mut conn = Connection::open_in_memory().unwrap();
        let err = run_migrations(&mut conn, dir.path()).unwrap_err();
        assert!(matches!(err, MigrationError::Sql { ref name, .. } if name == "001_broken.sql"));

        let recorded: i64 = conn
            .query_row("SELECT COUNT(*) FROM _migrations", [], |r| r.get(0))
            .unwrap();
        assert_eq!(recorded, 0);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let mut conn = Connection::open_in_memory().unwrap();
        let err = run_migrations(&mut conn, Path::new("/nonexistent/migrations")).unwrap_err();
        assert!(matches!(err, MigrationError::Io { .. }));
    }
}
