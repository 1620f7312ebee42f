//! Integration tests for building the app against an on-disk database.

use tally::config::{Config, InsightConfig};
use tally::db::queries::categories;
use tally::server;

fn config(dir: &std::path::Path) -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        database_path: dir.join("nested/tally.db"),
        migrations_path: "migrations".into(),
        insights: InsightConfig::default(),
    }
}

#[test]
fn test_build_app_creates_and_migrates_database() {
    let dir = tempfile::tempdir().unwrap();

    let (state, _app) = server::build_app(config(dir.path())).unwrap();
    assert!(dir.path().join("nested/tally.db").exists());

    let conn = state.db.get().unwrap();
    assert_eq!(categories::list_categories(&conn, None).unwrap().len(), 19);
}

#[test]
fn test_build_app_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();

    drop(server::build_app(config(dir.path())).unwrap());
    let (state, _app) = server::build_app(config(dir.path())).unwrap();

    let conn = state.db.get().unwrap();
    let applied: i64 = conn
        .query_row("SELECT COUNT(*) FROM _migrations", [], |r| r.get(0))
        .unwrap();
    assert_eq!(applied, 2);
    assert_eq!(categories::list_categories(&conn, None).unwrap().len(), 19);
}

#[tokio::test]
async fn test_serve_binds_ephemeral_port() {
    let dir = tempfile::tempdir().unwrap();
    let (_state, app) = server::build_app(config(dir.path())).unwrap();

    let (port, handle) = server::serve(app, "127.0.0.1", 0).await.unwrap();
    assert_ne!(port, 0);
    handle.abort();
}
