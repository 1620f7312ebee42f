//! Shared test utilities for integration tests.
//!
//! `TestClient` drives the full router against a fresh in-memory database
//! with all migrations (and the default categories) applied.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tally::config::{Config, InsightConfig};
use tally::date_utils;
use tally::db::{create_in_memory_pool, run_migrations};
use tally::server;
use tally::state::AppState;
use tower::ServiceExt;

/// Ids of seeded default categories.
pub const SALARY: i64 = 1;
pub const HOUSING: i64 = 5;
pub const FOOD: i64 = 6;
pub const TRANSPORTATION: i64 = 7;
pub const ENTERTAINMENT: i64 = 9;
pub const SHOPPING: i64 = 11;

pub struct TestClient {
    state: AppState,
}

impl TestClient {
    pub fn new() -> Self {
        let pool = create_in_memory_pool().expect("Failed to create in-memory pool");
        {
            let mut conn = pool.get().expect("Failed to get connection");
            run_migrations(&mut conn, Path::new("migrations"))
                .expect("Failed to run migrations");
        }

        let config = Config {
            host: "127.0.0.1".into(),
            port: 7070,
            database_path: PathBuf::from(":memory:"),
            migrations_path: PathBuf::from("migrations"),
            insights: InsightConfig::default(),
        };

        Self {
            state: AppState::new(pool, config),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// GET and parse the body as JSON (`Value::Null` when it is not JSON).
    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self.get(uri).await;
        (status, serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    pub async fn send_json(&self, method: Method, uri: &str, payload: &Value) -> (StatusCode, Value) {
        let (status, body) = self
            .send(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await;
        (status, serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    pub async fn post_json(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        self.send_json(Method::POST, uri, payload).await
    }

    pub async fn put_json(&self, uri: &str, payload: &Value) -> (StatusCode, Value) {
        self.send_json(Method::PUT, uri, payload).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        let (status, body) = self
            .send(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await;
        (status, serde_json::from_str(&body).unwrap_or(Value::Null))
    }

    // =========================================================================
    // Helper methods for creating entities through the API
    // =========================================================================

    /// Record an expense and return its id.
    pub async fn expense(&self, category_id: i64, amount: f64, date: &str) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/transactions",
                &json!({
                    "category_id": category_id,
                    "amount": amount,
                    "transaction_type": "expense",
                    "date": date,
                    "description": "test expense",
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Create a monthly budget and return its id.
    pub async fn budget(&self, category_id: i64, amount: f64, alert_threshold: f64) -> i64 {
        let (status, body) = self
            .post_json(
                "/api/budgets",
                &json!({
                    "category_id": category_id,
                    "amount": amount,
                    "period": "monthly",
                    "start_date": days_ago(60),
                    "alert_threshold": alert_threshold,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}

/// `YYYY-MM-DD` for the day `days` before today.
pub fn days_ago(days: i64) -> String {
    date_utils::format_date(date_utils::days_ago(date_utils::today(), days))
}

/// A date inside the calendar month `months` before the current one.
pub fn in_month_ago(months: u32) -> String {
    let month = date_utils::month_start(date_utils::months_ago(date_utils::today(), months));
    date_utils::format_date(month + chrono::Duration::days(9))
}
