//! Integration tests for budget CRUD, derived status and analysis.

mod common;

use axum::http::StatusCode;
use common::{days_ago, TestClient, ENTERTAINMENT, FOOD, HOUSING, SALARY, SHOPPING};
use serde_json::json;

#[tokio::test]
async fn test_create_budget_generates_name() {
    let client = TestClient::new();

    let (status, body) = client
        .post_json(
            "/api/budgets",
            &json!({ "category_id": FOOD, "amount": 600, "start_date": "2024-01-01" }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Budget created successfully");
    let budget = &body["data"];
    assert_eq!(budget["name"], "Food & Dining Monthly Budget");
    assert_eq!(budget["period"], "monthly");
    assert_eq!(budget["amount_cents"], 60000);
    assert_eq!(budget["alert_threshold"], 80.0);
    assert_eq!(budget["is_active"], true);
    assert_eq!(budget["category_name"], "Food & Dining");
}

#[tokio::test]
async fn test_create_budget_validation() {
    let client = TestClient::new();

    let cases = [
        (json!({ "amount": 100 }), "category_id is required"),
        (json!({ "category_id": FOOD }), "amount is required"),
        (
            json!({ "category_id": FOOD, "amount": 0 }),
            "amount must be greater than 0",
        ),
        (
            json!({ "category_id": FOOD, "amount": -5 }),
            "amount must be greater than 0",
        ),
        (
            json!({ "category_id": FOOD, "amount": 0.004 }),
            "amount must be greater than 0",
        ),
        (
            json!({ "category_id": FOOD, "amount": 100, "period": "daily" }),
            "Invalid period. Must be weekly, monthly, or yearly.",
        ),
        (
            json!({ "category_id": FOOD, "amount": 100, "alert_threshold": 120 }),
            "alert_threshold must be between 0 and 100",
        ),
        (
            json!({ "category_id": FOOD, "amount": 100, "start_date": "01/02/2024" }),
            "start_date must be a date in YYYY-MM-DD format",
        ),
        (
            json!({ "category_id": 999, "amount": 100 }),
            "Category not found",
        ),
        (
            json!({ "category_id": SALARY, "amount": 100 }),
            "Salary is an income category and cannot be budgeted",
        ),
    ];

    for (payload, message) in cases {
        let (status, body) = client.post_json("/api/budgets", &payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body["error"], message, "{payload}");
    }
}

#[tokio::test]
async fn test_duplicate_active_budget_conflicts() {
    let client = TestClient::new();
    client.budget(FOOD, 400.0, 80.0).await;

    let (status, body) = client
        .post_json(
            "/api/budgets",
            &json!({ "category_id": FOOD, "amount": 500, "period": "monthly" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        body["error"],
        "Active monthly budget already exists for Food & Dining"
    );

    // A different period for the same category is allowed.
    let (status, _) = client
        .post_json(
            "/api/budgets",
            &json!({ "category_id": FOOD, "amount": 5000, "period": "yearly" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_status_warning_over_trailing_window() {
    let client = TestClient::new();
    let id = client.budget(FOOD, 600.0, 80.0).await;

    client.expense(FOOD, 300.0, &days_ago(2)).await;
    client.expense(FOOD, 185.5, &days_ago(10)).await;
    // Outside the 30-day window.
    client.expense(FOOD, 999.0, &days_ago(45)).await;
    // Other category.
    client.expense(SHOPPING, 50.0, &days_ago(1)).await;

    let (status, body) = client.get_json(&format!("/api/budgets/{id}")).await;
    assert_eq!(status, StatusCode::OK);

    let budget = &body["data"];
    assert_eq!(budget["spent"], 485.5);
    assert_eq!(budget["remaining"], 114.5);
    assert_eq!(budget["percentage_used"], 80.92);
    assert_eq!(budget["status"], "warning");
    assert_eq!(budget["transaction_count"], 2);
    assert!(budget["days_remaining"].is_null());
}

#[tokio::test]
async fn test_status_over_budget_clamps_remaining() {
    let client = TestClient::new();
    client.budget(ENTERTAINMENT, 150.0, 80.0).await;
    client.expense(ENTERTAINMENT, 285.6, &days_ago(5)).await;

    let (status, body) = client.get_json("/api/budgets").await;
    assert_eq!(status, StatusCode::OK);

    let budgets = body["data"].as_array().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["status"], "over_budget");
    assert_eq!(budgets[0]["percentage_used"], 190.4);
    assert_eq!(budgets[0]["remaining"], 0.0);
    assert_eq!(budgets[0]["remaining_cents"], 0);
}

#[tokio::test]
async fn test_budget_without_spend_is_on_track() {
    let client = TestClient::new();
    let id = client.budget(HOUSING, 1500.0, 80.0).await;

    let (_, body) = client.get_json(&format!("/api/budgets/{id}")).await;
    assert_eq!(body["data"]["spent"], 0.0);
    assert_eq!(body["data"]["percentage_used"], 0.0);
    assert_eq!(body["data"]["status"], "on_track");
}

#[tokio::test]
async fn test_income_does_not_count_as_spend() {
    let client = TestClient::new();
    let id = client.budget(FOOD, 100.0, 80.0).await;

    let (status, _) = client
        .post_json(
            "/api/transactions",
            &json!({
                "category_id": FOOD,
                "amount": 90,
                "transaction_type": "income",
                "date": days_ago(1),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, body) = client.get_json(&format!("/api/budgets/{id}")).await;
    assert_eq!(body["data"]["spent"], 0.0);
}

#[tokio::test]
async fn test_update_is_partial_and_replaces_end_date() {
    let client = TestClient::new();

    let (_, body) = client
        .post_json(
            "/api/budgets",
            &json!({
                "category_id": FOOD,
                "amount": 300,
                "start_date": "2024-01-01",
                "end_date": "2099-12-31",
                "notes": "groceries",
            }),
        )
        .await;
    let id = body["data"]["id"].as_i64().unwrap();
    assert!(body["data"]["end_date"].is_string());

    let (status, body) = client
        .put_json(&format!("/api/budgets/{id}"), &json!({ "amount": 350.25 }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget updated successfully");

    let budget = &body["data"];
    assert_eq!(budget["amount_cents"], 35025);
    assert_eq!(budget["name"], "Food & Dining Monthly Budget");
    assert_eq!(budget["notes"], "groceries");
    assert_eq!(budget["start_date"], "2024-01-01");
    assert!(budget["end_date"].is_null());
}

#[tokio::test]
async fn test_update_validation_and_missing() {
    let client = TestClient::new();
    let id = client.budget(FOOD, 300.0, 80.0).await;

    let (status, _) = client
        .put_json(&format!("/api/budgets/{id}"), &json!({ "amount": 0 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .put_json(&format!("/api/budgets/{id}"), &json!({ "category_id": 4242 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = client
        .put_json("/api/budgets/9999", &json!({ "amount": 10 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Budget 9999 not found");
}

#[tokio::test]
async fn test_delete_is_soft() {
    let client = TestClient::new();
    let id = client.budget(FOOD, 300.0, 80.0).await;

    let (status, body) = client.delete(&format!("/api/budgets/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Budget deleted successfully");
    assert_eq!(body["data"]["amount"], "300.00");

    let (status, body) = client.get_json(&format!("/api/budgets/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["is_active"], false);

    let (_, body) = client.get_json("/api/budgets?active=true").await;
    assert!(body["data"].as_array().unwrap().is_empty());
    let (_, body) = client.get_json("/api/budgets?active=false").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    // The category can be budgeted again.
    client.budget(FOOD, 320.0, 80.0).await;

    let (status, _) = client.delete("/api/budgets/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_filters_by_period() {
    let client = TestClient::new();
    client.budget(FOOD, 300.0, 80.0).await;
    client
        .post_json(
            "/api/budgets",
            &json!({ "category_id": HOUSING, "amount": 12000, "period": "yearly" }),
        )
        .await;

    let (_, body) = client.get_json("/api/budgets?period=yearly").await;
    let budgets = body["data"].as_array().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0]["category_id"], HOUSING);

    let (status, _) = client.get_json("/api/budgets?period=hourly").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_analysis_health_score() {
    let client = TestClient::new();
    // warning
    client.budget(FOOD, 600.0, 80.0).await;
    client.expense(FOOD, 485.5, &days_ago(3)).await;
    // over budget
    client.budget(ENTERTAINMENT, 150.0, 80.0).await;
    client.expense(ENTERTAINMENT, 285.6, &days_ago(4)).await;
    // on track
    client.budget(HOUSING, 1500.0, 80.0).await;

    let (status, body) = client.get_json("/api/budgets/analysis").await;
    assert_eq!(status, StatusCode::OK);

    let period = &body["data"]["current_period"];
    assert_eq!(period["total_budgets"], 3);
    assert_eq!(period["active_budgets"], 3);
    assert_eq!(period["over_budget_count"], 1);
    assert_eq!(period["warning_count"], 1);
    assert_eq!(period["health_score"], 70);
    assert_eq!(period["total_budgeted"], 2250.0);
    assert_eq!(period["total_spent"], 771.1);

    let trend = body["data"]["monthly_trend"].as_array().unwrap();
    assert!(!trend.is_empty());
    let spent: f64 = trend.iter().map(|m| m["spent"].as_f64().unwrap()).sum();
    assert!((spent - 771.1).abs() < 1e-9);
}

#[tokio::test]
async fn test_analysis_ignores_deleted_budgets() {
    let client = TestClient::new();
    client.budget(FOOD, 600.0, 80.0).await;
    let deleted = client.budget(ENTERTAINMENT, 150.0, 80.0).await;
    client.expense(ENTERTAINMENT, 285.6, &days_ago(4)).await;

    let (status, _) = client.delete(&format!("/api/budgets/{deleted}")).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = client.get_json("/api/budgets/analysis").await;
    let period = &body["data"]["current_period"];
    assert_eq!(period["total_budgets"], 1);
    assert_eq!(period["active_budgets"], 1);
    assert_eq!(period["over_budget_count"], 0);
    assert_eq!(period["health_score"], 100);
    assert_eq!(period["total_budgeted"], 600.0);
}

#[tokio::test]
async fn test_analysis_without_budgets() {
    let client = TestClient::new();

    let (status, body) = client.get_json("/api/budgets/analysis").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["current_period"]["health_score"], 100);
    assert_eq!(body["data"]["current_period"]["percentage_spent"], 0.0);
    assert!(body["data"]["monthly_trend"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_templates_listed() {
    let client = TestClient::new();

    let (status, body) = client.get_json("/api/budgets/templates").await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        ["basic-budget", "50-30-20-budget", "zero-based-budget", "student-budget"]
    );
}

#[tokio::test]
async fn test_apply_template_skips_budgeted_categories() {
    let client = TestClient::new();
    client.budget(HOUSING, 900.0, 80.0).await;

    let (status, body) = client
        .post_json(
            "/api/budgets/apply-template",
            &json!({ "templateId": "basic-budget", "totalBudget": 3000 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Template applied successfully");

    let created = body["data"]["created_budgets"].as_array().unwrap();
    let names: Vec<&str> = created
        .iter()
        .map(|b| b["category"].as_str().unwrap())
        .collect();
    // Housing is already budgeted.
    assert_eq!(
        names,
        [
            "Food & Dining",
            "Transportation",
            "Bills & Utilities",
            "Healthcare",
            "Entertainment",
            "Shopping",
            "Other Expenses"
        ]
    );
    assert_eq!(created[0]["amount"], "450.00");
    assert_eq!(created[0]["percentage"], 15);

    let (_, body) = client.get_json("/api/budgets?active=true").await;
    let budgets = body["data"].as_array().unwrap();
    assert_eq!(budgets.len(), 8);
    assert!(budgets
        .iter()
        .any(|b| b["name"] == "Food & Dining Budget" && b["amount_cents"] == 45000));
}

#[tokio::test]
async fn test_apply_template_allocates_whole_total() {
    for id in ["basic-budget", "50-30-20-budget", "zero-based-budget", "student-budget"] {
        let client = TestClient::new();

        let (status, body) = client
            .post_json(
                "/api/budgets/apply-template",
                &json!({ "templateId": id, "totalBudget": 1000 }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{id}");

        let created = body["data"]["created_budgets"].as_array().unwrap();
        let percentage: i64 = created
            .iter()
            .map(|b| b["percentage"].as_i64().unwrap())
            .sum();
        assert_eq!(percentage, 100, "{id} left part of the total unallocated");

        let (_, body) = client.get_json("/api/budgets/analysis").await;
        assert_eq!(body["data"]["current_period"]["total_budgeted"], 1000.0, "{id}");
    }
}

#[tokio::test]
async fn test_apply_template_validation() {
    let client = TestClient::new();

    let (status, _) = client
        .post_json(
            "/api/budgets/apply-template",
            &json!({ "templateId": "basic-budget", "totalBudget": 0 }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .post_json("/api/budgets/apply-template", &json!({ "totalBudget": 100 }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = client
        .post_json(
            "/api/budgets/apply-template",
            &json!({ "templateId": "no-such-template", "totalBudget": 100 }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_performance_uses_budget_window() {
    let client = TestClient::new();

    let (_, body) = client
        .post_json(
            "/api/budgets",
            &json!({
                "category_id": FOOD,
                "amount": 200,
                "start_date": days_ago(40),
            }),
        )
        .await;
    let id = body["data"]["id"].as_i64().unwrap();

    client.expense(FOOD, 20.0, &days_ago(35)).await;
    client.expense(FOOD, 30.0, &days_ago(35)).await;
    client.expense(FOOD, 40.0, &days_ago(2)).await;
    // Before the budget started.
    client.expense(FOOD, 500.0, &days_ago(50)).await;

    let (status, body) = client
        .get_json(&format!("/api/budgets/{id}/performance"))
        .await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["budget"]["spent"], 90.0);
    assert_eq!(data["budget"]["transaction_count"], 3);
    assert_eq!(data["budget"]["percentage_used"], 45.0);
    assert_eq!(data["avg_transaction"], 30.0);

    let daily = data["daily_breakdown"].as_array().unwrap();
    assert_eq!(daily.len(), 2);
    assert_eq!(daily[0]["date"], days_ago(2));
    assert_eq!(daily[1]["spent"], 50.0);
    assert_eq!(daily[1]["transactions"], 2);

    let (status, _) = client.get_json("/api/budgets/9999/performance").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_budget_categories_with_spending() {
    let client = TestClient::new();
    client.budget(HOUSING, 1200.0, 80.0).await;
    client.expense(FOOD, 120.0, &days_ago(3)).await;

    let (status, body) = client.get_json("/api/budgets/categories").await;
    assert_eq!(status, StatusCode::OK);

    let categories = body["data"].as_array().unwrap();
    // Expense categories only.
    assert!(categories.iter().all(|c| c["id"] != SALARY));
    assert_eq!(categories[0]["name"], "Housing");
    assert_eq!(categories[0]["has_budget"], true);
    assert_eq!(categories[0]["current_budget"], 1200.0);

    let food = categories.iter().find(|c| c["id"] == FOOD).unwrap();
    assert_eq!(food["avg_monthly_spending"], 120.0);
    assert_eq!(food["months_with_data"], 1);
    assert_eq!(food["recent_transactions"], 1);
    assert_eq!(food["has_budget"], false);
}
