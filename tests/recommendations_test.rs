//! Integration tests for budget recommendations built from spending history.

mod common;

use axum::http::StatusCode;
use common::{in_month_ago, TestClient, ENTERTAINMENT, FOOD, HOUSING, SHOPPING, TRANSPORTATION};
use serde_json::Value;

async fn monthly_expenses(client: &TestClient, category_id: i64, amounts: &[f64]) {
    for (i, amount) in amounts.iter().enumerate() {
        client
            .expense(category_id, *amount, &in_month_ago(i as u32 + 1))
            .await;
    }
}

fn find(recommendations: &[Value], category_id: i64) -> Option<&Value> {
    recommendations.iter().find(|r| r["category_id"] == category_id)
}

#[tokio::test]
async fn test_no_history_no_recommendations() {
    let client = TestClient::new();

    let (status, body) = client.get_json("/api/budgets/recommendations").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["recommendations"].as_array().unwrap().is_empty());
    assert_eq!(body["data"]["summary"]["total_categories"], 0);
}

#[tokio::test]
async fn test_three_months_without_budget_creates() {
    let client = TestClient::new();
    monthly_expenses(&client, FOOD, &[195.5, 180.0, 210.0]).await;

    let (_, body) = client.get_json("/api/budgets/recommendations").await;
    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    let food = find(recommendations, FOOD).unwrap();

    assert_eq!(food["recommendation_type"], "create");
    assert_eq!(food["confidence"], "high");
    assert_eq!(food["recommended_amount"], 225.0);
    assert_eq!(food["avg_monthly_spending"], 195.17);
    assert_eq!(food["max_monthly_spending"], 210.0);
    assert_eq!(food["months_with_data"], 3);
    assert_eq!(food["current_budget"], 0.0);
    assert!(food["reasoning"]
        .as_str()
        .unwrap()
        .starts_with("Based on your average monthly spending of $195.17."));
}

#[tokio::test]
async fn test_full_report() {
    let client = TestClient::new();

    // create, limited data
    monthly_expenses(&client, SHOPPING, &[100.0, 140.0]).await;
    // increase
    client.budget(TRANSPORTATION, 100.0, 80.0).await;
    monthly_expenses(&client, TRANSPORTATION, &[150.0, 150.0, 150.0]).await;
    // decrease
    client.budget(HOUSING, 2000.0, 80.0).await;
    monthly_expenses(&client, HOUSING, &[1000.0, 1000.0, 1000.0]).await;
    // maintain, never surfaced
    client.budget(ENTERTAINMENT, 100.0, 80.0).await;
    monthly_expenses(&client, ENTERTAINMENT, &[100.0, 95.0, 105.0]).await;
    // create, high confidence
    monthly_expenses(&client, FOOD, &[195.5, 180.0, 210.0]).await;

    let (status, body) = client.get_json("/api/budgets/recommendations").await;
    assert_eq!(status, StatusCode::OK);

    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    let order: Vec<i64> = recommendations
        .iter()
        .map(|r| r["category_id"].as_i64().unwrap())
        .collect();
    assert_eq!(order, [HOUSING, FOOD, TRANSPORTATION, SHOPPING]);

    let shopping = find(recommendations, SHOPPING).unwrap();
    assert_eq!(shopping["recommendation_type"], "create");
    assert_eq!(shopping["confidence"], "medium");
    assert_eq!(shopping["recommended_amount"], 150.0);
    assert_eq!(shopping["months_with_data"], 2);

    let transportation = find(recommendations, TRANSPORTATION).unwrap();
    assert_eq!(transportation["recommendation_type"], "increase");
    assert_eq!(transportation["confidence"], "high");
    assert_eq!(transportation["recommended_amount"], 165.0);
    assert_eq!(transportation["potential_savings"], 0.0);

    let housing = find(recommendations, HOUSING).unwrap();
    assert_eq!(housing["recommendation_type"], "decrease");
    assert_eq!(housing["confidence"], "medium");
    assert_eq!(housing["recommended_amount"], 1100.0);
    assert_eq!(housing["potential_savings"], 900.0);

    assert!(find(recommendations, ENTERTAINMENT).is_none());

    let summary = &body["data"]["summary"];
    assert_eq!(summary["total_categories"], 4);
    assert_eq!(summary["create_new"], 2);
    assert_eq!(summary["increase_budget"], 1);
    assert_eq!(summary["decrease_budget"], 1);
    assert_eq!(summary["maintain_budget"], 0);
}

#[tokio::test]
async fn test_history_outside_window_is_ignored() {
    let client = TestClient::new();
    client.expense(FOOD, 500.0, &in_month_ago(9)).await;
    client.expense(FOOD, 100.0, &in_month_ago(1)).await;

    let (_, body) = client.get_json("/api/budgets/recommendations").await;
    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    let food = find(recommendations, FOOD).unwrap();

    assert_eq!(food["months_with_data"], 1);
    assert_eq!(food["avg_monthly_spending"], 100.0);
    assert_eq!(food["recommended_amount"], 125.0);
}

#[tokio::test]
async fn test_deactivated_budget_counts_as_none() {
    let client = TestClient::new();
    let id = client.budget(FOOD, 100.0, 80.0).await;
    client.delete(&format!("/api/budgets/{id}")).await;
    monthly_expenses(&client, FOOD, &[100.0, 100.0, 100.0]).await;

    let (_, body) = client.get_json("/api/budgets/recommendations").await;
    let recommendations = body["data"]["recommendations"].as_array().unwrap();
    let food = find(recommendations, FOOD).unwrap();

    assert_eq!(food["recommendation_type"], "create");
    assert_eq!(food["current_budget"], 0.0);
    assert_eq!(food["recommended_amount"], 115.0);
}
