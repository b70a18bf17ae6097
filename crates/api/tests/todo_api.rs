//! HTTP-level integration tests for the todo CRUD endpoints.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the
//! router, with both enrichment adapters unconfigured.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, expect_status, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Creation rules
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_title_and_category(pool: PgPool) {
    let cases = [
        json!({}),
        json!({ "title": "no category" }),
        json!({ "category": "Work" }),
        json!({ "title": "", "category": "Work" }),
    ];
    for body in cases {
        let app = build_test_app(pool.clone());
        let response = post_json(app, "/api/todos", body.clone()).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "body {body} should be rejected"
        );
    }

    // Nothing was created.
    let app = build_test_app(pool);
    let listing = expect_status(get(app, "/api/todos").await, StatusCode::OK).await;
    assert!(listing["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_rejects_invalid_category(pool: PgPool) {
    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/todos",
        json!({ "title": "garden", "category": "Errands" }),
    )
    .await;
    let body = expect_status(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_then_fetch_round_trip(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let created = expect_status(
        post_json(
            app,
            "/api/todos",
            json!({ "title": "Write report", "description": "Q3 numbers", "category": "Work" }),
        )
        .await,
        StatusCode::CREATED,
    )
    .await;

    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["completed"], false);
    assert_eq!(created["data"]["validation_status"], "pending");

    let app = build_test_app(pool);
    let fetched = expect_status(get(app, &format!("/api/todos/{id}")).await, StatusCode::OK).await;
    assert_eq!(fetched["data"]["title"], "Write report");
    assert_eq!(fetched["data"]["description"], "Q3 numbers");
    assert_eq!(fetched["data"]["category"], "Work");
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_filters_by_category(pool: PgPool) {
    for (title, category) in [("w1", "Work"), ("p1", "Personal"), ("w2", "Work")] {
        let app = build_test_app(pool.clone());
        post_json(app, "/api/todos", json!({ "title": title, "category": category })).await;
    }

    let app = build_test_app(pool.clone());
    let work = expect_status(get(app, "/api/todos?category=Work").await, StatusCode::OK).await;
    assert_eq!(work["data"].as_array().unwrap().len(), 2);

    // Unknown category filters are ignored, not rejected.
    let app = build_test_app(pool);
    let all = expect_status(get(app, "/api/todos?category=Chores").await, StatusCode::OK).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// Updates
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn partial_update_keeps_other_fields(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/todos",
            json!({ "title": "X", "category": "Work" }),
        )
        .await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let updated = expect_status(
        put_json(app, &format!("/api/todos/{id}"), json!({ "completed": true })).await,
        StatusCode::OK,
    )
    .await;

    assert_eq!(updated["data"]["completed"], true);
    assert_eq!(updated["data"]["title"], "X");
    assert_eq!(updated["data"]["category"], "Work");
    assert_eq!(updated["data"]["description"], "");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_rejects_invalid_category(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(app, "/api/todos", json!({ "title": "X", "category": "Work" })).await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/todos/{id}"),
        json!({ "category": "Hobby" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Row unchanged.
    let app = build_test_app(pool);
    let fetched = body_json(get(app, &format!("/api/todos/{id}")).await).await;
    assert_eq!(fetched["data"]["category"], "Work");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_missing_todo_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = put_json(app, "/api/todos/9999", json!({ "completed": true })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Deletion
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_returns_row_then_404(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json(app, "/api/todos", json!({ "title": "gone soon", "category": "Personal" })).await,
    )
    .await;
    let id = created["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let deleted = expect_status(delete(app, &format!("/api/todos/{id}")).await, StatusCode::OK).await;
    assert_eq!(deleted["data"]["message"], "Todo deleted successfully");
    assert_eq!(deleted["data"]["todo"]["title"], "gone soon");

    let app = build_test_app(pool.clone());
    let response = delete(app, &format!("/api/todos/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Store is unchanged by the failed delete.
    let app = build_test_app(pool);
    let listing = body_json(get(app, "/api/todos").await).await;
    assert!(listing["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_missing_todo_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let body = expect_status(get(app, "/api/todos/424242").await, StatusCode::NOT_FOUND).await;
    assert_eq!(body["code"], "NOT_FOUND");
}
