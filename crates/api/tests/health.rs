//! Health check endpoint test.

mod common;

use axum::http::StatusCode;
use common::{build_test_app, expect_status, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_ok_with_live_db(pool: PgPool) {
    let app = build_test_app(pool);
    let body = expect_status(get(app, "/health").await, StatusCode::OK).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["db_healthy"], true);
    assert!(body["version"].is_string());
}
