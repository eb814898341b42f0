//! Routing, status-code, and envelope behavior that needs no live database.
//! The pool is created lazily, so nothing connects until a statement runs.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use dbgate::{api_routes, AppState};
use std::time::Duration;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(500))
        .connect_lazy("postgres://127.0.0.1:1/unreachable")
        .expect("lazy pool");
    api_routes(AppState { pool })
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn unknown_method_on_table_path_is_405() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/users")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["error"], "method not allowed");
}

#[tokio::test]
async fn unknown_method_on_record_path_is_405() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/users/3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(response).await["error"], "method not allowed");
}

#[tokio::test]
async fn malformed_id_is_rejected_before_any_database_work() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/users/not-a-number")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid id");
}

#[tokio::test]
async fn delete_with_malformed_id_is_rejected_before_any_database_work() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/users/12abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "invalid id");
}

#[tokio::test]
async fn unmatched_path_reports_unknown_table() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .uri("/users/3/extra")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "unknown table");
}

#[tokio::test]
async fn unreachable_store_maps_to_internal_server_error() {
    let response = test_app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "internal server error");
}
