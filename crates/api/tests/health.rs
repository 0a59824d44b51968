mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, test_pool};

#[tokio::test]
async fn health_reports_database_status() {
    let app = build_test_app(test_pool().await);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["db_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn home_links_to_the_api() {
    let app = build_test_app(test_pool().await);

    let response = get(app, "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["service"], "vetrecords");
    assert_eq!(json["links"]["login"], "/api/v1/auth/login");
}

#[tokio::test]
async fn unknown_route_is_404() {
    let app = build_test_app(test_pool().await);
    let response = get(app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
