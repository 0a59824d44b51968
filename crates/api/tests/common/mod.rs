#![allow(dead_code)]

use std::path::Path;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use vetrecords_api::auth::jwt::JwtConfig;
use vetrecords_api::config::{AssetConfig, ServerConfig};
use vetrecords_api::router::build_app_router;
use vetrecords_api::state::AppState;
use vetrecords_db::DbPool;

/// Password used by [`register_and_login`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
///
/// Static and media roots point below `asset_root`, which callers usually
/// back with a `tempfile::TempDir`.
pub fn test_config(asset_root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-entropy".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        assets: AssetConfig {
            static_url: "/static/".to_string(),
            static_dirs: vec![asset_root.join("static")],
            media_url: "/media/".to_string(),
            media_root: asset_root.join("media"),
            report_logo_uri: "/static/img/logo.png".to_string(),
        },
    }
}

/// Fresh in-memory database with the schema applied.
pub async fn test_pool() -> DbPool {
    let pool = vetrecords_db::create_memory_pool()
        .await
        .expect("in-memory pool should open");
    vetrecords_db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    pool
}

/// Build the full application router over `pool`, with assets under
/// `asset_root`. Uses the same middleware stack as the binary.
pub fn build_test_app_with_assets(pool: DbPool, asset_root: &Path) -> Router {
    let config = test_config(asset_root);
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

/// Build the application router with an asset root that does not exist.
pub fn build_test_app(pool: DbPool) -> Router {
    build_test_app_with_assets(pool, Path::new("/nonexistent-vetrecords-assets"))
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

fn json_request(method: Method, uri: &str, token: Option<&str>, body: serde_json::Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request should build")
}

fn empty_request(method: Method, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request should build")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::GET, uri, Some(token))).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, None, body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::POST, uri, Some(token), body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, json_request(Method::PUT, uri, Some(token), body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, empty_request(Method::DELETE, uri, Some(token))).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

/// Number of image XObjects embedded in a PDF.
pub fn pdf_image_count(pdf: &[u8]) -> usize {
    use printpdf::lopdf::{Document, Object};

    let doc = Document::load_mem(pdf).expect("body should be a parseable PDF");
    doc.objects
        .values()
        .filter_map(|obj| obj.as_stream().ok())
        .filter(|stream| {
            matches!(stream.dict.get(b"Subtype"), Ok(Object::Name(name)) if name == b"Image")
        })
        .count()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register `username` through the API.
pub async fn register(app: Router, username: &str) -> Response<Body> {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "first_name": "Test",
        "last_name": "Owner",
        "password": TEST_PASSWORD,
        "password_confirm": TEST_PASSWORD,
    });
    post_json(app, "/api/v1/auth/register", body).await
}

/// Register and log in `username`; returns the access token.
pub async fn register_and_login(app: &Router, username: &str) -> String {
    let response = register(app.clone(), username).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/auth/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("login returns an access token")
        .to_string()
}

/// Create an animal for the token's owner and return its id.
pub async fn create_animal(app: &Router, token: &str, name: &str) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "species": "Dog",
        "breed": "Beagle",
        "date_of_birth": "2019-06-01",
    });
    let response = post_json_auth(app.clone(), "/api/v1/animals", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("animal id")
}

/// Create a doctor and return its id.
pub async fn create_doctor(app: &Router, token: &str, name: &str) -> i64 {
    let body = serde_json::json!({
        "full_name": name,
        "specialization": "Surgery",
    });
    let response = post_json_auth(app.clone(), "/api/v1/doctors", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"]
        .as_i64()
        .expect("doctor id")
}

/// Record a visit and return the response body.
pub async fn create_visit(
    app: &Router,
    token: &str,
    animal_id: i64,
    doctor_id: i64,
    visit_date: &str,
) -> serde_json::Value {
    let body = serde_json::json!({
        "animal_id": animal_id,
        "doctor_id": doctor_id,
        "visit_date": visit_date,
        "reason": "Annual checkup",
        "diagnosis": "Healthy",
    });
    let response = post_json_auth(app.clone(), "/api/v1/visits", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
