//! HTTP-level tests for the visit-history PDF export.

mod common;

use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use common::{
    body_bytes, build_test_app, build_test_app_with_assets, create_animal, create_doctor,
    create_visit, get, get_auth, pdf_image_count, put_json_auth, register_and_login, test_pool,
};
use serde_json::json;

/// A 2x2 RGB PNG.
const TINY_PNG: &[u8] = &[
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x02, 0x08, 0x02, 0x00, 0x00, 0x00, 0xfd,
    0xd4, 0x9a, 0x73, 0x00, 0x00, 0x00, 0x10, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0x38,
    0x21, 0x27, 0x07, 0x44, 0x0c, 0x10, 0x0a, 0x00, 0x1f, 0x26, 0x04, 0x11, 0xa2, 0x8f, 0x22,
    0xaf, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

#[tokio::test]
async fn exports_pdf_with_headers() {
    let app = build_test_app(test_pool().await);
    let token = register_and_login(&app, "owner").await;
    let animal = create_animal(&app, &token, "Rex").await;
    let doctor = create_doctor(&app, &token, "Dr. Watson").await;
    create_visit(&app, &token, animal, doctor, "2024-01-05").await;
    create_visit(&app, &token, animal, doctor, "2024-02-05").await;

    let response = get_auth(app, &format!("/api/v1/animals/{animal}/pdf"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[CONTENT_TYPE], "application/pdf");
    assert_eq!(
        response.headers()[CONTENT_DISPOSITION],
        format!("inline; filename=\"visit-history-{animal}.pdf\"").as_str()
    );

    let bytes = body_bytes(response).await;
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn exports_pdf_for_animal_without_visits() {
    let app = build_test_app(test_pool().await);
    let token = register_and_login(&app, "owner").await;
    let animal = create_animal(&app, &token, "Rex").await;

    let response = get_auth(app, &format!("/api/v1/animals/{animal}/pdf"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.starts_with(b"%PDF"));
}

#[tokio::test]
async fn embeds_logo_and_photo_from_asset_roots() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(assets.path().join("static/img")).unwrap();
    std::fs::create_dir_all(assets.path().join("media/animals")).unwrap();
    std::fs::write(assets.path().join("static/img/logo.png"), TINY_PNG).unwrap();
    std::fs::write(assets.path().join("media/animals/rex.png"), TINY_PNG).unwrap();

    let app = build_test_app_with_assets(test_pool().await, assets.path());
    let token = register_and_login(&app, "owner").await;
    let animal = create_animal(&app, &token, "Rex").await;
    let response = put_json_auth(
        app.clone(),
        &format!("/api/v1/animals/{animal}"),
        json!({ "photo": "/media/animals/rex.png" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(app, &format!("/api/v1/animals/{animal}/pdf"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let pdf = body_bytes(response).await;
    assert_eq!(pdf_image_count(&pdf), 2, "logo and photo should both be embedded");
}

#[tokio::test]
async fn photo_outside_asset_roots_is_not_embedded() {
    let assets = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(assets.path().join("static/img")).unwrap();
    std::fs::create_dir_all(assets.path().join("media")).unwrap();
    std::fs::write(assets.path().join("static/img/logo.png"), TINY_PNG).unwrap();

    let elsewhere = tempfile::tempdir().unwrap();
    let private = elsewhere.path().join("private.png");
    std::fs::write(&private, TINY_PNG).unwrap();

    let app = build_test_app_with_assets(test_pool().await, assets.path());
    let token = register_and_login(&app, "owner").await;
    let animal = create_animal(&app, &token, "Rex").await;

    for photo in [
        private.to_string_lossy().into_owned(),
        format!("/media/../../{}", private.display()),
    ] {
        let response = put_json_auth(
            app.clone(),
            &format!("/api/v1/animals/{animal}"),
            json!({ "photo": photo }),
            &token,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response =
            get_auth(app.clone(), &format!("/api/v1/animals/{animal}/pdf"), &token).await;
        assert_eq!(response.status(), StatusCode::OK);
        let pdf = body_bytes(response).await;
        assert_eq!(pdf_image_count(&pdf), 1, "only the logo may be embedded for {photo}");
    }
}

#[tokio::test]
async fn missing_photo_does_not_fail_export() {
    let app = build_test_app(test_pool().await);
    let token = register_and_login(&app, "owner").await;
    let animal = create_animal(&app, &token, "Rex").await;
    put_json_auth(
        app.clone(),
        &format!("/api/v1/animals/{animal}"),
        json!({ "photo": "/media/animals/does-not-exist.jpg" }),
        &token,
    )
    .await;

    let response = get_auth(app, &format!("/api/v1/animals/{animal}/pdf"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(pdf_image_count(&body_bytes(response).await), 0);
}

#[tokio::test]
async fn other_owners_animal_cannot_be_exported() {
    let app = build_test_app(test_pool().await);
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;
    let animal = create_animal(&app, &alice, "Rex").await;

    let response = get_auth(app, &format!("/api/v1/animals/{animal}/pdf"), &bob).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_requires_a_token() {
    let app = build_test_app(test_pool().await);
    let response = get(app, "/api/v1/animals/1/pdf").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
