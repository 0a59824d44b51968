mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_doctor, get_auth, post_json_auth, register_and_login,
    test_pool,
};
use serde_json::json;

#[tokio::test]
async fn doctors_are_shared_and_sorted() {
    let app = build_test_app(test_pool().await);
    let alice = register_and_login(&app, "alice").await;
    let bob = register_and_login(&app, "bob").await;

    create_doctor(&app, &alice, "Dr. Zhivago").await;
    create_doctor(&app, &bob, "Dr. Adams").await;

    let json = body_json(get_auth(app, "/api/v1/doctors", &alice).await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["full_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Dr. Adams", "Dr. Zhivago"]);
}

#[tokio::test]
async fn get_doctor_by_id() {
    let app = build_test_app(test_pool().await);
    let token = register_and_login(&app, "owner").await;
    let id = create_doctor(&app, &token, "Dr. Watson").await;

    let response = get_auth(app.clone(), &format!("/api/v1/doctors/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["specialization"], "Surgery");

    let response = get_auth(app, "/api/v1/doctors/9999", &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["error"],
        "Doctor with id 9999 not found"
    );
}

#[tokio::test]
async fn doctor_fields_are_validated() {
    let app = build_test_app(test_pool().await);
    let token = register_and_login(&app, "owner").await;

    let bad = [
        json!({ "full_name": " ", "specialization": "Dentistry" }),
        json!({ "full_name": "Dr. X", "specialization": "Dentistry", "email": "nope" }),
        json!({ "full_name": "Dr. X", "specialization": "Dentistry", "phone": "1".repeat(31) }),
    ];
    for body in bad {
        let response = post_json_auth(app.clone(), "/api/v1/doctors", body.clone(), &token).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}
