mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::{TestApp, registration};
use ridepool_core::Role;
use serde_json::json;

#[tokio::test]
async fn test_login_reports_every_missing_field() {
    let app = TestApp::new();

    let response = app.post("/auth/login", None, json!({})).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["statusText"], "Unprocessable Entity");
    assert_eq!(
        response.body["message"],
        "email is required, password is required"
    );
    assert_eq!(
        response.body["details"],
        json!([
            { "location": "body", "field": "email", "message": "email is required" },
            { "location": "body", "field": "password", "message": "password is required" },
        ])
    );
}

#[tokio::test]
async fn test_register_collects_all_violations() {
    let app = TestApp::new();
    let mut body = registration("not-an-email", "ab");
    body["password"] = json!("short");

    let response = app.post("/auth/user/register", None, body).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = response.body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, ["email", "password", "pseudo"]);
    assert!(app.store.is_empty().await);
}

#[tokio::test]
async fn test_whitespace_only_values_are_missing() {
    let app = TestApp::new();

    let response = app
        .post(
            "/auth/login",
            None,
            json!({ "email": "   ", "password": "  " }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["details"][0]["location"], "body");
}

#[tokio::test]
async fn test_missing_content_type_is_a_validation_error() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/login")
        .body(Body::from(r#"{"email":"a@example.com","password":"x"}"#))
        .unwrap();

    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["message"],
        "Missing 'Content-Type: application/json' header"
    );
}

#[tokio::test]
async fn test_wrong_field_type_is_rejected() {
    let app = TestApp::new();

    let response = app
        .post(
            "/auth/login",
            None,
            json!({ "email": ["a@example.com"], "password": "secret123" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_logout_requires_account_id() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::User).await;

    let response = app.post("/auth/logout", Some(&token), json!({})).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"][0]["field"], "accountId");

    let response = app
        .post(
            "/auth/logout",
            Some(&token),
            json!({ "accountId": "not-a-uuid" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_listing_query_is_validated() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Admin).await;

    let response = app.get("/admin/accounts?limit=0", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        response.body["details"],
        json!([{ "location": "query", "field": "limit", "message": "limit must be between 1 and 100" }])
    );

    let response = app
        .get("/admin/accounts?limit=500&offset=-1", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"].as_array().unwrap().len(), 2);

    let response = app.get("/admin/accounts?limit=abc", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["details"][0]["location"], "query");

    let response = app.get("/admin/accounts?role=superuser", Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_status_update_rejects_unknown_status() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Admin).await;
    let rider = app.seed(Role::User).await;

    let response = app
        .patch(
            &format!("/admin/accounts/{}/status", rider.id),
            Some(&token),
            json!({ "status": "deleted" }),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_listing_accepts_largest_offset() {
    let app = TestApp::new();
    let (_, token) = app.signed_in(Role::Admin).await;

    let response = app
        .get(
            &format!("/admin/accounts?offset={}", i64::MAX),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"], json!([]));
    assert_eq!(response.body["meta"]["total"], 1);
    assert_eq!(response.body["meta"]["has_more"], false);
}
