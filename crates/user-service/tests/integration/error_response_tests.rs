//! Tests for the JSON error contract: every failure is `{"error": message}`.

use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use user_service::repositories::accounts::memory::InMemoryAccountStore;
use user_test_utils::TestUserServer;

async fn error_body(response: reqwest::Response) -> Result<serde_json::Value, anyhow::Error> {
    Ok(response.json().await?)
}

// ============================================================================
// Route Not Found
// ============================================================================

#[tokio::test]
async fn test_unknown_routes_return_json_404() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;

    for (method, path) in [
        (reqwest::Method::GET, "/users"),
        (reqwest::Method::POST, "/users/logout"),
        (reqwest::Method::DELETE, "/"),
        (reqwest::Method::GET, "/users/login/extra"),
    ] {
        let response = server
            .client()
            .request(method.clone(), format!("{}{}", server.url(), path))
            .send()
            .await?;

        assert_eq!(
            response.status(),
            StatusCode::NOT_FOUND,
            "{} {} should be 404",
            method,
            path
        );
        assert_eq!(
            error_body(response).await?,
            json!({ "error": "Endpoint not found" })
        );
    }

    Ok(())
}

#[tokio::test]
async fn test_wrong_method_on_user_routes_returns_json_404() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;

    for path in ["/users/login", "/users/signup"] {
        let response = server
            .client()
            .get(format!("{}{}", server.url(), path))
            .send()
            .await?;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            error_body(response).await?,
            json!({ "error": "Endpoint not found" })
        );
    }

    Ok(())
}

// ============================================================================
// Malformed Requests
// ============================================================================

#[tokio::test]
async fn test_signup_missing_fields_returns_400() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/users/signup", server.url()))
        .json(&json!({ "username": "niconsole" }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_body(response).await?,
        json!({ "error": "Sent wrong format of request" })
    );
    assert!(server.store().is_empty().await, "Nothing should be stored");

    Ok(())
}

#[tokio::test]
async fn test_malformed_bodies_return_400() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    let login_url = format!("{}/users/login", server.url());

    let cases = [
        ("application/json", "{not json"),
        ("application/json", r#"{"username": 7, "password": "melmac"}"#),
        ("application/json", r#"{"username": "", "password": "melmac"}"#),
        ("application/json", "[]"),
        ("application/json", r#"["alf", "melmac"]"#),
        ("application/json", r#""alf""#),
        ("text/plain", r#"{"username": "alf", "password": "melmac"}"#),
    ];

    for (content_type, body) in cases {
        let response = server
            .client()
            .post(&login_url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await?;

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{} body {:?} should be rejected",
            content_type,
            body
        );
        assert_eq!(
            error_body(response).await?,
            json!({ "error": "Sent wrong format of request" })
        );
    }

    assert_eq!(server.store().lookup_count(), 0, "No lookups for bad bodies");

    Ok(())
}

#[tokio::test]
async fn test_signup_positional_array_creates_nothing() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/users/signup", server.url()))
        .json(&json!(["yoda", "bewater", "Yoda"]))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        error_body(response).await?,
        json!({ "error": "Sent wrong format of request" })
    );
    assert!(server.store().is_empty().await);

    Ok(())
}

// ============================================================================
// General Server Error
// ============================================================================

#[tokio::test]
async fn test_store_failure_returns_generic_500() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn_with_store(Arc::new(InMemoryAccountStore::failing())).await?;

    let response = server
        .client()
        .post(format!("{}/users/login", server.url()))
        .json(&json!({ "username": "alf", "password": "melmac" }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.text().await?;
    assert!(!body.contains("Mock account store error"), "No internals leaked");
    let json: serde_json::Value = serde_json::from_str(&body)?;
    assert_eq!(json, json!({ "error": "General Server Error" }));

    Ok(())
}
