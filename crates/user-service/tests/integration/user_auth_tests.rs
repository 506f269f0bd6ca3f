//! E2E tests for the signup and login flows.
//!
//! ## Test Naming
//!
//! Tests follow the convention: `test_<feature>_<scenario>_<expected_result>`

use reqwest::StatusCode;
use serde_json::json;
use user_test_utils::{TestUserServer, TokenAssertions, ALF, ET, TEST_JWT_SECRET, YODA};

// ============================================================================
// Signup Tests
// ============================================================================

/// A new account is created and its external view returned.
#[tokio::test]
async fn test_signup_happy_path() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/users/signup", server.url()))
        .json(&json!({
            "username": YODA.username,
            "password": YODA.password,
            "name": YODA.name
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK, "Signup should succeed");

    let body: serde_json::Value = response.json().await?;
    assert!(body["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(body["username"], "yoda");
    assert_eq!(body["name"], "Yoda");
    assert_eq!(body["photo"], "", "photo should default to empty");
    assert_eq!(body["bio"], "", "bio should default to empty");
    assert_eq!(body["friends"], json!([]));
    assert_eq!(body["enemies"], json!([]));

    let stored = server
        .store()
        .get("yoda")
        .await
        .expect("account should be stored");
    assert_eq!(stored.photo, "");
    assert_eq!(stored.bio, "");

    Ok(())
}

/// The signup response never carries the password or its hash.
#[tokio::test]
async fn test_signup_response_excludes_secret() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/users/signup", server.url()))
        .json(&json!({
            "username": "consoledan",
            "password": "consoledan",
            "name": "ConsoleDan",
            "bio": "Soy yo y tal"
        }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await?;
    let obj = body.as_object().expect("response should be an object");
    assert!(!obj.contains_key("password"));
    assert!(!obj.contains_key("password_hash"));
    assert!(!obj.contains_key("_id"));
    assert!(!obj.contains_key("__v"));
    assert_eq!(body["bio"], "Soy yo y tal");

    let stored = server.store().get("consoledan").await.expect("stored");
    assert_ne!(stored.password_hash, "consoledan");

    Ok(())
}

/// Signing up twice with one username: one success, then 400.
#[tokio::test]
async fn test_signup_duplicate_username_fails() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    let body = json!({
        "username": "Morgan",
        "password": "pass",
        "name": "Morgan"
    });
    let url = format!("{}/users/signup", server.url());

    let first = server.client().post(&url).json(&body).send().await?;
    assert_eq!(first.status(), StatusCode::OK);

    let second = server.client().post(&url).json(&body).send().await?;
    assert_eq!(second.status(), StatusCode::BAD_REQUEST);
    let error: serde_json::Value = second.json().await?;
    assert_eq!(error, json!({ "error": "Username already exists" }));

    assert_eq!(server.store().len().await, 1, "Only one account stored");

    Ok(())
}

/// Concurrent signups for one username still store a single account.
#[tokio::test]
async fn test_signup_concurrent_duplicates_store_one() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    let url = format!("{}/users/signup", server.url());
    let body = json!({ "username": "racer", "password": "fast", "name": "Racer" });

    let requests = (0..5).map(|_| server.client().post(&url).json(&body).send());
    let responses = spawn_all(requests).await;

    let mut ok = 0;
    for response in responses {
        let response = response?;
        match response.status() {
            StatusCode::OK => ok += 1,
            StatusCode::BAD_REQUEST => {
                let error: serde_json::Value = response.json().await?;
                assert_eq!(error["error"], "Username already exists");
            }
            other => panic!("unexpected status {}", other),
        }
    }

    assert_eq!(ok, 1, "Exactly one signup should win");
    assert_eq!(server.store().len().await, 1);

    Ok(())
}

async fn spawn_all<F, T>(futures: impl Iterator<Item = F>) -> Vec<T>
where
    F: std::future::Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let handles: Vec<_> = futures.map(tokio::spawn).collect();
    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await.expect("request task should not panic"));
    }
    results
}

// ============================================================================
// Login Tests
// ============================================================================

/// A seeded account logs in and receives a token naming it.
#[tokio::test]
async fn test_login_seeded_account_succeeds() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    let alf = server
        .seed_account(ALF.username, ALF.password, ALF.name)
        .await?;

    let response = server
        .client()
        .post(format!("{}/users/login", server.url()))
        .json(&json!({ "username": "alf", "password": "melmac" }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await?;
    let token = body["token"]
        .as_str()
        .expect("response should include token")
        .to_string();

    token
        .assert_valid_jwt()
        .assert_for_username("alf")
        .assert_for_account(&alf.id)
        .assert_signed_with(TEST_JWT_SECRET);

    Ok(())
}

/// A wrong password is rejected with 401 "Wrong credentials".
#[tokio::test]
async fn test_login_wrong_password_fails() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    server.seed_account(ET.username, ET.password, ET.name).await?;

    let response = server
        .client()
        .post(format!("{}/users/login", server.url()))
        .json(&json!({ "username": "et", "password": "melmac" }))
        .send()
        .await?;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body, json!({ "error": "Wrong credentials" }));

    Ok(())
}

/// Unknown usernames get exactly the response a wrong password gets.
#[tokio::test]
async fn test_login_unknown_user_is_indistinguishable() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    server.seed_account(ALF.username, ALF.password, ALF.name).await?;
    let url = format!("{}/users/login", server.url());

    let unknown = server
        .client()
        .post(&url)
        .json(&json!({ "username": "niconsole", "password": "niconsolo" }))
        .send()
        .await?;
    let wrong = server
        .client()
        .post(&url)
        .json(&json!({ "username": "alf", "password": "myfriend" }))
        .send()
        .await?;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.status(), wrong.status());
    assert_eq!(unknown.text().await?, wrong.text().await?);

    Ok(())
}

/// Signup followed by login works, a wrong password still fails.
#[tokio::test]
async fn test_signup_then_login_round_trip() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;

    let response = server
        .client()
        .post(format!("{}/users/signup", server.url()))
        .json(&json!({
            "username": YODA.username,
            "password": YODA.password,
            "name": YODA.name
        }))
        .send()
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let created: serde_json::Value = response.json().await?;

    let token = server.login(YODA.username, YODA.password).await?;
    token
        .assert_valid_jwt()
        .assert_for_username("yoda")
        .assert_for_account(created["id"].as_str().expect("id"));

    assert!(server.login(YODA.username, "wrong").await.is_err());

    Ok(())
}

/// Login never writes to the store.
#[tokio::test]
async fn test_login_has_no_side_effects() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    server.seed_account(ALF.username, ALF.password, ALF.name).await?;

    server.login(ALF.username, ALF.password).await?;
    let _ = server.login(ALF.username, "wrong").await;
    let _ = server.login("nobody", "nothing").await;

    assert_eq!(server.store().create_count(), 1, "Only the seeded account");
    assert_eq!(server.store().lookup_count(), 3, "One lookup per login");

    Ok(())
}
