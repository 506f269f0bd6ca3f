//! Tests for issued credential tokens.

use std::collections::BTreeSet;
use user_service::services::auth_service::TOKEN_EXPIRY_SECONDS;
use user_test_utils::{
    decode_claims, TestTokenBuilder, TestUserServer, TokenAssertions, ALF, TEST_JWT_SECRET,
    WRONG_JWT_SECRET,
};

/// Issued tokens live exactly 48 hours.
#[tokio::test]
async fn test_token_expires_in_48_hours() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    server.seed_account(ALF.username, ALF.password, ALF.name).await?;

    let token = server.login(ALF.username, ALF.password).await?;

    token
        .assert_lifetime(TOKEN_EXPIRY_SECONDS)
        .assert_expires_in(48 * 60 * 60);

    Ok(())
}

/// Issued tokens verify under the configured secret and no other.
#[tokio::test]
async fn test_token_verifies_only_with_configured_secret() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    let alf = server
        .seed_account(ALF.username, ALF.password, ALF.name)
        .await?;

    let token = server.login(ALF.username, ALF.password).await?;

    let claims = decode_claims(&token, TEST_JWT_SECRET)?;
    assert_eq!(claims["id"], alf.id.as_str());
    assert_eq!(claims["username"], "alf");

    assert!(decode_claims(&token, WRONG_JWT_SECRET).is_err());

    Ok(())
}

/// Issued tokens carry exactly `id`, `username`, `iat` and `exp`.
#[tokio::test]
async fn test_token_claims_match_builder_shape() -> Result<(), anyhow::Error> {
    let server = TestUserServer::spawn().await?;
    server.seed_account(ALF.username, ALF.password, ALF.name).await?;

    let token = server.login(ALF.username, ALF.password).await?;
    let issued = decode_claims(&token, TEST_JWT_SECRET)?;
    let expected = TestTokenBuilder::new().build();

    let keys = |v: &serde_json::Value| -> BTreeSet<String> {
        v.as_object()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    };
    assert_eq!(keys(&issued), keys(&expected));

    Ok(())
}
