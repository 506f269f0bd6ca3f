//! Custom test assertions for expressive tests
//!
//! Provides trait-based assertions for credential tokens.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;

/// JWT header structure
#[derive(Debug, Deserialize)]
struct JwtHeader {
    pub alg: String,
    pub typ: String,
}

/// JWT claims structure
#[derive(Debug, Deserialize)]
struct JwtClaims {
    pub id: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
}

fn decode_part<T: serde::de::DeserializeOwned>(token: &str, index: usize, what: &str) -> T {
    let part = token
        .split('.')
        .nth(index)
        .unwrap_or_else(|| panic!("JWT has no {} part", what));
    let bytes = URL_SAFE_NO_PAD
        .decode(part)
        .unwrap_or_else(|e| panic!("Failed to base64 decode JWT {}: {:?}", what, e));
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("Failed to parse JWT {} JSON: {:?}", what, e))
}

fn claims(token: &str) -> JwtClaims {
    decode_part(token, 1, "payload")
}

/// Verify an HS256 token under `secret` (signature and expiry) and return its
/// claims as JSON.
pub fn decode_claims(
    token: &str,
    secret: &str,
) -> Result<serde_json::Value, jsonwebtoken::errors::Error> {
    decode::<serde_json::Value>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Custom assertions for issued tokens
///
/// # Example
/// ```rust,ignore
/// token
///     .assert_valid_jwt()
///     .assert_for_username("alf")
///     .assert_lifetime(48 * 60 * 60)
///     .assert_signed_with(TEST_JWT_SECRET);
/// ```
pub trait TokenAssertions {
    /// Assert that the token is a well-formed HS256 JWT with the expected claims
    fn assert_valid_jwt(&self) -> &Self;

    /// Assert that the token carries the specified username
    fn assert_for_username(&self, username: &str) -> &Self;

    /// Assert that the token carries the specified account id
    fn assert_for_account(&self, id: &str) -> &Self;

    /// Assert that `exp - iat` equals `seconds`
    fn assert_lifetime(&self, seconds: i64) -> &Self;

    /// Assert that the token expires within the specified seconds (5s tolerance)
    fn assert_expires_in(&self, seconds: u64) -> &Self;

    /// Assert that the signature verifies under `secret`
    fn assert_signed_with(&self, secret: &str) -> &Self;
}

impl TokenAssertions for String {
    fn assert_valid_jwt(&self) -> &Self {
        let parts = self.split('.').count();
        assert_eq!(
            parts, 3,
            "JWT must have 3 parts (header.payload.signature), got {}",
            parts
        );

        let header: JwtHeader = decode_part(self, 0, "header");
        assert_eq!(header.alg, "HS256", "Expected HS256 algorithm");
        assert_eq!(header.typ, "JWT", "Expected JWT type");

        let claims = claims(self);
        assert!(!claims.id.is_empty(), "JWT id claim must not be empty");
        assert!(claims.exp > claims.iat, "JWT must expire after it is issued");

        self
    }

    fn assert_for_username(&self, username: &str) -> &Self {
        let claims = claims(self);
        assert_eq!(
            claims.username, username,
            "Expected username '{}', got '{}'",
            username, claims.username
        );
        self
    }

    fn assert_for_account(&self, id: &str) -> &Self {
        let claims = claims(self);
        assert_eq!(claims.id, id, "Expected account id '{}', got '{}'", id, claims.id);
        self
    }

    fn assert_lifetime(&self, seconds: i64) -> &Self {
        let claims = claims(self);
        assert_eq!(
            claims.exp - claims.iat,
            seconds,
            "Expected token lifetime of {} seconds, got {}",
            seconds,
            claims.exp - claims.iat
        );
        self
    }

    fn assert_expires_in(&self, seconds: u64) -> &Self {
        let claims = claims(self);
        let expires_in = claims.exp - chrono::Utc::now().timestamp();

        // Allow 5-second tolerance for slow test runs
        assert!(
            (expires_in - seconds as i64).abs() <= 5,
            "Expected token to expire in {} seconds, but expires in {} seconds",
            seconds,
            expires_in
        );
        self
    }

    fn assert_signed_with(&self, secret: &str) -> &Self {
        let result = decode_claims(self, secret);
        assert!(
            result.is_ok(),
            "Token signature does not verify: {:?}",
            result.err()
        );
        self
    }
}
