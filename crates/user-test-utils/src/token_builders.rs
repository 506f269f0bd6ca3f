//! Builder patterns for test data construction
//!
//! Provides a fluent API for signing tokens with chosen claims, e.g. expired
//! tokens or tokens signed with the wrong secret.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;

/// Builder for test credential tokens
///
/// # Example
/// ```rust,ignore
/// let token = TestTokenBuilder::new()
///     .for_account("00000000-0000-0000-0000-000000000001", "alf")
///     .expires_in(-60)
///     .sign(TEST_JWT_SECRET);
/// ```
pub struct TestTokenBuilder {
    id: String,
    username: String,
    exp: i64,
    iat: i64,
}

impl TestTokenBuilder {
    /// Create a new token builder with defaults (expires in 48h)
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: "00000000-0000-0000-0000-000000000000".to_string(),
            username: "test-user".to_string(),
            exp: (now + Duration::hours(48)).timestamp(),
            iat: now.timestamp(),
        }
    }

    /// Set the account id and username
    pub fn for_account(mut self, id: &str, username: &str) -> Self {
        self.id = id.to_string();
        self.username = username.to_string();
        self
    }

    /// Set expiration in seconds from now (negative for an expired token)
    pub fn expires_in(mut self, seconds: i64) -> Self {
        self.exp = (Utc::now() + Duration::seconds(seconds)).timestamp();
        self
    }

    /// Set issued-at timestamp
    pub fn issued_at(mut self, timestamp: i64) -> Self {
        self.iat = timestamp;
        self
    }

    /// Build the claims as a JSON value
    pub fn build(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "username": self.username,
            "iat": self.iat,
            "exp": self.exp,
        })
    }

    /// Sign the claims with HS256
    pub fn sign(&self, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            &self.build(),
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("HS256 signing of test claims should succeed")
    }
}

impl Default for TestTokenBuilder {
    fn default() -> Self {
        Self::new()
    }
}
