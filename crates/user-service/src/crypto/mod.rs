use crate::config::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};
use crate::errors::UserServiceError;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
#[cfg(test)]
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

/// Maximum accepted token size in bytes, checked before any parsing.
///
/// Our tokens are ~200 bytes; anything past 4KB is not one of ours.
#[cfg(test)]
const MAX_JWT_SIZE_BYTES: usize = 4096;

/// Credential token claims.
///
/// `id` and `username` identify an account and are redacted from `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id (UUID string)
    pub id: String,
    pub username: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Claims")
            .field("id", &"[REDACTED]")
            .field("username", &"[REDACTED]")
            .field("iat", &self.iat)
            .field("exp", &self.exp)
            .finish()
    }
}

/// Hash a password with bcrypt.
///
/// # Arguments
///
/// * `password` - The plaintext password
/// * `cost` - Bcrypt cost factor (2^cost rounds), `MIN_BCRYPT_COST..=MAX_BCRYPT_COST`
///
/// # Errors
///
/// Returns `UserServiceError::Crypto` if the cost is out of range or hashing fails.
#[instrument(skip_all)]
pub fn hash_password(password: &str, cost: u32) -> Result<String, UserServiceError> {
    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(UserServiceError::Crypto(format!(
            "Invalid bcrypt cost: {} (must be {}-{})",
            cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
        )));
    }

    bcrypt::hash(password, cost)
        .map_err(|e| UserServiceError::Crypto(format!("Password hashing failed: {}", e)))
}

/// Verify a password against a bcrypt hash.
#[instrument(skip_all)]
pub fn verify_password(password: &str, hash: &str) -> Result<bool, UserServiceError> {
    bcrypt::verify(password, hash)
        .map_err(|e| UserServiceError::Crypto(format!("Password verification failed: {}", e)))
}

/// Sign credential token claims with HS256.
#[instrument(skip_all)]
pub fn sign_token(claims: &Claims, secret: &[u8]) -> Result<String, UserServiceError> {
    let mut header = Header::new(Algorithm::HS256);
    header.typ = Some("JWT".to_string());

    encode(&header, claims, &EncodingKey::from_secret(secret))
        .map_err(|e| UserServiceError::Crypto(format!("JWT signing operation failed: {}", e)))
}

/// Verify a credential token and return its claims.
///
/// Validates size, HS256 signature and expiration. Every failure maps to
/// `InvalidCredentials`; the cause is only logged at debug level.
///
/// Test-only: no route consumes tokens.
#[cfg(test)]
#[instrument(skip_all)]
pub(crate) fn verify_token(token: &str, secret: &[u8]) -> Result<Claims, UserServiceError> {
    if token.len() > MAX_JWT_SIZE_BYTES {
        tracing::debug!(
            target: "crypto",
            token_size = token.len(),
            max_size = MAX_JWT_SIZE_BYTES,
            "Token rejected: size exceeds maximum allowed"
        );
        return Err(UserServiceError::InvalidCredentials);
    }

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.set_required_spec_claims(&["exp"]);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| {
            tracing::debug!(target: "crypto", error = %e, "Token verification failed");
            UserServiceError::InvalidCredentials
        })?;

    Ok(token_data.claims)
}
