//! Observability module for the user service
//!
//! # Privacy by Default
//!
//! All instrumentation uses `#[instrument(skip_all)]` and explicit safe field
//! allow-listing. Fields are categorized as:
//! - **SAFE**: Can be logged in plaintext (statuses, operation names)
//! - **HASHED**: Must be SHA-256 hashed for correlation (usernames)
//! - **NEVER**: Must never appear in logs (passwords, hashes, tokens)

pub mod metrics;

use sha2::{Digest, Sha256};

/// Hash a field value for correlation in logs (SHA-256, first 8 hex chars)
///
/// Used for usernames, which need correlation across log entries but should
/// not be stored in plaintext. Not a security primitive.
pub fn hash_for_correlation(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    let result = hasher.finalize();
    hex::encode(result.get(..4).unwrap_or_default())
}

/// Error categories for metrics labels (bounded cardinality)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Wrong credentials
    Authentication,
    /// Username taken, malformed body, unknown route
    Client,
    /// Hashing or signing failures
    Cryptographic,
    /// Database failures, timeouts and other server-side failures
    Internal,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => "authentication",
            ErrorCategory::Client => "client",
            ErrorCategory::Cryptographic => "cryptographic",
            ErrorCategory::Internal => "internal",
        }
    }
}

impl From<&crate::errors::UserServiceError> for ErrorCategory {
    fn from(err: &crate::errors::UserServiceError) -> Self {
        use crate::errors::UserServiceError;
        match err {
            UserServiceError::InvalidCredentials => ErrorCategory::Authentication,
            UserServiceError::IdentityTaken
            | UserServiceError::MalformedRequest(_)
            | UserServiceError::RouteNotFound => ErrorCategory::Client,
            UserServiceError::Crypto(_) => ErrorCategory::Cryptographic,
            UserServiceError::Database(_)
            | UserServiceError::Timeout
            | UserServiceError::Internal => ErrorCategory::Internal,
        }
    }
}
