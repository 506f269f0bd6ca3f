//! Credential verification and token issuance.

use crate::crypto::{self, Claims};
use crate::errors::UserServiceError;
use crate::models::TokenResponse;
use crate::observability::metrics::{record_error, record_login};
use crate::observability::{hash_for_correlation, ErrorCategory};
use crate::repositories::AccountStore;
use chrono::Utc;
use common::secret::{ExposeSecret, SecretString};
use std::sync::Arc;
use std::time::Instant;
use tracing::instrument;
use uuid::Uuid;

/// Token lifetime: 48 hours.
pub const TOKEN_EXPIRY_SECONDS: i64 = 48 * 60 * 60;

/// Decides whether a username/password pair earns a credential token.
#[derive(Clone)]
pub struct Authenticator {
    store: Arc<dyn AccountStore>,
    signing_secret: SecretString,
    /// Verified against when the username is unknown, so both failure paths
    /// cost one bcrypt verification.
    dummy_hash: Arc<str>,
}

impl Authenticator {
    /// Build an authenticator.
    ///
    /// Hashes a random value once at `bcrypt_cost` to serve as the dummy hash.
    pub fn new(
        store: Arc<dyn AccountStore>,
        signing_secret: SecretString,
        bcrypt_cost: u32,
    ) -> Result<Self, UserServiceError> {
        let dummy_hash = crypto::hash_password(&Uuid::new_v4().to_string(), bcrypt_cost)?;

        Ok(Self {
            store,
            signing_secret,
            dummy_hash: Arc::from(dummy_hash),
        })
    }

    /// Verify credentials and issue a token.
    ///
    /// # Steps
    ///
    /// 1. Look up the account by username (one read)
    /// 2. Verify the password against its bcrypt hash, or against the dummy
    ///    hash when no account matched
    /// 3. Sign a token embedding the account id and username, expiring in 48h
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` for an unknown username or a wrong password.
    /// Store and crypto failures pass through.
    #[instrument(skip_all, fields(user = %hash_for_correlation(username), status))]
    pub async fn authenticate(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<TokenResponse, UserServiceError> {
        let start = Instant::now();
        let result = self.verify_and_sign(username, password).await;

        let status = if result.is_ok() { "success" } else { "error" };
        tracing::Span::current().record("status", status);
        record_login(status, start.elapsed());
        if let Err(e) = &result {
            record_error("login", ErrorCategory::from(e).as_str());
        }

        result
    }

    async fn verify_and_sign(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<TokenResponse, UserServiceError> {
        let account = self.store.find_by_username(username).await?;

        let hash_to_verify = match &account {
            Some(a) => a.password_hash.clone(),
            None => self.dummy_hash.to_string(),
        };
        let password = password.clone();

        // bcrypt is deliberately slow; keep it off the async workers
        let is_valid = tokio::task::spawn_blocking(move || {
            crypto::verify_password(password.expose_secret(), &hash_to_verify)
        })
        .await
        .map_err(|e| {
            tracing::error!(target: "users.auth", error = %e, "Password verification task failed");
            UserServiceError::Internal
        })??;

        let account = match account {
            Some(account) if is_valid => account,
            Some(_) => {
                tracing::debug!(target: "users.auth", "Login rejected: password mismatch");
                return Err(UserServiceError::InvalidCredentials);
            }
            None => {
                tracing::debug!(target: "users.auth", "Login rejected: unknown username");
                return Err(UserServiceError::InvalidCredentials);
            }
        };

        let now = Utc::now().timestamp();
        let claims = Claims {
            id: account.id.to_string(),
            username: account.username,
            iat: now,
            exp: now + TOKEN_EXPIRY_SECONDS,
        };

        let token = crypto::sign_token(&claims, self.signing_secret.expose_secret().as_bytes())?;

        tracing::info!(target: "users.auth", "Credential token issued");

        Ok(TokenResponse { token })
    }
}
