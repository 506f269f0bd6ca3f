//! Account registration: hash the password and store the new account.

use crate::crypto;
use crate::errors::UserServiceError;
use crate::models::{AccountView, NewAccount, NewAccountRequest};
use crate::observability::metrics::{record_error, record_signup};
use crate::observability::{hash_for_correlation, ErrorCategory};
use crate::repositories::AccountStore;
use common::secret::ExposeSecret;
use std::sync::Arc;
use tracing::instrument;

/// Creates new accounts.
#[derive(Clone)]
pub struct Registrar {
    store: Arc<dyn AccountStore>,
    bcrypt_cost: u32,
}

impl Registrar {
    pub fn new(store: Arc<dyn AccountStore>, bcrypt_cost: u32) -> Self {
        Self { store, bcrypt_cost }
    }

    /// Register a new account.
    ///
    /// # Steps
    ///
    /// 1. Reject if the username is already stored
    /// 2. Hash the password (bcrypt, configured cost)
    /// 3. Default photo and bio to `""`; relations start empty
    /// 4. Insert through the store
    ///
    /// The store's unique constraint still guards step 4, so a concurrent
    /// registration that slips past step 1 also ends in `IdentityTaken`.
    ///
    /// Returns the external view of the stored account (no password hash).
    #[instrument(skip_all, fields(user = %hash_for_correlation(&request.username), status))]
    pub async fn register(
        &self,
        request: NewAccountRequest,
    ) -> Result<AccountView, UserServiceError> {
        let result = self.create_account(request).await;

        let status = if result.is_ok() { "success" } else { "error" };
        tracing::Span::current().record("status", status);
        record_signup(status);
        if let Err(e) = &result {
            record_error("signup", ErrorCategory::from(e).as_str());
        }

        result
    }

    async fn create_account(
        &self,
        request: NewAccountRequest,
    ) -> Result<AccountView, UserServiceError> {
        if self
            .store
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            tracing::debug!(target: "users.signup", "Signup rejected: username already exists");
            return Err(UserServiceError::IdentityTaken);
        }

        let password = request.password;
        let cost = self.bcrypt_cost;
        let password_hash = tokio::task::spawn_blocking(move || {
            crypto::hash_password(password.expose_secret(), cost)
        })
        .await
        .map_err(|e| {
            tracing::error!(target: "users.signup", error = %e, "Password hashing task failed");
            UserServiceError::Internal
        })??;

        let account = self
            .store
            .create(NewAccount {
                username: request.username,
                password_hash,
                name: request.name,
                photo: request.photo.unwrap_or_default(),
                bio: request.bio.unwrap_or_default(),
            })
            .await?;

        tracing::info!(target: "users.signup", account_id = %account.id, "Account created");

        Ok(AccountView::from(account))
    }
}
