//! Account repository.
//!
//! The [`AccountStore`] trait is the only way the services reach persistence.
//! [`PgAccountStore`] backs it with PostgreSQL; [`memory::InMemoryAccountStore`]
//! backs it with a map for tests.

use crate::errors::UserServiceError;
use crate::models::{Account, NewAccount};
use sqlx::PgPool;

/// Account persistence operations.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Find the account with exactly this username (case-sensitive).
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, UserServiceError>;

    /// Persist a new account.
    ///
    /// Returns `IdentityTaken` if the username is already stored, including
    /// when a concurrent insert wins the race.
    async fn create(&self, account: NewAccount) -> Result<Account, UserServiceError>;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), UserServiceError>;
}

/// PostgreSQL-backed account store.
#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AccountStore for PgAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, UserServiceError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT
                id, username, password_hash, name, photo, bio,
                friends, enemies, created_at
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserServiceError::Database(format!("Failed to fetch account: {}", e)))?;

        Ok(account)
    }

    async fn create(&self, account: NewAccount) -> Result<Account, UserServiceError> {
        let created = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (username, password_hash, name, photo, bio)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id, username, password_hash, name, photo, bio,
                friends, enemies, created_at
            "#,
        )
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.name)
        .bind(&account.photo)
        .bind(&account.bio)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                UserServiceError::IdentityTaken
            }
            _ => UserServiceError::Database(format!("Failed to create account: {}", e)),
        })?;

        Ok(created)
    }

    async fn ping(&self) -> Result<(), UserServiceError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| UserServiceError::Database(format!("Database ping failed: {}", e)))?;
        Ok(())
    }
}

/// In-memory account store for testing.
pub mod memory {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    /// Map-backed store keyed by username.
    #[derive(Default)]
    pub struct InMemoryAccountStore {
        accounts: RwLock<HashMap<String, Account>>,
        lookups: AtomicUsize,
        creates: AtomicUsize,
        return_error: bool,
    }

    impl InMemoryAccountStore {
        /// Create an empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a store whose every operation fails with a database error.
        pub fn failing() -> Self {
            Self {
                return_error: true,
                ..Self::default()
            }
        }

        /// Number of `find_by_username` calls made.
        pub fn lookup_count(&self) -> usize {
            self.lookups.load(Ordering::SeqCst)
        }

        /// Number of successful `create` calls made.
        pub fn create_count(&self) -> usize {
            self.creates.load(Ordering::SeqCst)
        }

        /// Number of stored accounts.
        pub async fn len(&self) -> usize {
            self.accounts.read().await.len()
        }

        /// Whether the store holds no accounts.
        pub async fn is_empty(&self) -> bool {
            self.accounts.read().await.is_empty()
        }

        /// Read an account without counting it as a lookup.
        pub async fn get(&self, username: &str) -> Option<Account> {
            self.accounts.read().await.get(username).cloned()
        }

        fn check_available(&self) -> Result<(), UserServiceError> {
            if self.return_error {
                return Err(UserServiceError::Database(
                    "Mock account store error".to_string(),
                ));
            }
            Ok(())
        }
    }

    #[async_trait::async_trait]
    impl AccountStore for InMemoryAccountStore {
        async fn find_by_username(
            &self,
            username: &str,
        ) -> Result<Option<Account>, UserServiceError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            self.check_available()?;
            Ok(self.accounts.read().await.get(username).cloned())
        }

        async fn create(&self, account: NewAccount) -> Result<Account, UserServiceError> {
            self.check_available()?;

            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&account.username) {
                return Err(UserServiceError::IdentityTaken);
            }

            let created = Account {
                id: Uuid::new_v4(),
                username: account.username,
                password_hash: account.password_hash,
                name: account.name,
                photo: account.photo,
                bio: account.bio,
                friends: Vec::new(),
                enemies: Vec::new(),
                created_at: Utc::now(),
            };
            accounts.insert(created.username.clone(), created.clone());
            self.creates.fetch_add(1, Ordering::SeqCst);

            Ok(created)
        }

        async fn ping(&self) -> Result<(), UserServiceError> {
            self.check_available()
        }
    }
}
