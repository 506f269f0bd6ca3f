use crate::errors::UserServiceError;
use chrono::{DateTime, Utc};
use common::secret::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

/// Account model (maps to accounts table)
#[derive(Clone, FromRow)]
pub struct Account {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub photo: String,
    pub bio: String,
    pub friends: Vec<Uuid>,
    pub enemies: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// The password hash never shows up in logs.
impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .field("name", &self.name)
            .field("photo", &self.photo)
            .field("bio", &self.bio)
            .field("friends", &self.friends)
            .field("enemies", &self.enemies)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Fields the store needs to persist a new account.
///
/// Relations always start empty, so they are not part of this type.
#[derive(Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub name: String,
    pub photo: String,
    pub bio: String,
}

/// External rendering of an account.
///
/// Carries no password hash and no storage bookkeeping (`created_at`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub id: String,
    pub username: String,
    pub name: String,
    pub photo: String,
    pub bio: String,
    pub friends: Vec<String>,
    pub enemies: Vec<String>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id.to_string(),
            username: account.username,
            name: account.name,
            photo: account.photo,
            bio: account.bio,
            friends: account.friends.iter().map(Uuid::to_string).collect(),
            enemies: account.enemies.iter().map(Uuid::to_string).collect(),
        }
    }
}

/// Request bodies that need checks beyond what serde enforces.
pub trait Validate {
    fn validate(&self) -> Result<(), UserServiceError>;
}

fn require_non_empty(field: &str, value: &str) -> Result<(), UserServiceError> {
    if value.is_empty() {
        return Err(UserServiceError::MalformedRequest(format!(
            "field `{}` must not be empty",
            field
        )));
    }
    Ok(())
}

/// Body of `POST /users/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), UserServiceError> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", self.password.expose_secret())
    }
}

/// Body of `POST /users/signup`.
#[derive(Debug, Deserialize)]
pub struct NewAccountRequest {
    pub username: String,
    pub password: SecretString,
    pub name: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl Validate for NewAccountRequest {
    fn validate(&self) -> Result<(), UserServiceError> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", self.password.expose_secret())?;
        require_non_empty("name", &self.name)
    }
}

/// Successful login response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Readiness probe response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub database: String,
}
