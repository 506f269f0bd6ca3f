use common::secret::SecretString;
use std::collections::HashMap;
use std::env;
use std::fmt;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:4000";

/// Default bcrypt cost factor (2^10 rounds).
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Lowest bcrypt cost accepted. Only useful for fast test suites.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest bcrypt cost accepted. Above this a single login takes seconds.
pub const MAX_BCRYPT_COST: u32 = 14;

/// Default size of the PostgreSQL connection pool.
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;

/// HS256 keys shorter than the hash output weaken the signature.
pub const MIN_JWT_SECRET_BYTES: usize = 32;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_address: String,
    /// Token signing secret (HS256).
    pub jwt_secret: SecretString,
    pub bcrypt_cost: u32,
    pub db_max_connections: u32,
}

/// The database URL usually embeds a password, so it is redacted too.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("bind_address", &self.bind_address)
            .field("jwt_secret", &"[REDACTED]")
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("db_max_connections", &self.db_max_connections)
            .finish()
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid JWT secret: {0}")]
    InvalidJwtSecret(String),

    #[error("Invalid bcrypt cost: {0}")]
    InvalidBcryptCost(String),

    #[error("Invalid database pool size: {0}")]
    InvalidDbMaxConnections(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let database_url = vars
            .get("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?
            .clone();

        let bind_address = vars
            .get("BIND_ADDRESS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let jwt_secret = vars
            .get("JWT_SECRET")
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        if jwt_secret.len() < MIN_JWT_SECRET_BYTES {
            return Err(ConfigError::InvalidJwtSecret(format!(
                "Expected at least {} bytes, got {}",
                MIN_JWT_SECRET_BYTES,
                jwt_secret.len()
            )));
        }
        let jwt_secret = SecretString::from(jwt_secret.clone());

        let bcrypt_cost = match vars.get("BCRYPT_COST") {
            Some(raw) => {
                let cost: u32 = raw.parse().map_err(|_| {
                    ConfigError::InvalidBcryptCost(format!("'{}' is not a number", raw))
                })?;
                if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
                    return Err(ConfigError::InvalidBcryptCost(format!(
                        "{} is outside {}-{}",
                        cost, MIN_BCRYPT_COST, MAX_BCRYPT_COST
                    )));
                }
                cost
            }
            None => DEFAULT_BCRYPT_COST,
        };

        let db_max_connections = match vars.get("DB_MAX_CONNECTIONS") {
            Some(raw) => match raw.parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidDbMaxConnections(format!(
                        "'{}' must be a positive integer",
                        raw
                    )))
                }
            },
            None => DEFAULT_DB_MAX_CONNECTIONS,
        };

        Ok(Config {
            database_url,
            bind_address,
            jwt_secret,
            bcrypt_cost,
            db_max_connections,
        })
    }
}
