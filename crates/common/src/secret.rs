//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports the [`secrecy`] types used throughout the workspace. Plaintext
//! passwords arriving in login/signup bodies and the token signing secret are
//! held as [`SecretString`], so deriving `Debug` on a request or config struct
//! never prints them.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct LoginBody {
//!     username: String,
//!     password: SecretString,
//! }
//!
//! let body: LoginBody =
//!     serde_json::from_str(r#"{"username": "alf", "password": "melmac"}"#).unwrap();
//!
//! assert!(!format!("{body:?}").contains("melmac"));
//! assert_eq!(body.password.expose_secret(), "melmac");
//! ```
//!
//! Access to the inner value always goes through `expose_secret()`, which
//! makes every read of a plaintext password greppable.

pub use secrecy::{ExposeSecret, SecretString};
