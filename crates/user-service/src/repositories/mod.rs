//! Persistence layer.

pub mod accounts;

pub use accounts::{AccountStore, PgAccountStore};
