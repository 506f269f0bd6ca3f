//! User Service Library
//!
//! Account registration and credential-token issuance over HTTP.
//!
//! # Modules
//!
//! - `config` - Service configuration
//! - `crypto` - Password hashing and token signing
//! - `errors` - Error types and their HTTP rendering
//! - `handlers` - HTTP request handlers
//! - `middleware` - HTTP middleware
//! - `models` - Data models and request bodies
//! - `observability` - Log correlation and metrics
//! - `repositories` - Account store
//! - `routes` - Router and application state
//! - `services` - Login and signup logic

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
