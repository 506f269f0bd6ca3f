//! # User Service Test Utilities
//!
//! Shared test utilities for the user service.
//!
//! This crate provides:
//! - Fixed test accounts and a fixed signing secret
//! - Test data builders (TestTokenBuilder)
//! - Server test harness (TestUserServer for E2E tests)
//! - Custom assertions (TokenAssertions trait)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use user_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), anyhow::Error> {
//!     let server = TestUserServer::spawn().await?;
//!     server.seed_account(ALF.username, ALF.password, ALF.name).await?;
//!
//!     let token = server.login(ALF.username, ALF.password).await?;
//!     token.assert_valid_jwt().assert_for_username("alf");
//!     Ok(())
//! }
//! ```

pub mod assertions;
pub mod server_harness;
pub mod test_ids;
pub mod token_builders;

// Re-export commonly used items
pub use assertions::*;
pub use server_harness::*;
pub use test_ids::*;
pub use token_builders::*;
