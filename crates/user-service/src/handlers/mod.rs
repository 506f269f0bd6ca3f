//! HTTP request handlers for the user service.

pub mod extract;
pub mod health;
pub mod metrics;
pub mod user_handler;

pub use extract::ValidatedJson;
pub use health::{health_check, readiness_check};
pub use metrics::metrics_handler;
pub use user_handler::{handle_login, handle_signup, not_found};
