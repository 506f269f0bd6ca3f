//! HTTP middleware for the user service.

pub mod http_metrics;
pub mod timeout;

pub use http_metrics::http_metrics_middleware;
pub use timeout::{handle_timeout_error, REQUEST_TIMEOUT};
