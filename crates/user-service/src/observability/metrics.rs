//! Metrics definitions for the user service
//!
//! All metrics follow Prometheus naming conventions:
//! - `users_` prefix
//! - `_total` suffix for counters
//! - `_seconds` suffix for duration histograms
//!
//! # Cardinality
//!
//! - `status`: 2 values (success, error)
//! - `operation`: 2 values (login, signup)
//! - `error_category`: 4 values (see `ErrorCategory`)
//! - `path`: bounded by `normalize_path`

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

/// Install the Prometheus recorder and return the handle used to serve
/// `/metrics`.
///
/// Login latency is dominated by bcrypt (tens to hundreds of ms), so its
/// buckets start at 10ms.
///
/// # Errors
///
/// Returns error if a recorder is already installed in this process.
pub fn init_metrics_recorder() -> Result<PrometheusHandle, String> {
    PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Prefix("users_login".to_string()),
            &[0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500],
        )
        .map_err(|e| format!("Failed to set login latency buckets: {e}"))?
        .set_buckets_for_metric(
            Matcher::Prefix("users_http".to_string()),
            &[0.005, 0.010, 0.025, 0.050, 0.100, 0.250, 0.500, 1.000, 2.500],
        )
        .map_err(|e| format!("Failed to set HTTP latency buckets: {e}"))?
        .install_recorder()
        .map_err(|e| format!("Failed to install Prometheus recorder: {e}"))
}

// ============================================================================
// Account Metrics
// ============================================================================

/// Record a login attempt
///
/// Metric: `users_login_total`, `users_login_duration_seconds`
/// Labels: `status`
pub fn record_login(status: &str, duration: Duration) {
    histogram!("users_login_duration_seconds", "status" => status.to_string())
        .record(duration.as_secs_f64());

    counter!("users_login_total", "status" => status.to_string()).increment(1);
}

/// Record a signup attempt
///
/// Metric: `users_signup_total`
/// Labels: `status`
pub fn record_signup(status: &str) {
    counter!("users_signup_total", "status" => status.to_string()).increment(1);
}

// ============================================================================
// Error Metrics
// ============================================================================

/// Record error by category
///
/// Metric: `users_errors_total`
/// Labels: `operation`, `error_category`
pub fn record_error(operation: &str, error_category: &str) {
    counter!("users_errors_total",
        "operation" => operation.to_string(),
        "error_category" => error_category.to_string()
    )
    .increment(1);
}

// ============================================================================
// HTTP Request Metrics
// ============================================================================

/// Record HTTP request completion
///
/// Metric: `users_http_requests_total`, `users_http_request_duration_seconds`
/// Labels: `method`, `path`, `status_code`
pub fn record_http_request(method: &str, path: &str, status_code: u16, duration: Duration) {
    let normalized_path = normalize_path(path);

    histogram!("users_http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => normalized_path,
        "status_code" => status_code.to_string()
    )
    .record(duration.as_secs_f64());

    counter!("users_http_requests_total",
        "method" => method.to_string(),
        "path" => normalized_path,
        "status_code" => status_code.to_string()
    )
    .increment(1);
}

/// Map a request path onto a fixed label set.
///
/// Unknown paths all share `/other`; they are attacker-controlled.
fn normalize_path(path: &str) -> &'static str {
    match path {
        "/users/login" => "/users/login",
        "/users/signup" => "/users/signup",
        "/health" => "/health",
        "/ready" => "/ready",
        "/metrics" => "/metrics",
        _ => "/other",
    }
}
