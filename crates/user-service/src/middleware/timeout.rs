//! Request timeout handling.

use axum::BoxError;
use std::time::Duration;
use tower::timeout::error::Elapsed;

use crate::errors::UserServiceError;

/// Time a request may take before it is answered with a 408.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Convert an error raised by the timeout layer into a JSON error response.
pub async fn handle_timeout_error(err: BoxError) -> UserServiceError {
    if err.is::<Elapsed>() {
        UserServiceError::Timeout
    } else {
        tracing::error!(target: "users.internal", error = %err, "Unhandled middleware error");
        UserServiceError::Internal
    }
}
