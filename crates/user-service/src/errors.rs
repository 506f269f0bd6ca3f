//! User service error types.
//!
//! Every error maps to an HTTP status and a `{"error": "<message>"}` body.
//! Server-side failures share one generic message; their detail is only
//! logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub const MSG_WRONG_CREDENTIALS: &str = "Wrong credentials";
pub const MSG_USERNAME_TAKEN: &str = "Username already exists";
pub const MSG_MALFORMED_REQUEST: &str = "Sent wrong format of request";
pub const MSG_ENDPOINT_NOT_FOUND: &str = "Endpoint not found";
pub const MSG_GENERAL_SERVER_ERROR: &str = "General Server Error";
pub const MSG_REQUEST_TIMEOUT: &str = "Request timed out";

#[derive(Debug, Error)]
pub enum UserServiceError {
    /// Unknown username or wrong password. The two are deliberately
    /// indistinguishable to callers.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists")]
    IdentityTaken,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Route not found")]
    RouteNotFound,

    /// The request did not complete within the router's timeout.
    #[error("Request timed out")]
    Timeout,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Cryptographic error: {0}")]
    Crypto(String),

    #[error("Internal server error")]
    Internal,
}

impl UserServiceError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserServiceError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            UserServiceError::IdentityTaken | UserServiceError::MalformedRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            UserServiceError::RouteNotFound => StatusCode::NOT_FOUND,
            UserServiceError::Timeout => StatusCode::REQUEST_TIMEOUT,
            UserServiceError::Database(_)
            | UserServiceError::Crypto(_)
            | UserServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to the client.
    pub fn public_message(&self) -> &'static str {
        match self {
            UserServiceError::InvalidCredentials => MSG_WRONG_CREDENTIALS,
            UserServiceError::IdentityTaken => MSG_USERNAME_TAKEN,
            UserServiceError::MalformedRequest(_) => MSG_MALFORMED_REQUEST,
            UserServiceError::RouteNotFound => MSG_ENDPOINT_NOT_FOUND,
            UserServiceError::Timeout => MSG_REQUEST_TIMEOUT,
            UserServiceError::Database(_)
            | UserServiceError::Crypto(_)
            | UserServiceError::Internal => MSG_GENERAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
}

impl IntoResponse for UserServiceError {
    fn into_response(self) -> Response {
        match &self {
            UserServiceError::Database(err) => {
                tracing::error!(target: "users.database", error = %err, "Database operation failed");
            }
            UserServiceError::Crypto(err) => {
                tracing::error!(target: "users.crypto", error = %err, "Cryptographic operation failed");
            }
            UserServiceError::Internal => {
                tracing::error!(target: "users.internal", "Internal error");
            }
            UserServiceError::Timeout => {
                tracing::warn!(target: "users.request", "Request timed out");
            }
            UserServiceError::MalformedRequest(detail) => {
                tracing::debug!(target: "users.request", detail = %detail, "Rejected malformed request");
            }
            _ => {}
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
