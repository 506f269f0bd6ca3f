use crate::errors::UserServiceError;
use crate::handlers::ValidatedJson;
use crate::models::{AccountView, LoginRequest, NewAccountRequest, TokenResponse};
use crate::routes::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// Handle login
///
/// POST /users/login
pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<Json<TokenResponse>, UserServiceError> {
    let token = state
        .authenticator
        .authenticate(&payload.username, &payload.password)
        .await?;

    Ok(Json(token))
}

/// Handle signup
///
/// POST /users/signup
///
/// Responds 200 with the created account's external view.
pub async fn handle_signup(
    State(state): State<Arc<AppState>>,
    ValidatedJson(payload): ValidatedJson<NewAccountRequest>,
) -> Result<Json<AccountView>, UserServiceError> {
    let account = state.registrar.register(payload).await?;

    Ok(Json(account))
}

/// Fallback for unknown routes and unsupported methods on known routes.
pub async fn not_found() -> UserServiceError {
    UserServiceError::RouteNotFound
}
