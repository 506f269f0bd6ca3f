//! HTTP routes for the user service.
//!
//! Defines the Axum router and application state.

use crate::config::Config;
use crate::errors::UserServiceError;
use crate::handlers;
use crate::middleware::{handle_timeout_error, http_metrics_middleware, REQUEST_TIMEOUT};
use crate::repositories::AccountStore;
use crate::services::{Authenticator, Registrar};
use axum::{
    error_handling::HandleErrorLayer,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account persistence.
    pub store: Arc<dyn AccountStore>,

    pub authenticator: Authenticator,

    pub registrar: Registrar,
}

impl AppState {
    /// Wire the services to `store` using the signing secret and bcrypt cost
    /// in `config`.
    pub fn new(config: &Config, store: Arc<dyn AccountStore>) -> Result<Self, UserServiceError> {
        let authenticator = Authenticator::new(
            Arc::clone(&store),
            config.jwt_secret.clone(),
            config.bcrypt_cost,
        )?;
        let registrar = Registrar::new(Arc::clone(&store), config.bcrypt_cost);

        Ok(Self {
            store,
            authenticator,
            registrar,
        })
    }
}

/// Build the application routes.
///
/// Creates an Axum router with:
/// - `/users/login` - Exchange credentials for a token (POST)
/// - `/users/signup` - Create an account (POST)
/// - `/health` - Liveness probe
/// - `/ready` - Readiness probe (pings the account store)
/// - `/metrics` - Prometheus metrics endpoint
/// - a JSON 404 for every other route, and for other methods on the user routes
/// - permissive CORS, request tracing and a 30 second timeout answered with
///   a JSON 408
/// - HTTP metrics middleware (outermost)
pub fn build_routes(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let user_routes = Router::new()
        .route(
            "/users/login",
            post(handlers::handle_login).fallback(handlers::not_found),
        )
        .route(
            "/users/signup",
            post(handlers::handle_signup).fallback(handlers::not_found),
        )
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .with_state(state);

    // Metrics route with its own state
    let metrics_routes = Router::new()
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(metrics_handle);

    // Layer order (bottom-to-top execution):
    // 1. CorsLayer
    // 2. TimeoutLayer (elapsed requests become a JSON 408)
    // 3. TraceLayer
    // 4. http_metrics_middleware (outermost)
    user_routes
        .merge(metrics_routes)
        .fallback(handlers::not_found)
        .layer(CorsLayer::permissive())
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout_error))
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT)),
        )
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(http_metrics_middleware))
}
