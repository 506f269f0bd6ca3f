//! Test server harness for E2E testing
//!
//! Provides TestUserServer for spawning real user-service instances in tests.
//! The server is backed by the in-memory account store, so no database is
//! needed.

use crate::test_ids::TEST_JWT_SECRET;
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;
use user_service::config::{Config, MIN_BCRYPT_COST};
use user_service::crypto;
use user_service::models::{AccountView, NewAccount};
use user_service::observability::metrics::init_metrics_recorder;
use user_service::repositories::accounts::memory::InMemoryAccountStore;
use user_service::repositories::AccountStore;
use user_service::routes::{self, AppState};

/// Configuration used by every test server: fixed secret, cheapest bcrypt cost.
pub fn test_config() -> Config {
    let vars = HashMap::from([
        (
            "DATABASE_URL".to_string(),
            "postgresql://unused/users_test".to_string(),
        ),
        ("BIND_ADDRESS".to_string(), "127.0.0.1:0".to_string()),
        ("JWT_SECRET".to_string(), TEST_JWT_SECRET.to_string()),
        ("BCRYPT_COST".to_string(), MIN_BCRYPT_COST.to_string()),
    ]);
    Config::from_vars(&vars).expect("test configuration should be valid")
}

/// Test harness for spawning the user service in E2E tests
///
/// # Example
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_signup_e2e() -> Result<(), anyhow::Error> {
///     let server = TestUserServer::spawn().await?;
///
///     let response = server
///         .client()
///         .post(format!("{}/users/signup", server.url()))
///         .json(&signup_body)
///         .send()
///         .await?;
///
///     assert_eq!(response.status(), 200);
///     Ok(())
/// }
/// ```
pub struct TestUserServer {
    addr: SocketAddr,
    store: Arc<InMemoryAccountStore>,
    config: Config,
    client: reqwest::Client,
    _handle: JoinHandle<()>,
}

impl TestUserServer {
    /// Spawn a server with an empty account store
    pub async fn spawn() -> Result<Self, anyhow::Error> {
        Self::spawn_with_store(Arc::new(InMemoryAccountStore::new())).await
    }

    /// Spawn a server over the given store
    ///
    /// The server will:
    /// - Bind to a random available port (127.0.0.1:0)
    /// - Start the HTTP server in the background
    pub async fn spawn_with_store(store: Arc<InMemoryAccountStore>) -> Result<Self, anyhow::Error> {
        let config = test_config();

        let state = Arc::new(
            AppState::new(&config, store.clone())
                .map_err(|e| anyhow::anyhow!("Failed to build application state: {}", e))?,
        );

        // The global recorder can only be installed once per process; later
        // servers get a standalone recorder.
        let metrics_handle = match init_metrics_recorder() {
            Ok(handle) => handle,
            Err(_) => PrometheusBuilder::new().build_recorder().handle(),
        };

        let app = routes::build_routes(state, metrics_handle);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind test server: {}", e))?;

        let addr = listener
            .local_addr()
            .map_err(|e| anyhow::anyhow!("Failed to get local address: {}", e))?;

        let handle = tokio::spawn(async move {
            let make_service = app.into_make_service_with_connect_info::<SocketAddr>();
            if let Err(e) = axum::serve(listener, make_service).await {
                eprintln!("Test server error: {}", e);
            }
        });

        Ok(Self {
            addr,
            store,
            config,
            client: reqwest::Client::new(),
            _handle: handle,
        })
    }

    /// Get the base URL of the test server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Get the socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Get reference to the server configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get the account store backing the server
    pub fn store(&self) -> &Arc<InMemoryAccountStore> {
        &self.store
    }

    /// Get a shared HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Insert an account directly into the store, bypassing signup
    pub async fn seed_account(
        &self,
        username: &str,
        password: &str,
        name: &str,
    ) -> Result<AccountView, anyhow::Error> {
        let password_hash = crypto::hash_password(password, self.config.bcrypt_cost)?;
        let account = self
            .store
            .create(NewAccount {
                username: username.to_string(),
                password_hash,
                name: name.to_string(),
                photo: String::new(),
                bio: String::new(),
            })
            .await?;

        Ok(AccountView::from(account))
    }

    /// POST /users/login and return the issued token
    ///
    /// Fails unless the server answers 200.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, anyhow::Error> {
        let response = self
            .client
            .post(format!("{}/users/login", self.url()))
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Login failed with status {}", status);
        }

        let body: serde_json::Value = response.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("Login response has no token"))
    }
}

impl Drop for TestUserServer {
    fn drop(&mut self) {
        self._handle.abort();
    }
}
