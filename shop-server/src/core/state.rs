use std::sync::Arc;
use std::time::Duration;

use shop_client::{ClientConfig, ShopBackend};

use crate::auth::SessionStore;
use crate::core::{Config, Result};

/// Server state - shared references handed to every request
///
/// Cloning is cheap: the backend and the session store sit behind `Arc`.
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | config | Config | Configuration (immutable) |
/// | backend | Arc<dyn ShopBackend> | Hosted backend client |
/// | sessions | Arc<SessionStore> | Signed-in users by session token |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub backend: Arc<dyn ShopBackend>,
    pub sessions: Arc<SessionStore>,
}

impl ServerState {
    /// Create state around an existing backend (tests pass an in-memory one)
    pub fn new(config: Config, backend: Arc<dyn ShopBackend>) -> Self {
        let sessions = Arc::new(SessionStore::new(Duration::from_secs(
            config.session_ttl_secs,
        )));
        Self {
            config,
            backend,
            sessions,
        }
    }

    /// Build the HTTP backend client from the environment
    pub fn initialize(config: &Config) -> Result<Self> {
        let client_config = ClientConfig::from_env()?;
        let client = client_config.build_http_client()?;
        tracing::info!(backend = %client.base_url(), "Backend client ready");
        Ok(Self::new(config.clone(), Arc::new(client)))
    }

    pub fn backend(&self) -> &dyn ShopBackend {
        self.backend.as_ref()
    }

    pub fn timezone(&self) -> chrono_tz::Tz {
        self.config.timezone
    }
}
