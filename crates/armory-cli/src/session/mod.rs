//! Composition root: the one place that picks the backend and store.

mod navigator;
mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::debug;

use armory_core::{AuthBackend, RouteGuard, RouteTable, SessionManager};
use armory_demo::DemoAuthBackend;
use armory_http::{ApiClient, ApiGateway, HttpAuthBackend};

use crate::cli::{Backend, Config};

pub use navigator::CliNavigator;
pub use storage::FileSessionStore;

/// Everything a command needs, wired once per process.
pub struct App {
    pub session: Arc<SessionManager>,
    pub guard: RouteGuard,
    pub gateway: ApiGateway,
    pub demo: Arc<DemoAuthBackend>,
    pub store: Arc<FileSessionStore>,
}

impl App {
    /// Build the application and restore any persisted session.
    pub fn build(config: &Config) -> Result<Self> {
        let client =
            ApiClient::new(config.api_url.clone()).context("Failed to create HTTP client")?;

        let path = match &config.session_file {
            Some(path) => path.clone(),
            None => storage::default_session_path()?,
        };
        let store = Arc::new(FileSessionStore::new(path));

        let demo = Arc::new(DemoAuthBackend::new().context("Failed to set up demo accounts")?);
        let backend: Arc<dyn AuthBackend> = match config.backend {
            Backend::Http => Arc::new(HttpAuthBackend::from_client(client.clone())),
            Backend::Demo => demo.clone(),
        };

        debug!(
            backend = backend.name(),
            api = %client.api(),
            session_file = %store.path().display(),
            "Composing session"
        );

        let session = Arc::new(SessionManager::new(store.clone(), backend, demo.clone()));
        session.hydrate();

        let guard = RouteGuard::new(RouteTable::standard(), session.clone());
        let gateway = ApiGateway::new(client, session.clone(), Arc::new(CliNavigator));

        Ok(Self {
            session,
            guard,
            gateway,
            demo,
            store,
        })
    }
}
