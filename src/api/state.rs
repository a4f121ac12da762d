//! Application state - Dependency injection container.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{ServiceContainer, Services};

/// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    /// Service container behind a trait so tests can stub it
    pub services: Arc<dyn ServiceContainer>,
    database: Option<Arc<Database>>,
}

impl AppState {
    /// Create application state from database connection and config.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let services = Arc::new(Services::from_connection(
            database.get_connection(),
            config,
        ));

        Self {
            services,
            database: Some(database),
        }
    }

    /// State backed by an injected container, without a live database.
    /// The health endpoint reports the database as absent.
    pub fn with_services(services: Arc<dyn ServiceContainer>) -> Self {
        Self {
            services,
            database: None,
        }
    }

    pub fn database(&self) -> Option<&Arc<Database>> {
        self.database.as_ref()
    }
}
