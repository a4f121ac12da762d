//! Service Container - centralized service access.
//!
//! Handlers depend on this trait, never on concrete managers, so
//! integration tests can swap in stub services.

use std::sync::Arc;

use super::{ApplicationService, AuthService, JobService, UserService};
use crate::config::Config;
use crate::infra::{Persistence, ProfileImageStore};

#[cfg(test)]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(test, automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get job service
    fn jobs(&self) -> Arc<dyn JobService>;

    /// Get application service
    fn applications(&self) -> Arc<dyn ApplicationService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    job_service: Arc<dyn JobService>,
    application_service: Arc<dyn ApplicationService>,
}

impl Services {
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        job_service: Arc<dyn JobService>,
        application_service: Arc<dyn ApplicationService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            job_service,
            application_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{ApplicationManager, Authenticator, JobManager, UserManager};

        let uow = Arc::new(Persistence::new(db));
        let images = ProfileImageStore::new(&config.upload_dir);

        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let user_service = Arc::new(UserManager::new(uow.clone(), images));
        let job_service = Arc::new(JobManager::new(uow.clone()));
        let application_service = Arc::new(ApplicationManager::new(uow));

        Self {
            auth_service,
            user_service,
            job_service,
            application_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn jobs(&self) -> Arc<dyn JobService> {
        self.job_service.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationService> {
        self.application_service.clone()
    }
}
