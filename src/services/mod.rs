//! Service layer
//!
//! Use cases behind traits, resolved through the `Services` container.

pub mod application_service;
pub mod auth_service;
pub mod container;
pub mod job_service;
pub mod user_service;

#[cfg(test)]
pub mod test_support;

pub use application_service::{
    ApplicationManager, ApplicationService, ApplicationView, AppliedJobView, SavedJobView,
};
pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use container::{ServiceContainer, Services};
pub use job_service::{ApplicantView, HomeView, JobDetail, JobManager, JobService, JobView};
pub use user_service::{UserManager, UserService};
