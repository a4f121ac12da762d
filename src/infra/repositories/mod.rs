//! Repository layer
//!
//! Repositories are the only code that touches SeaORM entities; the
//! services above them see domain types and trait objects.

pub mod application_repository;
pub mod entities;
pub mod job_repository;
pub mod password_reset_repository;
pub mod saved_job_repository;
pub mod taxonomy_repository;
pub mod user_repository;

pub use application_repository::{ApplicationRepository, ApplicationStore};
pub use job_repository::{JobRepository, JobStore};
pub use password_reset_repository::{PasswordResetRepository, PasswordResetStore};
pub use saved_job_repository::{SavedJobRepository, SavedJobStore};
pub use taxonomy_repository::{TaxonomyRepository, TaxonomyStore};
pub use user_repository::{ProfileChanges, UserRepository, UserStore};

#[cfg(test)]
pub use application_repository::MockApplicationRepository;
#[cfg(test)]
pub use job_repository::MockJobRepository;
#[cfg(test)]
pub use password_reset_repository::MockPasswordResetRepository;
#[cfg(test)]
pub use saved_job_repository::MockSavedJobRepository;
#[cfg(test)]
pub use taxonomy_repository::MockTaxonomyRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
