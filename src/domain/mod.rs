//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod application;
pub mod job;
pub mod password;
pub mod taxonomy;
pub mod user;

pub use application::{JobApplication, SavedJob};
pub use job::{Job, JobDraft, JobFilters, JobStatus};
pub use password::Password;
pub use taxonomy::{Category, JobType};
pub use user::{User, UserResponse, UserRole};
