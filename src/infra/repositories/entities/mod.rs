//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod category;
pub mod job;
pub mod job_application;
pub mod job_type;
pub mod password_reset_token;
pub mod saved_job;
pub mod user;
