//! Job board backend.
//!
//! A REST API for a job board: public job search, job-seeker
//! applications and bookmarks, employer job management and an admin
//! panel, built on Axum and SeaORM with a clean architecture layout.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (database, file uploads)
//! - **jobs**: Background jobs (email dispatch)
//! - **api**: HTTP handlers, middleware, and routes
//! - **types**: Shared types (pagination, outcomes)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod jobs;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Job, Password, User, UserRole};
pub use errors::{AppError, AppResult};
