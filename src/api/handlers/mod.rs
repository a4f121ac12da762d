//! HTTP request handlers.

pub mod account_handler;
pub mod admin_handler;
pub mod application_handler;
pub mod auth_handler;
pub mod job_handler;
pub mod public_handler;

pub use account_handler::account_routes;
pub use admin_handler::admin_routes;
pub use application_handler::application_routes;
pub use auth_handler::guest_routes;
pub use job_handler::job_routes;
pub use public_handler::public_routes;
