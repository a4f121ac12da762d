//! Shared types used across handlers and services.

mod outcome;
mod pagination;

pub use outcome::Outcome;
pub use pagination::{PageQuery, Paginated, PaginationMeta};
