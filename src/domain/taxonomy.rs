//! Job categories and job types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Job category (e.g. Engineering, Marketing)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Inactive categories are hidden from public filter lists
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Job type (e.g. Full Time, Remote)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobType {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
