//! Job applications and saved-job bookmarks.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A user's application to a job.
///
/// `employer_id` denormalizes the job owner at apply time so the
/// application survives later ownership-irrelevant job edits.
/// There is no uniqueness constraint: a user may apply more than once.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct JobApplication {
    pub id: i64,
    pub job_id: i64,
    /// Applicant
    pub user_id: i64,
    /// Job owner captured at apply time
    pub employer_id: i64,
    pub applied_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A user's bookmark of a job. No uniqueness constraint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SavedJob {
    pub id: i64,
    pub job_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
