//! Job posting domain entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Publication status of a job posting. Only active jobs are publicly
/// visible; blocked jobs stay editable by admins but never surface in
/// search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Blocked,
    Active,
}

impl JobStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, JobStatus::Active)
    }
}

impl From<i16> for JobStatus {
    fn from(value: i16) -> Self {
        if value == 1 {
            JobStatus::Active
        } else {
            JobStatus::Blocked
        }
    }
}

impl From<JobStatus> for i16 {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Active => 1,
            JobStatus::Blocked => 0,
        }
    }
}

/// Job posting domain entity
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub category_id: i64,
    pub job_type_id: i64,
    /// Owning user; set at creation and never reassigned by normal users
    pub user_id: i64,
    pub vacancy: i32,
    pub salary: Option<String>,
    pub location: String,
    pub description: String,
    pub benefits: Option<String>,
    pub responsibility: Option<String>,
    pub qualifications: Option<String>,
    pub keywords: Option<String>,
    pub experience: Option<String>,
    pub company_name: String,
    pub company_location: Option<String>,
    pub company_website: Option<String>,
    pub status: JobStatus,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated field set for creating or updating a job posting.
/// The owner is never part of the draft; it is fixed at creation.
#[derive(Debug, Clone)]
pub struct JobDraft {
    pub title: String,
    pub category_id: i64,
    pub job_type_id: i64,
    pub vacancy: i32,
    pub salary: Option<String>,
    pub location: String,
    pub description: String,
    pub benefits: Option<String>,
    pub responsibility: Option<String>,
    pub qualifications: Option<String>,
    pub keywords: Option<String>,
    pub experience: Option<String>,
    pub company_name: String,
    pub company_location: Option<String>,
    pub company_website: Option<String>,
}

/// Public search filters. All filters are optional and compose
/// conjunctively except `keyword`, which matches title OR keywords.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JobFilters {
    /// Case-insensitive substring of title or keywords
    pub keyword: Option<String>,
    /// Exact location match
    pub location: Option<String>,
    /// Exact category id match
    pub category: Option<i64>,
    /// Comma-separated job type ids, membership filter
    pub job_type: Option<String>,
    /// Exact experience match
    pub experience: Option<String>,
    /// 0 = oldest first, anything else (or absent) = newest first
    pub sort: Option<i32>,
}

impl JobFilters {
    /// Parse the comma-separated job type list, dropping junk entries.
    pub fn job_type_ids(&self) -> Vec<i64> {
        self.job_type
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .filter_map(|part| part.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Ascending only when the caller explicitly asks for sort=0.
    pub fn ascending(&self) -> bool {
        self.sort == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_list_parses_comma_separated_ids() {
        let filters = JobFilters {
            job_type: Some("2,5".to_string()),
            ..Default::default()
        };
        assert_eq!(filters.job_type_ids(), vec![2, 5]);

        let messy = JobFilters {
            job_type: Some(" 1, x,3 ,".to_string()),
            ..Default::default()
        };
        assert_eq!(messy.job_type_ids(), vec![1, 3]);

        assert!(JobFilters::default().job_type_ids().is_empty());
    }

    #[test]
    fn sort_defaults_to_newest_first() {
        assert!(JobFilters {
            sort: Some(0),
            ..Default::default()
        }
        .ascending());
        assert!(!JobFilters {
            sort: Some(1),
            ..Default::default()
        }
        .ascending());
        assert!(!JobFilters::default().ascending());
    }

    #[test]
    fn status_maps_to_database_flag() {
        assert_eq!(JobStatus::from(1), JobStatus::Active);
        assert_eq!(JobStatus::from(0), JobStatus::Blocked);
        // Anything unexpected is treated as blocked, not active
        assert_eq!(JobStatus::from(7), JobStatus::Blocked);

        assert_eq!(i16::from(JobStatus::Active), 1);
        assert_eq!(i16::from(JobStatus::Blocked), 0);
    }
}
