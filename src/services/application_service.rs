//! Application service - applying to, bookmarking and withdrawing from
//! jobs, plus the admin application panel.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::LIST_PAGE_SIZE;
use crate::domain::{Job, JobApplication, JobType, SavedJob, UserResponse};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::jobs::EmailJob;
use crate::types::{Outcome, Paginated};

/// One row of the "my applications" list.
#[derive(Debug, Serialize, ToSchema)]
pub struct AppliedJobView {
    pub application: JobApplication,
    pub job: Option<Job>,
    pub job_type: Option<JobType>,
    /// How many applications the job has received in total
    pub applications_count: i64,
}

/// One row of the "saved jobs" list.
#[derive(Debug, Serialize, ToSchema)]
pub struct SavedJobView {
    pub saved: SavedJob,
    pub job: Option<Job>,
    pub job_type: Option<JobType>,
    pub applications_count: i64,
}

/// One row of the admin application listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicationView {
    pub application: JobApplication,
    pub job: Option<Job>,
    pub applicant: Option<UserResponse>,
    pub employer: Option<UserResponse>,
}

/// Application service trait for dependency injection.
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Apply to an active job. Repeat applies create repeat rows; the
    /// owner is notified by email.
    async fn apply(&self, user_id: i64, job_id: i64) -> AppResult<Outcome>;

    /// Bookmark an active job. No dedup.
    async fn save(&self, user_id: i64, job_id: i64) -> AppResult<Outcome>;

    /// Withdraw one application by its row id. Duplicate applications
    /// to the same job stay in place.
    async fn remove_application(&self, user_id: i64, id: i64) -> AppResult<Outcome>;

    /// Drop one bookmark by its row id.
    async fn remove_saved(&self, user_id: i64, id: i64) -> AppResult<Outcome>;

    async fn my_applications(&self, user_id: i64, page: u64)
        -> AppResult<Paginated<AppliedJobView>>;

    async fn saved_jobs(&self, user_id: i64, page: u64) -> AppResult<Paginated<SavedJobView>>;

    /// Admin listing with applicant and employer joined.
    async fn list_applications(&self, page: u64) -> AppResult<Paginated<ApplicationView>>;

    /// Admin hard delete; already-gone rows are a benign outcome.
    async fn delete_application(&self, id: i64) -> AppResult<Outcome>;
}

/// Concrete implementation of ApplicationService using Unit of Work.
pub struct ApplicationManager<U: UnitOfWork> {
    uow: Arc<U>,
}

struct JobJoin {
    jobs: HashMap<i64, Job>,
    job_types: HashMap<i64, JobType>,
    counts: HashMap<i64, i64>,
}

impl<U: UnitOfWork> ApplicationManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Look up an active job for the soft flows; missing and blocked
    /// both read as not-there.
    async fn find_active_job(&self, job_id: i64) -> AppResult<Option<Job>> {
        let job = self.uow.jobs().find_by_id(job_id).await?;
        Ok(job.filter(|j| j.status.is_active()))
    }

    /// Batch-load jobs, their job types and their application counts
    /// for a page of application or bookmark rows.
    async fn join_jobs(&self, mut job_ids: Vec<i64>) -> AppResult<JobJoin> {
        job_ids.sort_unstable();
        job_ids.dedup();

        let jobs: HashMap<i64, Job> = self
            .uow
            .jobs()
            .find_many(job_ids.clone())
            .await?
            .into_iter()
            .map(|j| (j.id, j))
            .collect();

        let mut type_ids: Vec<i64> = jobs.values().map(|j| j.job_type_id).collect();
        type_ids.sort_unstable();
        type_ids.dedup();

        let job_types: HashMap<i64, JobType> = self
            .uow
            .taxonomy()
            .find_job_types(type_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let counts: HashMap<i64, i64> = self
            .uow
            .applications()
            .count_for_jobs(job_ids)
            .await?
            .into_iter()
            .collect();

        Ok(JobJoin {
            jobs,
            job_types,
            counts,
        })
    }
}

#[async_trait]
impl<U: UnitOfWork> ApplicationService for ApplicationManager<U> {
    async fn apply(&self, user_id: i64, job_id: i64) -> AppResult<Outcome> {
        let job = match self.find_active_job(job_id).await? {
            Some(job) => job,
            None => return Ok(Outcome::not_found("Job does not exist anymore.")),
        };

        if job.user_id == user_id {
            return Ok(Outcome::forbidden("You cannot apply to your own job."));
        }

        let applicant = self
            .uow
            .users()
            .find_by_id(user_id)
            .await?
            .ok_or_not_found()?;

        // Employer id is captured at apply time; the row keeps pointing
        // at the original owner even if the job changes hands later.
        self.uow
            .applications()
            .create(job.id, user_id, job.user_id)
            .await?;

        if let Some(owner) = self.uow.users().find_by_id(job.user_id).await? {
            EmailJob::application_received(
                owner.email,
                &owner.name,
                &applicant.name,
                &applicant.email,
                applicant.mobile.as_deref(),
                &job.title,
            )
            .dispatch();
        }

        Ok(Outcome::done("You have successfully applied."))
    }

    async fn save(&self, user_id: i64, job_id: i64) -> AppResult<Outcome> {
        if self.find_active_job(job_id).await?.is_none() {
            return Ok(Outcome::not_found("Job does not exist anymore."));
        }

        self.uow.saved_jobs().create(job_id, user_id).await?;
        Ok(Outcome::done("Job saved successfully."))
    }

    async fn remove_application(&self, user_id: i64, id: i64) -> AppResult<Outcome> {
        let removed = self.uow.applications().remove_owned(id, user_id).await?;

        if removed > 0 {
            Ok(Outcome::done("Application removed successfully."))
        } else {
            Ok(Outcome::not_found("Application not found."))
        }
    }

    async fn remove_saved(&self, user_id: i64, id: i64) -> AppResult<Outcome> {
        let removed = self.uow.saved_jobs().remove_owned(id, user_id).await?;

        if removed > 0 {
            Ok(Outcome::done("Saved job removed successfully."))
        } else {
            Ok(Outcome::not_found("Saved job not found."))
        }
    }

    async fn my_applications(
        &self,
        user_id: i64,
        page: u64,
    ) -> AppResult<Paginated<AppliedJobView>> {
        let (applications, total) = self.uow.applications().list_for_user(user_id, page).await?;

        let join = self
            .join_jobs(applications.iter().map(|a| a.job_id).collect())
            .await?;

        let rows = applications
            .into_iter()
            .map(|application| {
                let job = join.jobs.get(&application.job_id).cloned();
                AppliedJobView {
                    job_type: job
                        .as_ref()
                        .and_then(|j| join.job_types.get(&j.job_type_id).cloned()),
                    applications_count: join
                        .counts
                        .get(&application.job_id)
                        .copied()
                        .unwrap_or(0),
                    job,
                    application,
                }
            })
            .collect();

        Ok(Paginated::new(rows, page, LIST_PAGE_SIZE, total))
    }

    async fn saved_jobs(&self, user_id: i64, page: u64) -> AppResult<Paginated<SavedJobView>> {
        let (saved, total) = self.uow.saved_jobs().list_for_user(user_id, page).await?;

        let join = self
            .join_jobs(saved.iter().map(|s| s.job_id).collect())
            .await?;

        let rows = saved
            .into_iter()
            .map(|saved| {
                let job = join.jobs.get(&saved.job_id).cloned();
                SavedJobView {
                    job_type: job
                        .as_ref()
                        .and_then(|j| join.job_types.get(&j.job_type_id).cloned()),
                    applications_count: join.counts.get(&saved.job_id).copied().unwrap_or(0),
                    job,
                    saved,
                }
            })
            .collect();

        Ok(Paginated::new(rows, page, LIST_PAGE_SIZE, total))
    }

    async fn list_applications(&self, page: u64) -> AppResult<Paginated<ApplicationView>> {
        let (applications, total) = self.uow.applications().list(page).await?;

        let mut job_ids: Vec<i64> = applications.iter().map(|a| a.job_id).collect();
        job_ids.sort_unstable();
        job_ids.dedup();

        let mut user_ids: Vec<i64> = applications
            .iter()
            .flat_map(|a| [a.user_id, a.employer_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();

        let jobs: HashMap<i64, Job> = self
            .uow
            .jobs()
            .find_many(job_ids)
            .await?
            .into_iter()
            .map(|j| (j.id, j))
            .collect();

        let users: HashMap<i64, UserResponse> = self
            .uow
            .users()
            .find_many(user_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, UserResponse::from(u)))
            .collect();

        let rows = applications
            .into_iter()
            .map(|application| ApplicationView {
                job: jobs.get(&application.job_id).cloned(),
                applicant: users.get(&application.user_id).cloned(),
                employer: users.get(&application.employer_id).cloned(),
                application,
            })
            .collect();

        Ok(Paginated::new(rows, page, LIST_PAGE_SIZE, total))
    }

    async fn delete_application(&self, id: i64) -> AppResult<Outcome> {
        if self.uow.applications().delete(id).await? {
            Ok(Outcome::done("Application deleted successfully."))
        } else {
            Ok(Outcome::not_found("Either application deleted or not found."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobStatus;
    use crate::services::test_support::{
        application_fixture, job_fixture, saved_job_fixture, user_fixture, TestUow,
    };

    #[tokio::test]
    async fn applying_to_a_blocked_or_missing_job_is_a_soft_not_found() {
        let mut uow = TestUow::new();
        uow.jobs_mock().expect_find_by_id().returning(|id| {
            if id == 10 {
                let mut job = job_fixture(10, 1);
                job.status = JobStatus::Blocked;
                Ok(Some(job))
            } else {
                Ok(None)
            }
        });
        uow.applications_mock().expect_create().never();

        let service = ApplicationManager::new(Arc::new(uow));

        let blocked = service.apply(2, 10).await.unwrap();
        assert!(matches!(blocked, Outcome::NotFound(_)));

        let missing = service.apply(2, 99).await.unwrap();
        assert!(matches!(missing, Outcome::NotFound(_)));
    }

    #[tokio::test]
    async fn applying_to_ones_own_job_is_forbidden() {
        let mut uow = TestUow::new();
        uow.jobs_mock()
            .expect_find_by_id()
            .returning(|id| Ok(Some(job_fixture(id, 2))));
        uow.applications_mock().expect_create().never();

        let outcome = ApplicationManager::new(Arc::new(uow))
            .apply(2, 10)
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Forbidden(_)));
    }

    #[tokio::test]
    async fn repeat_applies_create_repeat_rows() {
        // There is no duplicate check: the second apply inserts a
        // second row.
        let mut uow = TestUow::new();
        uow.jobs_mock()
            .expect_find_by_id()
            .returning(|id| Ok(Some(job_fixture(id, 1))));
        uow.users_mock()
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_fixture(id, "u@example.com", "h".into()))));
        uow.applications_mock()
            .expect_create()
            .times(2)
            .returning(|job_id, user_id, employer_id| {
                Ok(application_fixture(1, job_id, user_id, employer_id))
            });

        let service = ApplicationManager::new(Arc::new(uow));
        assert!(service.apply(2, 10).await.unwrap().is_done());
        assert!(service.apply(2, 10).await.unwrap().is_done());
    }

    #[tokio::test]
    async fn apply_captures_the_owner_as_employer() {
        let mut uow = TestUow::new();
        uow.jobs_mock()
            .expect_find_by_id()
            .returning(|id| Ok(Some(job_fixture(id, 7))));
        uow.users_mock()
            .expect_find_by_id()
            .returning(|id| Ok(Some(user_fixture(id, "u@example.com", "h".into()))));
        uow.applications_mock()
            .expect_create()
            .withf(|job_id, user_id, employer_id| {
                *job_id == 10 && *user_id == 2 && *employer_id == 7
            })
            .returning(|job_id, user_id, employer_id| {
                Ok(application_fixture(1, job_id, user_id, employer_id))
            });

        let outcome = ApplicationManager::new(Arc::new(uow))
            .apply(2, 10)
            .await
            .unwrap();
        assert!(outcome.is_done());
    }

    #[tokio::test]
    async fn removing_a_missing_bookmark_is_benign() {
        let mut uow = TestUow::new();
        uow.saved_jobs_mock()
            .expect_remove_owned()
            .returning(|_, _| Ok(0));

        let outcome = ApplicationManager::new(Arc::new(uow))
            .remove_saved(2, 10)
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::NotFound(_)));
    }

    #[tokio::test]
    async fn withdrawal_targets_one_row_by_id_and_is_ownership_scoped() {
        let mut uow = TestUow::new();
        // Row 5 belongs to user 2; any other (id, user) pair removes nothing
        uow.applications_mock()
            .expect_remove_owned()
            .returning(|id, user_id| Ok(u64::from(id == 5 && user_id == 2)));

        let service = ApplicationManager::new(Arc::new(uow));

        let own_row = service.remove_application(2, 5).await.unwrap();
        assert!(own_row.is_done());

        // Someone else's row id reads as not-there
        let foreign_row = service.remove_application(3, 5).await.unwrap();
        assert!(matches!(foreign_row, Outcome::NotFound(_)));
    }

    #[tokio::test]
    async fn my_applications_carries_job_and_count() {
        let mut uow = TestUow::new();
        uow.applications_mock()
            .expect_list_for_user()
            .returning(|user_id, _| Ok((vec![application_fixture(1, 10, user_id, 1)], 1)));
        uow.jobs_mock()
            .expect_find_many()
            .returning(|ids| Ok(ids.into_iter().map(|id| job_fixture(id, 1)).collect()));
        uow.taxonomy_mock()
            .expect_find_job_types()
            .returning(|_| Ok(vec![]));
        uow.applications_mock()
            .expect_count_for_jobs()
            .returning(|_| Ok(vec![(10, 3)]));

        let page = ApplicationManager::new(Arc::new(uow))
            .my_applications(2, 1)
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].applications_count, 3);
        assert_eq!(page.data[0].job.as_ref().map(|j| j.id), Some(10));
    }

    #[tokio::test]
    async fn saved_jobs_list_joins_jobs() {
        let mut uow = TestUow::new();
        uow.saved_jobs_mock()
            .expect_list_for_user()
            .returning(|user_id, _| Ok((vec![saved_job_fixture(1, 10, user_id)], 1)));
        uow.jobs_mock()
            .expect_find_many()
            .returning(|ids| Ok(ids.into_iter().map(|id| job_fixture(id, 1)).collect()));
        uow.taxonomy_mock()
            .expect_find_job_types()
            .returning(|_| Ok(vec![]));
        uow.applications_mock()
            .expect_count_for_jobs()
            .returning(|_| Ok(vec![]));

        let page = ApplicationManager::new(Arc::new(uow))
            .saved_jobs(2, 1)
            .await
            .unwrap();

        assert_eq!(page.data.len(), 1);
        assert_eq!(page.data[0].applications_count, 0);
    }
}
