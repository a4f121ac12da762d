//! Job service - listings, search, employer CRUD and the admin panel.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{HOME_CATEGORY_COUNT, HOME_JOB_COUNT, LIST_PAGE_SIZE, SEARCH_PAGE_SIZE};
use crate::domain::{Category, Job, JobDraft, JobFilters, JobStatus, JobType, UserResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;
use crate::types::{Outcome, Paginated};

/// Job enriched with its display relations. `owner` is only populated
/// for the admin listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobView {
    pub job: Job,
    pub job_type: Option<JobType>,
    pub category: Option<Category>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<UserResponse>,
}

/// One applicant row on the owner's job detail view.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApplicantView {
    pub user: UserResponse,
    pub applied_date: chrono::DateTime<chrono::Utc>,
}

/// Public job detail. `saved` appears for authenticated viewers,
/// `applicants` only for the owner.
#[derive(Debug, Serialize, ToSchema)]
pub struct JobDetail {
    #[serde(flatten)]
    pub job: JobView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applicants: Option<Vec<ApplicantView>>,
}

/// Landing page payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HomeView {
    pub top_categories: Vec<Category>,
    pub categories: Vec<Category>,
    pub featured_jobs: Vec<JobView>,
    pub latest_jobs: Vec<JobView>,
}

/// Job service trait for dependency injection.
#[async_trait]
pub trait JobService: Send + Sync {
    /// Landing page: top categories, all categories, newest featured
    /// and newest jobs.
    async fn home(&self) -> AppResult<HomeView>;

    /// Public search over active jobs.
    async fn search(&self, filters: JobFilters, page: u64) -> AppResult<Paginated<JobView>>;

    /// Detail view of an active job. `viewer` switches on the saved flag
    /// and, for the owner, the applicant list.
    async fn detail(&self, id: i64, viewer: Option<i64>) -> AppResult<JobDetail>;

    async fn create(&self, owner_id: i64, draft: JobDraft) -> AppResult<Job>;

    /// Ownership-scoped update; a job owned by someone else reads as
    /// missing rather than forbidden.
    async fn update(&self, owner_id: i64, id: i64, draft: JobDraft) -> AppResult<Job>;

    /// Ownership-scoped delete, idempotent.
    async fn delete(&self, owner_id: i64, id: i64) -> AppResult<Outcome>;

    async fn my_jobs(&self, owner_id: i64, page: u64) -> AppResult<Paginated<JobView>>;

    /// Admin listing across all owners and statuses.
    async fn list_jobs(&self, page: u64) -> AppResult<Paginated<JobView>>;

    /// Admin update: unscoped, additionally sets moderation flags.
    async fn admin_update(
        &self,
        id: i64,
        draft: JobDraft,
        status: JobStatus,
        is_featured: bool,
    ) -> AppResult<Job>;

    async fn admin_delete(&self, id: i64) -> AppResult<Outcome>;
}

/// Concrete implementation of JobService using Unit of Work.
pub struct JobManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> JobManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    /// Batch-load the categories, job types and (optionally) owners a
    /// page of jobs refers to, one query per relation.
    async fn enrich(&self, jobs: Vec<Job>, with_owner: bool) -> AppResult<Vec<JobView>> {
        let mut category_ids: Vec<i64> = jobs.iter().map(|j| j.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let mut type_ids: Vec<i64> = jobs.iter().map(|j| j.job_type_id).collect();
        type_ids.sort_unstable();
        type_ids.dedup();

        let categories: HashMap<i64, Category> = self
            .uow
            .taxonomy()
            .find_categories(category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        let job_types: HashMap<i64, JobType> = self
            .uow
            .taxonomy()
            .find_job_types(type_ids)
            .await?
            .into_iter()
            .map(|t| (t.id, t))
            .collect();

        let owners: HashMap<i64, UserResponse> = if with_owner {
            let mut owner_ids: Vec<i64> = jobs.iter().map(|j| j.user_id).collect();
            owner_ids.sort_unstable();
            owner_ids.dedup();

            self.uow
                .users()
                .find_many(owner_ids)
                .await?
                .into_iter()
                .map(|u| (u.id, UserResponse::from(u)))
                .collect()
        } else {
            HashMap::new()
        };

        Ok(jobs
            .into_iter()
            .map(|job| JobView {
                job_type: job_types.get(&job.job_type_id).cloned(),
                category: categories.get(&job.category_id).cloned(),
                owner: owners.get(&job.user_id).cloned(),
                job,
            })
            .collect())
    }

    /// Fetch a job and check it belongs to `owner_id`. Both "missing"
    /// and "not yours" read as NotFound so ids cannot be probed.
    async fn find_owned(&self, owner_id: i64, id: i64) -> AppResult<Option<Job>> {
        let job = self.uow.jobs().find_by_id(id).await?;
        Ok(job.filter(|j| j.user_id == owner_id))
    }
}

#[async_trait]
impl<U: UnitOfWork> JobService for JobManager<U> {
    async fn home(&self) -> AppResult<HomeView> {
        let top_categories = self
            .uow
            .taxonomy()
            .top_categories(HOME_CATEGORY_COUNT)
            .await?;
        let categories = self.uow.taxonomy().list_categories().await?;
        let featured = self.uow.jobs().featured(HOME_JOB_COUNT).await?;
        let latest = self.uow.jobs().latest(HOME_JOB_COUNT).await?;

        Ok(HomeView {
            top_categories,
            categories,
            featured_jobs: self.enrich(featured, false).await?,
            latest_jobs: self.enrich(latest, false).await?,
        })
    }

    async fn search(&self, filters: JobFilters, page: u64) -> AppResult<Paginated<JobView>> {
        let (jobs, total) = self.uow.jobs().search(&filters, page).await?;
        let views = self.enrich(jobs, false).await?;
        Ok(Paginated::new(views, page, SEARCH_PAGE_SIZE, total))
    }

    async fn detail(&self, id: i64, viewer: Option<i64>) -> AppResult<JobDetail> {
        let job = self
            .uow
            .jobs()
            .find_by_id(id)
            .await?
            .filter(|j| j.status.is_active())
            .ok_or_not_found()?;

        let saved = match viewer {
            Some(user_id) => Some(self.uow.saved_jobs().is_saved(id, user_id).await?),
            None => None,
        };

        let applicants = if viewer == Some(job.user_id) {
            let applications = self.uow.applications().list_for_job(id).await?;
            let mut applicant_ids: Vec<i64> =
                applications.iter().map(|a| a.user_id).collect();
            applicant_ids.sort_unstable();
            applicant_ids.dedup();

            let users: HashMap<i64, UserResponse> = self
                .uow
                .users()
                .find_many(applicant_ids)
                .await?
                .into_iter()
                .map(|u| (u.id, UserResponse::from(u)))
                .collect();

            Some(
                applications
                    .into_iter()
                    .filter_map(|a| {
                        users.get(&a.user_id).cloned().map(|user| ApplicantView {
                            user,
                            applied_date: a.applied_date,
                        })
                    })
                    .collect(),
            )
        } else {
            None
        };

        let mut views = self.enrich(vec![job], false).await?;
        Ok(JobDetail {
            job: views.remove(0),
            saved,
            applicants,
        })
    }

    async fn create(&self, owner_id: i64, draft: JobDraft) -> AppResult<Job> {
        self.uow.jobs().create(owner_id, draft).await
    }

    async fn update(&self, owner_id: i64, id: i64, draft: JobDraft) -> AppResult<Job> {
        match self.find_owned(owner_id, id).await? {
            Some(job) => self.uow.jobs().update(job.id, draft).await,
            None => Err(AppError::NotFound),
        }
    }

    async fn delete(&self, owner_id: i64, id: i64) -> AppResult<Outcome> {
        match self.find_owned(owner_id, id).await? {
            Some(job) => {
                self.uow.jobs().delete(job.id).await?;
                Ok(Outcome::done("Job deleted successfully."))
            }
            None => Ok(Outcome::not_found("Either job deleted or not found.")),
        }
    }

    async fn my_jobs(&self, owner_id: i64, page: u64) -> AppResult<Paginated<JobView>> {
        let (jobs, total) = self.uow.jobs().list_by_owner(owner_id, page).await?;
        let views = self.enrich(jobs, false).await?;
        Ok(Paginated::new(views, page, LIST_PAGE_SIZE, total))
    }

    async fn list_jobs(&self, page: u64) -> AppResult<Paginated<JobView>> {
        let (jobs, total) = self.uow.jobs().list(page).await?;
        let views = self.enrich(jobs, true).await?;
        Ok(Paginated::new(views, page, LIST_PAGE_SIZE, total))
    }

    async fn admin_update(
        &self,
        id: i64,
        draft: JobDraft,
        status: JobStatus,
        is_featured: bool,
    ) -> AppResult<Job> {
        // Unscoped lookup: admins edit anyone's posting
        self.uow
            .jobs()
            .find_by_id(id)
            .await?
            .ok_or_not_found()?;

        self.uow.jobs().update(id, draft).await?;
        self.uow.jobs().update_flags(id, status, is_featured).await
    }

    async fn admin_delete(&self, id: i64) -> AppResult<Outcome> {
        if self.uow.jobs().delete(id).await? {
            Ok(Outcome::done("Job deleted successfully."))
        } else {
            Ok(Outcome::not_found("Either job deleted or not found."))
        }
    }
}
