//! Job application repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::job_application::{self, Entity as ApplicationEntity};
use crate::config::LIST_PAGE_SIZE;
use crate::domain::JobApplication;
use crate::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Record an application. Repeat applies create repeat rows.
    async fn create(&self, job_id: i64, user_id: i64, employer_id: i64)
        -> AppResult<JobApplication>;

    /// Applications by one job seeker, newest first, 10 per page.
    async fn list_for_user(&self, user_id: i64, page: u64)
        -> AppResult<(Vec<JobApplication>, u64)>;

    /// Every application received by one job, oldest first.
    async fn list_for_job(&self, job_id: i64) -> AppResult<Vec<JobApplication>>;

    /// Application counts per job, for list-view annotations.
    async fn count_for_jobs(&self, job_ids: Vec<i64>) -> AppResult<Vec<(i64, i64)>>;

    /// Admin listing across all users, newest first, 10 per page.
    async fn list(&self, page: u64) -> AppResult<(Vec<JobApplication>, u64)>;

    /// Withdraw one application by its row id, scoped to the caller.
    /// Returns the number of rows removed (0 or 1); duplicate rows for
    /// the same job are untouched.
    async fn remove_owned(&self, id: i64, user_id: i64) -> AppResult<u64>;

    /// Hard delete by id (admin). Returns false when already gone.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// SeaORM-backed implementation of [`ApplicationRepository`].
pub struct ApplicationStore {
    db: DatabaseConnection,
}

impl ApplicationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ApplicationRepository for ApplicationStore {
    async fn create(
        &self,
        job_id: i64,
        user_id: i64,
        employer_id: i64,
    ) -> AppResult<JobApplication> {
        let now = chrono::Utc::now();
        let active = job_application::ActiveModel {
            job_id: Set(job_id),
            user_id: Set(user_id),
            employer_id: Set(employer_id),
            applied_date: Set(now),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(JobApplication::from(model))
    }

    async fn list_for_user(
        &self,
        user_id: i64,
        page: u64,
    ) -> AppResult<(Vec<JobApplication>, u64)> {
        let paginator = ApplicationEntity::find()
            .filter(job_application::Column::UserId.eq(user_id))
            .order_by_desc(job_application::Column::CreatedAt)
            .paginate(&self.db, LIST_PAGE_SIZE);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(JobApplication::from).collect(), total))
    }

    async fn list_for_job(&self, job_id: i64) -> AppResult<Vec<JobApplication>> {
        let models = ApplicationEntity::find()
            .filter(job_application::Column::JobId.eq(job_id))
            .order_by_asc(job_application::Column::AppliedDate)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(JobApplication::from).collect())
    }

    async fn count_for_jobs(&self, job_ids: Vec<i64>) -> AppResult<Vec<(i64, i64)>> {
        if job_ids.is_empty() {
            return Ok(Vec::new());
        }

        #[derive(FromQueryResult)]
        struct JobCount {
            job_id: i64,
            count: i64,
        }

        let rows = ApplicationEntity::find()
            .select_only()
            .column(job_application::Column::JobId)
            .column_as(job_application::Column::Id.count(), "count")
            .filter(job_application::Column::JobId.is_in(job_ids))
            .group_by(job_application::Column::JobId)
            .into_model::<JobCount>()
            .all(&self.db)
            .await?;

        Ok(rows.into_iter().map(|row| (row.job_id, row.count)).collect())
    }

    async fn list(&self, page: u64) -> AppResult<(Vec<JobApplication>, u64)> {
        let paginator = ApplicationEntity::find()
            .order_by_desc(job_application::Column::CreatedAt)
            .paginate(&self.db, LIST_PAGE_SIZE);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(JobApplication::from).collect(), total))
    }

    async fn remove_owned(&self, id: i64, user_id: i64) -> AppResult<u64> {
        let result = ApplicationEntity::delete_many()
            .filter(job_application::Column::Id.eq(id))
            .filter(job_application::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = ApplicationEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
