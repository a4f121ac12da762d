//! Saved job repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::saved_job::{self, Entity as SavedJobEntity};
use crate::config::LIST_PAGE_SIZE;
use crate::domain::SavedJob;
use crate::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SavedJobRepository: Send + Sync {
    /// Bookmark a job. Repeat saves create repeat rows.
    async fn create(&self, job_id: i64, user_id: i64) -> AppResult<SavedJob>;

    /// Whether the user holds at least one bookmark for the job.
    async fn is_saved(&self, job_id: i64, user_id: i64) -> AppResult<bool>;

    /// One user's bookmarks, newest first, 10 per page.
    async fn list_for_user(&self, user_id: i64, page: u64) -> AppResult<(Vec<SavedJob>, u64)>;

    /// Remove one bookmark by its row id, scoped to the caller.
    /// Returns the number of rows removed (0 or 1).
    async fn remove_owned(&self, id: i64, user_id: i64) -> AppResult<u64>;
}

/// SeaORM-backed implementation of [`SavedJobRepository`].
pub struct SavedJobStore {
    db: DatabaseConnection,
}

impl SavedJobStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SavedJobRepository for SavedJobStore {
    async fn create(&self, job_id: i64, user_id: i64) -> AppResult<SavedJob> {
        let now = chrono::Utc::now();
        let active = saved_job::ActiveModel {
            job_id: Set(job_id),
            user_id: Set(user_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(SavedJob::from(model))
    }

    async fn is_saved(&self, job_id: i64, user_id: i64) -> AppResult<bool> {
        let count = SavedJobEntity::find()
            .filter(saved_job::Column::JobId.eq(job_id))
            .filter(saved_job::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn list_for_user(&self, user_id: i64, page: u64) -> AppResult<(Vec<SavedJob>, u64)> {
        let paginator = SavedJobEntity::find()
            .filter(saved_job::Column::UserId.eq(user_id))
            .order_by_desc(saved_job::Column::CreatedAt)
            .paginate(&self.db, LIST_PAGE_SIZE);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(SavedJob::from).collect(), total))
    }

    async fn remove_owned(&self, id: i64, user_id: i64) -> AppResult<u64> {
        let result = SavedJobEntity::delete_many()
            .filter(saved_job::Column::Id.eq(id))
            .filter(saved_job::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
