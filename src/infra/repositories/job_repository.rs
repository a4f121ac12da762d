//! Job repository - persistence for job postings.

use async_trait::async_trait;
use sea_orm::sea_query::{extension::postgres::PgExpr, Expr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::entities::job::{self, Entity as JobEntity};
use crate::config::{LIST_PAGE_SIZE, SEARCH_PAGE_SIZE};
use crate::domain::{Job, JobDraft, JobFilters, JobStatus};
use crate::errors::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Lookup regardless of status. Visibility rules live in the services.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Job>>;

    /// Batch lookup for saved/applied list views.
    async fn find_many(&self, ids: Vec<i64>) -> AppResult<Vec<Job>>;

    /// Public search over active jobs, 9 per page.
    async fn search(&self, filters: &JobFilters, page: u64) -> AppResult<(Vec<Job>, u64)>;

    /// Newest featured active jobs for the landing page.
    async fn featured(&self, limit: u64) -> AppResult<Vec<Job>>;

    /// Newest active jobs regardless of the featured flag.
    async fn latest(&self, limit: u64) -> AppResult<Vec<Job>>;

    async fn create(&self, user_id: i64, draft: JobDraft) -> AppResult<Job>;

    async fn update(&self, id: i64, draft: JobDraft) -> AppResult<Job>;

    /// Admin-only moderation flags.
    async fn update_flags(&self, id: i64, status: JobStatus, is_featured: bool) -> AppResult<Job>;

    /// One employer's postings, newest first, 10 per page.
    async fn list_by_owner(&self, user_id: i64, page: u64) -> AppResult<(Vec<Job>, u64)>;

    /// Admin listing across all owners and statuses, newest first.
    async fn list(&self, page: u64) -> AppResult<(Vec<Job>, u64)>;

    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// SeaORM-backed implementation of [`JobRepository`].
pub struct JobStore {
    db: DatabaseConnection,
}

impl JobStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i64) -> AppResult<job::Model> {
        JobEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    fn search_condition(filters: &JobFilters) -> Condition {
        let mut condition =
            Condition::all().add(job::Column::Status.eq(i16::from(JobStatus::Active)));

        if let Some(keyword) = filters.keyword.as_deref().filter(|k| !k.is_empty()) {
            let pattern = format!("%{keyword}%");
            condition = condition.add(
                Condition::any()
                    .add(Expr::col(job::Column::Title).ilike(pattern.clone()))
                    .add(Expr::col(job::Column::Keywords).ilike(pattern)),
            );
        }

        if let Some(location) = filters.location.as_deref().filter(|l| !l.is_empty()) {
            condition = condition.add(job::Column::Location.eq(location));
        }

        if let Some(category) = filters.category {
            condition = condition.add(job::Column::CategoryId.eq(category));
        }

        let job_types = filters.job_type_ids();
        if !job_types.is_empty() {
            condition = condition.add(job::Column::JobTypeId.is_in(job_types));
        }

        if let Some(experience) = filters.experience.as_deref().filter(|e| !e.is_empty()) {
            condition = condition.add(job::Column::Experience.eq(experience));
        }

        condition
    }
}

fn apply_draft(active: &mut job::ActiveModel, draft: JobDraft) {
    active.title = Set(draft.title);
    active.category_id = Set(draft.category_id);
    active.job_type_id = Set(draft.job_type_id);
    active.vacancy = Set(draft.vacancy);
    active.salary = Set(draft.salary);
    active.location = Set(draft.location);
    active.description = Set(draft.description);
    active.benefits = Set(draft.benefits);
    active.responsibility = Set(draft.responsibility);
    active.qualifications = Set(draft.qualifications);
    active.keywords = Set(draft.keywords);
    active.experience = Set(draft.experience);
    active.company_name = Set(draft.company_name);
    active.company_location = Set(draft.company_location);
    active.company_website = Set(draft.company_website);
}

#[async_trait]
impl JobRepository for JobStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Job>> {
        let result = JobEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Job::from))
    }

    async fn find_many(&self, ids: Vec<i64>) -> AppResult<Vec<Job>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = JobEntity::find()
            .filter(job::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Job::from).collect())
    }

    async fn search(&self, filters: &JobFilters, page: u64) -> AppResult<(Vec<Job>, u64)> {
        let mut query = JobEntity::find().filter(Self::search_condition(filters));

        query = if filters.ascending() {
            query.order_by_asc(job::Column::CreatedAt)
        } else {
            query.order_by_desc(job::Column::CreatedAt)
        };

        let paginator = query.paginate(&self.db, SEARCH_PAGE_SIZE);
        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Job::from).collect(), total))
    }

    async fn featured(&self, limit: u64) -> AppResult<Vec<Job>> {
        let models = JobEntity::find()
            .filter(job::Column::Status.eq(i16::from(JobStatus::Active)))
            .filter(job::Column::IsFeatured.eq(true))
            .order_by_desc(job::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Job::from).collect())
    }

    async fn latest(&self, limit: u64) -> AppResult<Vec<Job>> {
        let models = JobEntity::find()
            .filter(job::Column::Status.eq(i16::from(JobStatus::Active)))
            .order_by_desc(job::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Job::from).collect())
    }

    async fn create(&self, user_id: i64, draft: JobDraft) -> AppResult<Job> {
        let now = chrono::Utc::now();
        let mut active = job::ActiveModel {
            user_id: Set(user_id),
            status: Set(i16::from(JobStatus::Active)),
            is_featured: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        apply_draft(&mut active, draft);

        let model = active.insert(&self.db).await?;
        Ok(Job::from(model))
    }

    async fn update(&self, id: i64, draft: JobDraft) -> AppResult<Job> {
        let mut active: job::ActiveModel = self.find_model(id).await?.into();

        apply_draft(&mut active, draft);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Job::from(model))
    }

    async fn update_flags(&self, id: i64, status: JobStatus, is_featured: bool) -> AppResult<Job> {
        let mut active: job::ActiveModel = self.find_model(id).await?.into();

        active.status = Set(i16::from(status));
        active.is_featured = Set(is_featured);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Job::from(model))
    }

    async fn list_by_owner(&self, user_id: i64, page: u64) -> AppResult<(Vec<Job>, u64)> {
        let paginator = JobEntity::find()
            .filter(job::Column::UserId.eq(user_id))
            .order_by_desc(job::Column::CreatedAt)
            .paginate(&self.db, LIST_PAGE_SIZE);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Job::from).collect(), total))
    }

    async fn list(&self, page: u64) -> AppResult<(Vec<Job>, u64)> {
        let paginator = JobEntity::find()
            .order_by_desc(job::Column::CreatedAt)
            .paginate(&self.db, LIST_PAGE_SIZE);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(Job::from).collect(), total))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = JobEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
