//! Taxonomy repository - categories and job types.

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use super::entities::category::{self, Entity as CategoryEntity};
use super::entities::job_type::{self, Entity as JobTypeEntity};
use crate::domain::{Category, JobType};
use crate::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaxonomyRepository: Send + Sync {
    /// Active categories ordered by name, for filter dropdowns.
    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    /// First N active categories by name, for the landing page.
    async fn top_categories(&self, limit: u64) -> AppResult<Vec<Category>>;

    /// Batch lookups for enriching job listings.
    async fn find_categories(&self, ids: Vec<i64>) -> AppResult<Vec<Category>>;

    async fn find_job_types(&self, ids: Vec<i64>) -> AppResult<Vec<JobType>>;
}

/// SeaORM-backed implementation of [`TaxonomyRepository`].
pub struct TaxonomyStore {
    db: DatabaseConnection,
}

impl TaxonomyStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaxonomyRepository for TaxonomyStore {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .filter(category::Column::Active.eq(true))
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn top_categories(&self, limit: u64) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .filter(category::Column::Active.eq(true))
            .order_by_asc(category::Column::Name)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn find_categories(&self, ids: Vec<i64>) -> AppResult<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = CategoryEntity::find()
            .filter(category::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn find_job_types(&self, ids: Vec<i64>) -> AppResult<Vec<JobType>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = JobTypeEntity::find()
            .filter(job_type::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(JobType::from).collect())
    }
}
