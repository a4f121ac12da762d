//! User repository - persistence for accounts.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::user::{self, Entity as UserEntity};
use crate::config::LIST_PAGE_SIZE;
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Fields an admin or the user themself may change on the profile.
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub name: String,
    pub email: String,
    pub mobile: Option<String>,
    pub designation: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Check email uniqueness, optionally excluding one user (self-update).
    async fn email_taken(&self, email: &str, exclude: Option<i64>) -> AppResult<bool>;

    /// Batch lookup for list-view joins.
    async fn find_many(&self, ids: Vec<i64>) -> AppResult<Vec<User>>;

    /// Create a user in the default "user" role.
    async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User>;

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> AppResult<User>;

    async fn update_password(&self, id: i64, password_hash: String) -> AppResult<()>;

    /// Swap the profile picture filename, returning the previous one.
    async fn update_image(&self, id: i64, image: String) -> AppResult<Option<String>>;

    /// Admin listing, newest first, fixed page size.
    async fn list(&self, page: u64) -> AppResult<(Vec<User>, u64)>;

    /// Hard delete. Returns false when the row was already gone.
    async fn delete(&self, id: i64) -> AppResult<bool>;
}

/// SeaORM-backed implementation of [`UserRepository`].
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i64) -> AppResult<user::Model> {
        UserEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(result.map(User::from))
    }

    async fn email_taken(&self, email: &str, exclude: Option<i64>) -> AppResult<bool> {
        let mut query = UserEntity::find().filter(user::Column::Email.eq(email));
        if let Some(id) = exclude {
            query = query.filter(user::Column::Id.ne(id));
        }
        Ok(query.count(&self.db).await? > 0)
    }

    async fn find_many(&self, ids: Vec<i64>) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let models = UserEntity::find()
            .filter(user::Column::Id.is_in(ids))
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(User::from).collect())
    }

    async fn create(&self, name: String, email: String, password_hash: String) -> AppResult<User> {
        let now = chrono::Utc::now();
        let active = user::ActiveModel {
            name: Set(name),
            email: Set(email),
            password_hash: Set(password_hash),
            role: Set(crate::config::ROLE_USER.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> AppResult<User> {
        let mut active: user::ActiveModel = self.find_model(id).await?.into();

        active.name = Set(changes.name);
        active.email = Set(changes.email);
        active.mobile = Set(changes.mobile);
        active.designation = Set(changes.designation);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(User::from(model))
    }

    async fn update_password(&self, id: i64, password_hash: String) -> AppResult<()> {
        let mut active: user::ActiveModel = self.find_model(id).await?.into();

        active.password_hash = Set(password_hash);
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await?;
        Ok(())
    }

    async fn update_image(&self, id: i64, image: String) -> AppResult<Option<String>> {
        let model = self.find_model(id).await?;
        let previous = model.image.clone();

        let mut active: user::ActiveModel = model.into();
        active.image = Set(Some(image));
        active.updated_at = Set(chrono::Utc::now());
        active.update(&self.db).await?;

        Ok(previous)
    }

    async fn list(&self, page: u64) -> AppResult<(Vec<User>, u64)> {
        let paginator = UserEntity::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(&self.db, LIST_PAGE_SIZE);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((models.into_iter().map(User::from).collect(), total))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected > 0)
    }
}
