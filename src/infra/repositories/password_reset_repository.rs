//! Password reset token repository.
//!
//! Token replacement happens inside a transaction via the unit of work;
//! this trait only covers the read side used by the reset endpoint.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use super::entities::password_reset_token::{self, Entity as ResetTokenEntity};
use crate::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordResetRepository: Send + Sync {
    /// Resolve a reset token to the email it was issued for.
    async fn find_email_by_token(&self, token: &str) -> AppResult<Option<String>>;
}

/// SeaORM-backed implementation of [`PasswordResetRepository`].
pub struct PasswordResetStore {
    db: DatabaseConnection,
}

impl PasswordResetStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PasswordResetRepository for PasswordResetStore {
    async fn find_email_by_token(&self, token: &str) -> AppResult<Option<String>> {
        let result = ResetTokenEntity::find()
            .filter(password_reset_token::Column::Token.eq(token))
            .one(&self.db)
            .await?;
        Ok(result.map(|model| model.email))
    }
}
