//! Unit of Work pattern implementation.
//!
//! Centralizes repository access and owns the transaction boundary.
//! Services depend on this trait instead of individual stores, which
//! keeps multi-table flows (like forgot-password) atomic.

use async_trait::async_trait;
use sea_orm::{
    AccessMode, ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, IsolationLevel, QueryFilter, Set, TransactionTrait,
};
use std::sync::Arc;

use super::repositories::entities::password_reset_token::{
    self, Entity as ResetTokenEntity,
};
use super::repositories::{
    ApplicationRepository, ApplicationStore, JobRepository, JobStore, PasswordResetRepository,
    PasswordResetStore, SavedJobRepository, SavedJobStore, TaxonomyRepository, TaxonomyStore,
    UserRepository, UserStore,
};
use crate::errors::{AppError, AppResult};

/// Unit of Work trait for dependency injection.
///
/// Note: the generic `transaction` method makes this trait non-mockable;
/// tests substitute a hand-rolled implementation around repository mocks.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn jobs(&self) -> Arc<dyn JobRepository>;

    fn taxonomy(&self) -> Arc<dyn TaxonomyRepository>;

    fn applications(&self) -> Arc<dyn ApplicationRepository>;

    fn saved_jobs(&self) -> Arc<dyn SavedJobRepository>;

    fn password_resets(&self) -> Arc<dyn PasswordResetRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error.
    /// Read-committed isolation.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send;
}

/// Password reset token operations that must run inside a transaction.
///
/// A trait so tests can substitute a recording implementation for the
/// SeaORM-backed one.
#[async_trait]
pub trait TxPasswordResetRepository: Send + Sync {
    /// Drop any existing token for the email and store a fresh one.
    /// Keeps at most one live token per address.
    async fn replace(&self, email: &str, token: &str) -> AppResult<()>;
}

/// Repository access within a running transaction.
///
/// Borrows the transaction-scoped stores so every operation issued
/// through the context joins the transaction.
pub struct TransactionContext<'a> {
    password_resets: &'a dyn TxPasswordResetRepository,
}

impl<'a> TransactionContext<'a> {
    pub(crate) fn new(password_resets: &'a dyn TxPasswordResetRepository) -> Self {
        Self { password_resets }
    }

    pub fn password_resets(&self) -> &dyn TxPasswordResetRepository {
        self.password_resets
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    users: Arc<UserStore>,
    jobs: Arc<JobStore>,
    taxonomy: Arc<TaxonomyStore>,
    applications: Arc<ApplicationStore>,
    saved_jobs: Arc<SavedJobStore>,
    password_resets: Arc<PasswordResetStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserStore::new(db.clone())),
            jobs: Arc::new(JobStore::new(db.clone())),
            taxonomy: Arc::new(TaxonomyStore::new(db.clone())),
            applications: Arc::new(ApplicationStore::new(db.clone())),
            saved_jobs: Arc::new(SavedJobStore::new(db.clone())),
            password_resets: Arc::new(PasswordResetStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn jobs(&self) -> Arc<dyn JobRepository> {
        self.jobs.clone()
    }

    fn taxonomy(&self) -> Arc<dyn TaxonomyRepository> {
        self.taxonomy.clone()
    }

    fn applications(&self) -> Arc<dyn ApplicationRepository> {
        self.applications.clone()
    }

    fn saved_jobs(&self) -> Arc<dyn SavedJobRepository> {
        self.saved_jobs.clone()
    }

    fn password_resets(&self) -> Arc<dyn PasswordResetRepository> {
        self.password_resets.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> std::pin::Pin<
                Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>,
            > + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let password_resets = TxPasswordResetStore::new(&txn);
        let ctx = TransactionContext::new(&password_resets);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// SeaORM-backed [`TxPasswordResetRepository`] scoped to one transaction.
pub struct TxPasswordResetStore<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxPasswordResetStore<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }
}

#[async_trait]
impl TxPasswordResetRepository for TxPasswordResetStore<'_> {
    async fn replace(&self, email: &str, token: &str) -> AppResult<()> {
        ResetTokenEntity::delete_many()
            .filter(password_reset_token::Column::Email.eq(email))
            .exec(self.txn)
            .await
            .map_err(AppError::from)?;

        let active = password_reset_token::ActiveModel {
            email: Set(email.to_string()),
            token: Set(token.to_string()),
            created_at: Set(chrono::Utc::now()),
        };
        active.insert(self.txn).await.map_err(AppError::from)?;

        Ok(())
    }
}
