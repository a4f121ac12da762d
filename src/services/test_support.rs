//! Shared fixtures for service unit tests.
//!
//! `UnitOfWork` has a generic `transaction` method, so it cannot be
//! mocked with mockall directly. `TestUow` wraps per-repository mocks
//! instead; `transaction` runs the closure against a recording context
//! so tests can assert on transactional token replacements.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Job, JobApplication, JobStatus, SavedJob, User, UserRole};
use crate::errors::AppResult;
use crate::infra::repositories::{
    ApplicationRepository, JobRepository, MockApplicationRepository, MockJobRepository,
    MockPasswordResetRepository, MockSavedJobRepository, MockTaxonomyRepository,
    MockUserRepository, PasswordResetRepository, SavedJobRepository, TaxonomyRepository,
    UserRepository,
};
use crate::infra::{TransactionContext, TxPasswordResetRepository, UnitOfWork};

pub struct TestUow {
    users: Arc<MockUserRepository>,
    jobs: Arc<MockJobRepository>,
    taxonomy: Arc<MockTaxonomyRepository>,
    applications: Arc<MockApplicationRepository>,
    saved_jobs: Arc<MockSavedJobRepository>,
    password_resets: Arc<MockPasswordResetRepository>,
    token_replacements: Arc<Mutex<Vec<(String, String)>>>,
}

impl TestUow {
    pub fn new() -> Self {
        Self {
            users: Arc::new(MockUserRepository::new()),
            jobs: Arc::new(MockJobRepository::new()),
            taxonomy: Arc::new(MockTaxonomyRepository::new()),
            applications: Arc::new(MockApplicationRepository::new()),
            saved_jobs: Arc::new(MockSavedJobRepository::new()),
            password_resets: Arc::new(MockPasswordResetRepository::new()),
            token_replacements: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the (email, token) pairs replaced inside transactions.
    pub fn token_replacements(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        self.token_replacements.clone()
    }

    // Expectation setters. Only usable before the TestUow is shared,
    // which is exactly when tests set expectations.

    pub fn users_mock(&mut self) -> &mut MockUserRepository {
        Arc::get_mut(&mut self.users).expect("uow already shared")
    }

    pub fn jobs_mock(&mut self) -> &mut MockJobRepository {
        Arc::get_mut(&mut self.jobs).expect("uow already shared")
    }

    pub fn taxonomy_mock(&mut self) -> &mut MockTaxonomyRepository {
        Arc::get_mut(&mut self.taxonomy).expect("uow already shared")
    }

    pub fn applications_mock(&mut self) -> &mut MockApplicationRepository {
        Arc::get_mut(&mut self.applications).expect("uow already shared")
    }

    pub fn saved_jobs_mock(&mut self) -> &mut MockSavedJobRepository {
        Arc::get_mut(&mut self.saved_jobs).expect("uow already shared")
    }

    pub fn password_resets_mock(&mut self) -> &mut MockPasswordResetRepository {
        Arc::get_mut(&mut self.password_resets).expect("uow already shared")
    }
}

#[async_trait]
impl UnitOfWork for TestUow {
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
        let password_resets = RecordingResetTx {
            calls: self.token_replacements.clone(),
        };
        f(TransactionContext::new(&password_resets)).await
    }
}

/// Stand-in for the transaction-scoped token store. Records every
/// replacement instead of touching a database.
struct RecordingResetTx {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl TxPasswordResetRepository for RecordingResetTx {
    async fn replace(&self, email: &str, token: &str) -> AppResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((email.to_string(), token.to_string()));
        Ok(())
    }
}

pub fn user_fixture(id: i64, email: &str, password_hash: String) -> User {
    let now = Utc::now();
    User {
        id,
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash,
        role: UserRole::User,
        mobile: None,
        designation: None,
        image: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn job_fixture(id: i64, owner_id: i64) -> Job {
    let now = Utc::now();
    Job {
        id,
        title: "Backend Engineer".to_string(),
        category_id: 1,
        job_type_id: 1,
        user_id: owner_id,
        vacancy: 1,
        salary: None,
        location: "Berlin".to_string(),
        description: "Build things".to_string(),
        benefits: None,
        responsibility: None,
        qualifications: None,
        keywords: None,
        experience: None,
        company_name: "Acme".to_string(),
        company_location: None,
        company_website: None,
        status: JobStatus::Active,
        is_featured: false,
        created_at: now,
        updated_at: now,
    }
}

pub fn application_fixture(id: i64, job_id: i64, user_id: i64, employer_id: i64) -> JobApplication {
    let now = Utc::now();
    JobApplication {
        id,
        job_id,
        user_id,
        employer_id,
        applied_date: now,
        created_at: now,
        updated_at: now,
    }
}

pub fn saved_job_fixture(id: i64, job_id: i64, user_id: i64) -> SavedJob {
    let now = Utc::now();
    SavedJob {
        id,
        job_id,
        user_id,
        created_at: now,
        updated_at: now,
    }
}
