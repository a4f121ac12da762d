//! Integration tests for API endpoints.
//!
//! These tests run the real router against stub services, so routing,
//! middleware, extractors and response envelopes are exercised without
//! a database.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;

use jobboard::api::{create_router, AppState};
use jobboard::domain::{
    Job, JobDraft, JobFilters, JobStatus, User, UserRole,
};
use jobboard::errors::{AppError, AppResult};
use jobboard::infra::repositories::ProfileChanges;
use jobboard::services::{
    ApplicationService, AppliedJobView, ApplicationView, AuthService, Claims, HomeView, JobDetail,
    JobService, JobView, SavedJobView, ServiceContainer, TokenResponse, UserService,
};
use jobboard::types::{Outcome, Paginated};

const USER_TOKEN: &str = "user-token";
const ADMIN_TOKEN: &str = "admin-token";
const USER_ID: i64 = 7;
const ADMIN_ID: i64 = 1;

// =============================================================================
// Fixtures
// =============================================================================

fn test_user(id: i64) -> User {
    User {
        id,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        password_hash: "hashed".to_string(),
        role: UserRole::User,
        mobile: None,
        designation: None,
        image: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn test_job(id: i64, owner: i64) -> Job {
    Job {
        id,
        title: "Backend Engineer".to_string(),
        category_id: 1,
        job_type_id: 1,
        user_id: owner,
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
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn job_view(id: i64, owner: i64) -> JobView {
    JobView {
        job: test_job(id, owner),
        job_type: None,
        category: None,
        owner: None,
    }
}

// =============================================================================
// Stub Services
// =============================================================================

/// Stub auth service with two fixed tokens
struct StubAuthService;

#[async_trait]
impl AuthService for StubAuthService {
    async fn register(&self, name: String, email: String, _password: String) -> AppResult<User> {
        let mut user = test_user(USER_ID);
        user.name = name;
        user.email = email;
        Ok(user)
    }

    async fn login(&self, _email: String, _password: String) -> AppResult<TokenResponse> {
        Ok(TokenResponse {
            access_token: USER_TOKEN.to_string(),
            token_type: "Bearer".to_string(),
            expires_in: 86400,
        })
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let now = Utc::now().timestamp();
        match token {
            USER_TOKEN => Ok(Claims {
                sub: USER_ID,
                email: "test@example.com".to_string(),
                role: "user".to_string(),
                exp: now + 3600,
                iat: now,
            }),
            ADMIN_TOKEN => Ok(Claims {
                sub: ADMIN_ID,
                email: "admin@example.com".to_string(),
                role: "admin".to_string(),
                exp: now + 3600,
                iat: now,
            }),
            _ => Err(AppError::Unauthorized),
        }
    }

    async fn forgot_password(&self, email: String) -> AppResult<()> {
        if email == "unknown@example.com" {
            return Err(AppError::field("email", "Email does not exist"));
        }
        Ok(())
    }

    async fn reset_password(&self, _token: String, _new_password: String) -> AppResult<()> {
        Ok(())
    }
}

/// Stub user service echoing requests back
struct StubUserService;

#[async_trait]
impl UserService for StubUserService {
    async fn get_user(&self, id: i64) -> AppResult<User> {
        Ok(test_user(id))
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> AppResult<User> {
        let mut user = test_user(id);
        user.name = changes.name;
        user.email = changes.email;
        user.mobile = changes.mobile;
        user.designation = changes.designation;
        Ok(user)
    }

    async fn update_profile_picture(&self, id: i64, _bytes: Vec<u8>) -> AppResult<User> {
        let mut user = test_user(id);
        user.image = Some(format!("{}-1.png", id));
        Ok(user)
    }

    async fn change_password(&self, _id: i64, old: String, _new: String) -> AppResult<Outcome> {
        if old == "wrong" {
            return Ok(Outcome::forbidden("Old password is incorrect."));
        }
        Ok(Outcome::done("Password changed successfully."))
    }

    async fn list_users(&self, page: u64) -> AppResult<Paginated<User>> {
        Ok(Paginated::new(vec![test_user(USER_ID)], page, 10, 1))
    }

    async fn delete_user(&self, _id: i64) -> AppResult<Outcome> {
        Ok(Outcome::done("User deleted successfully."))
    }
}

/// Stub job service with one active job owned by the admin
struct StubJobService;

#[async_trait]
impl JobService for StubJobService {
    async fn home(&self) -> AppResult<HomeView> {
        Ok(HomeView {
            top_categories: vec![],
            categories: vec![],
            featured_jobs: vec![job_view(1, ADMIN_ID)],
            latest_jobs: vec![job_view(1, ADMIN_ID)],
        })
    }

    async fn search(&self, _filters: JobFilters, page: u64) -> AppResult<Paginated<JobView>> {
        Ok(Paginated::new(vec![job_view(1, ADMIN_ID)], page, 9, 1))
    }

    async fn detail(&self, id: i64, viewer: Option<i64>) -> AppResult<JobDetail> {
        if id == 404 {
            return Err(AppError::NotFound);
        }
        Ok(JobDetail {
            job: job_view(id, ADMIN_ID),
            saved: viewer.map(|_| true),
            applicants: None,
        })
    }

    async fn create(&self, owner_id: i64, draft: JobDraft) -> AppResult<Job> {
        let mut job = test_job(1, owner_id);
        job.title = draft.title;
        Ok(job)
    }

    async fn update(&self, owner_id: i64, id: i64, draft: JobDraft) -> AppResult<Job> {
        let mut job = test_job(id, owner_id);
        job.title = draft.title;
        Ok(job)
    }

    async fn delete(&self, _owner_id: i64, id: i64) -> AppResult<Outcome> {
        if id == 404 {
            return Ok(Outcome::not_found("Either job deleted or not found."));
        }
        Ok(Outcome::done("Job deleted successfully."))
    }

    async fn my_jobs(&self, owner_id: i64, page: u64) -> AppResult<Paginated<JobView>> {
        Ok(Paginated::new(vec![job_view(1, owner_id)], page, 10, 1))
    }

    async fn list_jobs(&self, page: u64) -> AppResult<Paginated<JobView>> {
        Ok(Paginated::new(vec![job_view(1, ADMIN_ID)], page, 10, 1))
    }

    async fn admin_update(
        &self,
        id: i64,
        draft: JobDraft,
        status: JobStatus,
        is_featured: bool,
    ) -> AppResult<Job> {
        let mut job = test_job(id, ADMIN_ID);
        job.title = draft.title;
        job.status = status;
        job.is_featured = is_featured;
        Ok(job)
    }

    async fn admin_delete(&self, _id: i64) -> AppResult<Outcome> {
        Ok(Outcome::done("Job deleted successfully."))
    }
}

/// Stub application service
struct StubApplicationService;

#[async_trait]
impl ApplicationService for StubApplicationService {
    async fn apply(&self, user_id: i64, job_id: i64) -> AppResult<Outcome> {
        if job_id == 404 {
            return Ok(Outcome::not_found("Job does not exist anymore."));
        }
        if user_id == ADMIN_ID {
            return Ok(Outcome::forbidden("You cannot apply to your own job."));
        }
        Ok(Outcome::done("You have successfully applied."))
    }

    async fn save(&self, _user_id: i64, _job_id: i64) -> AppResult<Outcome> {
        Ok(Outcome::done("Job saved successfully."))
    }

    async fn remove_application(&self, _user_id: i64, _id: i64) -> AppResult<Outcome> {
        Ok(Outcome::done("Application removed successfully."))
    }

    async fn remove_saved(&self, _user_id: i64, _id: i64) -> AppResult<Outcome> {
        Ok(Outcome::done("Job removed successfully."))
    }

    async fn my_applications(
        &self,
        _user_id: i64,
        page: u64,
    ) -> AppResult<Paginated<AppliedJobView>> {
        Ok(Paginated::new(vec![], page, 10, 0))
    }

    async fn saved_jobs(&self, _user_id: i64, page: u64) -> AppResult<Paginated<SavedJobView>> {
        Ok(Paginated::new(vec![], page, 10, 0))
    }

    async fn list_applications(&self, page: u64) -> AppResult<Paginated<ApplicationView>> {
        Ok(Paginated::new(vec![], page, 10, 0))
    }

    async fn delete_application(&self, _id: i64) -> AppResult<Outcome> {
        Ok(Outcome::done("Application deleted successfully."))
    }
}

/// Stub container wiring the stub services together
struct StubServices;

impl ServiceContainer for StubServices {
    fn auth(&self) -> Arc<dyn AuthService> {
        Arc::new(StubAuthService)
    }

    fn users(&self) -> Arc<dyn UserService> {
        Arc::new(StubUserService)
    }

    fn jobs(&self) -> Arc<dyn JobService> {
        Arc::new(StubJobService)
    }

    fn applications(&self) -> Arc<dyn ApplicationService> {
        Arc::new(StubApplicationService)
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> axum::Router {
    let state = AppState::with_services(Arc::new(StubServices));
    create_router(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Public Endpoints
// =============================================================================

#[tokio::test]
async fn health_reports_absent_database() {
    let response = app().oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "absent");
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = app().oneshot(get("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/account/profile-picture"].is_object());
}

#[tokio::test]
async fn home_returns_featured_and_latest_jobs() {
    let response = app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["featured_jobs"].as_array().unwrap().len(), 1);
    assert_eq!(body["latest_jobs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn job_search_returns_paginated_results() {
    let response = app()
        .oneshot(get("/jobs?keyword=backend&page=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["meta"]["page"], 2);
    assert_eq!(body["data"][0]["job"]["title"], "Backend Engineer");
}

#[tokio::test]
async fn job_detail_is_anonymous_without_token() {
    let response = app().oneshot(get("/jobs/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    // The saved flag only appears for signed-in viewers
    assert!(body.get("saved").is_none());
}

#[tokio::test]
async fn job_detail_carries_saved_flag_for_signed_in_viewer() {
    let response = app()
        .oneshot(get_with_token("/jobs/1", USER_TOKEN))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["saved"], true);
}

#[tokio::test]
async fn job_detail_ignores_garbage_token() {
    let response = app()
        .oneshot(get_with_token("/jobs/1", "garbage"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_job_is_not_found() {
    let response = app().oneshot(get("/jobs/404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Guest Endpoints
// =============================================================================

#[tokio::test]
async fn register_creates_an_account() {
    let payload = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "password": "secret1",
        "confirm_password": "secret1",
    });
    let response = app()
        .oneshot(json_request("POST", "/account/register", None, payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["email"], "jane@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn register_accepts_a_short_name() {
    // Name length bounds only apply to profile edits
    let payload = json!({
        "name": "Bob",
        "email": "bob@example.com",
        "password": "secret1",
        "confirm_password": "secret1",
    });
    let response = app()
        .oneshot(json_request("POST", "/account/register", None, payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Bob");
}

#[tokio::test]
async fn register_rejects_mismatched_passwords() {
    let payload = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "password": "secret1",
        "confirm_password": "different",
    });
    let response = app()
        .oneshot(json_request("POST", "/account/register", None, payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["status"], false);
    assert!(body["errors"]["confirm_password"].is_array());
}

#[tokio::test]
async fn register_rejects_signed_in_callers() {
    let payload = json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "password": "secret1",
        "confirm_password": "secret1",
    });
    let response = app()
        .oneshot(json_request(
            "POST",
            "/account/register",
            Some(USER_TOKEN),
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn login_returns_a_bearer_token() {
    let payload = json!({
        "email": "test@example.com",
        "password": "secret1",
    });
    let response = app()
        .oneshot(json_request("POST", "/account/login", None, payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn forgot_password_rejects_unknown_email() {
    let payload = json!({ "email": "unknown@example.com" });
    let response = app()
        .oneshot(json_request(
            "POST",
            "/account/forgot-password",
            None,
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["errors"]["email"].is_array());
}

#[tokio::test]
async fn reset_password_acknowledges_success() {
    let payload = json!({
        "new_password": "newpass1",
        "confirm_password": "newpass1",
    });
    let response = app()
        .oneshot(json_request(
            "POST",
            "/account/reset-password/sometoken",
            None,
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Password changed successfully.");
}

// =============================================================================
// Account Endpoints
// =============================================================================

#[tokio::test]
async fn profile_requires_authentication() {
    let response = app().oneshot(get("/account/profile")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_returns_the_signed_in_user() {
    let response = app()
        .oneshot(get_with_token("/account/profile", USER_TOKEN))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["id"], USER_ID);
}

#[tokio::test]
async fn profile_update_echoes_changes() {
    let payload = json!({
        "name": "Jane Smith",
        "email": "jane@example.com",
        "mobile": "12345",
    });
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/account/profile",
            Some(USER_TOKEN),
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Jane Smith");
    assert_eq!(body["mobile"], "12345");
}

#[tokio::test]
async fn wrong_old_password_is_a_soft_failure() {
    let payload = json!({
        "old_password": "wrong",
        "new_password": "newpass1",
        "confirm_password": "newpass1",
    });
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/account/change-password",
            Some(USER_TOKEN),
            payload,
        ))
        .await
        .unwrap();
    // Soft outcome: HTTP 200 with a false status in the envelope
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Old password is incorrect.");
}

#[tokio::test]
async fn logout_acknowledges() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/account/logout",
            Some(USER_TOKEN),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], true);
}

// =============================================================================
// Employer Endpoints
// =============================================================================

#[tokio::test]
async fn job_creation_requires_valid_fields() {
    let payload = json!({
        "title": "x",
        "category_id": 1,
        "job_type_id": 1,
        "vacancy": 1,
        "location": "Berlin",
        "description": "Build things",
        "company_name": "Acme",
    });
    let response = app()
        .oneshot(json_request(
            "POST",
            "/account/jobs",
            Some(USER_TOKEN),
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["errors"]["title"].is_array());
}

#[tokio::test]
async fn job_creation_returns_the_new_job() {
    let payload = json!({
        "title": "Senior Backend Engineer",
        "category_id": 1,
        "job_type_id": 1,
        "vacancy": 2,
        "location": "Berlin",
        "description": "Build things",
        "company_name": "Acme GmbH",
    });
    let response = app()
        .oneshot(json_request(
            "POST",
            "/account/jobs",
            Some(USER_TOKEN),
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["title"], "Senior Backend Engineer");
    assert_eq!(body["user_id"], USER_ID);
}

#[tokio::test]
async fn job_deletion_is_an_outcome_envelope() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/account/jobs/404")
                .header(header::AUTHORIZATION, format!("Bearer {}", USER_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], false);
    assert_eq!(body["message"], "Either job deleted or not found.");
}

// =============================================================================
// Job Seeker Endpoints
// =============================================================================

#[tokio::test]
async fn applying_to_a_job_succeeds() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/account/jobs/1/apply",
            Some(USER_TOKEN),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "You have successfully applied.");
}

#[tokio::test]
async fn applying_to_a_missing_job_is_a_soft_failure() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/account/jobs/404/apply",
            Some(USER_TOKEN),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], false);
}

#[tokio::test]
async fn withdrawing_an_application_by_id_returns_an_outcome() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/account/applications/5")
                .header(header::AUTHORIZATION, format!("Bearer {}", USER_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], true);
    assert_eq!(body["message"], "Application removed successfully.");
}

#[tokio::test]
async fn saved_jobs_list_requires_authentication() {
    let response = app().oneshot(get("/account/saved-jobs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Admin Endpoints
// =============================================================================

#[tokio::test]
async fn admin_panel_rejects_regular_users() {
    let response = app()
        .oneshot(get_with_token("/admin/users", USER_TOKEN))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_panel_rejects_anonymous_callers() {
    let response = app().oneshot(get("/admin/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn admin_lists_users() {
    let response = app()
        .oneshot(get_with_token("/admin/users", ADMIN_TOKEN))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn admin_job_update_sets_moderation_flags() {
    let payload = json!({
        "title": "Senior Backend Engineer",
        "category_id": 1,
        "job_type_id": 1,
        "vacancy": 2,
        "location": "Berlin",
        "description": "Build things",
        "company_name": "Acme GmbH",
        "status": 0,
        "is_featured": true,
    });
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/admin/jobs/1",
            Some(ADMIN_TOKEN),
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "blocked");
    assert_eq!(body["is_featured"], true);
}

#[tokio::test]
async fn admin_deletes_an_application() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/admin/applications/3")
                .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN_TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], true);
}
