//! Admin panel handlers: users, jobs and applications.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, put},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use super::account_handler::UpdateProfileRequest;
use super::job_handler::JobRequest;
use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::{Job, JobStatus, User, UserResponse};
use crate::errors::AppResult;
use crate::services::{ApplicationView, JobView};
use crate::types::{Outcome, PageQuery, Paginated};

/// Admin job update request. The moderation flags ride along with the
/// regular job fields.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminUpdateJobRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub job: JobRequest,
    /// 1 = active, 0 = blocked; defaults to active
    pub status: Option<i16>,
    /// Defaults to false
    pub is_featured: Option<bool>,
}

/// Admin routes, nested under /admin behind the admin middleware
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/:id", put(update_user).delete(destroy_user))
        .route("/jobs", get(list_jobs))
        .route("/jobs/:id", put(update_job).delete(destroy_job))
        .route("/applications", get(list_applications))
        .route("/applications/:id", delete(destroy_application))
}

/// All registered users, newest first
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, 1-based")),
    responses((status = 200, description = "Paginated users"))
)]
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<User>>> {
    let users = state.services.users().list_users(page.page).await?;
    Ok(Json(users))
}

/// Edit any user's profile fields
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User id")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 404, description = "Unknown user")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users()
        .update_profile(id, payload.into())
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User id")),
    responses((status = 200, description = "Outcome envelope"))
)]
pub async fn destroy_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Outcome> {
    state.services.users().delete_user(id).await
}

/// All jobs regardless of owner or status
#[utoipa::path(
    get,
    path = "/admin/jobs",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, 1-based")),
    responses((status = 200, description = "Paginated jobs with owners"))
)]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<JobView>>> {
    let jobs = state.services.jobs().list_jobs(page.page).await?;
    Ok(Json(jobs))
}

/// Edit any job, including its moderation flags
#[utoipa::path(
    put,
    path = "/admin/jobs/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Job id")),
    request_body = AdminUpdateJobRequest,
    responses(
        (status = 200, description = "Updated job", body = Job),
        (status = 404, description = "Unknown job")
    )
)]
pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<AdminUpdateJobRequest>,
) -> AppResult<Json<Job>> {
    let status = JobStatus::from(payload.status.unwrap_or(1));
    let is_featured = payload.is_featured.unwrap_or(false);
    let job = state
        .services
        .jobs()
        .admin_update(id, payload.job.into(), status, is_featured)
        .await?;
    Ok(Json(job))
}

/// Delete any job
#[utoipa::path(
    delete,
    path = "/admin/jobs/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Job id")),
    responses((status = 200, description = "Outcome envelope"))
)]
pub async fn destroy_job(State(state): State<AppState>, Path(id): Path<i64>) -> AppResult<Outcome> {
    state.services.jobs().admin_delete(id).await
}

/// All applications with their jobs and both parties
#[utoipa::path(
    get,
    path = "/admin/applications",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, 1-based")),
    responses((status = 200, description = "Paginated applications"))
)]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<ApplicationView>>> {
    let applications = state
        .services
        .applications()
        .list_applications(page.page)
        .await?;
    Ok(Json(applications))
}

/// Delete a single application row
#[utoipa::path(
    delete,
    path = "/admin/applications/{id}",
    tag = "Admin",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Application id")),
    responses((status = 200, description = "Outcome envelope"))
)]
pub async fn destroy_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Outcome> {
    state.services.applications().delete_application(id).await
}
