//! Job-seeker handlers: apply to jobs, save jobs and list both.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Extension, Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::errors::AppResult;
use crate::services::{AppliedJobView, SavedJobView};
use crate::types::{Outcome, PageQuery, Paginated};

/// Authenticated job-seeker routes, nested under /account
pub fn application_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs/:id/apply", post(apply))
        .route("/jobs/:id/save", post(save_job))
        .route("/applications", get(my_applications))
        .route("/applications/:id", delete(remove_application))
        .route("/saved-jobs", get(saved_jobs))
        .route("/saved-jobs/:id", delete(remove_saved_job))
}

/// Apply to a job. Applying to a missing or blocked job, or to the
/// caller's own posting, is a soft failure in the outcome envelope.
#[utoipa::path(
    post,
    path = "/account/jobs/{id}/apply",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Job id")),
    responses((status = 200, description = "Outcome envelope"))
)]
pub async fn apply(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Outcome> {
    state.services.applications().apply(current_user.id, id).await
}

/// Save a job for later
#[utoipa::path(
    post,
    path = "/account/jobs/{id}/save",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Job id")),
    responses((status = 200, description = "Outcome envelope"))
)]
pub async fn save_job(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Outcome> {
    state.services.applications().save(current_user.id, id).await
}

/// The caller's applications, newest first
#[utoipa::path(
    get,
    path = "/account/applications",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, 1-based")),
    responses((status = 200, description = "Paginated applications"))
)]
pub async fn my_applications(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<AppliedJobView>>> {
    let applications = state
        .services
        .applications()
        .my_applications(current_user.id, page.page)
        .await?;
    Ok(Json(applications))
}

/// Withdraw one of the caller's applications by its id
#[utoipa::path(
    delete,
    path = "/account/applications/{id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Application id")),
    responses((status = 200, description = "Outcome envelope"))
)]
pub async fn remove_application(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Outcome> {
    state
        .services
        .applications()
        .remove_application(current_user.id, id)
        .await
}

/// The caller's saved jobs, newest first
#[utoipa::path(
    get,
    path = "/account/saved-jobs",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, 1-based")),
    responses((status = 200, description = "Paginated saved jobs"))
)]
pub async fn saved_jobs(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<SavedJobView>>> {
    let saved = state
        .services
        .applications()
        .saved_jobs(current_user.id, page.page)
        .await?;
    Ok(Json(saved))
}

/// Drop one bookmark from the caller's saved list by its id
#[utoipa::path(
    delete,
    path = "/account/saved-jobs/{id}",
    tag = "Applications",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Saved job id")),
    responses((status = 200, description = "Outcome envelope"))
)]
pub async fn remove_saved_job(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Outcome> {
    state
        .services
        .applications()
        .remove_saved(current_user.id, id)
        .await
}
