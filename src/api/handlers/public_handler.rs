//! Public handlers: home page data, job search and job detail.

use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Extension, Router,
};

use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::JobFilters;
use crate::errors::AppResult;
use crate::services::{HomeView, JobDetail, JobView};
use crate::types::{PageQuery, Paginated};

/// Routes anyone can call. Job detail carries an optional principal so
/// the router layers `optional_auth_middleware` over this group.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/jobs", get(search_jobs))
        .route("/jobs/:id", get(job_detail))
}

/// Landing page data: categories plus featured and latest jobs
#[utoipa::path(
    get,
    path = "/",
    tag = "Public",
    responses((status = 200, description = "Home page data", body = HomeView))
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<HomeView>> {
    let view = state.services.jobs().home().await?;
    Ok(Json(view))
}

/// Search active jobs
#[utoipa::path(
    get,
    path = "/jobs",
    tag = "Public",
    params(
        ("keyword" = Option<String>, Query, description = "Substring of title or keywords"),
        ("location" = Option<String>, Query, description = "Exact location"),
        ("category" = Option<i64>, Query, description = "Category id"),
        ("job_type" = Option<String>, Query, description = "Comma-separated job type ids"),
        ("experience" = Option<String>, Query, description = "Exact experience"),
        ("sort" = Option<i32>, Query, description = "0 for oldest first, otherwise newest first"),
        ("page" = Option<u64>, Query, description = "Page number, 1-based")
    ),
    responses((status = 200, description = "Paginated search results"))
)]
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(filters): Query<JobFilters>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<JobView>>> {
    let results = state.services.jobs().search(filters, page.page).await?;
    Ok(Json(results))
}

/// Job detail. A signed-in viewer also gets the saved flag, and the
/// owner gets the applicant list.
#[utoipa::path(
    get,
    path = "/jobs/{id}",
    tag = "Public",
    params(("id" = i64, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job detail", body = JobDetail),
        (status = 404, description = "Missing or blocked job")
    )
)]
pub async fn job_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    viewer: Option<Extension<CurrentUser>>,
) -> AppResult<Json<JobDetail>> {
    let viewer_id = viewer.map(|Extension(user)| user.id);
    let detail = state.services.jobs().detail(id, viewer_id).await?;
    Ok(Json(detail))
}
