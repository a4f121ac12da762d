//! Employer job handlers: create, update, delete and "my jobs".

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::{Job, JobDraft};
use crate::errors::AppResult;
use crate::services::JobView;
use crate::types::{Outcome, PageQuery, Paginated};

/// Job create/update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct JobRequest {
    #[validate(length(min = 5, max = 200, message = "Title must be 5 to 200 characters"))]
    #[schema(example = "Senior Backend Engineer")]
    pub title: String,
    pub category_id: i64,
    pub job_type_id: i64,
    #[validate(range(min = 1, message = "Vacancy must be at least 1"))]
    #[schema(example = 2)]
    pub vacancy: i32,
    pub salary: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Location must be 1 to 50 characters"))]
    #[schema(example = "Berlin")]
    pub location: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub benefits: Option<String>,
    pub responsibility: Option<String>,
    pub qualifications: Option<String>,
    pub keywords: Option<String>,
    pub experience: Option<String>,
    #[validate(length(min = 3, max = 75, message = "Company name must be 3 to 75 characters"))]
    #[schema(example = "Acme GmbH")]
    pub company_name: String,
    pub company_location: Option<String>,
    #[validate(url(message = "Company website must be a valid URL"))]
    pub company_website: Option<String>,
}

impl From<JobRequest> for JobDraft {
    fn from(request: JobRequest) -> Self {
        Self {
            title: request.title,
            category_id: request.category_id,
            job_type_id: request.job_type_id,
            vacancy: request.vacancy,
            salary: request.salary,
            location: request.location,
            description: request.description,
            benefits: request.benefits,
            responsibility: request.responsibility,
            qualifications: request.qualifications,
            keywords: request.keywords,
            experience: request.experience,
            company_name: request.company_name,
            company_location: request.company_location,
            company_website: request.company_website,
        }
    }
}

/// Authenticated employer routes, nested under /account
pub fn job_routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", post(create_job).get(my_jobs))
        .route("/jobs/:id", put(update_job).delete(delete_job))
}

/// Post a new job. The caller becomes the owner.
#[utoipa::path(
    post,
    path = "/account/jobs",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    request_body = JobRequest,
    responses(
        (status = 201, description = "Job created", body = Job),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_job(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<JobRequest>,
) -> AppResult<(StatusCode, Json<Job>)> {
    let job = state
        .services
        .jobs()
        .create(current_user.id, payload.into())
        .await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// Update an owned job. Jobs owned by someone else read as missing.
#[utoipa::path(
    put,
    path = "/account/jobs/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Job id")),
    request_body = JobRequest,
    responses(
        (status = 200, description = "Job updated", body = Job),
        (status = 404, description = "Missing or not owned")
    )
)]
pub async fn update_job(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
    ValidatedJson(payload): ValidatedJson<JobRequest>,
) -> AppResult<Json<Job>> {
    let job = state
        .services
        .jobs()
        .update(current_user.id, id, payload.into())
        .await?;
    Ok(Json(job))
}

/// Delete an owned job. Missing or foreign jobs are a benign outcome.
#[utoipa::path(
    delete,
    path = "/account/jobs/{id}",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Job id")),
    responses((status = 200, description = "Outcome envelope"))
)]
pub async fn delete_job(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Outcome> {
    state.services.jobs().delete(current_user.id, id).await
}

/// The caller's own postings, newest first
#[utoipa::path(
    get,
    path = "/account/jobs",
    tag = "Jobs",
    security(("bearer_auth" = [])),
    params(("page" = Option<u64>, Query, description = "Page number, 1-based")),
    responses((status = 200, description = "Paginated jobs"))
)]
pub async fn my_jobs(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Paginated<JobView>>> {
    let jobs = state
        .services
        .jobs()
        .my_jobs(current_user.id, page.page)
        .await?;
    Ok(Json(jobs))
}
