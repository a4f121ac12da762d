//! Account handlers: profile, picture, password change and logout.

use axum::{
    extract::{Multipart, State},
    response::Json,
    routing::{get, post, put},
    Extension, Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::CurrentUser;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::ProfileChanges;
use crate::types::Outcome;

/// Profile update request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 5, max = 20, message = "Name must be 5 to 20 characters"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    pub mobile: Option<String>,
    pub designation: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileChanges {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            mobile: request.mobile,
            designation: request.designation,
        }
    }
}

/// Password change request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ChangePasswordRequest {
    #[schema(example = "oldpass1")]
    pub old_password: String,
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    #[schema(example = "newpass1", min_length = 5)]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    #[schema(example = "newpass1")]
    pub confirm_password: String,
}

/// Authenticated account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/profile-picture", post(update_profile_picture))
        .route("/change-password", put(change_password))
}

/// Acknowledge logout. Tokens are stateless; the client discards its
/// copy and the session is over.
#[utoipa::path(
    post,
    path = "/account/logout",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Logged out"))
)]
pub async fn logout() -> Outcome {
    Outcome::done("You have been logged out.")
}

/// Get the signed-in user's profile
#[utoipa::path(
    get,
    path = "/account/profile",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserResponse>> {
    let user = state.services.users().get_user(current_user.id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// Update the signed-in user's profile
#[utoipa::path(
    put,
    path = "/account/profile",
    tag = "Account",
    security(("bearer_auth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Validation error")
    )
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .services
        .users()
        .update_profile(current_user.id, payload.into())
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// Upload a new profile picture (multipart field `image`)
#[utoipa::path(
    post,
    path = "/account/profile-picture",
    tag = "Account",
    security(("bearer_auth" = [])),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Updated profile", body = UserResponse),
        (status = 400, description = "Missing or invalid image")
    )
)]
pub async fn update_profile_picture(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<Json<UserResponse>> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("image") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
            image = Some(bytes.to_vec());
        }
    }

    let bytes = image.ok_or_else(|| AppError::field("image", "An image file is required"))?;

    let user = state
        .services
        .users()
        .update_profile_picture(current_user.id, bytes)
        .await?;
    Ok(Json(UserResponse::from(user)))
}

/// Change the signed-in user's password
#[utoipa::path(
    put,
    path = "/account/change-password",
    tag = "Account",
    security(("bearer_auth" = [])),
    request_body = ChangePasswordRequest,
    responses(
        (status = 200, description = "Outcome envelope; a wrong old password is a soft failure")
    )
)]
pub async fn change_password(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    ValidatedJson(payload): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<Outcome> {
    state
        .services
        .users()
        .change_password(current_user.id, payload.old_password, payload.new_password)
        .await
}
