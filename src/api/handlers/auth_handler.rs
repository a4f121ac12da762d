//! Authentication handlers: register, login and the password reset pair.
//!
//! All of these are guest-only; the router wraps them in
//! `guest_middleware`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::AppState;
use crate::domain::UserResponse;
use crate::errors::AppResult;
use crate::services::TokenResponse;
use crate::types::Outcome;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Display name. Length bounds only apply when editing the profile.
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// Password (minimum 5 characters)
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    #[schema(example = "secret1", min_length = 5)]
    pub password: String,
    /// Must repeat the password
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    #[schema(example = "secret1")]
    pub confirm_password: String,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Forgot-password request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com")]
    pub email: String,
}

/// Reset-password request (token travels in the path)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 5, message = "Password must be at least 5 characters"))]
    #[schema(example = "newpass1", min_length = 5)]
    pub new_password: String,
    #[validate(must_match(other = "new_password", message = "Passwords do not match"))]
    #[schema(example = "newpass1")]
    pub confirm_password: String,
}

/// Guest-only authentication routes
pub fn guest_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password/:token", post(reset_password))
}

/// Register a new job seeker account
#[utoipa::path(
    post,
    path = "/account/register",
    tag = "Account",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Already signed in")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .services
        .auth()
        .register(payload.name, payload.email, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Login and get JWT token
#[utoipa::path(
    post,
    path = "/account/login",
    tag = "Account",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Already signed in")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let token = state
        .services
        .auth()
        .login(payload.email, payload.password)
        .await?;

    Ok(Json(token))
}

/// Request a password reset email
#[utoipa::path(
    post,
    path = "/account/forgot-password",
    tag = "Account",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link dispatched"),
        (status = 400, description = "Unknown email")
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<Outcome> {
    state.services.auth().forgot_password(payload.email).await?;
    Ok(Outcome::done(
        "A password reset link has been sent to your email.",
    ))
}

/// Set a new password using a reset token
#[utoipa::path(
    post,
    path = "/account/reset-password/{token}",
    tag = "Account",
    params(("token" = String, Path, description = "Reset token from the email link")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password updated"),
        (status = 400, description = "Invalid token or validation error")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Outcome> {
    state
        .services
        .auth()
        .reset_password(token, payload.new_password)
        .await?;
    Ok(Outcome::done("Password changed successfully."))
}
