//! JWT authentication middleware.
//!
//! Three layers cover the site's access tiers: `auth_middleware` for
//! signed-in pages, `admin_middleware` stacked on top for the admin
//! panel, and `guest_middleware` for pages that signed-in users must
//! not reach (register, login, password reset). Public job pages use
//! `optional_auth_middleware` so the saved flag and the owner's
//! applicant list can appear when a valid token happens to be present.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::{BEARER_TOKEN_PREFIX, ROLE_ADMIN};
use crate::errors::AppError;

/// Request-scoped principal extracted from the JWT.
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub role: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
}

fn verify(state: &AppState, token: &str) -> Result<CurrentUser, AppError> {
    let claims = state.services.auth().verify_token(token)?;
    Ok(CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
    })
}

/// Require a valid Bearer token and inject the principal.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or(AppError::Unauthorized)?;
    let current_user = verify(&state, token)?;

    request.extensions_mut().insert(current_user);

    Ok(next.run(request).await)
}

/// Require the principal injected by `auth_middleware` to be an admin.
/// Must be layered inside `auth_middleware`.
pub async fn admin_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let current_user = request
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;

    if !current_user.is_admin() {
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}

/// Reject callers who are already signed in. The API analogue of
/// redirecting an authenticated user away from the login page.
pub async fn guest_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if let Some(token) = bearer_token(&request) {
        if verify(&state, token).is_ok() {
            return Err(AppError::Forbidden);
        }
        // A stale or garbage token reads as anonymous
    }

    Ok(next.run(request).await)
}

/// Inject the principal when a valid token is present, stay anonymous
/// otherwise. Never rejects.
pub async fn optional_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&request) {
        if let Ok(current_user) = verify(&state, token) {
            request.extensions_mut().insert(current_user);
        }
    }

    next.run(request).await
}
