//! Application route configuration.

use axum::{extract::State, http::StatusCode, middleware, response::Json, routing::get, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{
    account_routes, admin_routes, application_routes, guest_routes, job_routes, public_routes,
};
use super::middleware::{
    admin_middleware, auth_middleware, guest_middleware, optional_auth_middleware,
};
use super::openapi::ApiDoc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Public pages; a valid token enriches job detail but is never required
        .merge(public_routes().route_layer(middleware::from_fn_with_state(
            state.clone(),
            optional_auth_middleware,
        )))
        // Register, login and password reset reject signed-in callers
        .nest(
            "/account",
            guest_routes().route_layer(middleware::from_fn_with_state(
                state.clone(),
                guest_middleware,
            )),
        )
        // Signed-in account, employer and job-seeker routes
        .nest(
            "/account",
            account_routes()
                .merge(job_routes())
                .merge(application_routes())
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        // Admin panel, layered inside the auth middleware
        .nest(
            "/admin",
            admin_routes()
                .route_layer(middleware::from_fn(admin_middleware))
                .route_layer(middleware::from_fn_with_state(
                    state.clone(),
                    auth_middleware,
                )),
        )
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let db_status = match state.database() {
        Some(database) => match database.ping().await {
            Ok(_) => ServiceStatus {
                status: "healthy",
                error: None,
            },
            Err(e) => ServiceStatus {
                status: "unhealthy",
                error: Some(e.to_string()),
            },
        },
        None => ServiceStatus {
            status: "absent",
            error: None,
        },
    };

    let healthy = db_status.status != "unhealthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" },
        database: db_status,
    };

    let status_code = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
