//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers::{
    account_handler, admin_handler, application_handler, auth_handler, job_handler, public_handler,
};
use crate::domain::{Category, Job, JobApplication, JobStatus, JobType, SavedJob, User, UserResponse, UserRole};
use crate::services::{
    ApplicantView, ApplicationView, AppliedJobView, HomeView, JobDetail, JobView, SavedJobView,
    TokenResponse,
};

/// OpenAPI documentation for the job board API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Job Board API",
        version = "0.1.0",
        description = "A job board backend with Axum, SeaORM, and clean architecture",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT"),
        contact(name = "API Support", email = "support@example.com")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
        (url = "https://api.example.com", description = "Production server")
    ),
    paths(
        // Public endpoints
        public_handler::home,
        public_handler::search_jobs,
        public_handler::job_detail,
        // Account endpoints
        auth_handler::register,
        auth_handler::login,
        auth_handler::forgot_password,
        auth_handler::reset_password,
        account_handler::logout,
        account_handler::get_profile,
        account_handler::update_profile,
        account_handler::update_profile_picture,
        account_handler::change_password,
        // Employer endpoints
        job_handler::create_job,
        job_handler::my_jobs,
        job_handler::update_job,
        job_handler::delete_job,
        // Job seeker endpoints
        application_handler::apply,
        application_handler::save_job,
        application_handler::my_applications,
        application_handler::remove_application,
        application_handler::saved_jobs,
        application_handler::remove_saved_job,
        // Admin endpoints
        admin_handler::list_users,
        admin_handler::update_user,
        admin_handler::destroy_user,
        admin_handler::list_jobs,
        admin_handler::update_job,
        admin_handler::destroy_job,
        admin_handler::list_applications,
        admin_handler::destroy_application,
    ),
    components(
        schemas(
            // Domain types
            UserRole,
            User,
            UserResponse,
            Job,
            JobStatus,
            Category,
            JobType,
            JobApplication,
            SavedJob,
            // View models
            HomeView,
            JobView,
            JobDetail,
            ApplicantView,
            AppliedJobView,
            SavedJobView,
            ApplicationView,
            TokenResponse,
            // Request types
            auth_handler::RegisterRequest,
            auth_handler::LoginRequest,
            auth_handler::ForgotPasswordRequest,
            auth_handler::ResetPasswordRequest,
            account_handler::UpdateProfileRequest,
            account_handler::ChangePasswordRequest,
            job_handler::JobRequest,
            admin_handler::AdminUpdateJobRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Public", description = "Job search and detail pages"),
        (name = "Account", description = "Registration, login and profile management"),
        (name = "Jobs", description = "Employer job management"),
        (name = "Applications", description = "Applying to and saving jobs"),
        (name = "Admin", description = "Admin panel operations")
    )
)]
pub struct ApiDoc;

/// Security scheme modifier for JWT Bearer authentication
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT token obtained from /account/login"))
                        .build(),
                ),
            );
        }
    }
}
