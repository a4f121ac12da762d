//! Soft-outcome response type for AJAX-style mutations.
//!
//! The page flows treat "already deleted", "not yours" and "bad old
//! password" as notices rather than hard failures. `Outcome` makes those
//! cases an explicit sum type so callers can distinguish them, while the
//! wire format stays the `{status, message?/errors?}` envelope the
//! frontend expects.

use axum::{response::IntoResponse, Json};
use serde::Serialize;

use crate::errors::FieldErrors;

/// Result of a mutation that never hard-fails the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The mutation happened.
    Done(String),
    /// Target row is missing or not visible to the caller; benign.
    NotFound(String),
    /// Caller is known but not allowed to do this; benign.
    Forbidden(String),
    /// Input failed validation; nothing was mutated.
    Invalid(FieldErrors),
}

impl Outcome {
    pub fn done(message: impl Into<String>) -> Self {
        Outcome::Done(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Outcome::NotFound(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Outcome::Forbidden(message.into())
    }

    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done(_))
    }
}

#[derive(Serialize)]
struct OutcomeBody {
    status: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

impl IntoResponse for Outcome {
    fn into_response(self) -> axum::response::Response {
        let body = match self {
            Outcome::Done(message) => OutcomeBody {
                status: true,
                message: Some(message),
                errors: None,
            },
            Outcome::NotFound(message) | Outcome::Forbidden(message) => OutcomeBody {
                status: false,
                message: Some(message),
                errors: None,
            },
            Outcome::Invalid(errors) => OutcomeBody {
                status: false,
                message: None,
                errors: Some(errors),
            },
        };

        // Soft outcomes keep a 200 status; the envelope carries the result
        Json(body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn soft_outcomes_are_not_http_errors() {
        let response = Outcome::not_found("Either job deleted or not found.").into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn done_reports_success() {
        assert!(Outcome::done("Job deleted successfully.").is_done());
        assert!(!Outcome::forbidden("not yours").is_done());
    }
}
