//! Validated JSON extractor - combines deserialization with validation.
//!
//! Runs the `validator` derive rules before the handler body executes,
//! so mutations only ever see structurally valid input. Failures carry
//! a per-field error map.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{AppError, FieldErrors};

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(collect_field_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten validator's error tree into the per-field map the frontend
/// renders next to its inputs.
pub fn collect_field_errors(errors: &validator::ValidationErrors) -> FieldErrors {
    let mut fields = FieldErrors::new();
    for (field, errs) in errors.field_errors() {
        for err in errs {
            let message = err
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            fields.push(field.to_string(), message);
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 5, message = "Title must be at least 5 characters"))]
        title: String,
        #[validate(email(message = "Invalid email format"))]
        email: String,
    }

    #[test]
    fn every_failing_field_gets_its_own_entry() {
        let probe = Probe {
            title: "ab".to_string(),
            email: "not-an-email".to_string(),
        };

        let errors = probe.validate().unwrap_err();
        let fields = collect_field_errors(&errors);

        assert_eq!(fields.0.len(), 2);
        assert_eq!(
            fields.0.get("title").and_then(|v| v.first()).map(String::as_str),
            Some("Title must be at least 5 characters")
        );
        assert!(fields.0.contains_key("email"));
    }
}
