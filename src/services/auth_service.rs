//! Authentication service.
//!
//! Registration, login, token verification and the two password reset
//! flows. Password hashing lives in the domain `Password` value object.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, RESET_TOKEN_LENGTH, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::jobs::EmailJob;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token expiration time in seconds
    #[schema(example = 86400)]
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new job seeker account.
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User>;

    /// Login and return JWT token
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Issue a reset token for the email and dispatch the reset mail.
    async fn forgot_password(&self, email: String) -> AppResult<()>;

    /// Set a new password for the account behind a reset token.
    async fn reset_password(&self, token: String, new_password: String) -> AppResult<()>;
}

/// Generate JWT token for a user (shared helper to avoid duplication)
fn generate_token(user: &User, config: &Config) -> AppResult<TokenResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::hours(config.jwt_expiration_hours);

    let claims = Claims {
        sub: user.id,
        email: user.email.clone(),
        role: user.role.to_string(),
        exp: expires_at.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(TokenResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_hours * SECONDS_PER_HOUR,
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Random alphanumeric reset token, 60 characters.
fn generate_reset_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RESET_TOKEN_LENGTH)
        .map(char::from)
        .collect()
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User> {
        // Format and length rules are enforced by the handler's
        // ValidatedJson extractor; uniqueness has to hit the database.
        if self.uow.users().email_taken(&email, None).await? {
            return Err(AppError::field("email", "Email is already registered"));
        }

        let password_hash = Password::new(&password)?.into_string();
        self.uow.users().create(name, email, password_hash).await
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let user_result = self.uow.users().find_by_email(&email).await?;

        // SECURITY: Perform password verification even if user doesn't exist
        // to prevent timing attacks that could enumerate valid emails.
        let dummy_hash =
            "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

        let (password_hash, user_exists) = match &user_result {
            Some(user) => (user.password_hash.as_str(), true),
            None => (dummy_hash, false),
        };

        let stored_password = Password::from_hash(password_hash.to_string());
        let password_valid = stored_password.verify(&password);

        if !user_exists || !password_valid {
            return Err(AppError::InvalidCredentials);
        }

        // Safe to unwrap since we verified user_exists is true
        generate_token(user_result.as_ref().unwrap(), &self.config)
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn forgot_password(&self, email: String) -> AppResult<()> {
        let user = self
            .uow
            .users()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::field("email", "Email does not exist"))?;

        let token = generate_reset_token();

        // Delete-then-insert so at most one live token exists per email
        {
            let email = email.clone();
            let token = token.clone();
            self.uow
                .transaction(move |ctx| {
                    Box::pin(async move { ctx.password_resets().replace(&email, &token).await })
                })
                .await?;
        }

        let reset_url = self.config.reset_password_url(&token);
        EmailJob::reset_password(email, &user.name, &reset_url).dispatch();

        Ok(())
    }

    async fn reset_password(&self, token: String, new_password: String) -> AppResult<()> {
        let email = self
            .uow
            .password_resets()
            .find_email_by_token(&token)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let user = self
            .uow
            .users()
            .find_by_email(&email)
            .await?
            .ok_or(AppError::InvalidToken)?;

        let password_hash = Password::new(&new_password)?.into_string();
        self.uow.users().update_password(user.id, password_hash).await

        // The token row is intentionally left in place: a token stays
        // valid until a newer forgot-password request replaces it.
    }
}
