//! Email background job.
//!
//! Emails are dispatched fire-and-forget on the runtime so request
//! handlers never wait on delivery. Without SMTP settings in the
//! environment the handler logs the message instead of sending it.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::AppError;

/// Email job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailJob {
    /// Recipient email address
    pub to: String,
    /// Email subject line
    pub subject: String,
    /// Email body content (plain text)
    pub body: String,
    /// Optional sender override (defaults to SMTP_FROM)
    #[serde(default)]
    pub from: Option<String>,
}

impl EmailJob {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            body: body.into(),
            from: None,
        }
    }

    /// Password reset instructions with the tokenized reset link.
    pub fn reset_password(to: impl Into<String>, name: &str, reset_url: &str) -> Self {
        Self::new(
            to,
            "Reset your password",
            format!(
                "Hello {name},\n\n\
                 We received a request to reset the password for your account.\n\
                 Open the link below to choose a new password:\n\n\
                 {reset_url}\n\n\
                 If you did not request this, you can ignore this email."
            ),
        )
    }

    /// Notification to the employer that someone applied to their posting.
    /// Carries the applicant's contact details so the employer can reply
    /// without signing in.
    pub fn application_received(
        to: impl Into<String>,
        employer_name: &str,
        applicant_name: &str,
        applicant_email: &str,
        applicant_mobile: Option<&str>,
        job_title: &str,
    ) -> Self {
        Self::new(
            to,
            format!("New application for \"{job_title}\""),
            format!(
                "Hello {employer_name},\n\n\
                 {applicant_name} has applied to your job posting \"{job_title}\".\n\n\
                 Email: {applicant_email}\n\
                 Mobile: {}\n\n\
                 Sign in to review the application.",
                applicant_mobile.unwrap_or("not provided")
            ),
        )
    }

    /// Fire-and-forget dispatch. Failures are logged, never surfaced to
    /// the request that queued the email.
    pub fn dispatch(self) {
        tokio::spawn(async move {
            let to = self.to.clone();
            if let Err(e) = email_job_handler(self).await {
                tracing::error!(to = %to, "Email job failed: {}", e);
            }
        });
    }
}

/// Email configuration from environment.
/// Note: Some fields are currently unused pending lettre integration.
#[allow(dead_code)]
struct EmailConfig {
    smtp_host: Option<String>,
    smtp_port: u16,
    smtp_user: Option<String>,
    smtp_pass: Option<String>,
    smtp_from: String,
    smtp_tls: bool,
}

impl EmailConfig {
    fn from_env() -> Self {
        Self {
            smtp_host: env::var("SMTP_HOST").ok(),
            smtp_port: env::var("SMTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(587),
            smtp_user: env::var("SMTP_USER").ok(),
            smtp_pass: env::var("SMTP_PASS").ok(),
            smtp_from: env::var("SMTP_FROM").unwrap_or_else(|_| "noreply@example.com".to_string()),
            smtp_tls: env::var("SMTP_TLS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
        }
    }

    fn is_configured(&self) -> bool {
        self.smtp_host.is_some()
    }
}

/// Email job handler - processes email sending jobs
pub async fn email_job_handler(job: EmailJob) -> Result<(), AppError> {
    let config = EmailConfig::from_env();
    let from = job.from.as_deref().unwrap_or(&config.smtp_from);

    tracing::info!(
        to = %job.to,
        from = %from,
        subject = %job.subject,
        "Processing email job"
    );

    if !config.is_configured() {
        // Development mode: log the email instead of sending
        tracing::warn!("SMTP not configured - logging email instead of sending");
        tracing::info!(
            "=== EMAIL (not sent) ===\n\
             From: {}\n\
             To: {}\n\
             Subject: {}\n\
             Body:\n{}\n\
             ========================",
            from,
            job.to,
            job.subject,
            job.body
        );
        return Ok(());
    }

    tracing::warn!(
        "SMTP is configured but no transport is installed. \
         Add lettre to Cargo.toml to enable real email sending."
    );

    tracing::info!(to = %job.to, "Email processed successfully");
    Ok(())
}
