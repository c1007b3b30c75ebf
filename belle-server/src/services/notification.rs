//! Reservation Email Service
//!
//! Best-effort customer notification on accept/reject decisions, dispatched
//! through a Resend-compatible HTTP API. Callers never depend on delivery:
//! the engine logs failures and moves on.

use async_trait::async_trait;
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::core::Config;
use crate::utils::time::format_email_date;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Decision communicated to the customer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailStatus {
    Accepted,
    Rejected,
}

impl fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted => f.write_str("accepted"),
            Self::Rejected => f.write_str("rejected"),
        }
    }
}

/// Everything the mail template needs
#[derive(Debug, Clone)]
pub struct StatusEmail {
    pub customer_email: String,
    pub customer_name: String,
    /// Reserved slot, Unix millis
    pub date: i64,
    pub table_type: String,
    pub status: EmailStatus,
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email request failed: {0}")]
    Request(String),

    #[error("email API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Seam between the transition engine and the mail provider
#[async_trait]
pub trait ReservationNotifier: Send + Sync {
    async fn send_status_email(&self, email: StatusEmail) -> Result<(), NotifyError>;
}

/// Resend API payload
#[derive(Debug, Serialize)]
struct EmailPayload {
    from: String,
    to: Vec<String>,
    subject: String,
    html: String,
}

/// Production notifier posting to a Resend-compatible endpoint.
///
/// Without an API key the notifier runs in dev mode: it logs the mail it
/// would have sent and reports success.
#[derive(Clone)]
pub struct EmailNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl EmailNotifier {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_url: config.email_api_url.clone(),
            api_key: config.email_api_key.clone(),
            from: config.email_from.clone(),
        }
    }
}

#[async_trait]
impl ReservationNotifier for EmailNotifier {
    async fn send_status_email(&self, email: StatusEmail) -> Result<(), NotifyError> {
        if self.api_key.is_empty() {
            tracing::info!(
                to = %email.customer_email,
                status = %email.status,
                "EMAIL_API_KEY not configured; skipping reservation email"
            );
            return Ok(());
        }

        let payload = EmailPayload {
            from: self.from.clone(),
            to: vec![email.customer_email.clone()],
            subject: subject_for(email.status).to_string(),
            html: render_html(&email),
        };

        let response = self
            .client
            .post(format!("{}/emails", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(to = %email.customer_email, status = %email.status, "Reservation email sent");
        Ok(())
    }
}

fn subject_for(status: EmailStatus) -> &'static str {
    match status {
        EmailStatus::Accepted => "Your Table Reservation Has Been Confirmed!",
        EmailStatus::Rejected => "Update Regarding Your Table Reservation",
    }
}

fn render_html(email: &StatusEmail) -> String {
    let date = format_email_date(email.date);
    match email.status {
        EmailStatus::Accepted => format!(
            "<h1>Reservation Confirmed!</h1>\
             <p>Dear {name},</p>\
             <p>We're pleased to confirm your table reservation:</p>\
             <ul>\
               <li>Date: {date}</li>\
               <li>Table Type: {table_type}</li>\
             </ul>\
             <p>We look forward to welcoming you!</p>\
             <p>Best regards,<br>La Belle Cuisine Team</p>",
            name = email.customer_name,
            table_type = email.table_type,
        ),
        EmailStatus::Rejected => format!(
            "<h1>Reservation Update</h1>\
             <p>Dear {name},</p>\
             <p>We regret to inform you that we are unable to accommodate your reservation for:</p>\
             <ul>\
               <li>Date: {date}</li>\
               <li>Table Type: {table_type}</li>\
             </ul>\
             <p>Please try booking for a different date or table type.</p>\
             <p>We apologize for any inconvenience.</p>\
             <p>Best regards,<br>La Belle Cuisine Team</p>",
            name = email.customer_name,
            table_type = email.table_type,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::time::parse_rfc3339;

    fn email(status: EmailStatus) -> StatusEmail {
        StatusEmail {
            customer_email: "john@example.com".to_string(),
            customer_name: "John Doe".to_string(),
            date: parse_rfc3339("2024-03-20T18:00:00Z").unwrap(),
            table_type: "Table for 2".to_string(),
            status,
        }
    }

    #[test]
    fn subject_matches_decision() {
        assert!(subject_for(EmailStatus::Accepted).contains("Confirmed"));
        assert!(subject_for(EmailStatus::Rejected).contains("Update"));
    }

    #[test]
    fn accepted_body_confirms_the_slot() {
        let html = render_html(&email(EmailStatus::Accepted));
        assert!(html.contains("Dear John Doe"));
        assert!(html.contains("Table for 2"));
        assert!(html.contains("March 20, 2024"));
        assert!(html.contains("Reservation Confirmed"));
    }

    #[test]
    fn rejected_body_apologizes() {
        let html = render_html(&email(EmailStatus::Rejected));
        assert!(html.contains("unable to accommodate"));
        assert!(html.contains("Table for 2"));
    }
}
