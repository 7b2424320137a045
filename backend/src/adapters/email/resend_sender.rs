//! Resend email adapter.
//!
//! Sends plain-text transactional email through `POST /emails`.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::ports::{ConfirmationEmail, EmailError, EmailSender};

const RESEND_API_URL: &str = "https://api.resend.com";

/// Resend configuration.
#[derive(Clone)]
pub struct ResendConfig {
    api_key: SecretString,
    /// Value of the `from` field, e.g. `NexusEdge <billing@nexusedge.id>`.
    from: String,
    api_base_url: String,
}

impl ResendConfig {
    pub fn new(api_key: SecretString, from: impl Into<String>) -> Self {
        Self {
            api_key,
            from: from.into(),
            api_base_url: RESEND_API_URL.to_string(),
        }
    }

    /// Set a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }
}

#[derive(Debug, Serialize)]
struct SendEmailBody<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: String,
    text: String,
}

impl<'a> SendEmailBody<'a> {
    fn confirmation(from: &'a str, email: &'a ConfirmationEmail) -> Self {
        Self {
            from,
            to: [email.to.as_str()],
            subject: email.subject(),
            text: email.text(),
        }
    }
}

/// Email sender backed by the Resend API.
pub struct ResendEmailSender {
    config: ResendConfig,
    http_client: reqwest::Client,
}

impl ResendEmailSender {
    pub fn new(config: ResendConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl EmailSender for ResendEmailSender {
    async fn send_payment_confirmation(&self, email: &ConfirmationEmail) -> Result<(), EmailError> {
        let url = format!("{}/emails", self.config.api_base_url.trim_end_matches('/'));
        let body = SendEmailBody::confirmation(&self.config.from, email);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| EmailError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(order_id = %email.order_id, "resend accepted message");
        Ok(())
    }
}
