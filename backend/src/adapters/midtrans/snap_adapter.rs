//! Midtrans Snap payment gateway adapter.
//!
//! Implements the `PaymentGateway` trait against the Snap transactions API.
//!
//! # Security
//!
//! - The server key authenticates as the HTTP basic-auth username
//! - Secrets handled via `secrecy::SecretString`
//!
//! # Configuration
//!
//! ```ignore
//! let config = SnapConfig::new(server_key).with_base_url(payment.snap_base_url());
//! let adapter = MidtransSnapAdapter::new(config);
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};

use crate::ports::{
    PaymentError, PaymentErrorCode, PaymentGateway, TransactionRequest, TransactionToken,
};

use super::snap_types::{SnapErrorResponse, SnapTokenResponse, SnapTransactionBody};

const SANDBOX_BASE_URL: &str = "https://app.sandbox.midtrans.com";

/// Header that points Midtrans at a per-transaction notification URL.
const OVERRIDE_NOTIFICATION_HEADER: &str = "X-Override-Notification";

/// Snap API configuration.
#[derive(Clone)]
pub struct SnapConfig {
    /// Midtrans server key (`SB-Mid-server-...` in sandbox).
    server_key: SecretString,

    /// Base URL for the Snap API.
    api_base_url: String,
}

impl SnapConfig {
    /// Create a sandbox configuration.
    pub fn new(server_key: SecretString) -> Self {
        Self {
            server_key,
            api_base_url: SANDBOX_BASE_URL.to_string(),
        }
    }

    /// Set the API base URL (production, or a local stub).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    fn transactions_url(&self) -> String {
        format!("{}/snap/v1/transactions", self.api_base_url.trim_end_matches('/'))
    }
}

/// Midtrans Snap adapter.
pub struct MidtransSnapAdapter {
    config: SnapConfig,
    http_client: reqwest::Client,
}

impl MidtransSnapAdapter {
    pub fn new(config: SnapConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    /// Builds a `PaymentError` from a non-success Snap response.
    fn error_from_response(status: StatusCode, body: &str) -> PaymentError {
        let message = SnapErrorResponse::parse(body).message();
        let code = match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                PaymentErrorCode::AuthenticationError
            }
            StatusCode::TOO_MANY_REQUESTS => PaymentErrorCode::RateLimitExceeded,
            s if s.is_client_error() => PaymentErrorCode::InvalidRequest,
            s if s.is_server_error() => PaymentErrorCode::ProviderError,
            _ => PaymentErrorCode::Unknown,
        };
        PaymentError::new(code, format!("Midtrans API error: {}", message))
            .with_provider_code(status.as_u16().to_string())
    }
}

#[async_trait]
impl PaymentGateway for MidtransSnapAdapter {
    async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionToken, PaymentError> {
        let url = self.config.transactions_url();
        let body = SnapTransactionBody::from(request);

        let response = self
            .http_client
            .post(&url)
            .basic_auth(self.config.server_key.expose_secret(), Some(""))
            .header(reqwest::header::ACCEPT, "application/json")
            .header(OVERRIDE_NOTIFICATION_HEADER, &request.notification_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PaymentError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            tracing::warn!(
                order_id = %request.order_id,
                status = status.as_u16(),
                error = %error_text,
                "Midtrans create transaction failed"
            );
            return Err(Self::error_from_response(status, &error_text));
        }

        let snap: SnapTokenResponse = response.json().await.map_err(|e| {
            PaymentError::new(
                PaymentErrorCode::ProviderError,
                format!("Failed to parse Midtrans response: {}", e),
            )
        })?;

        Ok(TransactionToken {
            token: snap.token,
            redirect_url: snap.redirect_url,
        })
    }
}
