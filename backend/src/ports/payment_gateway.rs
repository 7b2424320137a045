//! Payment gateway port for hosted checkout.
//!
//! Defines the contract for creating a checkout transaction with the payment
//! processor (Midtrans Snap). The customer completes payment in the
//! processor's widget; the outcome arrives later as a notification.

use crate::domain::foundation::OrderId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Port for payment gateway integrations.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create a hosted checkout transaction.
    ///
    /// Returns the token the browser widget needs to open the payment page.
    async fn create_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<TransactionToken, PaymentError>;
}

/// Everything the processor needs to open a checkout.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRequest {
    pub order_id: OrderId,
    /// Amount in whole rupiah.
    pub gross_amount: u64,
    pub customer: CustomerDetails,
    pub items: Vec<ItemDetail>,
    /// Where the processor posts notifications for this order.
    pub notification_url: String,
    /// Where the browser lands after payment.
    pub finish_url: String,
}

/// Customer identity forwarded to the processor.
///
/// Accepts both snake_case and camelCase keys; unknown keys are passed
/// through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerDetails {
    #[serde(alias = "firstName", skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(alias = "lastName", skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One purchased line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: String,
    pub price: u64,
    pub quantity: u32,
    pub name: String,
    pub brand: String,
    pub category: String,
}

/// Result of a successful checkout creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionToken {
    pub token: String,
    /// Hosted payment page, for clients that redirect instead of embedding.
    pub redirect_url: Option<String>,
}

/// Payment error from the gateway.
#[derive(Debug, Clone)]
pub struct PaymentError {
    /// Error code for categorization.
    pub code: PaymentErrorCode,

    /// Human-readable message.
    pub message: String,

    /// Provider's error code (if available).
    pub provider_code: Option<String>,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl PaymentError {
    /// Create a new payment error.
    pub fn new(code: PaymentErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider_code: None,
            retryable: code.is_retryable(),
        }
    }

    /// Create with provider code.
    pub fn with_provider_code(mut self, code: impl Into<String>) -> Self {
        self.provider_code = Some(code.into());
        self
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::NetworkError, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(PaymentErrorCode::AuthenticationError, message)
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for PaymentError {}

/// Payment error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Server key rejected.
    AuthenticationError,

    /// Processor refused the payload (duplicate order id, bad amount).
    InvalidRequest,

    /// Rate limit exceeded.
    RateLimitExceeded,

    /// Provider API error.
    ProviderError,

    /// Unknown error.
    Unknown,
}

impl PaymentErrorCode {
    /// Check if this error type is typically retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentErrorCode::NetworkError
                | PaymentErrorCode::RateLimitExceeded
                | PaymentErrorCode::ProviderError
        )
    }
}

impl std::fmt::Display for PaymentErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentErrorCode::NetworkError => "network_error",
            PaymentErrorCode::AuthenticationError => "authentication_error",
            PaymentErrorCode::InvalidRequest => "invalid_request",
            PaymentErrorCode::RateLimitExceeded => "rate_limit_exceeded",
            PaymentErrorCode::ProviderError => "provider_error",
            PaymentErrorCode::Unknown => "unknown",
        };
        write!(f, "{}", s)
    }
}
