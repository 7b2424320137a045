//! Notification intake errors.
//!
//! Each variant's display text is the exact `error` message returned to the
//! caller, and `status_code` decides whether Midtrans retries.

use axum::http::StatusCode;
use thiserror::Error;

use super::signature::SignatureError;

/// Errors that stop a notification before dispatch.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// No server key configured.
    #[error("Server configuration error")]
    ServerMisconfigured,

    /// The verifier could not compute a signature.
    #[error("Server configuration error")]
    Verifier(#[from] SignatureError),

    /// Body could not be read as text.
    #[error("Failed to read request body")]
    UnreadableBody,

    #[error("Invalid signature")]
    InvalidSignature,

    /// Body is not JSON, or a field has the wrong type.
    #[error("Invalid JSON in request body")]
    InvalidJson(String),

    #[error("Missing order_id")]
    MissingOrderId,
}

impl NotificationError {
    /// Maps the error to an HTTP status code.
    ///
    /// Configuration failures are 5xx so Midtrans keeps retrying until the
    /// deployment is fixed. Everything else is the sender's fault.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotificationError::ServerMisconfigured | NotificationError::Verifier(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            NotificationError::UnreadableBody
            | NotificationError::InvalidSignature
            | NotificationError::InvalidJson(_)
            | NotificationError::MissingOrderId => StatusCode::BAD_REQUEST,
        }
    }
}
