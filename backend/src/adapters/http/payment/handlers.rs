//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::application::handlers::payment::{
    CheckoutError, CreateCheckoutHandler, HandlePaymentNotificationCommand,
    HandlePaymentNotificationHandler, NotificationOutcome,
};
use crate::domain::foundation::Timestamp;
use crate::domain::payment::NotificationError;

use super::dto::{CheckoutResponse, CreateCheckoutRequest, ErrorResponse, WebhookAck};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for payment routes. Handlers are built once at startup.
#[derive(Clone)]
pub struct PaymentAppState {
    pub notification_handler: Arc<HandlePaymentNotificationHandler>,
    pub checkout_handler: Arc<CreateCheckoutHandler>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payment/webhook - Midtrans payment notification
pub async fn handle_payment_webhook(
    State(state): State<PaymentAppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<WebhookAck>, PaymentApiError> {
    let body = match body {
        Ok(bytes) => Some(bytes.to_vec()),
        Err(rejection) => {
            tracing::warn!(error = %rejection, "failed to read notification body");
            None
        }
    };

    let cmd = HandlePaymentNotificationCommand {
        body,
        headers,
        received_at: Timestamp::now(),
    };

    match state.notification_handler.handle(cmd).await? {
        NotificationOutcome::Applied {
            order_id,
            status,
            email,
        } => {
            tracing::info!(order_id = %order_id, status = %status, email = ?email, "notification applied");
        }
        NotificationOutcome::Superseded { order_id } => {
            tracing::info!(order_id = %order_id, "notification superseded by newer state");
        }
        NotificationOutcome::ApplyFailed { order_id, reason } => {
            tracing::warn!(order_id = %order_id, reason = %reason, "notification acknowledged without write");
        }
        NotificationOutcome::Unhandled {
            order_id,
            transaction_status,
        } => {
            tracing::info!(
                order_id = %order_id,
                transaction_status = transaction_status.as_deref().unwrap_or("-"),
                "unhandled transaction status"
            );
        }
    }

    Ok(Json(WebhookAck::received()))
}

/// POST /api/payment/create - Open a Snap checkout
///
/// The body is parsed by hand so a missing or wrong `Content-Type` is
/// treated like any other unreadable body.
pub async fn create_checkout(
    State(state): State<PaymentAppState>,
    body: Bytes,
) -> Result<Json<CheckoutResponse>, PaymentApiError> {
    let request: CreateCheckoutRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "invalid checkout request body");
        PaymentApiError::InvalidBody
    })?;

    let result = state.checkout_handler.handle(request.into()).await?;

    Ok(Json(CheckoutResponse {
        token: result.token,
    }))
}

/// OPTIONS on payment endpoints
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Any other method on payment endpoints
pub async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
#[derive(Debug)]
pub enum PaymentApiError {
    Notification(NotificationError),
    Checkout(CheckoutError),
    InvalidBody,
}

impl From<NotificationError> for PaymentApiError {
    fn from(err: NotificationError) -> Self {
        Self::Notification(err)
    }
}

impl From<CheckoutError> for PaymentApiError {
    fn from(err: CheckoutError) -> Self {
        Self::Checkout(err)
    }
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            PaymentApiError::Notification(err) => (err.status_code(), err.to_string()),
            PaymentApiError::Checkout(err @ CheckoutError::MissingFields) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            PaymentApiError::Checkout(err @ CheckoutError::Gateway(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            PaymentApiError::InvalidBody => {
                (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
