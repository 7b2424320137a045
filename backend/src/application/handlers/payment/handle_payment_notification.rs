//! HandlePaymentNotificationHandler - processes Midtrans payment notifications.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use http::HeaderMap;
use secrecy::SecretString;

use crate::domain::foundation::{DomainError, ErrorCode, OrderId, Timestamp};
use crate::domain::payment::{
    NotificationAction, NotificationError, PaymentNotification, SignatureVerifier,
};
use crate::domain::subscription::{ApplyResult, SubscriptionStatus, SubscriptionUpdate};
use crate::ports::{
    ConfirmationEmail, EmailSender, ReconciliationRecord, ReconciliationReporter,
    ReconciliationStage, SubscriptionRepository,
};

/// Command to handle one notification delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentNotificationCommand {
    /// Raw body bytes, or `None` if the body could not be read.
    pub body: Option<Vec<u8>>,
    pub headers: HeaderMap,
    pub received_at: Timestamp,
}

/// What happened to the confirmation email of an applied notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailDelivery {
    Sent,
    /// The notification carried no customer email.
    SkippedNoAddress,
    /// The action does not send email.
    NotRequired,
    /// Delivery failed; reported for reconciliation.
    Failed(String),
}

/// Result of dispatching an authenticated notification.
///
/// All variants are acknowledged to Midtrans with 200.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationOutcome {
    Applied {
        order_id: OrderId,
        status: SubscriptionStatus,
        email: EmailDelivery,
    },
    /// A newer or identical state is already stored.
    Superseded { order_id: OrderId },
    /// The store write failed or timed out; reported for reconciliation.
    ApplyFailed { order_id: OrderId, reason: String },
    /// Status with no subscription effect.
    Unhandled {
        order_id: OrderId,
        transaction_status: Option<String>,
    },
}

/// Handler for Midtrans payment notifications.
///
/// Authenticates the delivery, maps the transaction state to a subscription
/// update and sends the confirmation email. Downstream failures never change
/// the acknowledgement; they are reported instead.
pub struct HandlePaymentNotificationHandler {
    server_key: Option<SecretString>,
    verifier: SignatureVerifier,
    repository: Arc<dyn SubscriptionRepository>,
    email_sender: Arc<dyn EmailSender>,
    reporter: Arc<dyn ReconciliationReporter>,
    downstream_timeout: Duration,
}

impl HandlePaymentNotificationHandler {
    pub fn new(
        server_key: Option<SecretString>,
        verifier: SignatureVerifier,
        repository: Arc<dyn SubscriptionRepository>,
        email_sender: Arc<dyn EmailSender>,
        reporter: Arc<dyn ReconciliationReporter>,
    ) -> Self {
        Self {
            server_key,
            verifier,
            repository,
            email_sender,
            reporter,
            downstream_timeout: Duration::from_secs(10),
        }
    }

    /// Bound for each store write and email send.
    pub fn with_downstream_timeout(mut self, timeout: Duration) -> Self {
        self.downstream_timeout = timeout;
        self
    }

    pub async fn handle(
        &self,
        cmd: HandlePaymentNotificationCommand,
    ) -> Result<NotificationOutcome, NotificationError> {
        // 1. Configuration
        let Some(server_key) = &self.server_key else {
            tracing::error!("Midtrans server key is not configured");
            return Err(NotificationError::ServerMisconfigured);
        };

        // 2. Raw body, as text
        let body = cmd.body.ok_or(NotificationError::UnreadableBody)?;
        if std::str::from_utf8(&body).is_err() {
            tracing::warn!("notification body is not valid UTF-8");
            return Err(NotificationError::UnreadableBody);
        }

        // 3. Signature over the exact bytes received
        if !self.verifier.verify(&body, &cmd.headers, server_key)? {
            return Err(NotificationError::InvalidSignature);
        }

        // 4. Parse
        let notification = PaymentNotification::from_slice(&body).map_err(|e| {
            tracing::warn!(error = ?e, "notification body rejected");
            e
        })?;

        // 5. Required fields
        let order_id = notification.order_id()?;

        // 6. Dispatch
        Ok(self.dispatch(&notification, order_id, cmd.received_at).await)
    }

    async fn dispatch(
        &self,
        notification: &PaymentNotification,
        order_id: OrderId,
        received_at: Timestamp,
    ) -> NotificationOutcome {
        tracing::info!(
            order_id = %order_id,
            transaction_status = notification.transaction_status.as_deref().unwrap_or("-"),
            fraud_status = notification.fraud_status.as_deref().unwrap_or("-"),
            payment_type = notification.payment_type.as_deref().unwrap_or("-"),
            gross_amount = %notification.gross_amount_display(),
            transaction_id = notification.transaction_id.as_deref().unwrap_or("-"),
            "payment notification received"
        );

        let action = NotificationAction::for_status(
            notification.status().as_ref(),
            notification.fraud().as_ref(),
        );
        let now = Timestamp::now();
        let observed_at = notification.observed_at(received_at);

        let Some(update) = action.to_update(order_id.clone(), observed_at, now) else {
            tracing::info!(
                order_id = %order_id,
                transaction_status = notification.transaction_status.as_deref().unwrap_or("-"),
                fraud_status = notification.fraud_status.as_deref().unwrap_or("-"),
                "unhandled transaction status, no change"
            );
            return NotificationOutcome::Unhandled {
                order_id,
                transaction_status: notification.transaction_status.clone(),
            };
        };

        let applied = match self
            .bounded("subscription write", self.repository.apply_if_newer(&update))
            .await
        {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "subscription update failed");
                self.report(notification, &order_id, ReconciliationStage::StoreWrite, &e)
                    .await;
                return NotificationOutcome::ApplyFailed {
                    order_id,
                    reason: e.to_string(),
                };
            }
        };

        if applied == ApplyResult::Superseded {
            tracing::info!(
                order_id = %order_id,
                status = %update.status,
                "stored subscription is newer, notification superseded"
            );
            return NotificationOutcome::Superseded { order_id };
        }

        tracing::info!(
            order_id = %order_id,
            status = %update.status,
            plan_id = update.plan_id.as_ref().map(|p| p.as_str()).unwrap_or("-"),
            result = ?applied,
            "subscription updated"
        );

        let email = if action.sends_confirmation() {
            self.send_confirmation(notification, &update).await
        } else {
            EmailDelivery::NotRequired
        };

        NotificationOutcome::Applied {
            order_id,
            status: update.status,
            email,
        }
    }

    async fn send_confirmation(
        &self,
        notification: &PaymentNotification,
        update: &SubscriptionUpdate,
    ) -> EmailDelivery {
        let order_id = &update.order_id;
        let Some(to) = notification.customer_email() else {
            tracing::warn!(order_id = %order_id, "no customer email in notification, skipping confirmation");
            return EmailDelivery::SkippedNoAddress;
        };

        let email = ConfirmationEmail {
            to: to.to_string(),
            order_id: order_id.clone(),
            plan_id: update.plan_id.clone(),
            expires_at: update.expires_at,
        };

        let sent = self
            .bounded("confirmation email", async {
                self.email_sender
                    .send_payment_confirmation(&email)
                    .await
                    .map_err(|e| DomainError::new(ErrorCode::ExternalServiceError, e.to_string()))
            })
            .await;

        match sent {
            Ok(()) => {
                tracing::info!(order_id = %order_id, "confirmation email sent");
                EmailDelivery::Sent
            }
            Err(e) => {
                tracing::error!(order_id = %order_id, error = %e, "confirmation email failed");
                self.report(notification, order_id, ReconciliationStage::ConfirmationEmail, &e)
                    .await;
                EmailDelivery::Failed(e.to_string())
            }
        }
    }

    /// Runs a downstream call under the configured timeout.
    async fn bounded<T>(
        &self,
        what: &'static str,
        call: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        match tokio::time::timeout(self.downstream_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::new(
                ErrorCode::Timeout,
                format!("{} timed out after {:?}", what, self.downstream_timeout),
            )),
        }
    }

    async fn report(
        &self,
        notification: &PaymentNotification,
        order_id: &OrderId,
        stage: ReconciliationStage,
        error: &DomainError,
    ) {
        let record = ReconciliationRecord {
            order_id: order_id.clone(),
            transaction_status: notification
                .transaction_status
                .clone()
                .unwrap_or_default(),
            transaction_id: notification.transaction_id.clone(),
            stage,
            reason: error.to_string(),
            occurred_at: Timestamp::now(),
        };
        self.reporter.report(&record).await;
    }
}
