//! Email sender that only logs. Used in development when no Resend key is set.

use async_trait::async_trait;

use crate::ports::{ConfirmationEmail, EmailError, EmailSender};

#[derive(Debug, Clone, Default)]
pub struct TracingEmailSender;

impl TracingEmailSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailSender for TracingEmailSender {
    async fn send_payment_confirmation(&self, email: &ConfirmationEmail) -> Result<(), EmailError> {
        tracing::info!(
            order_id = %email.order_id,
            to = %email.to,
            subject = %email.subject(),
            "email delivery disabled, confirmation logged only"
        );
        Ok(())
    }
}
