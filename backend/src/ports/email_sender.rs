//! Transactional email port.

use crate::domain::foundation::{OrderId, PlanId, Timestamp};
use async_trait::async_trait;
use thiserror::Error;

/// Port for sending transactional email.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Send the "payment received" message for an activated subscription.
    async fn send_payment_confirmation(&self, email: &ConfirmationEmail) -> Result<(), EmailError>;
}

/// Content of a payment confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationEmail {
    pub to: String,
    pub order_id: OrderId,
    pub plan_id: Option<PlanId>,
    pub expires_at: Option<Timestamp>,
}

impl ConfirmationEmail {
    pub fn subject(&self) -> String {
        format!("Payment received for order {}", self.order_id)
    }

    /// Plain-text body.
    pub fn text(&self) -> String {
        let plan = self
            .plan_id
            .as_ref()
            .map(|p| format!("NexusEdge {} Plan", p.display_name()))
            .unwrap_or_else(|| "NexusEdge subscription".to_string());
        let mut body = format!(
            "Thank you for your payment.\n\nOrder: {}\nPlan: {}\n",
            self.order_id, plan
        );
        if let Some(expires_at) = &self.expires_at {
            body.push_str(&format!(
                "Active until: {}\n",
                expires_at.as_datetime().format("%Y-%m-%d %H:%M UTC")
            ));
        }
        body
    }
}

/// Email delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email provider unreachable: {0}")]
    Network(String),

    #[error("Email provider rejected message ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> ConfirmationEmail {
        ConfirmationEmail {
            to: "ops@plant.example".to_string(),
            order_id: OrderId::new("NEXUS-PRO-1709276400").unwrap(),
            plan_id: Some(PlanId::new("pro").unwrap()),
            expires_at: Some(Timestamp::parse_midtrans("2024-03-31 07:00:00").unwrap()),
        }
    }

    #[test]
    fn email_sender_is_object_safe() {
        fn _accepts_dyn(_sender: &dyn EmailSender) {}
    }

    #[test]
    fn subject_names_order() {
        assert_eq!(email().subject(), "Payment received for order NEXUS-PRO-1709276400");
    }

    #[test]
    fn text_includes_plan_and_expiry() {
        let text = email().text();
        assert!(text.contains("NexusEdge Pro Plan"));
        assert!(text.contains("Active until: 2024-03-31 00:00 UTC"));
    }

    #[test]
    fn text_without_plan_uses_generic_name() {
        let email = ConfirmationEmail {
            plan_id: None,
            expires_at: None,
            ..email()
        };
        let text = email.text();
        assert!(text.contains("NexusEdge subscription"));
        assert!(!text.contains("Active until"));
    }
}
