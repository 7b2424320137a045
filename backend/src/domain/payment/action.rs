//! Dispatch table from reported transaction state to subscription effect.

use crate::domain::foundation::{OrderId, Timestamp};
use crate::domain::subscription::{SubscriptionStatus, SubscriptionUpdate};

use super::transaction_status::{FraudStatus, TransactionStatus};

/// Effect a notification has on the order's subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    /// Grant access and send a confirmation email.
    Activate,
    /// Card capture held for fraud review.
    MarkChallenge,
    MarkPending,
    Deactivate,
    /// No state change.
    Ignore,
}

impl NotificationAction {
    pub fn for_status(status: Option<&TransactionStatus>, fraud: Option<&FraudStatus>) -> Self {
        match (status, fraud) {
            (Some(TransactionStatus::Capture), Some(FraudStatus::Accept)) => Self::Activate,
            (Some(TransactionStatus::Capture), Some(FraudStatus::Challenge)) => Self::MarkChallenge,
            (Some(TransactionStatus::Capture), _) => Self::Ignore,
            (Some(TransactionStatus::Settlement), _) => Self::Activate,
            (Some(TransactionStatus::Pending), _) => Self::MarkPending,
            (Some(TransactionStatus::Deny), _)
            | (Some(TransactionStatus::Cancel), _)
            | (Some(TransactionStatus::Expire), _) => Self::Deactivate,
            (Some(TransactionStatus::Unknown(_)), _) | (None, _) => Self::Ignore,
        }
    }

    pub fn sends_confirmation(&self) -> bool {
        matches!(self, Self::Activate)
    }

    /// Builds the store update, or `None` when the action changes nothing.
    pub fn to_update(
        &self,
        order_id: OrderId,
        observed_at: Timestamp,
        now: Timestamp,
    ) -> Option<SubscriptionUpdate> {
        let status = match self {
            Self::Activate => return Some(SubscriptionUpdate::activate(order_id, observed_at, now)),
            Self::MarkChallenge => SubscriptionStatus::Challenge,
            Self::MarkPending => SubscriptionStatus::Pending,
            Self::Deactivate => SubscriptionStatus::Inactive,
            Self::Ignore => return None,
        };
        Some(SubscriptionUpdate::mark(order_id, status, observed_at))
    }
}
