//! Subscription updates derived from payment notifications.

use crate::domain::foundation::{OrderId, PlanId, Timestamp};

use super::status::SubscriptionStatus;

/// Days of access granted by one successful payment.
pub const SUBSCRIPTION_PERIOD_DAYS: i64 = 30;

/// Position of an update in the history of one order.
///
/// Compared field by field: later `observed_at` wins, and `precedence`
/// breaks ties between updates observed at the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OrderingKey {
    pub observed_at: Timestamp,
    pub precedence: i16,
}

/// An absolute state assignment for one order's subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionUpdate {
    pub order_id: OrderId,
    pub plan_id: Option<PlanId>,
    pub status: SubscriptionStatus,
    /// Set on activation. `None` keeps whatever expiry is stored.
    pub expires_at: Option<Timestamp>,
    pub observed_at: Timestamp,
}

impl SubscriptionUpdate {
    /// Activates the subscription for one period starting at `now`.
    pub fn activate(order_id: OrderId, observed_at: Timestamp, now: Timestamp) -> Self {
        Self {
            plan_id: order_id.plan_id(),
            order_id,
            status: SubscriptionStatus::Active,
            expires_at: Some(now.add_days(SUBSCRIPTION_PERIOD_DAYS)),
            observed_at,
        }
    }

    /// Moves the subscription to a non-active status, keeping its expiry.
    pub fn mark(order_id: OrderId, status: SubscriptionStatus, observed_at: Timestamp) -> Self {
        Self {
            plan_id: order_id.plan_id(),
            order_id,
            status,
            expires_at: None,
            observed_at,
        }
    }

    pub fn ordering_key(&self) -> OrderingKey {
        OrderingKey {
            observed_at: self.observed_at,
            precedence: self.status.precedence(),
        }
    }
}

/// What the store did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyResult {
    /// First update for this order.
    Created,
    /// Replaced an older state.
    Updated,
    /// The stored state is as new or newer; nothing was written.
    Superseded,
}

impl ApplyResult {
    pub fn was_applied(&self) -> bool {
        !matches!(self, ApplyResult::Superseded)
    }
}
