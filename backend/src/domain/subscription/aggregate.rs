//! Subscription aggregate.

use serde::Serialize;

use crate::domain::foundation::{OrderId, PlanId, SubscriptionId, Timestamp};

use super::status::SubscriptionStatus;
use super::update::{ApplyResult, OrderingKey, SubscriptionUpdate};

/// Access granted by a paid order, keyed by `order_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub order_id: OrderId,
    pub plan_id: Option<PlanId>,
    pub status: SubscriptionStatus,
    pub expires_at: Option<Timestamp>,
    /// Ordering key of the last applied update.
    pub observed_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Creates a subscription from the first update seen for an order.
    pub fn from_update(update: SubscriptionUpdate, now: Timestamp) -> Self {
        Self {
            id: SubscriptionId::new(),
            order_id: update.order_id,
            plan_id: update.plan_id,
            status: update.status,
            expires_at: update.expires_at,
            observed_at: update.observed_at,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn ordering_key(&self) -> OrderingKey {
        OrderingKey {
            observed_at: self.observed_at,
            precedence: self.status.precedence(),
        }
    }

    /// Applies `update` if it is strictly newer than the current state.
    pub fn apply(&mut self, update: SubscriptionUpdate, now: Timestamp) -> ApplyResult {
        if update.ordering_key() <= self.ordering_key() {
            return ApplyResult::Superseded;
        }
        self.status = update.status;
        if update.plan_id.is_some() {
            self.plan_id = update.plan_id;
        }
        if update.expires_at.is_some() {
            self.expires_at = update.expires_at;
        }
        self.observed_at = update.observed_at;
        self.updated_at = now;
        ApplyResult::Updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> OrderId {
        OrderId::new("NEXUS-BASIC-1709276400").unwrap()
    }

    fn at(raw: &str) -> Timestamp {
        Timestamp::parse_midtrans(raw).unwrap()
    }

    fn active_at(raw: &str) -> Subscription {
        Subscription::from_update(
            SubscriptionUpdate::activate(order(), at(raw), at(raw)),
            at(raw),
        )
    }

    #[test]
    fn from_update_copies_fields() {
        let sub = active_at("2024-03-01 10:00:00");

        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert_eq!(sub.plan_id.as_ref().unwrap().as_str(), "basic");
        assert_eq!(sub.expires_at, Some(at("2024-03-01 10:00:00").add_days(30)));
        assert_eq!(sub.created_at, sub.updated_at);
    }

    #[test]
    fn older_deny_does_not_regress_active() {
        let mut sub = active_at("2024-03-01 10:05:00");
        let stale = SubscriptionUpdate::mark(
            order(),
            SubscriptionStatus::Inactive,
            at("2024-03-01 10:00:00"),
        );

        assert_eq!(sub.apply(stale, Timestamp::now()), ApplyResult::Superseded);
        assert_eq!(sub.status, SubscriptionStatus::Active);
    }

    #[test]
    fn redelivery_is_superseded() {
        let mut sub = active_at("2024-03-01 10:05:00");
        let again = SubscriptionUpdate::activate(
            order(),
            at("2024-03-01 10:05:00"),
            at("2024-03-02 00:00:00"),
        );

        assert_eq!(sub.apply(again, Timestamp::now()), ApplyResult::Superseded);
        assert_eq!(sub.expires_at, Some(at("2024-03-01 10:05:00").add_days(30)));
    }

    #[test]
    fn newer_expire_deactivates_and_keeps_expiry() {
        let mut sub = active_at("2024-03-01 10:05:00");
        let expiry = sub.expires_at;
        let newer = SubscriptionUpdate::mark(
            order(),
            SubscriptionStatus::Inactive,
            at("2024-03-02 10:05:00"),
        );

        assert_eq!(sub.apply(newer, Timestamp::now()), ApplyResult::Updated);
        assert_eq!(sub.status, SubscriptionStatus::Inactive);
        assert_eq!(sub.expires_at, expiry);
    }

    #[test]
    fn cancel_observed_with_capture_deactivates() {
        let mut sub = active_at("2024-03-01 10:05:00");
        let cancel = SubscriptionUpdate::mark(
            order(),
            SubscriptionStatus::Inactive,
            at("2024-03-01 10:05:00"),
        );

        assert_eq!(sub.apply(cancel, Timestamp::now()), ApplyResult::Updated);
        assert_eq!(sub.status, SubscriptionStatus::Inactive);
    }

    #[test]
    fn pending_then_settlement_activates() {
        let t = at("2024-03-01 10:00:00");
        let mut sub = Subscription::from_update(
            SubscriptionUpdate::mark(order(), SubscriptionStatus::Pending, t),
            t,
        );

        let settled = SubscriptionUpdate::activate(order(), at("2024-03-01 10:03:00"), t);
        assert_eq!(sub.apply(settled, t), ApplyResult::Updated);
        assert_eq!(sub.status, SubscriptionStatus::Active);
        assert!(sub.expires_at.is_some());
    }
}
