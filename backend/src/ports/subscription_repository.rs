//! Subscription repository port.
//!
//! Persists the subscription state produced by payment notifications.
//!
//! # Design
//!
//! - **Conditional upsert**: one call creates or updates by `order_id`
//! - **Ordering guard**: an update is written only if its ordering key is
//!   strictly greater than the stored one, so duplicates and stale
//!   deliveries become no-ops
//! - **Atomic**: the comparison and the write happen as one operation, so
//!   concurrent notifications for the same order cannot interleave
//!
//! # Example
//!
//! ```ignore
//! let update = SubscriptionUpdate::activate(order_id, observed_at, Timestamp::now());
//! match repo.apply_if_newer(&update).await? {
//!     ApplyResult::Superseded => { /* already have newer state */ }
//!     _ => send_confirmation().await,
//! }
//! ```

use crate::domain::foundation::{DomainError, OrderId};
use crate::domain::subscription::{ApplyResult, Subscription, SubscriptionUpdate};
use async_trait::async_trait;

/// Repository port for subscription persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Create or update the subscription for `update.order_id`.
    ///
    /// On update, `plan_id` and `expires_at` keep their stored values when the
    /// update leaves them unset.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn apply_if_newer(&self, update: &SubscriptionUpdate) -> Result<ApplyResult, DomainError>;

    /// Find the subscription for an order.
    ///
    /// Returns `None` if no notification for the order was ever applied.
    async fn find_by_order_id(&self, order_id: &OrderId)
        -> Result<Option<Subscription>, DomainError>;
}
