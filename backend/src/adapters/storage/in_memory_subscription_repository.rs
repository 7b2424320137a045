//! In-Memory Subscription Repository
//!
//! Keeps subscriptions in a map keyed by order id. The write lock is held
//! across the ordering check and the write, which gives the same
//! atomicity as the PostgreSQL upsert.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, OrderId, Timestamp};
use crate::domain::subscription::{ApplyResult, Subscription, SubscriptionUpdate};
use crate::ports::SubscriptionRepository;

/// In-memory storage for subscriptions
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionRepository {
    subscriptions: Arc<RwLock<HashMap<OrderId, Subscription>>>,
}

impl InMemorySubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriptionRepository for InMemorySubscriptionRepository {
    async fn apply_if_newer(&self, update: &SubscriptionUpdate) -> Result<ApplyResult, DomainError> {
        let now = Timestamp::now();
        let mut subscriptions = self.subscriptions.write().await;

        match subscriptions.get_mut(&update.order_id) {
            Some(existing) => Ok(existing.apply(update.clone(), now)),
            None => {
                subscriptions.insert(
                    update.order_id.clone(),
                    Subscription::from_update(update.clone(), now),
                );
                Ok(ApplyResult::Created)
            }
        }
    }

    async fn find_by_order_id(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<Subscription>, DomainError> {
        Ok(self.subscriptions.read().await.get(order_id).cloned())
    }
}
