//! PostgreSQL implementation of SubscriptionRepository.
//!
//! The ordering guard runs inside a single `INSERT ... ON CONFLICT DO UPDATE
//! ... WHERE` statement, so concurrent notifications for one order serialize
//! on the row lock and the older one becomes a no-op.

use crate::domain::foundation::{
    DomainError, ErrorCode, OrderId, PlanId, SubscriptionId, Timestamp,
};
use crate::domain::subscription::{ApplyResult, Subscription, SubscriptionStatus, SubscriptionUpdate};
use crate::ports::SubscriptionRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the SubscriptionRepository port.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    order_id: String,
    plan_id: Option<String>,
    status: String,
    expires_at: Option<DateTime<Utc>>,
    observed_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let status: SubscriptionStatus = row.status.parse().map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid status value: {}", e))
        })?;
        let order_id = OrderId::new(row.order_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid order_id: {}", e))
        })?;
        let plan_id = row
            .plan_id
            .map(PlanId::new)
            .transpose()
            .map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid plan_id: {}", e))
            })?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            order_id,
            plan_id,
            status,
            expires_at: row.expires_at.map(Timestamp::from_datetime),
            observed_at: Timestamp::from_datetime(row.observed_at),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn apply_if_newer(&self, update: &SubscriptionUpdate) -> Result<ApplyResult, DomainError> {
        let now = Timestamp::now();
        let id = SubscriptionId::new();

        // `xmax = 0` only for a freshly inserted tuple. No row back means the
        // WHERE guard rejected the update.
        let inserted: Option<bool> = sqlx::query_scalar(
            r#"
            INSERT INTO subscriptions (
                id, order_id, plan_id, status, expires_at, observed_at, precedence,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ON CONFLICT (order_id) DO UPDATE SET
                plan_id = COALESCE(EXCLUDED.plan_id, subscriptions.plan_id),
                status = EXCLUDED.status,
                expires_at = COALESCE(EXCLUDED.expires_at, subscriptions.expires_at),
                observed_at = EXCLUDED.observed_at,
                precedence = EXCLUDED.precedence,
                updated_at = EXCLUDED.updated_at
            WHERE (subscriptions.observed_at, subscriptions.precedence)
                < (EXCLUDED.observed_at, EXCLUDED.precedence)
            RETURNING (xmax = 0)
            "#,
        )
        .bind(id.as_uuid())
        .bind(update.order_id.as_str())
        .bind(update.plan_id.as_ref().map(|p| p.as_str()))
        .bind(update.status.as_str())
        .bind(update.expires_at.map(|t| *t.as_datetime()))
        .bind(update.observed_at.as_datetime())
        .bind(update.status.precedence())
        .bind(now.as_datetime())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to apply subscription update: {}", e),
            )
            .with_detail("order_id", update.order_id.as_str())
        })?;

        Ok(match inserted {
            Some(true) => ApplyResult::Created,
            Some(false) => ApplyResult::Updated,
            None => ApplyResult::Superseded,
        })
    }

    async fn find_by_order_id(
        &self,
        order_id: &OrderId,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(
            r#"
            SELECT id, order_id, plan_id, status, expires_at, observed_at, created_at, updated_at
            FROM subscriptions
            WHERE order_id = $1
            "#,
        )
        .bind(order_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Failed to find subscription: {}", e))
        })?;

        row.map(Subscription::try_from).transpose()
    }
}
