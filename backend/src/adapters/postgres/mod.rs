//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSubscriptionRepository` - Ordered, conditional subscription upserts
//!
//! Schema lives in `migrations/` and is applied at startup with `sqlx::migrate!`.

mod subscription_repository;

pub use subscription_repository::PostgresSubscriptionRepository;
