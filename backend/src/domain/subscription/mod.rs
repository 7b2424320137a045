//! Subscription domain: state granted to a customer by a paid order.

mod aggregate;
mod status;
mod update;

pub use aggregate::Subscription;
pub use status::SubscriptionStatus;
pub use update::{ApplyResult, OrderingKey, SubscriptionUpdate, SUBSCRIPTION_PERIOD_DAYS};
