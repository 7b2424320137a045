//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes for the webhook and checkout endpoints
//! - `midtrans` - Snap checkout gateway
//! - `postgres` - Subscription persistence
//! - `storage` - In-memory subscription persistence
//! - `email` - Resend and log-only email senders
//! - `reconciliation` - Reporters for acknowledged-but-unapplied notifications

pub mod email;
pub mod http;
pub mod midtrans;
pub mod postgres;
pub mod reconciliation;
pub mod storage;
