//! HTTP adapters - REST API implementations.

pub mod middleware;
pub mod payment;

pub use middleware::with_middleware;
pub use payment::{payment_router, PaymentAppState};
