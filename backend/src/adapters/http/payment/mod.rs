//! HTTP adapter for payment endpoints.
//!
//! - `POST /api/payment/webhook` - Midtrans payment notifications
//! - `POST /api/payment/create` - Snap checkout creation

pub mod dto;
pub mod handlers;
pub mod routes;

pub use handlers::{PaymentApiError, PaymentAppState};
pub use routes::{payment_router, payment_routes};
