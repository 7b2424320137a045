//! Payment handlers.
//!
//! ## Commands
//! - Creating a Snap checkout for a plan purchase
//! - Processing Midtrans payment notifications

mod create_checkout;
mod handle_payment_notification;

pub use create_checkout::{
    CheckoutError, CreateCheckoutCommand, CreateCheckoutHandler, CreateCheckoutResult,
};
pub use handle_payment_notification::{
    EmailDelivery, HandlePaymentNotificationCommand, HandlePaymentNotificationHandler,
    NotificationOutcome,
};
