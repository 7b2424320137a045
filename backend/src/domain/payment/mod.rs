//! Payment domain - Midtrans notifications and their effect on subscriptions.
//!
//! # Notification intake
//!
//! 1. Verify the `x-signature` HMAC over the raw body ([`SignatureVerifier`])
//! 2. Parse the body ([`PaymentNotification`])
//! 3. Map transaction state to a subscription effect ([`NotificationAction`])

mod action;
mod errors;
mod notification;
mod signature;
mod transaction_status;

pub use action::NotificationAction;
pub use errors::NotificationError;
pub use notification::{CustomerContact, PaymentNotification};
pub use signature::{
    sign, MissingSignaturePolicy, SignatureError, SignatureVerifier, SIGNATURE_HEADER,
};
pub use transaction_status::{FraudStatus, TransactionStatus};
