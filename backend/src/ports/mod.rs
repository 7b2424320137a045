//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SubscriptionRepository` - ordered, conditional subscription writes
//! - `PaymentGateway` - hosted checkout creation (Midtrans Snap)
//! - `EmailSender` - transactional email (Resend)
//! - `ReconciliationReporter` - acknowledged notifications that failed downstream

mod email_sender;
mod payment_gateway;
mod reconciliation_reporter;
mod subscription_repository;

pub use email_sender::{ConfirmationEmail, EmailError, EmailSender};
pub use payment_gateway::{
    CustomerDetails, ItemDetail, PaymentError, PaymentErrorCode, PaymentGateway,
    TransactionRequest, TransactionToken,
};
pub use reconciliation_reporter::{
    ReconciliationRecord, ReconciliationReporter, ReconciliationStage,
};
pub use subscription_repository::SubscriptionRepository;
