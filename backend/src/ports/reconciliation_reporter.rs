//! Reconciliation reporter port.
//!
//! Notifications are acknowledged even when a downstream step fails, because
//! Midtrans retries are not a substitute for repair. Every such failure is
//! handed to this port so operations can re-apply it from the processor's
//! transaction status API.

use crate::domain::foundation::{OrderId, Timestamp};
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// Port for recording acknowledged-but-unapplied notifications.
///
/// Reporting is best effort and never fails the request.
#[async_trait]
pub trait ReconciliationReporter: Send + Sync {
    async fn report(&self, record: &ReconciliationRecord);
}

/// Which downstream step failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconciliationStage {
    StoreWrite,
    ConfirmationEmail,
}

impl fmt::Display for ReconciliationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconciliationStage::StoreWrite => write!(f, "store_write"),
            ReconciliationStage::ConfirmationEmail => write!(f, "confirmation_email"),
        }
    }
}

/// A notification that was acknowledged but not fully applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconciliationRecord {
    pub order_id: OrderId,
    pub transaction_status: String,
    pub transaction_id: Option<String>,
    pub stage: ReconciliationStage,
    pub reason: String,
    pub occurred_at: Timestamp,
}
