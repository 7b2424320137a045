//! Reconciliation reporter that writes one structured error event per record.
//!
//! Log shipping picks these up by `target = "reconciliation"`.

use async_trait::async_trait;

use crate::ports::{ReconciliationRecord, ReconciliationReporter};

#[derive(Debug, Clone, Default)]
pub struct LogReconciliationReporter;

impl LogReconciliationReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReconciliationReporter for LogReconciliationReporter {
    async fn report(&self, record: &ReconciliationRecord) {
        tracing::error!(
            target: "reconciliation",
            order_id = %record.order_id,
            transaction_status = %record.transaction_status,
            transaction_id = record.transaction_id.as_deref().unwrap_or("-"),
            stage = %record.stage,
            reason = %record.reason,
            occurred_at = %record.occurred_at.as_datetime().to_rfc3339(),
            "payment notification acknowledged but not applied"
        );
    }
}
