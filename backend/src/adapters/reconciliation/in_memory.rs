//! In-memory reconciliation reporter for testing.
//!
//! Records are kept for the life of the process; not for production use.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};

use crate::ports::{ReconciliationRecord, ReconciliationReporter, ReconciliationStage};

/// Captures every reported record.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReconciliationReporter {
    records: Arc<Mutex<Vec<ReconciliationRecord>>>,
}

impl InMemoryReconciliationReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<ReconciliationRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn count_for_stage(&self, stage: ReconciliationStage) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|r| r.stage == stage)
            .count()
    }
}

#[async_trait]
impl ReconciliationReporter for InMemoryReconciliationReporter {
    async fn report(&self, record: &ReconciliationRecord) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
    }
}
