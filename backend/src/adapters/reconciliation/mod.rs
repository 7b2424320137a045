//! Reconciliation reporters.
//!
//! - `LogReconciliationReporter` - structured error log per record (production)
//! - `InMemoryReconciliationReporter` - captures records for assertions (testing)

mod in_memory;
mod log_reporter;

pub use in_memory::InMemoryReconciliationReporter;
pub use log_reporter::LogReconciliationReporter;
