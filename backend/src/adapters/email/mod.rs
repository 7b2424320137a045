//! Email adapters.
//!
//! - `ResendEmailSender` - Resend HTTP API
//! - `TracingEmailSender` - logs instead of sending (development)

mod resend_sender;
mod tracing_sender;

pub use resend_sender::{ResendConfig, ResendEmailSender};
pub use tracing_sender::TracingEmailSender;
