//! Midtrans payment gateway adapter.
//!
//! Hosted checkout through the Snap API. Notification handling lives in the
//! payment domain and the HTTP adapter; this module only talks outbound.

mod snap_adapter;
mod snap_types;

pub use snap_adapter::{MidtransSnapAdapter, SnapConfig};
