//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `payment` - Midtrans notification verification, parsing and dispatch
//! - `subscription` - Subscription state and the ordering guard

pub mod foundation;
pub mod payment;
pub mod subscription;
