//! NexusEdge Billing - Midtrans checkout and payment notifications
//!
//! Backend for the NexusEdge IIoT gateway storefront. Opens Snap checkouts
//! for plan purchases and turns signed Midtrans payment notifications into
//! subscription state plus a confirmation email.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
