//! Storage Adapters
//!
//! In-process implementations of persistence ports.
//!
//! ## Available Adapters
//!
//! - **InMemorySubscriptionRepository** - Subscriptions held in a map (development/testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemorySubscriptionRepository;
//!
//! let repo = Arc::new(InMemorySubscriptionRepository::new());
//! ```

mod in_memory_subscription_repository;

pub use in_memory_subscription_repository::InMemorySubscriptionRepository;
