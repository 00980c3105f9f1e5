//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - In-memory event bus
//! - `membership` - In-memory subject and subscription store
//! - `http` - Axum REST API

pub mod events;
pub mod http;
pub mod membership;

pub use events::InMemoryEventBus;
pub use membership::InMemoryMembershipStore;
