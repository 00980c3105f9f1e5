//! Membership adapters - implementations of membership-related ports.
//!
//! - `InMemoryMembershipStore` - Subject and subscription storage held in memory

mod in_memory_store;

pub use in_memory_store::InMemoryMembershipStore;
