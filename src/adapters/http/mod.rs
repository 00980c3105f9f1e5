//! HTTP adapters - REST API implementations.

pub mod membership;

// Re-export key types for convenience
pub use membership::membership_router;
pub use membership::MembershipAppState;
