//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, roles, timestamps, events, errors)
//! - `membership` - Tier registry, permission resolution and subscriptions

pub mod foundation;
pub mod membership;
