//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, roles, events and error types
//! that form the vocabulary of the membership domain.

mod errors;
mod events;
mod ids;
mod role;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{DomainEvent, EventEnvelope};
pub use ids::{EventId, UserId};
pub use role::Role;
pub use timestamp::Timestamp;
