//! Subject reader port (read side).
//!
//! Supplies the `{ role, subscription }` snapshot of a subject from the
//! identity/session collaborator. How that record is authenticated or stored
//! is outside this crate.
//!
//! # Example
//!
//! ```ignore
//! async fn can_create_signals(
//!     reader: &dyn SubjectReader,
//!     registry: &TierRegistry,
//!     user_id: &UserId,
//! ) -> Result<bool, DomainError> {
//!     let subject = reader.get_subject(user_id).await?;
//!     let (tier, privileged) = subject
//!         .map(|s| (s.tier_key(), s.is_privileged()))
//!         .unwrap_or((None, false));
//!     Ok(registry.has_permission(tier, Permission::CanCreateSignals, privileged))
//! }
//! ```

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::Subject;

/// Reader port for subject snapshots.
///
/// Implementations may serve slightly stale data; gating decisions tolerate it.
#[async_trait]
pub trait SubjectReader: Send + Sync {
    /// Get the subject record for a user.
    ///
    /// Returns `None` if the identity collaborator does not know the user.
    async fn get_subject(&self, user_id: &UserId) -> Result<Option<Subject>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_reader_is_object_safe() {
        fn _accepts_dyn(_reader: &dyn SubjectReader) {}
    }
}
